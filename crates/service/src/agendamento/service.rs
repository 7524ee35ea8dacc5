use std::sync::Arc;

use chrono::{Local, NaiveDate};
use models::agendamento::{Model, NewAgendamento};
use models::errors::ValidationError;
use tracing::{info, instrument};

use crate::agendamento::repository::AgendamentoRepository;
use crate::errors::ServiceError;

/// Application service for appointments.
///
/// Stateless between calls: every operation goes straight to the repository.
#[derive(Clone)]
pub struct AgendamentoService {
    repo: Arc<dyn AgendamentoRepository>,
    today: fn() -> NaiveDate,
}

/// The server's local calendar day.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl AgendamentoService {
    pub fn new(repo: Arc<dyn AgendamentoRepository>) -> Self { Self::with_clock(repo, local_today) }

    /// Use `today` instead of the local clock to decide what counts as a past date.
    pub fn with_clock(repo: Arc<dyn AgendamentoRepository>, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }

    /// Validate and store a new appointment, judging past dates against the
    /// service clock.
    pub async fn create(&self, input: NewAgendamento) -> Result<Model, ServiceError> {
        self.create_on(input, (self.today)()).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_on(&self, input: NewAgendamento, today: NaiveDate) -> Result<Model, ServiceError> {
        let fields = input.validate(today)?;
        let created = self.repo.create(fields).await?;
        info!(id = created.id, data = %created.data, hora = %created.hora, "created agendamento");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Model, ServiceError> {
        let Some(id) = parse_id(raw_id)? else {
            return Err(ServiceError::not_found("agendamento"));
        };
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("agendamento"))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let Some(id) = parse_id(raw_id)? else {
            return Err(ServiceError::not_found("agendamento"));
        };
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("agendamento"));
        }
        info!(id, "deleted agendamento");
        Ok(())
    }
}

/// Parse a path id with JavaScript `Number()` rules.
///
/// Only text that is not a number at all is invalid. Numbers that cannot be a
/// key (fractions, infinities, values outside `i32`) come back as `None`.
pub fn parse_id(raw: &str) -> Result<Option<i32>, ValidationError> {
    let n = parse_number(raw).ok_or(ValidationError::InvalidId)?;
    if n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
        return Ok(None);
    }
    Ok(Some(n as i32))
}

/// `Number(text)`: `None` stands for `NaN`.
fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        // digits are valid, so failure here only means overflow
        return Some(u64::from_str_radix(digits, radix).map_or(f64::INFINITY, |v| v as f64));
    }
    // keep Rust-only spellings like `inf` or `nan` out
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agendamento::repository::SeaOrmAgendamentoRepository;
    use crate::test_support::get_db;

    async fn service() -> anyhow::Result<AgendamentoService> {
        let db = get_db().await?;
        Ok(AgendamentoService::new(Arc::new(SeaOrmAgendamentoRepository::new(db))))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn input(nome: &str, data: &str) -> NewAgendamento {
        NewAgendamento {
            nome: Some(nome.into()),
            servico: Some("Manicure".into()),
            data: Some(data.into()),
            hora: Some("09:15".into()),
        }
    }

    #[test]
    fn parse_id_integers() {
        assert_eq!(parse_id("42"), Ok(Some(42)));
        assert_eq!(parse_id(" 7 "), Ok(Some(7)));
        assert_eq!(parse_id("-3"), Ok(Some(-3)));
        assert_eq!(parse_id("+5"), Ok(Some(5)));
    }

    #[test]
    fn parse_id_number_spellings() {
        assert_eq!(parse_id("1.0"), Ok(Some(1)));
        assert_eq!(parse_id("1e0"), Ok(Some(1)));
        assert_eq!(parse_id("1."), Ok(Some(1)));
        assert_eq!(parse_id("0x1"), Ok(Some(1)));
        assert_eq!(parse_id("0o17"), Ok(Some(15)));
        assert_eq!(parse_id("0b101"), Ok(Some(5)));
        assert_eq!(parse_id(""), Ok(Some(0)));
        assert_eq!(parse_id("   "), Ok(Some(0)));
        assert_eq!(parse_id("-0"), Ok(Some(0)));
    }

    #[test]
    fn parse_id_numbers_that_cannot_be_keys() {
        assert_eq!(parse_id("1.5"), Ok(None));
        assert_eq!(parse_id("99999999999"), Ok(None));
        assert_eq!(parse_id("Infinity"), Ok(None));
        assert_eq!(parse_id("-Infinity"), Ok(None));
        assert_eq!(parse_id("0xffffffffffffffffffff"), Ok(None));
    }

    #[test]
    fn parse_id_not_a_number() {
        for raw in ["abc", "1a", "0x", "0xg", "-0x1", "inf", "nan", "NaN", "1e", "1..0", "--1", "1_000"] {
            assert_eq!(parse_id(raw), Err(ValidationError::InvalidId), "{raw:?}");
        }
    }

    #[tokio::test]
    async fn get_accepts_any_spelling_of_the_id() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create_on(input("Joana", "21-11-2025"), today()).await?;
        assert_eq!(svc.get(&format!("{}.0", created.id)).await?, created);
        assert_eq!(svc.get(&format!("{}e0", created.id)).await?, created);
        assert!(matches!(svc.get(&format!("{}.5", created.id)).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_uses_injected_clock() -> anyhow::Result<()> {
        fn fixed() -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
        }
        let db = get_db().await?;
        let svc = AgendamentoService::with_clock(Arc::new(SeaOrmAgendamentoRepository::new(db)), fixed);
        assert!(svc.create(input("Joana", "20-11-2025")).await.is_ok());
        let err = svc.create(input("Joana", "19-11-2025")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::PastDate)));
        Ok(())
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create_on(input("Joana", "21-11-2025"), today()).await?;
        assert_eq!(created.nome, "Joana");
        assert_eq!(created.servico, "Manicure");
        assert_eq!(created.data, "21-11-2025");
        assert_eq!(created.hora, "09:15");

        let fetched = svc.get(&created.id.to_string()).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_with_real_clock_accepts_far_future() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create(input("Joana", "01-01-2999")).await?;
        assert!(created.id > 0);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_not_persisted() -> anyhow::Result<()> {
        let svc = service().await?;
        let err = svc.create_on(input("Joana", "19-11-2025"), today()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::PastDate)));
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_and_invalid_ids() -> anyhow::Result<()> {
        let svc = service().await?;
        assert!(matches!(svc.get("123").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get("99999999999").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get("abc").await, Err(ServiceError::Validation(ValidationError::InvalidId))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_not_found_when_repeated() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create_on(input("Joana", "21-11-2025"), today()).await?;
        let id = created.id.to_string();

        svc.delete(&id).await?;
        assert!(matches!(svc.get(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete("x1").await, Err(ServiceError::Validation(ValidationError::InvalidId))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicates_are_allowed_and_listed_newest_first() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_on(input("Joana", "21-11-2025"), today()).await?;
        let b = svc.create_on(input("Joana", "21-11-2025"), today()).await?;
        let c = svc.create_on(input("Pedro", "22-11-2025"), today()).await?;

        let ids: Vec<i32> = svc.list().await?.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
        Ok(())
    }
}
