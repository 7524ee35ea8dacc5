//! Appointment (`agendamento`) entity and its creation rules.
//!
//! `data` and `hora` are stored exactly as received; the date is only turned
//! into a calendar value to reject past dates.
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ValidationError};

pub const NOME_MAX_LEN: usize = 80;
pub const DATE_PATTERN: &str = r"^([0-2]\d|3[01])-(0\d|1[0-2])-\d{4}$";
pub const TIME_PATTERN: &str = r"^([01]\d|2[0-3]):[0-5]\d$";

static DATE_RE: Lazy<Regex> = Lazy::new(|| ascii_regex(DATE_PATTERN));
static TIME_RE: Lazy<Regex> = Lazy::new(|| ascii_regex(TIME_PATTERN));

// `\d` must only match ASCII digits.
fn ascii_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("static pattern compiles")
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agendamento")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub nome: String,
    #[sea_orm(column_type = "Text")]
    pub servico: String,
    pub data: String,
    pub hora: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Raw creation input. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewAgendamento {
    pub nome: Option<String>,
    pub servico: Option<String>,
    pub data: Option<String>,
    pub hora: Option<String>,
}

/// Input that passed every creation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendamentoFields {
    pub nome: String,
    pub servico: String,
    pub data: String,
    pub hora: String,
}

impl NewAgendamento {
    /// Apply the creation rules in order, stopping at the first failure.
    pub fn validate(self, today: NaiveDate) -> Result<AgendamentoFields, ValidationError> {
        let (Some(nome), Some(servico), Some(data), Some(hora)) = (
            non_empty(self.nome),
            non_empty(self.servico),
            non_empty(self.data),
            non_empty(self.hora),
        ) else {
            return Err(ValidationError::MissingFields);
        };
        validate_nome(&nome)?;
        validate_data(&data)?;
        validate_hora(&hora)?;
        let date = calendar_date(&data).ok_or(ValidationError::InvalidDate)?;
        ensure_not_past(date, today)?;
        Ok(AgendamentoFields { nome, servico, data, hora })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Length is measured in UTF-16 code units, as browsers count it.
pub fn validate_nome(nome: &str) -> Result<(), ValidationError> {
    if nome.trim().encode_utf16().count() > NOME_MAX_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

pub fn validate_data(data: &str) -> Result<(), ValidationError> {
    if !DATE_RE.is_match(data) {
        return Err(ValidationError::InvalidDate);
    }
    Ok(())
}

pub fn validate_hora(hora: &str) -> Result<(), ValidationError> {
    if !TIME_RE.is_match(hora) {
        return Err(ValidationError::InvalidTime);
    }
    Ok(())
}

/// Calendar date for a `dd-mm-yyyy` string.
///
/// Out-of-range parts roll over: day `00` is the last day of the previous
/// month, `31-04-2030` is 1 May 2030, month `00` is December of the year before.
pub fn calendar_date(data: &str) -> Option<NaiveDate> {
    let mut parts = data.splitn(3, '-');
    let dia: i64 = parts.next()?.parse().ok()?;
    let mes: i32 = parts.next()?.parse().ok()?;
    let ano: i32 = parts.next()?.parse().ok()?;

    let months = ano.checked_mul(12)?.checked_add(mes - 1)?;
    let first = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_signed(Duration::days(dia - 1))
}

pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date < today {
        return Err(ValidationError::PastDate);
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, fields: AgendamentoFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        nome: Set(fields.nome),
        servico: Set(fields.servico),
        data: Set(fields.data),
        hora: Set(fields.hora),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
