use thiserror::Error;

/// A single failed precondition on client input.
///
/// The `Display` text is the message returned to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Campos obrigatórios: nome, servico, data, hora.")]
    MissingFields,
    #[error("Nome deve ter no máximo 80 caracteres.")]
    NameTooLong,
    #[error("Formato de data inválido. Use dd-mm-aaaa, ex: 21-11-2025.")]
    InvalidDate,
    #[error("Formato de hora inválido. Use hh:mm, ex: 14:30.")]
    InvalidTime,
    #[error("Não é permitido criar agendamentos em datas passadas.")]
    PastDate,
    #[error("ID inválido.")]
    InvalidId,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(String),
}
