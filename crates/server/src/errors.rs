use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::errors::ServiceError;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Agendamento não encontrado.";

/// Error response rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a service failure. `internal` is the only text a client sees for
    /// anything other than a validation or lookup failure.
    pub fn from_service(err: ServiceError, internal: &'static str) -> Self {
        match err {
            ServiceError::Validation(v) => Self::bad_request(v.to_string()),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            other => {
                error!(error = %other, "{internal}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::{ModelError, ValidationError};

    #[test]
    fn validation_maps_to_400_with_rule_message() {
        let e = ApiError::from_service(ValidationError::NameTooLong.into(), "Erro");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Nome deve ter no máximo 80 caracteres.");
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = ApiError::from_service(ServiceError::not_found("agendamento"), "Erro");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn database_failures_hide_details() {
        let e = ApiError::from_service(ServiceError::Db("connection refused".into()), "Erro ao listar agendamentos.");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Erro ao listar agendamentos.");

        let e = ApiError::from_service(ModelError::Db("disk full".into()).into(), "Erro ao criar agendamento.");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Erro ao criar agendamento.");
    }
}
