use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::agendamento::{Model, NewAgendamento};
use models::errors::ValidationError;
use tracing::{info, warn};

use crate::{errors::ApiError, routes::AppState};

pub const CREATE_FAILED: &str = "Erro ao criar agendamento.";
pub const LIST_FAILED: &str = "Erro ao listar agendamentos.";
pub const GET_FAILED: &str = "Erro ao buscar agendamento.";
pub const DELETE_FAILED: &str = "Erro ao deletar agendamento.";

#[utoipa::path(
    post, path = "/agendamentos", tag = "agendamentos",
    request_body = crate::openapi::NewAgendamentoDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AgendamentoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::MessageDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewAgendamento>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), ApiError> {
    // a body that is not a JSON object of strings carries no usable fields
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable agendamento body");
            return Err(ApiError::bad_request(ValidationError::MissingFields.to_string()));
        }
    };
    state
        .agendamentos
        .create(input)
        .await
        .map(|m| (StatusCode::CREATED, Json(m)))
        .map_err(|e| ApiError::from_service(e, CREATE_FAILED))
}

#[utoipa::path(
    get, path = "/agendamentos", tag = "agendamentos",
    responses(
        (status = 200, description = "List OK, newest first", body = [crate::openapi::AgendamentoDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Model>>, ApiError> {
    match state.agendamentos.list().await {
        Ok(list) => { info!(count = list.len(), "list agendamentos"); Ok(Json(list)) }
        Err(e) => Err(ApiError::from_service(e, LIST_FAILED)),
    }
}

#[utoipa::path(
    get, path = "/agendamentos/{id}", tag = "agendamentos",
    params(("id" = String, Path, description = "Agendamento ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AgendamentoDoc),
        (status = 400, description = "Invalid ID", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Lookup Failed", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Model>, ApiError> {
    state
        .agendamentos
        .get(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, GET_FAILED))
}

#[utoipa::path(
    delete, path = "/agendamentos/{id}", tag = "agendamentos",
    params(("id" = String, Path, description = "Agendamento ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid ID", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    match state.agendamentos.delete(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(ApiError::from_service(e, DELETE_FAILED)),
    }
}
