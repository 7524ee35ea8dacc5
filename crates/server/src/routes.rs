use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use common::types::Message;
use sea_orm::DatabaseConnection;
use service::agendamento::{AgendamentoService, SeaOrmAgendamentoRepository};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use crate::openapi;

pub mod agendamentos;

pub const ROOT_MESSAGE: &str = "API de Agendamentos - OK";

/// Shared handler state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub agendamentos: AgendamentoService,
}

impl AppState {
    pub fn new(agendamentos: AgendamentoService) -> Self { Self { agendamentos } }

    pub fn from_db(db: DatabaseConnection) -> Self {
        let repo = SeaOrmAgendamentoRepository::new(db);
        Self::new(AgendamentoService::new(Arc::new(repo)))
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new(ROOT_MESSAGE))
}

/// Any origin; GET/POST/DELETE/OPTIONS; only `Content-Type` may be sent.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/agendamentos",
            get(agendamentos::list).post(agendamentos::create),
        )
        .route(
            "/agendamentos/:id",
            get(agendamentos::get).delete(agendamentos::delete),
        )
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
