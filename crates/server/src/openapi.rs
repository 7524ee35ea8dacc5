use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct NewAgendamentoDoc {
    /// Client name, at most 80 characters once trimmed
    pub nome: String,
    pub servico: String,
    /// `dd-mm-yyyy`, not earlier than today
    pub data: String,
    /// `HH:MM`, 24-hour
    pub hora: String,
}

#[derive(ToSchema)]
pub struct AgendamentoDoc {
    pub id: i32,
    pub nome: String,
    pub servico: String,
    pub data: String,
    pub hora: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::agendamentos::create,
        crate::routes::agendamentos::list,
        crate::routes::agendamentos::get,
        crate::routes::agendamentos::delete,
    ),
    components(
        schemas(
            MessageDoc,
            NewAgendamentoDoc,
            AgendamentoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "agendamentos")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
