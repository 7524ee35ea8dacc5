use async_trait::async_trait;
use models::agendamento::{AgendamentoFields, Model};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Data access for appointments.
#[async_trait]
pub trait AgendamentoRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn create(&self, fields: AgendamentoFields) -> Result<Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    /// Remove the row in a single statement; `false` when nothing matched.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAgendamentoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAgendamentoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AgendamentoRepository for SeaOrmAgendamentoRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        crate::db::agendamento_service::list_agendamentos(&self.db).await
    }

    async fn create(&self, fields: AgendamentoFields) -> Result<Model, ServiceError> {
        crate::db::agendamento_service::create_agendamento(&self.db, fields).await
    }

    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        crate::db::agendamento_service::get_agendamento(&self.db, id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::agendamento_service::delete_agendamento(&self.db, id).await
    }
}
