use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use models::agendamento::{self, AgendamentoFields, Entity as AgendamentoEntity};
use crate::errors::ServiceError;

/// List every appointment, newest id first.
pub async fn list_agendamentos(db: &DatabaseConnection) -> Result<Vec<agendamento::Model>, ServiceError> {
    let rows = AgendamentoEntity::find()
        .order_by_desc(agendamento::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Insert already validated fields.
pub async fn create_agendamento(db: &DatabaseConnection, fields: AgendamentoFields) -> Result<agendamento::Model, ServiceError> {
    let created = agendamento::create(db, fields).await?;
    Ok(created)
}

/// Get an appointment by id.
pub async fn get_agendamento(db: &DatabaseConnection, id: i32) -> Result<Option<agendamento::Model>, ServiceError> {
    let found = AgendamentoEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Delete an appointment; returns true if a row was removed.
pub async fn delete_agendamento(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = AgendamentoEntity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
