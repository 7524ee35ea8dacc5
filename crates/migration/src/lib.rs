//! Migrator registering the schema migrations in order.
pub use sea_orm_migration::prelude::*;

mod m20251121_000001_create_agendamento;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251121_000001_create_agendamento::Migration)]
    }
}
