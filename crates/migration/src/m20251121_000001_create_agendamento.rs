//! Create `agendamento` table.
//!
//! Dates and times are kept as the literal strings received (`dd-mm-yyyy`, `HH:MM`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agendamento::Table)
                    .if_not_exists()
                    .col(pk_auto(Agendamento::Id))
                    .col(text(Agendamento::Nome))
                    .col(text(Agendamento::Servico))
                    .col(string_len(Agendamento::Data, 10))
                    .col(string_len(Agendamento::Hora, 5))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Agendamento::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Agendamento { Table, Id, Nome, Servico, Data, Hora }
