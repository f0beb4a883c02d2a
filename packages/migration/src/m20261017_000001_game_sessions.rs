use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameSessions {
    Table,
    Id,
    Host,
    Phase,
    Version,
    Snapshot,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::Id)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameSessions::Host).string().not_null())
                    .col(ColumnDef::new(GameSessions::Phase).string_len(16).not_null())
                    .col(
                        ColumnDef::new(GameSessions::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    // Whole aggregate as JSON; the other columns are for inspection only.
                    .col(ColumnDef::new(GameSessions::Snapshot).text().not_null())
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_game_sessions_updated_at")
                    .table(GameSessions::Table)
                    .col(GameSessions::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(GameSessions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
