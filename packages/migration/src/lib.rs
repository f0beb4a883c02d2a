pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;

mod m20261017_000001_game_sessions; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261017_000001_game_sessions::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Status,
}

/// Run a migration command against an already-connected database.
///
/// The backend calls this with `Up` while bootstrapping the SQLite store, so a
/// fresh database file is usable without a separate migration step.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let applied_before = count_applied_migrations(db).await.unwrap_or(0);
    let defined = Migrator::migrations().len();
    tracing::info!(?command, applied_before, defined, "running migrations");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            let applied_after = count_applied_migrations(db).await.unwrap_or(0);
            tracing::info!(?command, applied_after, "migrations complete");
            Ok(())
        }
        Err(e) => {
            tracing::error!(?command, error = %e, "migration command failed");
            Err(e)
        }
    }
}

/// Number of applied migrations; 0 when the bookkeeping table is missing.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the most recently applied migration, if any.
pub async fn get_latest_migration_version(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
