//! SeaORM adapter for the `game_sessions` table; generic over ConnectionTrait.
//!
//! Adapter functions return `DbErr`. Failures the caller must tell apart are
//! encoded as tagged `DbErr::Custom` payloads that `infra::db_errors` decodes.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::game_sessions;

pub const SESSION_NOT_FOUND_TAG: &str = "SESSION_NOT_FOUND:";
pub const OPTIMISTIC_LOCK_TAG: &str = "OPTIMISTIC_LOCK:";

/// Columns written for a session row.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: String,
    pub host: String,
    pub phase: String,
    pub version: i32,
    pub snapshot: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(id.to_string())
        .one(conn)
        .await
}

/// Insert a new row. A duplicate id surfaces as a unique constraint error.
pub async fn insert_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row: SessionRow,
) -> Result<(), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = game_sessions::ActiveModel {
        id: Set(row.id),
        host: Set(row.host),
        phase: Set(row.phase),
        version: Set(row.version),
        snapshot: Set(row.snapshot),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_sessions::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Overwrite the row only while its stored version is `expected_version`.
///
/// Zero affected rows means the session is gone or someone else wrote
/// first; a follow-up read tells which.
pub async fn update_if_version<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    expected_version: i32,
    row: SessionRow,
) -> Result<(), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let id = row.id.clone();

    let result = game_sessions::Entity::update_many()
        .col_expr(game_sessions::Column::Phase, Expr::value(row.phase))
        .col_expr(game_sessions::Column::Version, Expr::value(row.version))
        .col_expr(game_sessions::Column::Snapshot, Expr::value(row.snapshot))
        .col_expr(game_sessions::Column::UpdatedAt, Expr::value(now))
        .filter(game_sessions::Column::Id.eq(id.as_str()))
        .filter(game_sessions::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, &id).await? {
            Some(current) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_TAG}{{\"expected\":{expected_version},\"actual\":{}}}",
                current.version
            ))),
            None => Err(sea_orm::DbErr::Custom(format!(
                "{SESSION_NOT_FOUND_TAG}{id}"
            ))),
        };
    }
    Ok(())
}
