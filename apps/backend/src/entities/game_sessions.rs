use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// One row per session. `snapshot` is the JSON-encoded aggregate; `host`,
/// `phase` and `version` are copied out of it for inspection and the
/// compare-and-swap filter.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub host: String,
    pub phase: String,
    pub version: i32,
    #[sea_orm(column_type = "Text")]
    pub snapshot: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
