//! Sessions Entity
//!
//! Server-side sessions. Only the SHA-256 hash of the session token is
//! stored; the CSRF token is generated lazily on first use and lives for
//! the session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:           Uuid,
    pub user_id:      Uuid,
    #[sea_orm(unique)]
    pub token_hash:   String,
    pub csrf_token:   Option<String>,
    pub created_at:   chrono::DateTime<chrono::Utc>,
    pub expires_at:   chrono::DateTime<chrono::Utc>,
    pub last_seen_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Users.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the session has passed its expiry instant.
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool { now >= self.expires_at }
}
