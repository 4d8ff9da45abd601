//! Users Entity
//!
//! Represents account holders with authentication and profile information.
//! Account status is admin-driven; accounts are never hard-deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    #[sea_orm(unique)]
    pub email:         String,
    pub password_hash: String,
    pub first_name:    String,
    pub last_name:     String,
    pub phone:         Option<String>,
    pub role:          UserRole,
    pub status:        UserStatus,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::members::Entity")]
    Members,
    #[sea_orm(has_many = "super::mission_authorizations::Entity")]
    MissionAuthorizations,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef { Relation::Members.def() }
}

impl Related<super::mission_authorizations::Entity> for Entity {
    fn to() -> RelationDef { Relation::MissionAuthorizations.def() }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reports.def() }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sessions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Full display name, trimmed of surplus whitespace.
    pub fn display_name(&self) -> String { format!("{} {}", self.first_name, self.last_name).trim().to_string() }
}

/// Account role enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Reviews missions and reports, manages accounts
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Submits missions and reports
    #[sea_orm(string_value = "member")]
    Member,
}

/// Account status enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserStatus {
    /// Registered, awaiting admin approval
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and able to log in
    #[sea_orm(string_value = "active")]
    Active,
    /// Registration rejected by an admin
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Suspended by an admin
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Member => write!(f, "member"),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Pending => write!(f, "pending"),
            UserStatus::Active => write!(f, "active"),
            UserStatus::Rejected => write!(f, "rejected"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}
