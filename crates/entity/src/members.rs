//! Members Entity
//!
//! Profile of a person who can travel on missions. Owned by an account;
//! `employee_id` is unique across the organization. Deletion is soft, via
//! the `inactive` status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:          Uuid,
    pub user_id:     Uuid,
    pub first_name:  String,
    pub last_name:   String,
    pub middle_name: Option<String>,
    pub email:       Option<String>,
    pub phone:       Option<String>,
    pub position:    Option<String>,
    pub department:  Option<String>,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub status:      MemberStatus,
    pub created_at:  chrono::DateTime<chrono::Utc>,
    pub updated_at:  chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::mission_authorizations::Entity")]
    MissionAuthorizations,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Users.def() }
}

impl Related<super::mission_authorizations::Entity> for Entity {
    fn to() -> RelationDef { Relation::MissionAuthorizations.def() }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reports.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name).trim().to_string() }
}

/// Member profile status (soft delete)
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MemberStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "active"),
            MemberStatus::Inactive => write!(f, "inactive"),
        }
    }
}
