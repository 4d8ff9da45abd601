//! Mission Authorizations Entity
//!
//! A travel request for one member. Editable and deletable only while in
//! `draft`; approval stamps the authorizer fields. Identified externally by
//! an `authorization_number` of the form `MA-<year>-<seq>`, unique per
//! calendar year and backed by a unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "mission_authorizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                     Uuid,
    pub user_id:                Uuid,
    pub member_id:              Uuid,
    #[sea_orm(unique)]
    pub authorization_number:   String,
    pub purpose:                String,
    pub destination:            String,
    pub departure_date:         Date,
    pub return_date:            Date,
    pub duration_days:          i32,
    pub status:                 MissionStatus,
    pub authorized_by:          Option<String>,
    pub authorized_by_position: Option<String>,
    pub authorization_date:     Option<Date>,
    pub created_at:             chrono::DateTime<chrono::Utc>,
    pub updated_at:             chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id"
    )]
    Members,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Users.def() }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef { Relation::Members.def() }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reports.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Mission authorization status enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MissionStatus {
    /// Editable, not yet routed for approval
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting an admin decision
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Authorized for travel
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined by an admin
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Travel finished; reports may still reference it
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl MissionStatus {
    /// Whether the mission may still be edited or deleted.
    pub fn is_editable(self) -> bool { matches!(self, MissionStatus::Draft) }

    /// Whether an approval transition is legal from this status.
    pub fn can_approve(self) -> bool { matches!(self, MissionStatus::Draft | MissionStatus::Pending) }

    /// Whether a report may be filed against a mission in this status.
    pub fn accepts_reports(self) -> bool { matches!(self, MissionStatus::Approved | MissionStatus::Completed) }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionStatus::Draft => write!(f, "draft"),
            MissionStatus::Pending => write!(f, "pending"),
            MissionStatus::Approved => write!(f, "approved"),
            MissionStatus::Rejected => write!(f, "rejected"),
            MissionStatus::Completed => write!(f, "completed"),
        }
    }
}
