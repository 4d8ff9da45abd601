//! Reports Entity
//!
//! A post-mission narrative document tied to one approved or completed
//! mission authorization. Carries its own review lifecycle:
//! draft/rejected are the editable states, submitted and under-review are
//! in-flight, approved is terminal. Identified externally by a
//! `report_number` of the form `RPT-<yyyymm>-<seq>`, unique per calendar
//! month and backed by a unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:               Uuid,
    pub user_id:          Uuid,
    pub member_id:        Uuid,
    pub authorization_id: Uuid,
    #[sea_orm(unique)]
    pub report_number:    String,
    pub title:            String,
    #[sea_orm(column_type = "Text")]
    pub content:          String,
    pub report_type:      ReportType,
    pub status:           ReportStatus,
    pub reviewed_by:      Option<Uuid>,
    pub review_notes:     Option<String>,
    pub submitted_at:     Option<chrono::DateTime<chrono::Utc>>,
    pub reviewed_at:      Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
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
    #[sea_orm(
        belongs_to = "super::mission_authorizations::Entity",
        from = "Column::AuthorizationId",
        to = "super::mission_authorizations::Column::Id"
    )]
    MissionAuthorizations,
    #[sea_orm(has_many = "super::report_attachments::Entity")]
    ReportAttachments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Users.def() }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef { Relation::Members.def() }
}

impl Related<super::mission_authorizations::Entity> for Entity {
    fn to() -> RelationDef { Relation::MissionAuthorizations.def() }
}

impl Related<super::report_attachments::Entity> for Entity {
    fn to() -> RelationDef { Relation::ReportAttachments.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Report type classification
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReportType {
    /// Post-mission report tied to a completed trip
    #[sea_orm(string_value = "mission")]
    Mission,
    /// Periodic activity summary
    #[sea_orm(string_value = "activity")]
    Activity,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Mission => write!(f, "mission"),
            ReportType::Activity => write!(f, "activity"),
        }
    }
}

/// Report status enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReportStatus {
    /// Editable, not yet submitted
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting review; content is frozen
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Picked up by a reviewer; content is frozen
    #[sea_orm(string_value = "under-review")]
    UnderReview,
    /// Accepted; terminal
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined; editable again and may be resubmitted
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ReportStatus {
    /// Whether the report content may still be edited.
    pub fn is_editable(self) -> bool { matches!(self, ReportStatus::Draft | ReportStatus::Rejected) }

    /// Whether a submit transition is legal from this status.
    pub fn can_submit(self) -> bool { matches!(self, ReportStatus::Draft | ReportStatus::Rejected) }

    /// Whether a review decision (approve or reject) is legal from this status.
    pub fn can_review(self) -> bool { matches!(self, ReportStatus::Submitted | ReportStatus::UnderReview) }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Draft => write!(f, "draft"),
            ReportStatus::Submitted => write!(f, "submitted"),
            ReportStatus::UnderReview => write!(f, "under-review"),
            ReportStatus::Approved => write!(f, "approved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}
