//! Report Attachments Entity
//!
//! A file bound to exactly one report. The original filename is metadata
//! only; the stored filename is randomized and the database row is the
//! source of truth for what exists on disk.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "report_attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                Uuid,
    pub report_id:         Uuid,
    pub original_filename: String,
    pub stored_filename:   String,
    pub file_path:         String,
    pub file_size:         i64,
    pub file_type:         String,
    pub mime_type:         String,
    pub attachment_type:   AttachmentType,
    pub description:       Option<String>,
    pub file_hash:         String,
    pub uploaded_by:       Uuid,
    pub uploaded_at:       chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reports::Entity",
        from = "Column::ReportId",
        to = "super::reports::Column::Id"
    )]
    Reports,
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reports.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Coarse attachment classification, derived from the file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AttachmentType {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "document")]
    Document,
    #[sea_orm(string_value = "spreadsheet")]
    Spreadsheet,
    #[sea_orm(string_value = "presentation")]
    Presentation,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "audio")]
    Audio,
    #[sea_orm(string_value = "archive")]
    Archive,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentType::Image => write!(f, "image"),
            AttachmentType::Document => write!(f, "document"),
            AttachmentType::Spreadsheet => write!(f, "spreadsheet"),
            AttachmentType::Presentation => write!(f, "presentation"),
            AttachmentType::Video => write!(f, "video"),
            AttachmentType::Audio => write!(f, "audio"),
            AttachmentType::Archive => write!(f, "archive"),
            AttachmentType::Other => write!(f, "other"),
        }
    }
}
