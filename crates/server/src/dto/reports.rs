//! # Report DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Report creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    /// Mission authorization this report documents
    pub authorization_id: uuid::Uuid,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title:            String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content:          String,
    /// "mission" (default) or "activity"
    pub report_type:      Option<String>,
    /// "draft" (default) to save, "submit" to file for review immediately
    pub action:           Option<String>,
}

/// Report update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReportRequest {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title:   Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
}

/// Status filter for report listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<String>,
}

/// Report details returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id:               uuid::Uuid,
    pub member_id:        uuid::Uuid,
    pub authorization_id: uuid::Uuid,
    pub report_number:    String,
    pub title:            String,
    pub content:          String,
    pub report_type:      String,
    pub status:           String,
    pub review_notes:     Option<String>,
    pub submitted_at:     Option<chrono::DateTime<chrono::Utc>>,
    pub reviewed_at:      Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
}

impl From<entity::reports::Model> for ReportResponse {
    fn from(report: entity::reports::Model) -> Self {
        Self {
            id:               report.id,
            member_id:        report.member_id,
            authorization_id: report.authorization_id,
            report_number:    report.report_number,
            title:            report.title,
            content:          report.content,
            report_type:      report.report_type.to_string(),
            status:           report.status.to_string(),
            review_notes:     report.review_notes,
            submitted_at:     report.submitted_at,
            reviewed_at:      report.reviewed_at,
            created_at:       report.created_at,
            updated_at:       report.updated_at,
        }
    }
}

/// Attachment metadata returned to the client; storage paths stay private
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id:                uuid::Uuid,
    pub report_id:         uuid::Uuid,
    pub original_filename: String,
    pub file_size:         i64,
    pub file_type:         String,
    pub mime_type:         String,
    pub attachment_type:   String,
    pub description:       Option<String>,
    pub file_hash:         String,
    pub uploaded_at:       chrono::DateTime<chrono::Utc>,
}

impl From<entity::report_attachments::Model> for AttachmentResponse {
    fn from(attachment: entity::report_attachments::Model) -> Self {
        Self {
            id:                attachment.id,
            report_id:         attachment.report_id,
            original_filename: attachment.original_filename,
            file_size:         attachment.file_size,
            file_type:         attachment.file_type,
            mime_type:         attachment.mime_type,
            attachment_type:   attachment.attachment_type.to_string(),
            description:       attachment.description,
            file_hash:         attachment.file_hash,
            uploaded_at:       attachment.uploaded_at,
        }
    }
}

/// Dashboard report counts for the requesting account
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatsResponse {
    pub total:     u64,
    pub draft:     u64,
    pub submitted: u64,
    pub approved:  u64,
    pub rejected:  u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_report_requires_content() {
        let request = CreateReportRequest {
            authorization_id: uuid::Uuid::new_v4(),
            title:            "Coordination meeting".to_string(),
            content:          String::new(),
            report_type:      None,
            action:           None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_attachment_response_omits_storage_path() {
        let json = serde_json::to_string(&AttachmentResponse {
            id:                uuid::Uuid::new_v4(),
            report_id:         uuid::Uuid::new_v4(),
            original_filename: "minutes.pdf".to_string(),
            file_size:         1024,
            file_type:         "pdf".to_string(),
            mime_type:         "application/pdf".to_string(),
            attachment_type:   "document".to_string(),
            description:       None,
            file_hash:         "abc123".to_string(),
            uploaded_at:       chrono::Utc::now(),
        })
        .unwrap();

        assert!(json.contains("originalFilename"));
        assert!(!json.contains("filePath"));
        assert!(!json.contains("storedFilename"));
    }
}
