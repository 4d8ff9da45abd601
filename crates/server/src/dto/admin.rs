//! # Administration DTOs
//!
//! Payloads for the admin-only account, mission, and report review
//! endpoints. Action names arrive as strings and are parsed into typed
//! decisions before any row is touched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status filter for the admin account listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUserQuery {
    pub status: Option<String>,
}

/// Filters for the admin report listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminReportQuery {
    pub status:      Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
}

/// Account moderation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserActionRequest {
    /// One of "approve", "reject", "suspend"
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

/// Typed account moderation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Approve,
    Reject,
    Suspend,
}

impl UserAction {
    /// Parses an action name, rejecting anything outside the known set.
    ///
    /// # Errors
    ///
    /// Returns the unrecognized name for error reporting.
    pub fn parse(action: &str) -> Result<Self, String> {
        match action {
            "approve" => Ok(UserAction::Approve),
            "reject" => Ok(UserAction::Reject),
            "suspend" => Ok(UserAction::Suspend),
            other => Err(other.to_string()),
        }
    }
}

/// Mission approval request; stamps the authorizer onto the document
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApproveMissionRequest {
    /// Name of the authorizing officer
    #[validate(length(min = 1, max = 200, message = "Authorizer name is required"))]
    pub authorized_by:          String,
    /// Position or title of the authorizing officer
    #[validate(length(min = 1, max = 200, message = "Authorizer position is required"))]
    pub authorized_by_position: String,
    /// Authorization date; defaults to today when absent
    pub authorization_date:     Option<NaiveDate>,
}

/// Report review request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportActionRequest {
    /// One of "approve", "reject"
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
    /// Reviewer notes, required when rejecting
    #[validate(length(max = 2000, message = "Notes too long"))]
    pub notes:  Option<String>,
}

/// Typed report review decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Approve,
    Reject,
}

impl ReportAction {
    /// Parses an action name, rejecting anything outside the known set.
    ///
    /// # Errors
    ///
    /// Returns the unrecognized name for error reporting.
    pub fn parse(action: &str) -> Result<Self, String> {
        match action {
            "approve" => Ok(ReportAction::Approve),
            "reject" => Ok(ReportAction::Reject),
            other => Err(other.to_string()),
        }
    }
}

/// Admin view of a mission, including the owning account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMissionResponse {
    pub user_id: uuid::Uuid,
    #[serde(flatten)]
    pub mission: super::missions::MissionResponse,
}

/// Admin view of a report, including the owning account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReportResponse {
    pub user_id: uuid::Uuid,
    #[serde(flatten)]
    pub report:  super::reports::ReportResponse,
}
