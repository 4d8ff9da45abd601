//! Status enum tests for the entity crate
//! These tests avoid complex sea-orm async patterns that cause compilation issues

use entity::{
    members::MemberStatus,
    mission_authorizations::MissionStatus,
    report_attachments::AttachmentType,
    reports::{ReportStatus, ReportType},
    users::{UserRole, UserStatus},
};

/// Test UserStatus enum values
#[test]
fn test_user_status_values() {
    assert_eq!(format!("{}", UserStatus::Pending), "pending");
    assert_eq!(format!("{}", UserStatus::Active), "active");
    assert_eq!(format!("{}", UserStatus::Rejected), "rejected");
    assert_eq!(format!("{}", UserStatus::Suspended), "suspended");
}

/// Test UserRole enum values
#[test]
fn test_user_role_values() {
    assert_eq!(format!("{}", UserRole::Admin), "admin");
    assert_eq!(format!("{}", UserRole::Member), "member");
    assert_ne!(UserRole::Admin, UserRole::Member);
}

/// Test MissionStatus enum values
#[test]
fn test_mission_status_values() {
    assert_eq!(format!("{}", MissionStatus::Draft), "draft");
    assert_eq!(format!("{}", MissionStatus::Pending), "pending");
    assert_eq!(format!("{}", MissionStatus::Approved), "approved");
    assert_eq!(format!("{}", MissionStatus::Rejected), "rejected");
    assert_eq!(format!("{}", MissionStatus::Completed), "completed");
}

/// Only draft missions are editable
#[test]
fn test_mission_status_editable() {
    assert!(MissionStatus::Draft.is_editable());
    assert!(!MissionStatus::Pending.is_editable());
    assert!(!MissionStatus::Approved.is_editable());
    assert!(!MissionStatus::Rejected.is_editable());
    assert!(!MissionStatus::Completed.is_editable());
}

/// Approval is only legal from draft or pending
#[test]
fn test_mission_status_can_approve() {
    assert!(MissionStatus::Draft.can_approve());
    assert!(MissionStatus::Pending.can_approve());
    assert!(!MissionStatus::Approved.can_approve());
    assert!(!MissionStatus::Rejected.can_approve());
    assert!(!MissionStatus::Completed.can_approve());
}

/// Reports may only reference approved or completed missions
#[test]
fn test_mission_status_accepts_reports() {
    assert!(MissionStatus::Approved.accepts_reports());
    assert!(MissionStatus::Completed.accepts_reports());
    assert!(!MissionStatus::Draft.accepts_reports());
    assert!(!MissionStatus::Pending.accepts_reports());
    assert!(!MissionStatus::Rejected.accepts_reports());
}

/// Test ReportStatus enum values
#[test]
fn test_report_status_values() {
    assert_eq!(format!("{}", ReportStatus::Draft), "draft");
    assert_eq!(format!("{}", ReportStatus::Submitted), "submitted");
    assert_eq!(format!("{}", ReportStatus::UnderReview), "under-review");
    assert_eq!(format!("{}", ReportStatus::Approved), "approved");
    assert_eq!(format!("{}", ReportStatus::Rejected), "rejected");
}

/// Draft and rejected are the only editable report states
#[test]
fn test_report_status_editable() {
    assert!(ReportStatus::Draft.is_editable());
    assert!(ReportStatus::Rejected.is_editable());
    assert!(!ReportStatus::Submitted.is_editable());
    assert!(!ReportStatus::UnderReview.is_editable());
    assert!(!ReportStatus::Approved.is_editable());
}

/// Submit is legal from draft and from rejected (resubmission)
#[test]
fn test_report_status_can_submit() {
    assert!(ReportStatus::Draft.can_submit());
    assert!(ReportStatus::Rejected.can_submit());
    assert!(!ReportStatus::Submitted.can_submit());
    assert!(!ReportStatus::Approved.can_submit());
}

/// Review decisions are legal only for in-flight reports
#[test]
fn test_report_status_can_review() {
    assert!(ReportStatus::Submitted.can_review());
    assert!(ReportStatus::UnderReview.can_review());
    assert!(!ReportStatus::Draft.can_review());
    assert!(!ReportStatus::Approved.can_review());
    assert!(!ReportStatus::Rejected.can_review());
}

/// Test ReportType enum values
#[test]
fn test_report_type_values() {
    assert_eq!(format!("{}", ReportType::Mission), "mission");
    assert_eq!(format!("{}", ReportType::Activity), "activity");
}

/// Test MemberStatus enum values
#[test]
fn test_member_status_values() {
    assert_eq!(format!("{}", MemberStatus::Active), "active");
    assert_eq!(format!("{}", MemberStatus::Inactive), "inactive");
}

/// Test AttachmentType enum values
#[test]
fn test_attachment_type_values() {
    assert_eq!(format!("{}", AttachmentType::Image), "image");
    assert_eq!(format!("{}", AttachmentType::Document), "document");
    assert_eq!(format!("{}", AttachmentType::Spreadsheet), "spreadsheet");
    assert_eq!(format!("{}", AttachmentType::Presentation), "presentation");
    assert_eq!(format!("{}", AttachmentType::Video), "video");
    assert_eq!(format!("{}", AttachmentType::Audio), "audio");
    assert_eq!(format!("{}", AttachmentType::Archive), "archive");
    assert_eq!(format!("{}", AttachmentType::Other), "other");
}

/// Test enum Clone and Debug
#[test]
fn test_enum_clone_and_debug() {
    assert_eq!(MissionStatus::Draft.clone(), MissionStatus::Draft);
    assert_eq!(ReportStatus::Submitted.clone(), ReportStatus::Submitted);

    let debug = format!("{:?}", ReportStatus::UnderReview);
    assert!(debug.contains("UnderReview"));
}
