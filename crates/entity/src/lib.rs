//! Entity definitions for Waypoint
//!
//! This crate contains Sea-ORM entity definitions for the database models:
//! accounts, traveler profiles, mission authorizations, mission reports and
//! their file attachments, and server-side sessions.

pub mod members;
pub use members::Entity as Members;
pub mod mission_authorizations;
pub use mission_authorizations::Entity as MissionAuthorizations;
pub mod report_attachments;
pub use report_attachments::Entity as ReportAttachments;
pub mod reports;
pub use reports::Entity as Reports;
pub mod sessions;
pub use sessions::Entity as Sessions;
pub mod users;
pub use users::Entity as Users;
