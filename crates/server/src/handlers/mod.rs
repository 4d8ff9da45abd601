//! # HTTP Handlers
//!
//! Domain handlers for profile management, the member roster, mission
//! authorizations, reports, attachments, and administration. Each axum
//! handler is a thin wrapper around an `*_inner` function taking the
//! state and payload directly, which keeps the domain logic callable
//! from tests without a router.

pub mod admin;
pub mod attachments;
pub mod health;
pub mod members;
pub mod missions;
pub mod profile;
pub mod reports;
