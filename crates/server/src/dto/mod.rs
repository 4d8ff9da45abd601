//! # Data Transfer Objects
//!
//! Request and response shapes for the HTTP API. Requests derive
//! `validator` rules; responses serialize with camelCase field names.

pub mod admin;
pub mod auth;
pub mod members;
pub mod missions;
pub mod reports;

use serde::Deserialize;

/// Common pagination query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page:     u64,
    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 { 1 }

fn default_per_page() -> u64 { 20 }

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page:     default_page(),
            per_page: default_per_page(),
        }
    }
}
