//! # Waypoint Server
//!
//! HTTP API for mission authorizations and post-mission reporting.
//! Provides session-based authentication, member roster management,
//! the mission authorization workflow, report review, and file
//! attachments.

use std::time::Instant;

use error::AppError;
use sea_orm::DatabaseConnection;

pub mod auth;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod numbering;
pub mod router;
pub mod settings;
pub mod storage;

pub use settings::ServerConfig;

/// Result type for server operations
pub type ServerResult<T> = Result<T, AppError>;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db:         DatabaseConnection,
    /// Server configuration
    pub config:     ServerConfig,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    /// Creates application state from a connection and configuration.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: ServerConfig) -> Self {
        Self {
            db,
            config,
            start_time: Instant::now(),
        }
    }

    /// Seconds elapsed since the server started.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 { self.start_time.elapsed().as_secs() }
}
