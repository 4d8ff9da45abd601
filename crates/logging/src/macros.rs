//! # Logging Macros
//!
//! Convenience macros for structured logging with consistent targets and
//! field names.

/// Log an API request with method, path, and status.
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log an authentication event (login, logout, registration).
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $user_id:expr, $success:expr) => {
        tracing::info!(
            target: "auth",
            event = %$event,
            user_id = %$user_id,
            success = $success,
            "Authentication event"
        )
    };
}

/// Log a security event (CSRF failure, forbidden access attempt).
#[macro_export]
macro_rules! log_security_event {
    ($event:expr, $user_id:expr, $details:expr) => {
        tracing::warn!(
            target: "security",
            event = %$event,
            user_id = %$user_id,
            details = %$details,
            "Security event"
        )
    };
}

/// Log a file storage operation with path and outcome.
#[macro_export]
macro_rules! log_storage_event {
    ($operation:expr, $path:expr, $success:expr) => {
        tracing::info!(
            target: "storage",
            operation = %$operation,
            path = %$path,
            success = $success,
            "Storage operation"
        )
    };
}
