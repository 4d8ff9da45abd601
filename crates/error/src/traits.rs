//! # Error Traits
//!
//! Extension methods for attaching context to errors on their way up.

use crate::{AppError, Result};

/// Extension methods for Result types.
pub trait ResultExt<T> {
    fn with_context<C: ToString>(self, context: C) -> Result<T>;
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(error = %err, "Error occurred");
            err
        })
    }
}

/// Convert a Result to an Option, logging the error if present.
pub fn ok_or_log<T>(result: Result<T>) -> Option<T> {
    result
        .map_err(|e| {
            tracing::error!(error = %e, "Operation failed");
            e
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context() {
        let result: Result<i32> = Err(AppError::not_found("Report"));
        let result = result.with_context("Failed to fetch report");

        let err = result.unwrap_err();
        assert_eq!(err.message(), "Failed to fetch report: Report");
    }

    #[test]
    fn test_log_error() {
        let result: Result<i32> = Err(AppError::not_found("Report"));
        assert!(result.log_error().is_err());
    }

    #[test]
    fn test_ok_or_log() {
        let result: Result<i32> = Ok(42);
        assert_eq!(ok_or_log(result), Some(42));

        let result: Result<i32> = Err(AppError::not_found("Report"));
        assert_eq!(ok_or_log(result), None);
    }
}
