//! # CLI Validate Command
//!
//! Configuration validation for the Waypoint CLI.

use error::{AppError, Result};
use tracing::info;

const REQUIRED_VARS: [&str; 5] = [
    "WAYPOINT_DATABASE_HOST",
    "WAYPOINT_DATABASE_PORT",
    "WAYPOINT_DATABASE_NAME",
    "WAYPOINT_DATABASE_USER",
    "WAYPOINT_DATABASE_PASSWORD",
];

/// Validates the CLI configuration.
///
/// Checks that the database environment variables are present, that the
/// port parses, and that a TLS certificate and key are configured as a
/// pair or not at all.
pub fn validate() -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    let missing = missing_required(|key| std::env::var(key).ok());
    if !missing.is_empty() {
        return Err(AppError::config(format!(
            "Missing required environment variables: {:?}",
            missing
        )));
    }

    if let Ok(port) = std::env::var("WAYPOINT_DATABASE_PORT") {
        port.parse::<u16>()
            .map_err(|_| AppError::config(format!("Invalid WAYPOINT_DATABASE_PORT: {port}")))?;
    }

    let cert = std::env::var("WAYPOINT_TLS_CERT").ok();
    let key = std::env::var("WAYPOINT_TLS_KEY").ok();
    if cert.is_some() != key.is_some() {
        return Err(AppError::config(
            "WAYPOINT_TLS_CERT and WAYPOINT_TLS_KEY must be set together",
        ));
    }

    info!(target: "validate", "Configuration is valid");
    Ok(())
}

/// Returns the required variables for which `get` yields no value.
fn missing_required(get: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|var| get(var).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_missing_required_reports_absent_vars() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("WAYPOINT_DATABASE_HOST", "localhost"),
            ("WAYPOINT_DATABASE_PORT", "5432"),
            ("WAYPOINT_DATABASE_NAME", "waypoint"),
        ]);

        let missing = missing_required(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(
            missing,
            vec!["WAYPOINT_DATABASE_USER", "WAYPOINT_DATABASE_PASSWORD"]
        );
    }

    #[test]
    fn test_missing_required_empty_when_all_present() {
        let missing = missing_required(|_| Some("set".to_string()));
        assert!(missing.is_empty());
    }
}
