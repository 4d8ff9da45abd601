//! # Logging Configuration Tests
//!
//! Tests for structured logging setup and configuration.

mod logging_config_tests {
    use logging::LoggingConfig;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "compact".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LoggingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}

mod request_id_tests {
    use logging::RequestId;

    #[test]
    fn test_request_id_uniqueness() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1.to_string(), id2.to_string());
    }

    #[test]
    fn test_request_id_header_validation() {
        assert!(RequestId::from_header("tooshort").is_none());
        assert!(RequestId::from_header("k192v2g4w3zq8h6j5k123456").is_some());
    }
}

mod tracing_subscriber_tests {
    #[test]
    fn test_tracing_setup() {
        // Initializing twice must not panic
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }
}
