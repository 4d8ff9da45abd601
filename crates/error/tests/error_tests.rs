//! # Error Crate Tests
//!
//! Tests for error types, responses, and conversions.

mod error_response_tests {
    use error::AppError;

    #[test]
    fn test_error_creation() {
        let error = AppError::not_found("Mission authorization not found");
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn test_error_display() {
        let error = AppError::bad_request("Invalid input");
        let msg = format!("{}", error);
        assert!(msg.contains("BadRequest"));
    }

    #[test]
    fn test_storage_error() {
        let error = AppError::storage("disk full");
        assert!(matches!(error, AppError::Storage { .. }));
        assert_eq!(error.code(), "STORAGE_ERROR");
    }
}

mod status_mapping_tests {
    use axum::response::IntoResponse;
    use error::AppError;

    #[test]
    fn test_client_error_responses() {
        let cases = [
            (AppError::not_found("x"), axum::http::StatusCode::NOT_FOUND),
            (
                AppError::bad_request("x"),
                axum::http::StatusCode::BAD_REQUEST,
            ),
            (
                AppError::unauthorized("x"),
                axum::http::StatusCode::UNAUTHORIZED,
            ),
            (AppError::forbidden("x"), axum::http::StatusCode::FORBIDDEN),
            (AppError::conflict("x"), axum::http::StatusCode::CONFLICT),
            (
                AppError::validation("x"),
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_server_error_responses() {
        let cases = [
            AppError::internal("x"),
            AppError::database("x"),
            AppError::storage("x"),
            AppError::config("x"),
            AppError::migration("x"),
        ];

        for error in cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}

mod api_response_tests {
    use error::ApiResponse;
    use serde_json::json;

    #[test]
    fn test_api_response_ok_with_data() {
        let data = json!({"authorizationNumber": "MA-2026-0001"});
        let response = ApiResponse::ok(data);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["data"].is_object());
    }

    #[test]
    fn test_api_response_error_envelope() {
        let response = ApiResponse::<serde_json::Value>::error("VALIDATION_ERROR", "Invalid request");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_api_response_paginated() {
        let response = ApiResponse::builder()
            .with_data(vec![json!({"id": 1})])
            .with_pagination(2, 20, 45)
            .build();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["total_pages"], 3);
    }
}

mod result_type_tests {
    use error::{AppError, Result};

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_result_error() {
        let result: Result<i32> = Err(AppError::internal("error"));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_ext_context() {
        use error::ResultExt;

        let result: std::result::Result<i32, AppError> = Err(AppError::not_found("Member"));
        let err = result.with_context("Looking up member").unwrap_err();
        assert!(format!("{}", err).contains("Looking up member"));
    }
}
