//! # API Response Types
//!
//! Generic API response types for the Waypoint application.
//! Provides a consistent response format for all API endpoints.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "status": "success",
//!   "data": { ... }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API response metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResponseMeta {
    /// Request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Response timestamp.
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    /// Current page number (1-indexed).
    pub page: u64,

    /// Number of items per page.
    pub per_page: u64,

    /// Total number of items.
    pub total_items: u64,

    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Maximum allowed page number to keep offset arithmetic in range.
    pub const MAX_PAGE: u64 = 1_000_000;

    /// Create pagination metadata, clamping `page` to `1..=MAX_PAGE`.
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let page = page.clamp(1, Self::MAX_PAGE);
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Offset for database queries.
    ///
    /// Returns `None` if the calculation would overflow.
    pub fn offset(&self) -> Option<u64> { self.page.checked_sub(1)?.checked_mul(self.per_page) }

    /// Items per page, for use as a query limit.
    pub fn limit(&self) -> u64 { self.per_page }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool { self.page < self.total_pages }
}

/// API response type.
///
/// The generic envelope for all API responses: a success variant carrying
/// data, or an error variant carrying a machine-readable code and a
/// human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ApiResponse<T> {
    /// Success response.
    Success {
        /// Response data.
        data: T,

        /// Pagination metadata for list endpoints.
        #[serde(skip_serializing_if = "Option::is_none")]
        pagination: Option<PaginationMeta>,
    },

    /// Error response.
    Error {
        /// Error code.
        code: String,

        /// Error message.
        message: String,

        /// Error details.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<serde_json::Value>,

        /// Request ID for correlation.
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
}

/// Builder for API responses.
#[derive(Debug, Clone)]
pub struct ApiResponseBuilder<T> {
    data:       Option<T>,
    error:      Option<(String, String, Option<serde_json::Value>)>,
    request_id: Option<String>,
    pagination: Option<PaginationMeta>,
}

impl<T: Default> ApiResponseBuilder<T> {
    /// Create a new builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            data:       None,
            error:      None,
            request_id: None,
            pagination: None,
        }
    }

    /// Set the response data.
    #[inline]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Set an error response.
    #[inline]
    pub fn with_error(mut self, code: impl ToString, message: impl ToString) -> Self {
        self.error = Some((code.to_string(), message.to_string(), None));
        self
    }

    /// Set an error with details.
    #[inline]
    pub fn with_error_details(
        mut self,
        code: impl ToString,
        message: impl ToString,
        details: serde_json::Value,
    ) -> Self {
        self.error = Some((code.to_string(), message.to_string(), Some(details)));
        self
    }

    /// Set the request ID.
    #[inline]
    pub fn with_request_id(mut self, request_id: impl ToString) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    /// Set pagination metadata.
    #[inline]
    pub fn with_pagination(mut self, page: u64, per_page: u64, total_items: u64) -> Self {
        self.pagination = Some(PaginationMeta::new(page, per_page, total_items));
        self
    }

    /// Build the response.
    #[inline]
    pub fn build(self) -> ApiResponse<T> {
        if let Some((code, message, details)) = self.error {
            return ApiResponse::Error {
                code,
                message,
                details,
                request_id: self.request_id,
            };
        }

        ApiResponse::Success {
            data:       self.data.unwrap_or_default(),
            pagination: self.pagination,
        }
    }
}

impl<T: Default> Default for ApiResponseBuilder<T> {
    fn default() -> Self { Self::new() }
}

impl<T> ApiResponse<T> {
    /// Create a success response with data.
    #[inline]
    pub fn ok(data: T) -> Self {
        ApiResponse::Success {
            data,
            pagination: None,
        }
    }

    /// Create a paginated success response.
    #[inline]
    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        ApiResponse::Success {
            data,
            pagination: Some(pagination),
        }
    }

    /// Create an error response.
    #[inline]
    pub fn error(code: impl ToString, message: impl ToString) -> Self {
        ApiResponse::Error {
            code:       code.to_string(),
            message:    message.to_string(),
            details:    None,
            request_id: None,
        }
    }

    /// Create an error response with details.
    #[inline]
    pub fn error_with_details(code: impl ToString, message: impl ToString, details: serde_json::Value) -> Self {
        ApiResponse::Error {
            code:       code.to_string(),
            message:    message.to_string(),
            details:    Some(details),
            request_id: None,
        }
    }

    /// Get a reference to the data if this is a success response.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success {
                data,
                ..
            } => Some(data),
            ApiResponse::Error {
                ..
            } => None,
        }
    }

    /// Check if this is a success response.
    #[inline]
    pub fn is_success(&self) -> bool { matches!(self, ApiResponse::Success { .. }) }

    /// Check if this is an error response.
    #[inline]
    pub fn is_error(&self) -> bool { matches!(self, ApiResponse::Error { .. }) }
}

impl<T: Default> ApiResponse<T> {
    /// Create a success response builder.
    #[inline]
    pub fn builder() -> ApiResponseBuilder<T> { ApiResponseBuilder::new() }

    /// Create an empty success response.
    #[inline]
    pub fn empty() -> Self {
        ApiResponse::Success {
            data:       T::default(),
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok() {
        let response = ApiResponse::ok("test data");
        match response {
            ApiResponse::Success {
                data,
                pagination,
            } => {
                assert_eq!(data, "test data");
                assert!(pagination.is_none());
            },
            _ => panic!("Expected success response"),
        }
    }

    #[test]
    fn test_response_error() {
        let response: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "Report not found");
        match response {
            ApiResponse::Error {
                code,
                message,
                details,
                ..
            } => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "Report not found");
                assert!(details.is_none());
            },
            _ => panic!("Expected error response"),
        }
    }

    #[test]
    fn test_response_serialization() {
        let response = ApiResponse::ok("test");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"data\":\"test\""));
    }

    #[test]
    fn test_response_error_serialization() {
        let response: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "Not found");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"code\":\"NOT_FOUND\""));
        assert!(json.contains("\"message\":\"Not found\""));
    }

    #[test]
    fn test_response_builder() {
        let response = ApiResponse::builder()
            .with_data(vec!["MA-2026-0001", "MA-2026-0002"])
            .with_pagination(1, 20, 2)
            .build();

        match response {
            ApiResponse::Success {
                data,
                pagination,
            } => {
                assert_eq!(data.len(), 2);
                let pagination = pagination.unwrap();
                assert_eq!(pagination.total_items, 2);
                assert_eq!(pagination.total_pages, 1);
            },
            _ => panic!("Expected success response"),
        }
    }

    #[test]
    fn test_response_builder_error_path() {
        let response: ApiResponse<()> = ApiResponse::builder()
            .with_error("VALIDATION_ERROR", "Return date before departure")
            .with_request_id("req-123")
            .build();

        match response {
            ApiResponse::Error {
                code,
                request_id,
                ..
            } => {
                assert_eq!(code, "VALIDATION_ERROR");
                assert_eq!(request_id, Some("req-123".to_string()));
            },
            _ => panic!("Expected error response"),
        }
    }

    #[test]
    fn test_error_with_details() {
        let details = serde_json::json!({"field": "departure_date"});
        let response: ApiResponse<()> =
            ApiResponse::error_with_details("VALIDATION_ERROR", "Invalid date", details.clone());

        match response {
            ApiResponse::Error {
                details: resp_details,
                ..
            } => {
                assert_eq!(resp_details, Some(details));
            },
            _ => panic!("Expected error response"),
        }
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 10, 100);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.total_items, 100);
        assert_eq!(meta.total_pages, 10);
        assert!(meta.has_next());
    }

    #[test]
    fn test_pagination_offset() {
        let meta = PaginationMeta::new(3, 10, 100);
        assert_eq!(meta.offset(), Some(20));
        assert_eq!(meta.limit(), 10);
    }

    #[test]
    fn test_pagination_page_clamped() {
        let meta = PaginationMeta::new(0, 10, 100);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.offset(), Some(0));

        let meta = PaginationMeta::new(PaginationMeta::MAX_PAGE + 1, 10, 1000);
        assert_eq!(meta.page, PaginationMeta::MAX_PAGE);
        assert!(meta.offset().is_some());
    }

    #[test]
    fn test_pagination_per_page_floor() {
        // per_page 0 would divide by zero; it is raised to 1
        let meta = PaginationMeta::new(1, 0, 5);
        assert_eq!(meta.per_page, 1);
        assert_eq!(meta.total_pages, 5);
    }

    #[test]
    fn test_pagination_last_page() {
        let meta = PaginationMeta::new(10, 10, 100);
        assert!(!meta.has_next());
        assert_eq!(meta.offset(), Some(90));
    }

    #[test]
    fn test_pagination_partial_last_page() {
        let meta = PaginationMeta::new(1, 20, 45);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_empty() {
        let response: ApiResponse<()> = ApiResponse::empty();
        assert!(response.is_success());
        assert!(!response.is_error());
    }

    #[test]
    fn test_data_accessor() {
        let response = ApiResponse::ok(42);
        assert_eq!(response.data(), Some(&42));

        let response: ApiResponse<i32> = ApiResponse::error("CODE", "msg");
        assert_eq!(response.data(), None);
    }
}
