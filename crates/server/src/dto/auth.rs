//! # Authentication DTOs
//!
//! Request and response types for registration, login, and profile
//! management.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, unique per account
    #[validate(email(message = "Invalid email format"))]
    pub email:      String,
    /// Plaintext password, checked against the strength policy
    #[validate(length(min = 8, max = 256, message = "Password must be 8-256 characters"))]
    pub password:   String,
    /// Given name
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name:  String,
    /// Optional contact phone number
    #[validate(length(max = 32, message = "Phone number too long"))]
    pub phone:      Option<String>,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Given name
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    /// Family name
    #[validate(length(min = 1, max = 100, message = "Last name cannot be empty"))]
    pub last_name:  Option<String>,
    /// Contact phone number
    #[validate(length(max = 32, message = "Phone number too long"))]
    pub phone:      Option<String>,
}

/// Password change payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password, verified before the change is applied
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// Replacement password, checked against the strength policy
    #[validate(length(min = 8, max = 256, message = "Password must be 8-256 characters"))]
    pub new_password:     String,
}

/// Account details returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id:            uuid::Uuid,
    pub email:         String,
    pub first_name:    String,
    pub last_name:     String,
    pub phone:         Option<String>,
    pub role:          String,
    pub status:        String,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
}

impl From<entity::users::Model> for UserResponse {
    fn from(user: entity::users::Model) -> Self {
        Self {
            id:            user.id,
            email:         user.email,
            first_name:    user.first_name,
            last_name:     user.last_name,
            phone:         user.phone,
            role:          user.role.to_string(),
            status:        user.status.to_string(),
            last_login_at: user.last_login_at,
            created_at:    user.created_at,
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Raw session token; also set as the session cookie
    pub token: String,
    /// The authenticated account
    pub user:  UserResponse,
}

/// CSRF token issuance response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}
