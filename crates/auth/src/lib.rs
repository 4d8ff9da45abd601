//! # Authentication Primitives
//!
//! Credential handling for the Waypoint application:
//! - Password hashing and validation (Argon2id)
//! - Session token generation and hashing
//! - CSRF token generation and constant-time verification

pub mod csrf;
pub mod password;
pub mod session;

// Re-export commonly used types
pub use csrf::{generate_csrf_token, verify_csrf_token};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use session::{generate_session_token, hash_session_token, SessionToken};
pub use secrecy;
pub use subtle;
