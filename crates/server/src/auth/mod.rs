//! # Authentication
//!
//! Session-backed authentication: registration, login, logout, and CSRF
//! token issuance. Session persistence lives in [`sessions`], the HTTP
//! handlers in [`handlers`].

pub mod handlers;
pub mod sessions;
