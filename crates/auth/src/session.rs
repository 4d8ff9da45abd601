//! Session token generation and hashing.
//!
//! The raw token travels to the client in a cookie; the database stores
//! only its SHA-256 hash, so a leaked sessions table cannot be replayed.

use base64::prelude::*;
use chrono::Duration;
use rand::{rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Raw token length in bytes before encoding.
const TOKEN_BYTES: usize = 32;

/// Default session lifetime.
pub fn default_session_ttl() -> Duration { Duration::hours(24) }

/// A freshly generated session token.
pub struct SessionToken {
    /// The raw token, sent to the client once and never stored.
    pub secret: SecretString,
    /// SHA-256 hash of the raw token, stored in the sessions table.
    pub hash:   String,
}

/// Generate a new random session token with its storage hash.
pub fn generate_session_token() -> SessionToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rng().fill_bytes(&mut bytes);
    let raw = BASE64_URL_SAFE_NO_PAD.encode(bytes);
    let hash = hash_session_token(&raw);
    SessionToken {
        secret: SecretString::from(raw),
        hash,
    }
}

/// Hash a raw session token for storage or lookup.
pub fn hash_session_token(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl SessionToken {
    /// Expose the raw token for cookie construction.
    pub fn raw(&self) -> &str { self.secret.expose_secret() }
}
