//! CSRF token generation and verification.
//!
//! One token per session, generated lazily on first use. Verification is
//! constant-time so token bytes cannot be probed through timing.

use base64::prelude::*;
use rand::{rng, RngCore};
use subtle::ConstantTimeEq;

/// Raw token length in bytes before encoding.
const TOKEN_BYTES: usize = 32;

/// Generate a new random CSRF token.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rng().fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Compare a submitted CSRF token against the session's token.
///
/// Length mismatches return false immediately; equal-length comparison is
/// constant-time.
pub fn verify_csrf_token(expected: &str, provided: &str) -> bool {
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(provided).into()
}
