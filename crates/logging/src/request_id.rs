//! # Request ID Tracking
//!
//! Utilities for generating and propagating request IDs across the
//! application. Uses CUID2 for collision-resistant, URL-safe identifiers.

/// A request ID backed by a CUID2 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }

    /// Parse a request ID from an incoming header value.
    ///
    /// Accepts only values in the CUID2 shape; anything else is discarded so
    /// clients cannot inject arbitrary text into log correlation fields.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let valid_length = (20 ..= 32).contains(&value.len());
        if valid_length && value.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self(value.to_string()))
        }
        else {
            None
        }
    }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_from_header() {
        let value = "k192v2g4w3zq8h6j5k123456";
        let id = RequestId::from_header(value).unwrap();
        assert_eq!(id.as_str(), value);
    }

    #[test]
    fn test_from_header_trims_whitespace() {
        let id = RequestId::from_header("  k192v2g4w3zq8h6j5k123456  ").unwrap();
        assert_eq!(id.as_str(), "k192v2g4w3zq8h6j5k123456");
    }

    #[test]
    fn test_from_header_rejects_short() {
        assert!(RequestId::from_header("short").is_none());
    }

    #[test]
    fn test_from_header_rejects_symbols() {
        assert!(RequestId::from_header("invalid!@#-but-long-enough").is_none());
    }
}
