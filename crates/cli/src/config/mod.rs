//! # CLI Configuration Helpers
//!
//! Address parsing for the serve command. Database configuration lives in
//! the migration crate and server configuration in the server crate; the
//! CLI only stitches them together.

use std::net::SocketAddr;

/// Parses a host and port into a `SocketAddr`.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    // IPv6 addresses must be wrapped in brackets when appending a port,
    // e.g. "::1" becomes "[::1]:8080".
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_socket_addr() {
        let addr = parse_socket_addr("0.0.0.0", 8080);
        assert!(addr.is_ok());
        assert_eq!(addr.unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_socket_addr_localhost() {
        let addr = parse_socket_addr("127.0.0.1", 9090);
        assert!(addr.is_ok());
        assert_eq!(addr.unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_parse_socket_addr_ipv6() {
        let addr = parse_socket_addr("::1", 8080);
        assert!(addr.is_ok());
        assert_eq!(addr.unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_parse_socket_addr_rejects_hostname() {
        assert!(parse_socket_addr("not an address", 8080).is_err());
    }
}
