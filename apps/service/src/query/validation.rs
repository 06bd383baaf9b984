//! Input validation for the query path.
//!
//! Both helpers run before any store access.

use std::net::IpAddr;

use super::QueryError;

/// Parse a textual IPv4 or IPv6 address
pub fn parse_ip(raw: &str) -> Result<IpAddr, QueryError> {
    if raw.trim().is_empty() {
        return Err(QueryError::InvalidInput("IP address cannot be empty".into()));
    }

    raw.parse::<IpAddr>()
        .map_err(|_| QueryError::InvalidInput(format!("'{raw}' is not a valid IP address")))
}

/// Parse a port number in `0..=65535`. Only plain decimal digits are
/// accepted: no sign and no surrounding whitespace.
pub fn parse_port(raw: &str) -> Result<u16, QueryError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::InvalidInput(format!("'{raw}' is not an integer port")));
    }

    raw.parse::<u16>()
        .map_err(|_| QueryError::InvalidInput(format!("port {raw} is out of range (0-65535)")))
}
