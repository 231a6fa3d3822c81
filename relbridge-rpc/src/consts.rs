//! Constants for the relbridge-rpc client.

/// User-Agent header value for the tracker client
pub const USER_AGENT: &str = concat!("relbridge/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Result limit passed to searches that must return every match
pub const UNLIMITED_RESULTS: i32 = i32::MAX;
