//! Error types for authentication and clock operations

use std::time::Duration;

/// Errors that can occur while building credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Errors that can occur while reading the current time
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Socket or DNS failure talking to the time server
    #[error("Time server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Time server did not answer in time
    #[error("Time server {server} did not respond within {after:?}")]
    Timeout {
        /// Server address that was queried
        server: String,
        /// Configured timeout
        after: Duration,
    },

    /// Server host name did not resolve to any address
    #[error("Time server {0} did not resolve to an address")]
    Unresolved(String),

    /// Reply could not be interpreted as an SNTP server packet
    #[error("Invalid time server response: {0}")]
    InvalidResponse(String),

    /// Server sent a kiss-of-death packet (stratum 0)
    #[error("Time server refused the request: {0}")]
    KissOfDeath(String),

    /// Local clock reads earlier than the Unix epoch
    #[error("System clock is set before the Unix epoch")]
    BeforeEpoch,
}

/// Result type for credential operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for clock operations
pub type ClockResult<T> = Result<T, ClockError>;
