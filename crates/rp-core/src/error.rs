//! Core error types for the rich presence client

use rp_protocol::ProtocolError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a transport while opening or writing an endpoint
#[derive(Error, Debug)]
pub enum TransportError {
    /// The endpoint could not be opened
    #[error("Failed to open {address}: {source}")]
    Open {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// A write failed (broken pipe, reset, short write)
    #[error("Write failed: {0}")]
    Write(#[source] std::io::Error),

    /// An open or write did not complete in time
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// No handle is open
    #[error("Not connected")]
    NotConnected,
}

/// Errors raised while establishing a session
#[derive(Error, Debug)]
pub enum ConnectError {
    /// None of the candidate endpoints accepted a connection
    #[error("No endpoint accepted a connection ({attempted} candidates tried)")]
    NoEndpoint {
        attempted: usize,
        #[source]
        last: Option<TransportError>,
    },

    /// An endpoint was opened but the handshake could not be sent
    #[error("Handshake with {address} failed: {source}")]
    Handshake {
        address: String,
        #[source]
        source: TransportError,
    },

    /// The handshake could not be encoded
    #[error("Failed to encode handshake: {0}")]
    Encoding(#[from] ProtocolError),

    /// The session has been closed
    #[error("Session is closed")]
    Closed,
}

/// Errors raised by a presence update
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The activity could not be encoded; never retried
    #[error("Failed to encode activity: {0}")]
    Encoding(#[from] ProtocolError),

    /// The session has been closed
    #[error("Session is closed")]
    Closed,

    /// The write failed and reconnecting failed too
    #[error("Write failed ({original}) and reconnect failed: {reconnect}")]
    Reconnect {
        original: TransportError,
        #[source]
        reconnect: ConnectError,
    },

    /// The write failed, reconnecting worked, and the resend failed
    #[error("Write failed ({original}) and resend after reconnect failed: {retry}")]
    Retry {
        original: TransportError,
        #[source]
        retry: TransportError,
    },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
