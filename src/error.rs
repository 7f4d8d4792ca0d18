use std::io;
use std::time::Duration;

/// Why a reachability probe did not complete a TCP handshake.
///
/// Only the logs see this distinction; clients get a single 504.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("malformed address {addr}")]
    InvalidAddress { addr: String },

    #[error("failed to resolve {addr}: {source}")]
    Resolve { addr: String, source: io::Error },

    #[error("{addr} resolved to no addresses")]
    NoAddresses { addr: String },

    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("connection to {addr} timed out after {timeout:?}")]
    Timeout { addr: String, timeout: Duration },
}

impl ProbeError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::InvalidAddress { .. } => "invalid_address",
            ProbeError::Resolve { .. } => "resolve",
            ProbeError::NoAddresses { .. } => "no_addresses",
            ProbeError::Connect { .. } => "connect",
            ProbeError::Timeout { .. } => "timeout",
        }
    }
}

/// Server startup error. All variants are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(#[from] io::Error),
}
