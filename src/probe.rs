//! TCP reachability probing.
//!
//! A probe resolves `host:port`, then tries the resolved addresses in order
//! until one completes the handshake. The whole attempt shares one deadline.
//! The stream is dropped as soon as it connects.
//!
//! An IPv6 literal must be bracketed (`[::1]`); a bare host with a colon is
//! malformed and never dialed.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::debug;

use crate::config::PROBE_TIMEOUT;
use crate::error::ProbeError;

/// Single-shot TCP connection tester.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(PROBE_TIMEOUT)
    }
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns true if a TCP connection to `host:port` was established.
    pub async fn is_reachable(&self, host: &str, port: &str) -> bool {
        self.check(host, port).await.is_ok()
    }

    /// Attempt one connection and report why it failed, if it did.
    pub async fn check(&self, host: &str, port: &str) -> Result<(), ProbeError> {
        let addr = format!("{}:{}", host, port);
        if !is_valid_host(host) {
            return Err(ProbeError::InvalidAddress { addr });
        }
        debug!(%addr, timeout = ?self.timeout, "TCP probe connecting");

        self.within_deadline(addr.clone(), connect_any(&addr)).await
    }

    async fn within_deadline<F>(&self, addr: String, attempt: F) -> Result<(), ProbeError>
    where
        F: Future<Output = Result<(), ProbeError>>,
    {
        match timeout(self.timeout, attempt).await {
            Ok(Ok(())) => {
                debug!(%addr, "TCP probe succeeded");
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProbeError::Timeout {
                addr,
                timeout: self.timeout,
            }),
        }
    }
}

/// Hosts may not carry a colon or brackets unless they are one bracketed
/// IPv6 literal.
fn is_valid_host(host: &str) -> bool {
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => !inner.contains(['[', ']']),
        None => !host.contains([':', '[', ']']),
    }
}

async fn connect_any(addr: &str) -> Result<(), ProbeError> {
    let candidates = lookup_host(addr).await.map_err(|source| ProbeError::Resolve {
        addr: addr.to_string(),
        source,
    })?;

    let mut last_err: Option<io::Error> = None;
    for candidate in candidates {
        match TcpStream::connect(candidate).await {
            Ok(_stream) => return Ok(()),
            Err(e) => {
                debug!(%candidate, error = %e, "TCP probe candidate failed");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(source) => Err(ProbeError::Connect {
            addr: addr.to_string(),
            source,
        }),
        None => Err(ProbeError::NoAddresses {
            addr: addr.to_string(),
        }),
    }
}
