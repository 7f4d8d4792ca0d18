//! TCP reachability endpoint.
//!
//! `/nettest/{host}/{port}` dials `host:port` from inside the stub's network
//! and reports whether the handshake completed. A request only counts as a
//! nettest when the decoded host is one non-empty path segment and the port
//! is all ASCII digits; anything else gets the greeting instead.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::greeting::greeting_body;
use crate::state::AppState;

/// Reachability handler.
///
/// The probe runs on its own task so a client hanging up does not cut it
/// short; it always finishes or times out.
pub async fn nettest(
    State(state): State<AppState>,
    params: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let (host, port) = match params {
        Ok(Path((host, port))) if is_host_segment(&host) && is_port_pattern(&port) => {
            (host, port)
        }
        _ => return greeting_body(&state.app_name).into_response(),
    };

    let prober = state.prober;
    let probe = {
        let host = host.clone();
        let port = port.clone();
        tokio::spawn(async move { prober.check(&host, &port).await })
    };

    let reachable = match probe.await {
        Ok(Ok(())) => {
            tracing::info!(%host, %port, "TCP connection established");
            true
        }
        Ok(Err(e)) => {
            tracing::warn!(%host, %port, kind = e.kind(), error = %e, "TCP connection failed");
            false
        }
        Err(e) => {
            tracing::error!(%host, %port, error = %e, "TCP probe task failed");
            false
        }
    };

    nettest_response(&host, &port, reachable)
}

/// A single, non-empty path segment after percent-decoding.
pub fn is_host_segment(host: &str) -> bool {
    !host.is_empty() && !host.contains('/')
}

/// One or more ASCII digits.
pub fn is_port_pattern(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

pub fn nettest_response(host: &str, port: &str, reachable: bool) -> Response {
    if reachable {
        (
            StatusCode::OK,
            format!("Successfully established tcp connection to {}:{}\n", host, port),
        )
            .into_response()
    } else {
        (
            StatusCode::GATEWAY_TIMEOUT,
            format!("Failed to establish tcp connection to {}:{}\n", host, port),
        )
            .into_response()
    }
}
