//! HTTP/HTTPS server startup logic.
//!
//! Two modes, picked once at startup:
//! - HTTPS with the pre-provisioned certificate and key
//! - Plain HTTP

use std::net::SocketAddr;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{AppConfig, TlsConfig};
use crate::error::ServerError;

use super::reload;

/// Start the HTTP/HTTPS server based on configuration.
///
/// Only returns on a fatal error.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    serve(app, config, Handle::new()).await
}

/// Like [`start_server`], with a caller-supplied handle for observing the
/// bound address.
pub async fn serve(app: Router, config: &AppConfig, handle: Handle) -> Result<(), ServerError> {
    let addr = parse_listen_addr(&config.listen_addr)?;

    if config.tls.enabled {
        start_tls_server(app, addr, &config.tls, handle).await
    } else {
        start_plain_server(app, addr, handle).await
    }
}

/// Parse the listen address. An empty port (`"0.0.0.0:"`, from an empty
/// `LISTEN_PORT`) binds an ephemeral port.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let parsed: Result<SocketAddr, _> = match addr.strip_suffix(':') {
        Some(host) if !host.ends_with(':') => format!("{}:0", host).parse(),
        _ => addr.parse(),
    };
    parsed.map_err(|source| ServerError::InvalidAddress {
        addr: addr.to_string(),
        source,
    })
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

/// Start HTTPS server with the deployment's certificate files.
async fn start_tls_server(
    app: Router,
    addr: SocketAddr,
    tls: &TlsConfig,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(
        %addr,
        cert = %tls.cert_path.display(),
        key = %tls.key_path.display(),
        "Starting HTTPS server"
    );

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    // SIGHUP re-reads the same files
    reload::setup_reload_handler(
        rustls_config.clone(),
        tls.cert_path.clone(),
        tls.key_path.clone(),
    );

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
