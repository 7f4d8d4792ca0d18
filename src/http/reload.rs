//! Certificate reload on SIGHUP.
//!
//! The deployment may rotate `/server.crt` and `/server.key` in place. A
//! SIGHUP re-reads both files; if they fail to load, the previous material
//! keeps serving.

use std::path::PathBuf;

use axum_server::tls_rustls::RustlsConfig;

/// Spawn a task that reloads the TLS material on every SIGHUP.
#[cfg(unix)]
pub fn setup_reload_handler(tls_config: RustlsConfig, cert_path: PathBuf, key_path: PathBuf) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(sighup) => sighup,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGHUP handler, certificate reload disabled");
            return;
        }
    };

    tokio::spawn(async move {
        while sighup.recv().await.is_some() {
            tracing::info!("Received SIGHUP, reloading TLS certificates");

            match tls_config.reload_from_pem_file(&cert_path, &key_path).await {
                Ok(()) => {
                    tracing::info!(
                        cert = %cert_path.display(),
                        key = %key_path.display(),
                        "TLS certificates reloaded"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        cert = %cert_path.display(),
                        key = %key_path.display(),
                        "Failed to reload TLS certificates"
                    );
                }
            }
        }
    });
}

#[cfg(not(unix))]
pub fn setup_reload_handler(_tls_config: RustlsConfig, _cert_path: PathBuf, _key_path: PathBuf) {
    tracing::warn!("Certificate reload via SIGHUP not supported on this platform");
}
