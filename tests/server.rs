//! End-to-end tests against a real listener.
//!
//! Each test binds its own ephemeral port, so they run in parallel.

mod common;

use std::io::Write;

use axum_server::Handle;
use common::{closed_port, config_from, http_request, spawn_server};
use stub_container::{create_router, http::serve, AppState, ServerError};
use tokio::net::TcpListener;

#[tokio::test]
async fn greets_with_configured_app_name() {
    let (addr, _server) =
        spawn_server(config_from(&[("APP_NAME", "foo"), ("LISTEN_PORT", "0")])).await;

    let (status, body) = http_request(addr, "GET", "/anything/else").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for foo service\n");

    let (status, body) = http_request(addr, "POST", "/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for foo service\n");
}

#[tokio::test]
async fn nettest_reports_live_listener() {
    let (addr, _server) = spawn_server(config_from(&[("LISTEN_PORT", "0")])).await;

    let target = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target_port = target.local_addr().unwrap().port();
    tokio::spawn(async move { while target.accept().await.is_ok() {} });

    let (status, body) = http_request(addr, "GET", &format!("/nettest/127.0.0.1/{}", target_port)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        format!("Successfully established tcp connection to 127.0.0.1:{}\n", target_port)
    );
}

#[tokio::test]
async fn nettest_reports_closed_port() {
    let (addr, _server) = spawn_server(config_from(&[("LISTEN_PORT", "0")])).await;
    let port = closed_port().await;

    let (status, body) = http_request(addr, "GET", &format!("/nettest/127.0.0.1/{}", port)).await;
    assert_eq!(status, 504);
    assert_eq!(
        body,
        format!("Failed to establish tcp connection to 127.0.0.1:{}\n", port)
    );
}

#[tokio::test]
async fn nettest_can_probe_the_stub_itself() {
    let (addr, _server) = spawn_server(config_from(&[("LISTEN_PORT", "0")])).await;

    let (status, body) =
        http_request(addr, "GET", &format!("/nettest/localhost/{}", addr.port())).await;
    assert_eq!(status, 200);
    assert!(body.contains(&format!("localhost:{}", addr.port())));
}

#[tokio::test]
async fn empty_listen_port_binds_ephemeral_port() {
    let (addr, _server) = spawn_server(config_from(&[("LISTEN_PORT", "")])).await;
    assert_ne!(addr.port(), 0);

    let (status, body) = http_request(addr, "GET", "/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for undefined service\n");
}

#[tokio::test]
async fn nettest_rejects_malformed_hosts() {
    let (addr, _server) = spawn_server(config_from(&[("LISTEN_PORT", "0")])).await;

    let (status, body) = http_request(addr, "GET", "/nettest//80").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for undefined service\n");

    let (status, body) = http_request(addr, "GET", "/nettest/a%2Fb/80").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for undefined service\n");

    let (status, body) =
        http_request(addr, "GET", &format!("/nettest/::1/{}", addr.port())).await;
    assert_eq!(status, 504);
    assert_eq!(
        body,
        format!("Failed to establish tcp connection to ::1:{}\n", addr.port())
    );
}

#[tokio::test]
async fn invalid_listen_port_is_fatal() {
    let config = config_from(&[("LISTEN_PORT", "not-a-port")]);
    let app = create_router(AppState::from_config(&config));

    let err = serve(app, &config, Handle::new()).await.unwrap_err();
    assert!(matches!(err, ServerError::InvalidAddress { .. }), "{err:?}");
}

#[tokio::test]
async fn port_in_use_is_fatal() {
    let occupied = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = occupied.local_addr().unwrap().port().to_string();

    let config = config_from(&[("LISTEN_PORT", port.as_str())]);
    let app = create_router(AppState::from_config(&config));

    let err = serve(app, &config, Handle::new()).await.unwrap_err();
    assert!(matches!(err, ServerError::Server(_)), "{err:?}");
}

#[tokio::test]
async fn missing_tls_files_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("LISTEN_PORT", "0"), ("LISTEN_HTTPS", "true")])
        .with_tls_paths(dir.path().join("server.crt"), dir.path().join("server.key"));
    let app = create_router(AppState::from_config(&config));

    let err = serve(app, &config, Handle::new()).await.unwrap_err();
    assert!(matches!(err, ServerError::TlsConfig(_)), "{err:?}");
}

#[tokio::test]
async fn invalid_tls_files_are_fatal() {
    let mut cert = tempfile::NamedTempFile::new().unwrap();
    let mut key = tempfile::NamedTempFile::new().unwrap();
    writeln!(cert, "not a certificate").unwrap();
    writeln!(key, "not a key").unwrap();

    let config = config_from(&[("LISTEN_PORT", "0"), ("LISTEN_HTTPS", "true")])
        .with_tls_paths(cert.path(), key.path());
    let app = create_router(AppState::from_config(&config));

    let err = serve(app, &config, Handle::new()).await.unwrap_err();
    assert!(matches!(err, ServerError::TlsConfig(_)), "{err:?}");
}

#[tokio::test]
async fn https_flag_must_be_exactly_true() {
    // "TRUE" means plain HTTP, so the missing certificate files do not matter
    let dir = tempfile::tempdir().unwrap();
    let config = config_from(&[("LISTEN_PORT", "0"), ("LISTEN_HTTPS", "TRUE")])
        .with_tls_paths(dir.path().join("server.crt"), dir.path().join("server.key"));
    assert!(!config.tls.enabled);

    let (addr, _server) = spawn_server(config).await;
    let (status, body) = http_request(addr, "GET", "/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "stub container for undefined service\n");
}
