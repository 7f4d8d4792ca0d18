//! Shared helpers for server integration tests.

use std::net::SocketAddr;

use axum_server::Handle;
use stub_container::{create_router, http::serve, AppConfig, AppState, ServerError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Build a config from literal variables, as if they were the environment.
pub fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
}

/// Run the server in the background and wait until it is listening.
pub async fn spawn_server(
    config: AppConfig,
) -> (SocketAddr, JoinHandle<Result<(), ServerError>>) {
    let handle = Handle::new();
    let app = create_router(AppState::from_config(&config));

    let task = {
        let handle = handle.clone();
        tokio::spawn(async move { serve(app, &config, handle).await })
    };

    let bound = handle.listening().await.expect("server failed to bind");
    let addr = SocketAddr::from(([127, 0, 0, 1], bound.port()));
    (addr, task)
}

/// Send a bare HTTP/1.1 request and return (status, body).
pub async fn http_request(addr: SocketAddr, method: &str, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{} {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
        method, path
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").expect("malformed response");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("missing status code");
    (status, body.to_string())
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
