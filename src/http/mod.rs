//! HTTP server module with optional TLS.
//!
//! - **HTTPS**: certificate and key read from fixed, pre-provisioned paths
//! - **HTTP**: plain listener
//!
//! There is no graceful shutdown: the serve loop runs until the process dies
//! or hits a fatal error. In HTTPS mode a SIGHUP reloads the certificate pair.

mod reload;
mod server;

pub use server::{parse_listen_addr, serve, start_server};
