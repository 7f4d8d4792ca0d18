//! stub-container: a placeholder network service.
//!
//! Answers every request with a line naming the service it stands in for,
//! and exposes `/nettest/{host}/{port}` to check TCP reachability from
//! wherever the stub is deployed.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{ProbeError, ServerError};
pub use probe::TcpProber;
pub use routes::create_router;
pub use state::AppState;
