//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::probe::TcpProber;

/// Shared application state, cheap to clone across handlers.
///
/// The app name is fixed when the state is built and never re-read.
#[derive(Clone, Debug)]
pub struct AppState {
    pub app_name: Arc<str>,
    pub prober: TcpProber,
}

impl AppState {
    pub fn new(app_name: impl Into<Arc<str>>, prober: TcpProber) -> Self {
        Self {
            app_name: app_name.into(),
            prober,
        }
    }

    /// Creates state from the startup configuration with the default probe timeout.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.app_name.as_str(), TcpProber::default())
    }
}
