//! Configuration resolution and constants.
//!
//! Runtime parameters come from the process environment. Each resolver is a
//! pure function of the environment at the moment it is called; absence of a
//! variable is never an error and falls back to a default. `AppConfig` is the
//! snapshot taken once at startup and handed to the router and the server.

use std::path::PathBuf;
use std::time::Duration;

use const_format::formatcp;

// =============================================================================
// Environment Variables
// =============================================================================

/// Name of the service this stub stands in for
pub const ENV_APP_NAME: &str = "APP_NAME";

/// TCP port to listen on (appended to the wildcard host)
pub const ENV_LISTEN_PORT: &str = "LISTEN_PORT";

/// Serve HTTPS when set to exactly "true"
pub const ENV_LISTEN_HTTPS: &str = "LISTEN_HTTPS";

// =============================================================================
// Defaults
// =============================================================================

/// App name used in the greeting when `APP_NAME` is unset
pub const DEFAULT_APP_NAME: &str = "undefined";

/// Host part of the listen address (all interfaces)
pub const LISTEN_HOST: &str = "0.0.0.0";

/// Port used when `LISTEN_PORT` is unset
pub const DEFAULT_LISTEN_PORT: u16 = 3000;

pub const DEFAULT_LISTEN_ADDR: &str = formatcp!("{}:{}", LISTEN_HOST, DEFAULT_LISTEN_PORT);

/// Pre-provisioned TLS certificate (PEM)
pub const DEFAULT_TLS_CERT_PATH: &str = "/server.crt";

/// Pre-provisioned TLS private key (PEM)
pub const DEFAULT_TLS_KEY_PATH: &str = "/server.key";

/// Upper bound for a single reachability probe
pub const PROBE_TIMEOUT_SECS: u64 = 3;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(PROBE_TIMEOUT_SECS);

/// Cache-Control for reachability results
pub const CACHE_CONTROL_NETTEST: &str = "no-store";

/// Default log filter when neither --log-level nor RUST_LOG is given
pub const DEFAULT_LOG_FILTER: &str = "stub_container=debug";

// =============================================================================
// Resolvers
// =============================================================================

/// Read a variable from the process environment.
///
/// Values that are not valid Unicode are treated as unset.
fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// App name from `APP_NAME`, or `"undefined"`.
pub fn resolve_app_name() -> String {
    resolve_app_name_with(env_lookup)
}

/// Listen address `0.0.0.0:<LISTEN_PORT>`, or `0.0.0.0:3000`.
///
/// The port is not validated here; a bad value fails when the server binds.
pub fn resolve_listen_address() -> String {
    resolve_listen_address_with(env_lookup)
}

/// Whether `LISTEN_HTTPS` is exactly `"true"`.
pub fn resolve_use_https() -> bool {
    resolve_use_https_with(env_lookup)
}

pub fn resolve_app_name_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_APP_NAME).unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
}

pub fn resolve_listen_address_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_LISTEN_PORT) {
        Some(port) => format!("{}:{}", LISTEN_HOST, port),
        None => DEFAULT_LISTEN_ADDR.to_string(),
    }
}

pub fn resolve_use_https_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LISTEN_HTTPS).is_some_and(|value| value == "true")
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable configuration snapshot taken at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Name shown in the greeting
    pub app_name: String,
    /// Address to bind, e.g. "0.0.0.0:3000"
    pub listen_addr: String,
    pub tls: TlsConfig,
}

/// TLS settings. The files are provisioned by the deployment, never by us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Serve HTTPS instead of plain HTTP
    pub enabled: bool,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_path: PathBuf::from(DEFAULT_TLS_CERT_PATH),
            key_path: PathBuf::from(DEFAULT_TLS_KEY_PATH),
        }
    }
}

impl AppConfig {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self {
            app_name: resolve_app_name(),
            listen_addr: resolve_listen_address(),
            tls: TlsConfig {
                enabled: resolve_use_https(),
                ..TlsConfig::default()
            },
        }
    }

    /// Build a snapshot from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            app_name: resolve_app_name_with(&lookup),
            listen_addr: resolve_listen_address_with(&lookup),
            tls: TlsConfig {
                enabled: resolve_use_https_with(&lookup),
                ..TlsConfig::default()
            },
        }
    }

    /// Override the TLS file locations.
    pub fn with_tls_paths(mut self, cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        self.tls.cert_path = cert_path.into();
        self.tls.key_path = key_path.into();
        self
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}
