//! stub-container entry point.
//!
//! Initializes tracing, snapshots configuration from the environment, builds
//! the router and serves until a fatal error, which exits the process with
//! status 1.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stub_container::config::{
    AppConfig, LogFormat, DEFAULT_LOG_FILTER, DEFAULT_TLS_CERT_PATH, DEFAULT_TLS_KEY_PATH,
};
use stub_container::{create_router, http::start_server, AppState};

/// Placeholder service answering with an identification message
#[derive(Parser, Debug)]
#[command(name = "stub-container", version, about)]
struct Args {
    /// Log level filter (e.g., "stub_container=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// TLS certificate used when LISTEN_HTTPS=true
    #[arg(long, default_value = DEFAULT_TLS_CERT_PATH)]
    tls_cert: String,

    /// TLS private key used when LISTEN_HTTPS=true
    #[arg(long, default_value = DEFAULT_TLS_KEY_PATH)]
    tls_key: String,
}

fn init_tracing(log_filter: &str, format: LogFormat) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(log_filter));

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, args.log_format);

    let config = AppConfig::from_env().with_tls_paths(args.tls_cert, args.tls_key);
    tracing::info!("Running stub container for {} service", config.app_name);
    tracing::debug!(
        listen_addr = %config.listen_addr,
        https = config.tls.enabled,
        "Loaded configuration"
    );

    let app = create_router(AppState::from_config(&config));

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "unexpected error");
        std::process::exit(1);
    }
}
