//! hapttic: connects HTTP requests to shell scripts.
//!
//! # Data Flow
//! ```text
//! CLI flags + optional YAML config
//!     → config::resolve (merge, normalize, materialize handler scripts)
//!     → routing table (path prefix → script)
//!     → axum dispatch handler
//!     → /bin/sh <script> <request-json>
//!     → HTTP response (stdout on success, 500 on failure)
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hapttic::cli::Cli;
use hapttic::config::resolve;
use hapttic::http::HttpServer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hapttic=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "thanks for using hapttic"
    );

    let config = match resolve(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration resolution failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        address = %config.addr,
        routes = config.scripts.len(),
        "configuration loaded"
    );
    if config.log_error {
        tracing::info!("echoing script failures to clients and the log");
    }

    let listener = match TcpListener::bind(&config.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(address = %config.addr, error = %err, "failed to bind listener");
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(&config);
    if let Err(err) = server.run(listener).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}
