//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Build the Axum router with the catch-all dispatch handler
//! - Wire up middleware (request tracing)
//! - Serve on a bound listener until shutdown
//!
//! Requests carry no timeout: a hung handler script hangs its request, and
//! the script owns that trade-off.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routing::ScriptRouter;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ScriptRouter>,
}

/// HTTP server for the script dispatcher.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server from a resolved configuration.
    pub fn new(config: &Config) -> Self {
        let state = AppState {
            router: Arc::new(ScriptRouter::from_config(config)),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main dispatch handler: match the path prefix, hand off to its script.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();

    match state.router.match_path(&path) {
        Some(handler) => handler.handle(request).await,
        None => {
            tracing::warn!(path = %path, "no route matched");
            (StatusCode::NOT_FOUND, "no matching route").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
