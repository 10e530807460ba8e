//! Request handlers bound to a single script.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::exec::invoke;
use crate::http::snapshot::RequestSnapshot;

/// Fixed body returned when script execution fails.
pub const ERROR_BODY: &str = "500 Internal Server Error";

/// A request handler bound to one script and the error-visibility flag.
///
/// Constructed once per route at registration time; the script path is
/// never re-resolved while serving.
#[derive(Debug, Clone)]
pub struct ScriptHandler {
    script: PathBuf,
    log_error: bool,
}

impl ScriptHandler {
    pub fn new(script: PathBuf, log_error: bool) -> Self {
        Self { script, log_error }
    }

    /// The script this handler dispatches to.
    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Handle one request: snapshot it, run the script, translate the outcome.
    pub async fn handle(&self, req: Request<Body>) -> Response {
        let snapshot = RequestSnapshot::from_request(req).await;

        // A snapshot that cannot be serialized is a programming defect;
        // there is no recoverable path.
        let payload = match snapshot.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, "request snapshot serialization failed");
                std::process::exit(1);
            }
        };

        tracing::info!(script = %self.script.display(), "executing handler script");
        let outcome = invoke(&self.script, &payload).await;

        if outcome.succeeded {
            return (StatusCode::OK, outcome.stdout).into_response();
        }

        if self.log_error {
            let output = String::from_utf8_lossy(&outcome.combined).into_owned();
            tracing::error!(
                script = %self.script.display(),
                params = %payload,
                output = %output,
                "handler script failed"
            );
            let body = format!("{ERROR_BODY}\n{output}");
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }

        tracing::warn!(script = %self.script.display(), "handler script failed");
        (StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY).into_response()
    }
}
