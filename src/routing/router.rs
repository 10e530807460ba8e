//! Route lookup and dispatch table.
//!
//! # Design Decisions
//! - Routes are compiled once at startup and immutable at runtime
//! - Longest prefix wins; no regex in the hot path
//! - One handler per route, bound to its script at registration time

use crate::config::Config;
use crate::http::handler::ScriptHandler;

/// A single compiled route: a path prefix bound to a script handler.
#[derive(Debug)]
struct ScriptRoute {
    prefix: String,
    handler: ScriptHandler,
}

/// Immutable routing table mapping path prefixes to script handlers.
#[derive(Debug)]
pub struct ScriptRouter {
    routes: Vec<ScriptRoute>,
}

impl ScriptRouter {
    /// Compile the routing table from a resolved config.
    ///
    /// Handlers are registered sequentially; the table never changes after
    /// this returns.
    pub fn from_config(config: &Config) -> Self {
        let mut routes: Vec<ScriptRoute> = config
            .scripts
            .iter()
            .map(|(prefix, script)| {
                tracing::info!(path = %prefix, script = %script.display(), "forwarding requests");
                ScriptRoute {
                    prefix: prefix.clone(),
                    handler: ScriptHandler::new(script.clone(), config.log_error),
                }
            })
            .collect();

        // Longest prefix first so the most specific route wins.
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Self { routes }
    }

    /// Look up the handler for a request path.
    pub fn match_path(&self, path: &str) -> Option<&ScriptHandler> {
        self.routes
            .iter()
            .find(|route| path.starts_with(&route.prefix))
            .map(|route| &route.handler)
    }

    /// Number of compiled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
