//! Flag and file merging into the final routing table.
//!
//! # Data Flow
//! ```text
//! CLI flags + optional YAML file
//!     → precedence merge (explicit flag > file value > built-in default)
//!     → seed "/" route when the table has only flag-level input
//!     → per entry: absolutize, materialize missing scripts, normalize keys
//!     → Config (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - A flag only overrides the file when it was actually passed
//! - Entries are rebuilt into a fresh map; the raw map is never mutated
//!   while it is being walked
//! - A route that cannot be resolved is dropped, not fatal; an empty final
//!   table is fatal

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::loader::{load_file, ConfigError};
use crate::config::schema::{
    Config, FileConfig, DEFAULT_BIND, DEFAULT_COMMAND, DEFAULT_PORT, DEFAULT_SCRIPT,
};

/// Resolve the final configuration from flags, the optional config file and
/// built-in defaults. Runs exactly once at startup.
pub fn resolve(cli: &Cli) -> Result<Config, ConfigError> {
    let file = match cli.config.as_deref() {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    let from_file = cli.config.is_some();

    let bind = cli
        .bind
        .clone()
        .or_else(|| file.bind.clone().filter(|b| !b.is_empty()))
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    let port = cli
        .port
        .or(file.port.filter(|p| *p != 0))
        .unwrap_or(DEFAULT_PORT);
    let log_error = cli.error || file.error.unwrap_or(false);

    // With error echoing on, the inline command gets stderr folded into
    // stdout before it is written out as a script.
    let command = cli.command.clone().map(|mut c| {
        if cli.error {
            c.push_str(" 2>&1 ");
        }
        c
    });

    let mut raw = file.scripts;
    let script = cli
        .script
        .clone()
        .unwrap_or_else(|| DEFAULT_SCRIPT.to_string());
    if cli.script.is_some() || cli.command.is_some() || raw.is_empty() {
        raw.insert("/".to_string(), script);
    }

    let scripts = resolve_table(raw, from_file, command.as_deref())?;
    if scripts.is_empty() {
        return Err(ConfigError::NoRoutes);
    }

    Ok(Config {
        addr: format!("{bind}:{port}"),
        bind,
        port,
        log_error,
        scripts,
    })
}

/// Walk the raw table and emit only valid, normalized entries.
fn resolve_table(
    raw: BTreeMap<String, String>,
    from_file: bool,
    command: Option<&str>,
) -> Result<BTreeMap<String, PathBuf>, ConfigError> {
    let mut resolved = BTreeMap::new();

    for (raw_path, mut script) in raw {
        if !from_file && script.is_empty() {
            tracing::info!(
                default = DEFAULT_SCRIPT,
                "script parameter is empty, falling back to the default handler script"
            );
            script = DEFAULT_SCRIPT.to_string();
        }

        let script = match std::path::absolute(&script) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(script = %script, error = %err, "cannot resolve script path, dropping route");
                continue;
            }
        };

        if !from_file {
            if let Some(command) = command {
                tracing::info!(
                    script = %script.display(),
                    content = command,
                    "command parameter given, creating handler script"
                );
                create_script(&script, command)?;
            }
        }

        if !script.exists() {
            if from_file {
                tracing::warn!(
                    script = %script.display(),
                    "handler script does not exist, removing route"
                );
                continue;
            }
            tracing::info!(
                script = %script.display(),
                content = DEFAULT_COMMAND,
                "handler script does not exist, creating it with default content"
            );
            create_script(&script, DEFAULT_COMMAND)?;
        }

        let path = if raw_path.starts_with('/') {
            raw_path
        } else {
            format!("/{raw_path}")
        };
        resolved.insert(path, script);
    }

    Ok(resolved)
}

fn create_script(path: &Path, content: &str) -> Result<(), ConfigError> {
    std::fs::write(path, content).map_err(|source| ConfigError::CreateScript {
        path: path.to_path_buf(),
        source,
    })
}
