//! Configuration schema definitions.
//!
//! Two shapes live here: `FileConfig`, the serde view of the optional YAML
//! config file, and `Config`, the resolved form the rest of the process runs
//! on. File fields are all optional; defaults are applied during resolution,
//! not during deserialization.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Script used when neither `--script` nor a config file provides one.
pub const DEFAULT_SCRIPT: &str = "./hapttic_request_handler.sh";

/// Content written when a handler script has to be created on the fly.
pub const DEFAULT_COMMAND: &str = "#!/bin/sh\necho $1";

/// Default listen host.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Raw configuration as read from the YAML file.
///
/// Only consulted when `--config` was passed. An empty `bind` or a zero
/// `port` counts as unset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub error: Option<bool>,
    pub scripts: BTreeMap<String, String>,
}

/// Final resolved configuration.
///
/// Built exactly once at startup and immutable afterwards. Every key in
/// `scripts` starts with `/`, and every value is an absolute path to a file
/// that existed on disk when resolution finished.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, `"{bind}:{port}"`.
    pub addr: String,

    /// Listen host.
    pub bind: String,

    /// Listen port.
    pub port: u16,

    /// Whether script failure detail is echoed to clients and logged.
    pub log_error: bool,

    /// Routing table: URL path prefix to handler script.
    pub scripts: BTreeMap<String, PathBuf>,
}
