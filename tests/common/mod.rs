//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use hapttic::config::Config;
use hapttic::http::HttpServer;
use tokio::net::TcpListener;

static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Create a unique scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "hapttic-it-{}-{}-{}",
        std::process::id(),
        name,
        DIR_SEQ.fetch_add(1, Ordering::SeqCst)
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a handler script into `dir` and return its path.
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Build a config with the given routing table entries.
#[allow(dead_code)]
pub fn config_with_routes(routes: &[(&str, &Path)], log_error: bool) -> Config {
    let scripts: BTreeMap<String, PathBuf> = routes
        .iter()
        .map(|(prefix, script)| ((*prefix).to_string(), script.to_path_buf()))
        .collect();
    Config {
        addr: "127.0.0.1:0".to_string(),
        bind: "127.0.0.1".to_string(),
        port: 0,
        log_error,
        scripts,
    }
}

/// Build a one-route config for `script` mounted at `/`.
#[allow(dead_code)]
pub fn single_route_config(script: &Path, log_error: bool) -> Config {
    config_with_routes(&[("/", script)], log_error)
}

/// Bind an ephemeral port, spawn the server on it, return its address.
#[allow(dead_code)]
pub async fn start_server(config: Config) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(&config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// An HTTP client that ignores any ambient proxy configuration.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
