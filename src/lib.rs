//! Connects HTTP requests to shell scripts.

pub mod cli;
pub mod config;
pub mod exec;
pub mod http;
pub mod routing;

pub use cli::Cli;
pub use config::Config;
pub use http::HttpServer;
