//! HTTP subsystem: server wiring, request snapshots, script-bound handlers.

pub mod handler;
pub mod server;
pub mod snapshot;

pub use server::HttpServer;
pub use snapshot::RequestSnapshot;
