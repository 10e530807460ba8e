//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (clap) + optional YAML file
//!     → loader.rs (read & deserialize)
//!     → resolve.rs (precedence merge, path normalization,
//!       handler script materialization)
//!     → Config (validated, immutable)
//!     → routing table compiled from Config.scripts
//! ```
//!
//! # Design Decisions
//! - Config is resolved exactly once at startup; no runtime reconfiguration
//! - A flag overrides the file only when it was explicitly passed
//! - Unresolvable routes are dropped; an empty final table is fatal

pub mod loader;
pub mod resolve;
pub mod schema;

pub use loader::ConfigError;
pub use resolve::resolve;
pub use schema::Config;
