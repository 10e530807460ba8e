//! Script execution subsystem.
//!
//! One OS process per invocation, no pooling and no cap: under concurrent
//! load the server spawns one process per in-flight request.

pub mod invoker;

pub use invoker::{invoke, ProcessOutcome, DEFAULT_SHELL};
