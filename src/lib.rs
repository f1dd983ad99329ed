//! Conversion of a traced process state into serializable snapshots.
//!
//! The tracing engine provides a runtime model ([`debugger`]), this crate turns it into
//! DTOs ([`api`]) that are sent to a remote client.

pub mod api;
pub mod config;
pub mod debugger;
pub mod error;

pub use error::Error;
