//! Domain layer for Interpose
//!
//! Call models, selection rules and the ports the interception services
//! are written against.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CallError, CallResult, RuleError, SinkError};
