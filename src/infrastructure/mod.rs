//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing-subscriber, tracing-appender)
//! - Timing sinks satisfying the `TimingSink` port

pub mod config;
pub mod logging;
pub mod sinks;

pub use sinks::{sink_for, TracingSink, WriterSink};
