//! Timing sink implementations
//!
//! - `TracingSink`: structured `tracing` events
//! - `WriterSink`: one text line per record on any `Write`

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

use crate::domain::errors::SinkError;
use crate::domain::models::{TimingRecord, TimingSinkKind};
use crate::domain::ports::TimingSink;

/// Emits each record as an `info` event with structured fields
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TimingSink for TracingSink {
    fn record(&self, record: &TimingRecord) -> Result<(), SinkError> {
        info!(
            target: "interpose::timing",
            type_name = %record.type_name,
            method = %record.method,
            args = %record.args,
            elapsed_ns = record.elapsed_ns(),
            failed = record.failed,
            "{record}"
        );
        Ok(())
    }
}

/// Writes `<TypeName>.<methodName>(<args>) elapsed: <ns> ns` lines
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to stderr
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TimingSink for WriterSink<W> {
    fn record(&self, record: &TimingRecord) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{record}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Build the sink named in configuration
pub fn sink_for(kind: TimingSinkKind) -> Arc<dyn TimingSink> {
    match kind {
        TimingSinkKind::Tracing => Arc::new(TracingSink),
        TimingSinkKind::Stdout => Arc::new(WriterSink::stdout()),
        TimingSinkKind::Stderr => Arc::new(WriterSink::stderr()),
    }
}
