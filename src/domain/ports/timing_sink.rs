//! Destination port for timing records

use crate::domain::errors::SinkError;
use crate::domain::models::TimingRecord;

/// Observability sink receiving elapsed-time records
pub trait TimingSink: Send + Sync {
    /// Record one measurement
    fn record(&self, record: &TimingRecord) -> Result<(), SinkError>;
}
