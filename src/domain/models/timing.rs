//! Timing records emitted around intercepted calls

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// One elapsed-time measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingRecord {
    /// Simple name of the target's type
    pub type_name: String,
    /// Invoked method name
    pub method: String,
    /// Arguments rendered as text
    pub args: String,
    /// Wall-clock time spent in the rest of the chain
    pub elapsed: Duration,
    /// Whether the wrapped call failed
    pub failed: bool,
}

impl TimingRecord {
    /// Elapsed time in whole nanoseconds, saturating at `u64::MAX`
    pub fn elapsed_ns(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// `<TypeName>.<methodName>(<args>) elapsed: <nanoseconds> ns`
impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({}) elapsed: {} ns",
            self.type_name,
            self.method,
            self.args,
            self.elapsed_ns()
        )
    }
}
