//! Timing Interceptor
//!
//! Measures wall-clock time spent in the rest of the chain and hands it to a
//! [`TimingSink`]. Pure observer: results and failures pass through untouched.

use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::domain::errors::CallResult;
use crate::domain::models::{Invocation, TimingRecord, Value};
use crate::domain::ports::{Interceptor, Next, TimingSink};

/// Logs elapsed time around every call it wraps
pub struct TimingInterceptor {
    sink: Arc<dyn TimingSink>,
}

impl TimingInterceptor {
    /// Create a timing interceptor reporting to `sink`
    pub fn new(sink: Arc<dyn TimingSink>) -> Self {
        Self { sink }
    }
}

impl Interceptor for TimingInterceptor {
    fn name(&self) -> &str {
        "timing"
    }

    fn intercept(&self, invocation: &Invocation, next: Next<'_>) -> CallResult<Value> {
        let start = Instant::now();
        let result = next.proceed(invocation);
        let elapsed = start.elapsed();

        let record = TimingRecord {
            type_name: invocation.type_name().name.clone(),
            method: invocation.signature().name.clone(),
            args: invocation.render_args(),
            elapsed,
            failed: result.is_err(),
        };

        // Sink failures are best-effort; the call's own outcome always wins.
        if let Err(e) = self.sink.record(&record) {
            warn!(
                error = %e,
                type_name = %record.type_name,
                method = %record.method,
                "failed to record call timing"
            );
        }

        result
    }
}
