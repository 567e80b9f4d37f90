//! Memoization cache keys and statistics

use serde::Serialize;
use std::fmt;

use super::invocation::{Invocation, MethodSignature, TargetId};
use super::value::{render_args, Value};

/// Lookup key for a memoized result
///
/// Derived from target identity, method signature and argument values.
/// Arguments compare by value, so structurally equal argument lists map to
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Target identity
    pub target: TargetId,
    /// Method signature
    pub method: MethodSignature,
    /// Argument values
    pub args: Vec<Value>,
}

impl CacheKey {
    /// Derive the key for an invocation
    pub fn from_invocation(invocation: &Invocation) -> Self {
        Self {
            target: invocation.target(),
            method: invocation.signature().clone(),
            args: invocation.args().to_vec(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}[{}]", self.target, self.method, render_args(&self.args))
    }
}

/// Snapshot of a memoizing interceptor's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to the real call
    pub misses: u64,
    /// Stored entries
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, 0.0 when nothing was looked up
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
