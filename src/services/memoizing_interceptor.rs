//! Memoizing Interceptor
//!
//! Caches successful results keyed by target, method and argument values.
//! A hit returns the stored value without running the rest of the chain, so
//! the real call's side effects do not happen on a hit. Failures are never
//! stored.
//!
//! The cache is safe to share between threads but does not coalesce
//! concurrent misses: two threads missing on the same key both run the real
//! call and the last write wins. Memoized methods must be deterministic.
//! No lock is held while the real call runs.
//!
//! Entries live as long as the interceptor; there is no eviction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::domain::errors::CallResult;
use crate::domain::models::{CacheKey, CacheStats, Invocation, Value};
use crate::domain::ports::{Interceptor, Next};

/// Result cache wrapped around calls
#[derive(Default)]
pub struct MemoizingInterceptor {
    cache: RwLock<HashMap<CacheKey, Value>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoizingInterceptor {
    /// Create an interceptor with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored result
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Whether a result is stored for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of stored results
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored result; counters are kept
    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("memoization cache cleared");
    }

    /// Current hit/miss counters and entry count
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn store(&self, key: CacheKey, value: Value) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }
}

impl Interceptor for MemoizingInterceptor {
    fn name(&self) -> &str {
        "memoize"
    }

    fn intercept(&self, invocation: &Invocation, next: Next<'_>) -> CallResult<Value> {
        let key = CacheKey::from_invocation(invocation);

        if let Some(value) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, result = %value, "served from cache");
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = next.proceed(invocation)?;

        debug!(key = %key, result = %value, "added to cache");
        self.store(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CallError;
    use crate::domain::models::{MethodDescriptor, MethodSignature, TargetDescriptor, TypeName};
    use crate::services::interceptor_chain::InterceptorChain;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            TypeName::parse("chap07.Calculator"),
            vec![
                MethodDescriptor::public(MethodSignature::new("factorial", ["i64"])),
                MethodDescriptor::public(MethodSignature::new("square", ["i64"])),
                MethodDescriptor::public(MethodSignature::new("join", ["list"])),
            ],
        )
    }

    fn call(descriptor: &TargetDescriptor, method: &str, args: Vec<Value>) -> Invocation {
        let method = descriptor.resolve(method, 1).cloned().unwrap();
        Invocation::new(descriptor, method, args)
    }

    #[test]
    fn test_hit_skips_real_call() {
        let memo = Arc::new(MemoizingInterceptor::new());
        let chain = InterceptorChain::new().with(memo.clone());
        let d = descriptor();
        let calls = AtomicUsize::new(0);
        let terminal = |_: &Invocation| -> CallResult<Value> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Int(5040))
        };

        assert_eq!(chain.run(&call(&d, "factorial", vec![Value::Int(7)]), &terminal), Ok(Value::Int(5040)));
        assert_eq!(chain.run(&call(&d, "factorial", vec![Value::Int(7)]), &terminal), Ok(Value::Int(5040)));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            memo.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_structurally_equal_arguments_hit() {
        let memo = Arc::new(MemoizingInterceptor::new());
        let chain = InterceptorChain::new().with(memo.clone());
        let d = descriptor();
        let calls = AtomicUsize::new(0);
        let terminal = |inv: &Invocation| -> CallResult<Value> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(inv.render_args()))
        };

        let first = vec![Value::from(vec!["a", "b"])];
        let second = vec![Value::List(vec![Value::from("a"), Value::from("b")])];
        chain.run(&call(&d, "join", first), &terminal).unwrap();
        chain.run(&call(&d, "join", second), &terminal).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_method_and_arguments_separate_entries() {
        let memo = Arc::new(MemoizingInterceptor::new());
        let chain = InterceptorChain::new().with(memo.clone());
        let d = descriptor();

        chain.run(&call(&d, "factorial", vec![Value::Int(3)]), &|_| Ok(Value::Int(6))).unwrap();
        chain.run(&call(&d, "square", vec![Value::Int(3)]), &|_| Ok(Value::Int(9))).unwrap();
        chain.run(&call(&d, "factorial", vec![Value::Int(4)]), &|_| Ok(Value::Int(24))).unwrap();

        assert_eq!(memo.len(), 3);
        let key = CacheKey::from_invocation(&call(&d, "square", vec![Value::Int(3)]));
        assert_eq!(memo.get(&key), Some(Value::Int(9)));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let memo = Arc::new(MemoizingInterceptor::new());
        let chain = InterceptorChain::new().with(memo.clone());
        let d = descriptor();
        let calls = AtomicUsize::new(0);
        let terminal = |_: &Invocation| -> CallResult<Value> {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Failed {
                type_name: "Calculator".to_string(),
                method: "factorial".to_string(),
                reason: "overflow".to_string(),
            })
        };

        assert!(chain.run(&call(&d, "factorial", vec![Value::Int(99)]), &terminal).is_err());
        assert!(chain.run(&call(&d, "factorial", vec![Value::Int(99)]), &terminal).is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(memo.is_empty());
        assert_eq!(memo.stats().misses, 2);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let memo = Arc::new(MemoizingInterceptor::new());
        let chain = InterceptorChain::new().with(memo.clone());
        let d = descriptor();
        let calls = AtomicUsize::new(0);
        let terminal = |_: &Invocation| -> CallResult<Value> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Int(120))
        };

        chain.run(&call(&d, "factorial", vec![Value::Int(5)]), &terminal).unwrap();
        memo.clear();
        assert!(memo.is_empty());
        chain.run(&call(&d, "factorial", vec![Value::Int(5)]), &terminal).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
