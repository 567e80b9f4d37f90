//! Interceptor port and the chain continuation

use std::sync::Arc;

use crate::domain::errors::CallResult;
use crate::domain::models::{Invocation, Value};

/// The innermost step of a chain: performs the real call
pub type Terminal<'a> = dyn Fn(&Invocation) -> CallResult<Value> + 'a;

/// A behavior wrapped around an invocation
///
/// An interceptor receives the invocation and the continuation for the rest
/// of the chain. Code before `next.proceed(..)` runs on the way in, code after
/// it runs on the way out, in reverse order of declaration. Returning without
/// proceeding skips every inner interceptor and the real call.
pub trait Interceptor: Send + Sync {
    /// Stable name used in logs and error reports
    fn name(&self) -> &str;

    /// Wrap the invocation
    fn intercept(&self, invocation: &Invocation, next: Next<'_>) -> CallResult<Value>;
}

/// Continuation representing the rest of the chain, including the real call
pub struct Next<'a> {
    rest: &'a [Arc<dyn Interceptor>],
    terminal: &'a Terminal<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(rest: &'a [Arc<dyn Interceptor>], terminal: &'a Terminal<'a>) -> Self {
        Self { rest, terminal }
    }

    /// Run the rest of the chain
    pub fn proceed(self, invocation: &Invocation) -> CallResult<Value> {
        match self.rest.split_first() {
            Some((head, tail)) => head.intercept(invocation, Next::new(tail, self.terminal)),
            None => (self.terminal)(invocation),
        }
    }

    /// Number of interceptors still to run before the real call
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }
}
