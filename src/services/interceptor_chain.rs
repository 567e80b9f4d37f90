//! Interceptor Chain
//!
//! An ordered list of interceptors wrapped around a real call. The first
//! interceptor is the outermost scope: "before" logic runs in declaration
//! order and "after" logic in reverse.

use std::fmt;
use std::sync::Arc;

use crate::domain::errors::CallResult;
use crate::domain::models::{Invocation, Value};
use crate::domain::ports::{Interceptor, Next, Terminal};

/// Ordered composition of interceptors
///
/// Building a chain has no side effects; everything happens in [`run`].
///
/// [`run`]: InterceptorChain::run
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Empty chain; running it performs only the real call
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor inside the ones already added
    #[must_use]
    pub fn with(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Append an interceptor inside the ones already added
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Run the chain, ending in `terminal`
    pub fn run(&self, invocation: &Invocation, terminal: &Terminal<'_>) -> CallResult<Value> {
        Next::new(&self.interceptors, terminal).proceed(invocation)
    }

    /// Interceptors, outermost first
    pub fn interceptors(&self) -> &[Arc<dyn Interceptor>] {
        &self.interceptors
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no interceptors
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl FromIterator<Arc<dyn Interceptor>> for InterceptorChain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Interceptor>>>(iter: I) -> Self {
        Self {
            interceptors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.interceptors.iter().map(|i| i.name()))
            .finish()
    }
}
