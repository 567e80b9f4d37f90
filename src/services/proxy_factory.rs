//! Proxy Factory
//!
//! Produces stand-ins for targets. A proxy exposes the target's callable
//! surface; every call is matched against the binding table in declaration
//! order and routed through the first matching binding's chain. Calls no
//! rule selects go straight to the target.

use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::domain::errors::CallResult;
use crate::domain::models::{Invocation, SelectionRule, TargetDescriptor, Value};
use crate::domain::ports::{Callable, Interceptor};
use crate::services::call_selector;
use crate::services::interceptor_chain::InterceptorChain;

/// A selection rule paired with the chain it applies
#[derive(Debug, Clone)]
pub struct Binding {
    /// Which calls the binding selects
    pub rule: SelectionRule,
    /// Interceptors applied to selected calls
    pub chain: InterceptorChain,
}

impl Binding {
    /// Pair a rule with a chain
    pub const fn new(rule: SelectionRule, chain: InterceptorChain) -> Self {
        Self { rule, chain }
    }
}

/// Stateless factory for [`Proxy`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyFactory;

impl ProxyFactory {
    /// Wrap `target` with `bindings`
    pub fn create_proxy(target: Arc<dyn Callable>, bindings: Vec<Binding>) -> Proxy {
        Proxy { target, bindings }
    }
}

/// Builder for a single proxy's binding table
pub struct ProxyBuilder {
    target: Arc<dyn Callable>,
    bindings: Vec<Binding>,
}

impl ProxyBuilder {
    /// Start a binding table for `target`
    pub fn new(target: Arc<dyn Callable>) -> Self {
        Self {
            target,
            bindings: Vec::new(),
        }
    }

    /// Add a binding after the ones already declared
    #[must_use]
    pub fn bind(mut self, rule: SelectionRule, chain: InterceptorChain) -> Self {
        self.bindings.push(Binding::new(rule, chain));
        self
    }

    /// Add a binding whose chain holds `interceptors`, outermost first
    #[must_use]
    pub fn intercept<I>(self, rule: SelectionRule, interceptors: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Interceptor>>,
    {
        self.bind(rule, interceptors.into_iter().collect())
    }

    /// Add several prepared bindings
    #[must_use]
    pub fn bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Finish the table and produce the proxy
    pub fn build(self) -> Proxy {
        ProxyFactory::create_proxy(self.target, self.bindings)
    }
}

/// Stand-in for a target, routing selected calls through interceptor chains
///
/// Immutable after construction; safe to share across threads.
#[derive(Clone)]
pub struct Proxy {
    target: Arc<dyn Callable>,
    bindings: Vec<Binding>,
}

impl Proxy {
    /// The wrapped target
    pub fn target(&self) -> &Arc<dyn Callable> {
        &self.target
    }

    /// Binding table, in match order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First binding selecting `invocation`, if any
    pub fn binding_for(&self, invocation: &Invocation) -> Option<&Binding> {
        self.bindings
            .iter()
            .find(|binding| call_selector::matches(&binding.rule, invocation))
    }
}

impl Callable for Proxy {
    fn descriptor(&self) -> &TargetDescriptor {
        self.target.descriptor()
    }

    fn call(&self, method: &str, args: &[Value]) -> CallResult<Value> {
        let descriptor = self.target.descriptor();

        // Undeclared methods are the target's to reject.
        let Some(declared) = descriptor.resolve(method, args.len()) else {
            return self.target.call(method, args);
        };

        let invocation = Invocation::new(descriptor, declared.clone(), args.to_vec());

        let Some(binding) = self.binding_for(&invocation) else {
            trace!(call = %invocation, "no binding selected call");
            return self.target.call(method, args);
        };

        trace!(call = %invocation, chain = ?binding.chain, "routing call through chain");
        let target = &self.target;
        binding.chain.run(&invocation, &|inv: &Invocation| {
            target.call(&inv.signature().name, inv.args())
        })
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &self.target.descriptor().type_name.qualified())
            .field("bindings", &self.bindings)
            .finish()
    }
}
