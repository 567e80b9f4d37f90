//! Interpose - rule-selected call interception
//!
//! Wraps a target object in a proxy that routes selected method calls
//! through an ordered chain of interceptors. Two interceptors ship with the
//! crate: elapsed-time measurement and argument-keyed memoization.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): call models, selection rules, ports
//! - **Service Layer** (`services`): matching, chains, interceptors, proxies
//! - **Infrastructure Layer** (`infrastructure`): config, logging, timing sinks
//! - **Adapters** (`adapters`): sample targets
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use interpose::{
//!     CalculatorTarget, Callable, Interceptor, MemoizingInterceptor, ProxyBuilder,
//!     RecursiveCalculator, SelectionRule, TimingInterceptor, TracingSink, Value,
//! };
//!
//! let target = Arc::new(CalculatorTarget::new(RecursiveCalculator));
//! let timing: Arc<dyn Interceptor> = Arc::new(TimingInterceptor::new(Arc::new(TracingSink)));
//! let memo: Arc<dyn Interceptor> = Arc::new(MemoizingInterceptor::new());
//!
//! let proxy = ProxyBuilder::new(target)
//!     .intercept(SelectionRule::public("calc", "*").unwrap(), [timing, memo])
//!     .build();
//!
//! assert_eq!(proxy.call("factorial", &[Value::Int(7)]), Ok(Value::Int(5040)));
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{CalculatorTarget, IterativeCalculator, RecursiveCalculator};
pub use domain::errors::{CallError, CallResult, RuleError, SinkError};
pub use domain::models::{
    CacheKey, CacheStats, Config, Invocation, MethodDescriptor, MethodSignature, SelectionRule,
    TargetDescriptor, TargetId, TimingRecord, TypeName, Value, Visibility, VisibilityRequirement,
};
pub use domain::ports::{Callable, Interceptor, Next, TimingSink};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::{sink_for, TracingSink, WriterSink};
pub use services::{
    Advice, AdviceInterceptor, Assembler, Assembly, Binding, InterceptorChain,
    MemoizingInterceptor, Proxy, ProxyBuilder, ProxyFactory, TimingInterceptor,
};
