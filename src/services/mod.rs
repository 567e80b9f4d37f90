//! Interception services
//!
//! Rule matching, chain composition, the built-in interceptors, and proxy
//! construction.

pub mod advice;
pub mod assembler;
pub mod call_selector;
pub mod interceptor_chain;
pub mod memoizing_interceptor;
pub mod proxy_factory;
pub mod timing_interceptor;

pub use advice::{Advice, AdviceInterceptor};
pub use assembler::{Assembler, Assembly};
pub use interceptor_chain::InterceptorChain;
pub use memoizing_interceptor::MemoizingInterceptor;
pub use proxy_factory::{Binding, Proxy, ProxyBuilder, ProxyFactory};
pub use timing_interceptor::TimingInterceptor;
