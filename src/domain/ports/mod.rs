//! Port trait definitions (Hexagonal Architecture)
//!
//! - Callable: the callable surface shared by targets and proxies
//! - Interceptor: a behavior wrapped around an invocation
//! - TimingSink: where elapsed-time records go

pub mod callable;
pub mod interceptor;
pub mod timing_sink;

pub use callable::{int_arg, no_such_method, Callable};
pub use interceptor::{Interceptor, Next, Terminal};
pub use timing_sink::TimingSink;
