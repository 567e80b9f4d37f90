//! Callable port shared by targets and proxies

use crate::domain::errors::{CallError, CallResult};
use crate::domain::models::{TargetDescriptor, Value};

/// The callable contract shared by real targets and their proxies
///
/// Callers depend only on this trait, so a proxy can stand in for the
/// target it wraps without the caller noticing.
///
/// # Examples
///
/// ```no_run
/// use interpose::domain::ports::Callable;
/// use interpose::domain::models::Value;
///
/// fn run(target: &dyn Callable) -> interpose::domain::errors::CallResult<Value> {
///     target.call("factorial", &[Value::Int(7)])
/// }
/// ```
pub trait Callable: Send + Sync {
    /// Identity, type and declared methods of the target
    fn descriptor(&self) -> &TargetDescriptor;

    /// Invoke `method` with `args`
    ///
    /// Returns the method's value, or the failure it raised.
    fn call(&self, method: &str, args: &[Value]) -> CallResult<Value>;
}

/// Failure for a method the target does not declare
pub fn no_such_method(descriptor: &TargetDescriptor, method: &str, arity: usize) -> CallError {
    CallError::NoSuchMethod {
        type_name: descriptor.type_name.qualified(),
        method: format!("{method}/{arity}"),
    }
}

/// Extract an integer argument at `index`
pub fn int_arg(method: &str, args: &[Value], index: usize) -> CallResult<i64> {
    let value = args.get(index).ok_or_else(|| CallError::InvalidArguments {
        method: method.to_string(),
        reason: format!("missing argument {index}"),
    })?;
    value.as_int().ok_or_else(|| CallError::InvalidArguments {
        method: method.to_string(),
        reason: format!("argument {index} must be int, got {}", value.kind()),
    })
}
