//! Domain errors for call interception.

use thiserror::Error;

/// Failures on the call path: from the target, or from an interceptor.
///
/// Failures are never recovered by the interception core; they are observed
/// and forwarded unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The target declares no method with this name and arity
    #[error("No method {method} on {type_name}")]
    NoSuchMethod {
        /// Qualified name of the target type
        type_name: String,
        /// Method name with arity, e.g. `square/1`
        method: String,
    },

    /// Arguments do not fit the method's parameters
    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments {
        /// Method that rejected the arguments
        method: String,
        /// What was wrong
        reason: String,
    },

    /// The real method ran and failed
    #[error("{type_name}.{method} failed: {reason}")]
    Failed {
        /// Simple name of the target type
        type_name: String,
        /// Method that failed
        method: String,
        /// Failure description from the target
        reason: String,
    },

    /// An interceptor refused or aborted the call
    #[error("Interceptor '{interceptor}' failed: {reason}")]
    Interceptor {
        /// Name reported by the interceptor
        interceptor: String,
        /// Failure description
        reason: String,
    },
}

/// Result of a proxied or direct call
pub type CallResult<T> = Result<T, CallError>;

/// Errors raised while building a selection rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The name glob is empty or does not compile
    #[error("Invalid name pattern '{pattern}': {reason}")]
    InvalidNamePattern {
        /// Pattern as written
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// The prefix has an empty segment or whitespace
    #[error("Invalid namespace prefix '{0}'")]
    InvalidNamespacePrefix(String),
}

/// Errors raised by an observability sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing the line failed
    #[error("Failed to write timing record: {0}")]
    Write(#[from] std::io::Error),

    /// The sink cannot accept records
    #[error("Timing sink unavailable: {0}")]
    Unavailable(String),
}
