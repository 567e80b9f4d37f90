//! Domain models
//!
//! Plain data shared by the interception services.

pub mod cache;
pub mod config;
pub mod invocation;
pub mod selection;
pub mod timing;
pub mod value;

pub use cache::{CacheKey, CacheStats};
pub use config::{BindingConfig, Config, InterceptorKind, LoggingConfig, TimingSinkKind};
pub use invocation::{
    Invocation, MethodDescriptor, MethodSignature, TargetDescriptor, TargetId, TypeName,
    Visibility,
};
pub use selection::{RuleConfig, SelectionRule, VisibilityRequirement};
pub use timing::TimingRecord;
pub use value::{render_args, Value};
