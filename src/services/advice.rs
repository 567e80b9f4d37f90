//! Advice adapter
//!
//! Lets a behavior be written as separate before / after-returning /
//! after-throwing / after hooks instead of a single around method.

use crate::domain::errors::{CallError, CallResult};
use crate::domain::models::{Invocation, Value};
use crate::domain::ports::{Interceptor, Next};

/// Hook-style behavior; every hook defaults to doing nothing
pub trait Advice: Send + Sync {
    /// Stable name used in logs and error reports
    fn name(&self) -> &str;

    /// Runs before the rest of the chain
    ///
    /// A failure here skips the real call, every inner interceptor, and this
    /// advice's own after-hooks. Outer interceptors still observe it.
    fn before(&self, _invocation: &Invocation) -> CallResult<()> {
        Ok(())
    }

    /// Runs when the rest of the chain returned a value
    fn after_returning(&self, _invocation: &Invocation, _result: &Value) {}

    /// Runs when the rest of the chain failed
    fn after_throwing(&self, _invocation: &Invocation, _error: &CallError) {}

    /// Runs after either outcome, once `before` succeeded
    fn after(&self, _invocation: &Invocation) {}
}

/// Adapts an [`Advice`] into an [`Interceptor`]
pub struct AdviceInterceptor<A> {
    advice: A,
}

impl<A: Advice> AdviceInterceptor<A> {
    /// Wrap an advice
    pub const fn new(advice: A) -> Self {
        Self { advice }
    }

    /// The wrapped advice
    pub const fn advice(&self) -> &A {
        &self.advice
    }
}

impl<A: Advice> Interceptor for AdviceInterceptor<A> {
    fn name(&self) -> &str {
        self.advice.name()
    }

    fn intercept(&self, invocation: &Invocation, next: Next<'_>) -> CallResult<Value> {
        self.advice.before(invocation)?;

        let result = next.proceed(invocation);
        match &result {
            Ok(value) => self.advice.after_returning(invocation, value),
            Err(error) => self.advice.after_throwing(invocation, error),
        }
        self.advice.after(invocation);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MethodDescriptor, MethodSignature, TargetDescriptor, TypeName};
    use crate::services::interceptor_chain::InterceptorChain;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Audit {
        events: Mutex<Vec<String>>,
        deny: bool,
    }

    impl Advice for Arc<Audit> {
        fn name(&self) -> &str {
            "audit"
        }

        fn before(&self, invocation: &Invocation) -> CallResult<()> {
            self.events.lock().unwrap().push(format!("before {invocation}"));
            if self.deny {
                return Err(CallError::Interceptor {
                    interceptor: "audit".to_string(),
                    reason: "denied".to_string(),
                });
            }
            Ok(())
        }

        fn after_returning(&self, _invocation: &Invocation, result: &Value) {
            self.events.lock().unwrap().push(format!("returned {result}"));
        }

        fn after_throwing(&self, _invocation: &Invocation, error: &CallError) {
            self.events.lock().unwrap().push(format!("threw {error}"));
        }

        fn after(&self, _invocation: &Invocation) {
            self.events.lock().unwrap().push("after".to_string());
        }
    }

    fn invocation() -> Invocation {
        let descriptor = TargetDescriptor::new(
            TypeName::parse("members.MemberRegisterService"),
            vec![MethodDescriptor::public(MethodSignature::new(
                "regist",
                ["String"],
            ))],
        );
        let method = descriptor.methods[0].clone();
        Invocation::new(&descriptor, method, vec![Value::from("kim")])
    }

    fn run(audit: &Arc<Audit>, outcome: CallResult<Value>) -> CallResult<Value> {
        let chain = InterceptorChain::new().with(Arc::new(AdviceInterceptor::new(Arc::clone(audit))));
        chain.run(&invocation(), &move |_| outcome.clone())
    }

    #[test]
    fn test_returning_hooks() {
        let audit = Arc::new(Audit::default());
        assert_eq!(run(&audit, Ok(Value::Int(1))), Ok(Value::Int(1)));
        assert_eq!(
            *audit.events.lock().unwrap(),
            vec![
                "before MemberRegisterService.regist(\"kim\")",
                "returned 1",
                "after"
            ]
        );
    }

    #[test]
    fn test_throwing_hooks() {
        let audit = Arc::new(Audit::default());
        let failure = CallError::Failed {
            type_name: "MemberRegisterService".to_string(),
            method: "regist".to_string(),
            reason: "duplicate member".to_string(),
        };
        assert_eq!(run(&audit, Err(failure.clone())), Err(failure));
        let events = audit.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events[1].starts_with("threw "));
        assert!(events[1].contains("duplicate member"));
        assert_eq!(events[2], "after");
    }

    #[test]
    fn test_adapter_exposes_advice() {
        let audit = Arc::new(Audit::default());
        let interceptor = AdviceInterceptor::new(Arc::clone(&audit));
        assert_eq!(interceptor.name(), "audit");
        assert!(Arc::ptr_eq(interceptor.advice(), &audit));
    }

    #[test]
    fn test_before_failure_skips_own_after_hooks() {
        let audit = Arc::new(Audit {
            deny: true,
            ..Audit::default()
        });
        let result = run(&audit, Ok(Value::Int(1)));
        assert!(matches!(result, Err(CallError::Interceptor { .. })));
        assert_eq!(audit.events.lock().unwrap().len(), 1);
    }
}
