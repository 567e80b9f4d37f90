//! Factorial calculators exposed as callable targets
//!
//! Two strategies compute the same function; `CalculatorTarget` adapts
//! either one to the [`Callable`] port so it can be proxied.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::domain::errors::{CallError, CallResult};
use crate::domain::models::{MethodDescriptor, MethodSignature, TargetDescriptor, TypeName, Value};
use crate::domain::ports::{int_arg, no_such_method, Callable};

/// Namespace the calculator types are declared in
pub const CALCULATOR_NAMESPACE: &str = "calc";

/// Largest `n` whose factorial fits in an `i64`
pub const MAX_FACTORIAL_INPUT: i64 = 20;

/// A factorial strategy
pub trait Calculator: Send + Sync {
    /// Simple type name reported to interceptors
    fn type_name(&self) -> &'static str;

    /// `n!`, or `None` when `n` is negative or the result overflows `i64`
    fn factorial(&self, n: i64) -> Option<i64>;
}

/// Recursive definition: `n! = n * (n-1)!`
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveCalculator;

impl Calculator for RecursiveCalculator {
    fn type_name(&self) -> &'static str {
        "RecursiveCalculator"
    }

    fn factorial(&self, n: i64) -> Option<i64> {
        match n {
            n if !(0..=MAX_FACTORIAL_INPUT).contains(&n) => None,
            0 => Some(1),
            n => self.factorial(n - 1)?.checked_mul(n),
        }
    }
}

/// Loop over `1..=n`
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeCalculator;

impl Calculator for IterativeCalculator {
    fn type_name(&self) -> &'static str {
        "IterativeCalculator"
    }

    fn factorial(&self, n: i64) -> Option<i64> {
        if n < 0 {
            return None;
        }
        (1..=n).try_fold(1_i64, i64::checked_mul)
    }
}

/// Adapts a [`Calculator`] to the [`Callable`] port
///
/// Counts real invocations so callers can observe which calls reached it.
pub struct CalculatorTarget<C> {
    descriptor: TargetDescriptor,
    calculator: C,
    invocations: AtomicU64,
}

impl<C: Calculator> CalculatorTarget<C> {
    /// Wrap a calculator
    pub fn new(calculator: C) -> Self {
        let descriptor = TargetDescriptor::new(
            TypeName::new(CALCULATOR_NAMESPACE, calculator.type_name()),
            vec![MethodDescriptor::public(MethodSignature::new(
                "factorial",
                ["i64"],
            ))],
        );
        Self {
            descriptor,
            calculator,
            invocations: AtomicU64::new(0),
        }
    }

    /// Number of calls that reached the calculator
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }

    fn factorial(&self, args: &[Value]) -> CallResult<Value> {
        let n = int_arg("factorial", args, 0)?;
        self.invocations.fetch_add(1, Ordering::SeqCst);
        debug!(calculator = self.calculator.type_name(), n, "computing factorial");

        self.calculator
            .factorial(n)
            .map(Value::Int)
            .ok_or_else(|| CallError::Failed {
                type_name: self.calculator.type_name().to_string(),
                method: "factorial".to_string(),
                reason: if n < 0 {
                    format!("factorial of negative number {n}")
                } else {
                    format!("factorial of {n} overflows i64")
                },
            })
    }
}

impl<C: Calculator> Callable for CalculatorTarget<C> {
    fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    fn call(&self, method: &str, args: &[Value]) -> CallResult<Value> {
        match (method, args.len()) {
            ("factorial", 1) => self.factorial(args),
            _ => Err(no_such_method(&self.descriptor, method, args.len())),
        }
    }
}
