//! Common test utilities for integration tests
//!
//! Shared targets and sinks used across the proxy integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use interpose::domain::errors::SinkError;
use interpose::domain::ports::{int_arg, no_such_method};
use interpose::{
    CallError, CallResult, Callable, MethodDescriptor, MethodSignature, TargetDescriptor,
    TimingRecord, TimingSink, TypeName, Value, Visibility,
};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Timing sink keeping every record in memory
#[derive(Default)]
pub struct CollectingSink {
    records: Mutex<Vec<TimingRecord>>,
}

impl CollectingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<TimingRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(ToString::to_string).collect()
    }
}

impl TimingSink for CollectingSink {
    fn record(&self, record: &TimingRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// A slow ledger service with an observable side effect per real call
///
/// - `balance(account)` sleeps for `delay`, appends to the journal and
///   returns `account * 100`
/// - `withdraw(account)` always fails
/// - `reconcile()` is internal
pub struct Ledger {
    descriptor: TargetDescriptor,
    delay: Duration,
    calls: AtomicU64,
    journal: Mutex<Vec<String>>,
}

impl Ledger {
    pub fn new(namespace: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            descriptor: TargetDescriptor::new(
                TypeName::new(namespace, "Ledger"),
                vec![
                    MethodDescriptor::public(MethodSignature::new("balance", ["i64"])),
                    MethodDescriptor::public(MethodSignature::new("withdraw", ["i64"])),
                    MethodDescriptor::with_visibility(
                        MethodSignature::new("reconcile", Vec::<String>::new()),
                        Visibility::Internal,
                    ),
                ],
            ),
            delay,
            calls: AtomicU64::new(0),
            journal: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }
}

impl Callable for Ledger {
    fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    fn call(&self, method: &str, args: &[Value]) -> CallResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match (method, args.len()) {
            ("balance", 1) => {
                let account = int_arg(method, args, 0)?;
                std::thread::sleep(self.delay);
                self.journal.lock().unwrap().push(format!("balance {account}"));
                Ok(Value::Int(account * 100))
            }
            ("withdraw", 1) => Err(CallError::Failed {
                type_name: "Ledger".to_string(),
                method: "withdraw".to_string(),
                reason: "insufficient funds".to_string(),
            }),
            ("reconcile", 0) => {
                self.journal.lock().unwrap().push("reconcile".to_string());
                Ok(Value::Bool(true))
            }
            _ => Err(no_such_method(&self.descriptor, method, args.len())),
        }
    }
}
