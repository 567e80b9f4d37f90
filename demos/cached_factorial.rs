//! Proxies a recursive factorial calculator with timing and memoization,
//! then calls factorial(7), factorial(7), factorial(5), factorial(5).
//!
//! Run with: cargo run --example cached_factorial
//! Set INTERPOSE_LOGGING__LEVEL=debug to see cache hits and misses.

use std::sync::Arc;

use anyhow::{Context, Result};
use interpose::domain::models::{BindingConfig, InterceptorKind, RuleConfig, TimingSinkKind};
use interpose::infrastructure::logging::{LogConfig, LoggerImpl};
use interpose::{
    sink_for, Assembler, CalculatorTarget, Callable, ConfigLoader, RecursiveCalculator, Value,
};

fn main() -> Result<()> {
    let mut config = ConfigLoader::load()?;
    if config.bindings.is_empty() {
        config.timing_sink = TimingSinkKind::Stdout;
        config.bindings.push(BindingConfig {
            rule: RuleConfig {
                namespace_prefix: "calc".to_string(),
                ..RuleConfig::default()
            },
            interceptors: vec![InterceptorKind::Timing, InterceptorKind::Memoize],
        });
    }

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let assembly = Assembler::new(sink_for(config.timing_sink))
        .assemble(&config.bindings)
        .context("Failed to assemble bindings")?;

    let target = Arc::new(CalculatorTarget::new(RecursiveCalculator));
    let calculator = assembly.proxy(target.clone());

    for n in [7, 7, 5, 5] {
        let result = calculator.call("factorial", &[Value::Int(n)])?;
        println!("factorial({n}) = {result}");
    }

    println!("real invocations: {}", target.invocations());
    for (i, cache) in assembly.caches.iter().enumerate() {
        println!("cache {i}: {}", serde_json::to_string(&cache.stats())?);
    }

    Ok(())
}
