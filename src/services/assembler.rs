//! Binding assembly
//!
//! Turns configured bindings into live rule/chain pairs. Every `memoize`
//! entry gets its own cache; timing interceptors share the supplied sink.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::domain::errors::RuleError;
use crate::domain::models::{BindingConfig, InterceptorKind, SelectionRule};
use crate::domain::ports::{Callable, Interceptor, TimingSink};
use crate::services::interceptor_chain::InterceptorChain;
use crate::services::memoizing_interceptor::MemoizingInterceptor;
use crate::services::proxy_factory::{Binding, Proxy, ProxyFactory};
use crate::services::timing_interceptor::TimingInterceptor;

/// Builds interceptors and bindings from configuration
pub struct Assembler {
    sink: Arc<dyn TimingSink>,
}

/// Bindings produced by an [`Assembler`], with handles on their caches
pub struct Assembly {
    /// Bindings in declaration order
    pub bindings: Vec<Binding>,
    /// Memoizing interceptors, in the order they were created
    pub caches: Vec<Arc<MemoizingInterceptor>>,
}

impl Assembly {
    /// Wrap `target` with these bindings
    pub fn proxy(&self, target: Arc<dyn Callable>) -> Proxy {
        ProxyFactory::create_proxy(target, self.bindings.clone())
    }
}

impl Assembler {
    /// Create an assembler whose timing interceptors report to `sink`
    pub fn new(sink: Arc<dyn TimingSink>) -> Self {
        Self { sink }
    }

    /// Build one interceptor; memoizers are also returned as a cache handle
    pub fn interceptor(
        &self,
        kind: InterceptorKind,
    ) -> (Arc<dyn Interceptor>, Option<Arc<MemoizingInterceptor>>) {
        match kind {
            InterceptorKind::Timing => {
                let timing: Arc<dyn Interceptor> =
                    Arc::new(TimingInterceptor::new(Arc::clone(&self.sink)));
                (timing, None)
            }
            InterceptorKind::Memoize => {
                let memo = Arc::new(MemoizingInterceptor::new());
                let interceptor: Arc<dyn Interceptor> = memo.clone();
                (interceptor, Some(memo))
            }
        }
    }

    /// Build the binding table
    #[instrument(skip(self, configs), fields(bindings = configs.len()))]
    pub fn assemble(&self, configs: &[BindingConfig]) -> Result<Assembly, RuleError> {
        let mut bindings = Vec::with_capacity(configs.len());
        let mut caches = Vec::new();

        for config in configs {
            let rule = SelectionRule::from_config(&config.rule)?;
            let mut chain = InterceptorChain::new();

            for &kind in &config.interceptors {
                let (interceptor, memo) = self.interceptor(kind);
                chain.push(interceptor);
                caches.extend(memo);
            }

            debug!(
                visibility = ?rule.visibility(),
                namespace_prefix = rule.namespace_prefix(),
                name_pattern = rule.name_pattern(),
                chain = ?chain,
                "assembled binding"
            );
            bindings.push(Binding::new(rule, chain));
        }

        info!(bindings = bindings.len(), caches = caches.len(), "binding table assembled");
        Ok(Assembly { bindings, caches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SinkError;
    use crate::domain::models::{RuleConfig, TimingRecord, VisibilityRequirement};

    struct Discard;

    impl TimingSink for Discard {
        fn record(&self, _record: &TimingRecord) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn binding(prefix: &str, interceptors: Vec<InterceptorKind>) -> BindingConfig {
        BindingConfig {
            rule: RuleConfig {
                visibility: VisibilityRequirement::Public,
                namespace_prefix: prefix.to_string(),
                name_pattern: "*".to_string(),
            },
            interceptors,
        }
    }

    #[test]
    fn test_assemble_preserves_order() {
        let assembler = Assembler::new(Arc::new(Discard));
        let assembly = assembler
            .assemble(&[
                binding("chap07", vec![InterceptorKind::Timing, InterceptorKind::Memoize]),
                binding("billing", vec![InterceptorKind::Memoize]),
            ])
            .unwrap();

        assert_eq!(assembly.bindings.len(), 2);
        assert_eq!(assembly.bindings[0].rule.namespace_prefix(), "chap07");
        let names: Vec<&str> = assembly.bindings[0]
            .chain
            .interceptors()
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(names, vec!["timing", "memoize"]);
        assert_eq!(assembly.caches.len(), 2);
        assert!(!Arc::ptr_eq(&assembly.caches[0], &assembly.caches[1]));
    }

    #[test]
    fn test_invalid_rule_rejected() {
        let assembler = Assembler::new(Arc::new(Discard));
        let result = assembler.assemble(&[binding("billing.", vec![InterceptorKind::Timing])]);
        assert!(matches!(result, Err(RuleError::InvalidNamespacePrefix(_))));
    }
}
