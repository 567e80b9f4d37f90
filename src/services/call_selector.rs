//! Call Selector
//!
//! Decides whether an invocation is selected by a rule. All three
//! predicates must hold; evaluation is pure and runs on every call.

use crate::domain::models::{
    Invocation, SelectionRule, TypeName, Visibility, VisibilityRequirement,
};

/// Check whether `rule` selects `invocation`
pub fn matches(rule: &SelectionRule, invocation: &Invocation) -> bool {
    matches_method(
        rule,
        invocation.type_name(),
        &invocation.signature().name,
        invocation.method().visibility,
    )
}

/// Check a rule against the parts of an invocation
pub fn matches_method(
    rule: &SelectionRule,
    type_name: &TypeName,
    method: &str,
    visibility: Visibility,
) -> bool {
    visibility_matches(rule.visibility(), visibility)
        && namespace_matches(rule.namespace_prefix(), &type_name.namespace)
        && rule.name_matches(method)
}

/// Visibility predicate
pub const fn visibility_matches(required: VisibilityRequirement, actual: Visibility) -> bool {
    match required {
        VisibilityRequirement::Any => true,
        VisibilityRequirement::Public => matches!(actual, Visibility::Public),
    }
}

/// Namespace predicate
///
/// Prefixes match whole segments: `billing` selects `billing` and
/// `billing.tax` but not `billingx`. An empty prefix selects everything.
pub fn namespace_matches(prefix: &str, namespace: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match namespace.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
