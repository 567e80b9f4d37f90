//! Invocation domain models
//!
//! Describes targets, their methods, and a single call made against them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::value::{render_args, Value};

/// Opaque identity of a target object
///
/// Minted once per target; two targets of the same type have distinct ids,
/// so their memoized results never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(Uuid);

impl TargetId {
    /// Mint a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified type name split into namespace and simple name
///
/// Namespace segments are separated by `.`: `billing.Invoice` has namespace
/// `billing` and simple name `Invoice`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Dotted namespace, empty for the root namespace
    pub namespace: String,
    /// Simple type name
    pub name: String,
}

impl TypeName {
    /// Build from namespace and simple name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a dotted path; the last segment is the simple name
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    /// Dotted path including the simple name
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Method visibility as declared by the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Part of the target's public surface
    Public,
    /// Reachable only from within the target's own namespace
    Internal,
    /// Reachable only from the declaring type
    Private,
}

/// Method name plus ordered parameter type names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Method name
    pub name: String,
    /// Parameter type names, in declaration order
    pub params: Vec<String>,
}

impl MethodSignature {
    /// Build a signature from a name and parameter type names
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

/// A method a target declares, with its visibility
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Name and parameter types
    pub signature: MethodSignature,
    /// Declared visibility
    pub visibility: Visibility,
}

impl MethodDescriptor {
    /// Public method
    pub fn public(signature: MethodSignature) -> Self {
        Self {
            signature,
            visibility: Visibility::Public,
        }
    }

    /// Method with an explicit visibility
    pub const fn with_visibility(signature: MethodSignature, visibility: Visibility) -> Self {
        Self {
            signature,
            visibility,
        }
    }
}

/// Everything a proxy needs to know about a target's callable surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Target identity
    pub id: TargetId,
    /// Declaring type of every method
    pub type_name: TypeName,
    /// Declared methods
    pub methods: Vec<MethodDescriptor>,
}

impl TargetDescriptor {
    /// Describe a new target; mints a fresh [`TargetId`]
    pub fn new(type_name: TypeName, methods: Vec<MethodDescriptor>) -> Self {
        Self {
            id: TargetId::new(),
            type_name,
            methods,
        }
    }

    /// Find the method with the given name and arity
    pub fn resolve(&self, name: &str, arity: usize) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.signature.name == name && m.signature.arity() == arity)
    }
}

/// One runtime call against a target
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    target: TargetId,
    type_name: TypeName,
    method: MethodDescriptor,
    args: Vec<Value>,
}

impl Invocation {
    /// Build an invocation of `method` on the target described by `descriptor`
    pub fn new(descriptor: &TargetDescriptor, method: MethodDescriptor, args: Vec<Value>) -> Self {
        Self {
            target: descriptor.id,
            type_name: descriptor.type_name.clone(),
            method,
            args,
        }
    }

    /// Identity of the invoked target
    pub const fn target(&self) -> TargetId {
        self.target
    }

    /// Declaring type of the invoked method
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Invoked method
    pub const fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// Invoked method's signature
    pub const fn signature(&self) -> &MethodSignature {
        &self.method.signature
    }

    /// Argument values in call order
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Arguments rendered as comma-separated text
    pub fn render_args(&self) -> String {
        render_args(&self.args)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.type_name.name,
            self.method.signature.name,
            self.render_args()
        )
    }
}
