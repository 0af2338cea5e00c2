//! Identity keys tokens are indexed by. Compared by value, never by reference.

use serde::{Deserialize, Serialize};
use std::fmt;

use uplift_core::constants::WILDCARD_MARKER;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentityKey {
    /// Plain name: namespaces, usings/imports, literal object-creation types.
    Name(String),
    /// Fully-qualified type name: class/interface declarations, base types,
    /// identifier types.
    Qualified(String),
    /// Symbol with its containing namespace and type: attributes,
    /// invocations, methods, member/element access.
    Symbol {
        name: String,
        namespace: String,
        type_name: String,
    },
    /// Enclosing location of a construct: object creation by location.
    Location { namespace: String, type_name: String },
}

impl IdentityKey {
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    pub fn qualified(value: impl Into<String>) -> Self {
        Self::Qualified(value.into())
    }

    pub fn symbol(
        name: impl Into<String>,
        namespace: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::Symbol {
            name: name.into(),
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }

    pub fn location(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::Location {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }

    /// The primary string of the key.
    pub fn primary(&self) -> &str {
        match self {
            Self::Name(s) | Self::Qualified(s) => s,
            Self::Symbol { name, .. } => name,
            Self::Location { type_name, .. } => type_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Location {
                namespace,
                type_name,
            } => namespace.is_empty() && type_name.is_empty(),
            other => other.primary().trim().is_empty(),
        }
    }

    /// True for plain names containing the glob marker.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Name(s) if s.contains(WILDCARD_MARKER))
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) | Self::Qualified(s) => f.write_str(s),
            Self::Symbol {
                name,
                namespace,
                type_name,
            } => write!(f, "{name} [{namespace}.{type_name}]"),
            Self::Location {
                namespace,
                type_name,
            } => write!(f, "@{namespace}.{type_name}"),
        }
    }
}
