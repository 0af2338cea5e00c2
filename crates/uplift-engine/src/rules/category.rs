//! Node-level rule and action categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One category per node kind that can carry actions. Tokens are looked up
/// by category, and each action belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Attribute,
    Using,
    Namespace,
    Class,
    Interface,
    Method,
    Invocation,
    ElementAccess,
    MemberAccess,
    Identifier,
    ObjectCreation,
}

impl Category {
    /// All categories in a fixed order, for deterministic iteration.
    pub const ALL: [Category; 11] = [
        Category::Attribute,
        Category::Using,
        Category::Namespace,
        Category::Class,
        Category::Interface,
        Category::Method,
        Category::Invocation,
        Category::ElementAccess,
        Category::MemberAccess,
        Category::Identifier,
        Category::ObjectCreation,
    ];

    /// Categories whose executions report the concrete declaration name
    /// found at the match site instead of the rule's key.
    pub fn is_name_bound(&self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Method)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Attribute => "Attribute",
            Self::Using => "Using",
            Self::Namespace => "Namespace",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Method => "Method",
            Self::Invocation => "Invocation",
            Self::ElementAccess => "ElementAccess",
            Self::MemberAccess => "MemberAccess",
            Self::Identifier => "Identifier",
            Self::ObjectCreation => "ObjectCreation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
