//! Annotated syntax model shared by the matcher and the rewriter.
//!
//! Trees come from an external parser/analyzer; this module only defines
//! their shape, prints them back to text, and builds replacement nodes.

pub mod factory;
pub mod node;
pub mod printer;
pub mod span;
pub mod tree;

pub use factory::SyntaxFactory;
pub use node::{
    AttributeNode, Dialect, ElementAccess, IdentifierName, Invocation, MemberAccess,
    MethodDeclaration, NodeKind, ObjectCreation, OtherNode, SemanticInfo, SyntaxNode,
    TypeDeclaration, TypeKeyword, UsingDirective,
};
pub use span::TextSpan;
pub use tree::SyntaxTree;
