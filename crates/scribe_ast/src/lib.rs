//! scribe_ast: token kinds, operations, and the AST node set.
//!
//! The node set is an owned tree: statements own their sub-expressions and
//! nested blocks, and every node is `Clone` so downstream passes can take
//! deep structural copies before rewriting in place.

pub mod node;
pub mod ops;
pub mod token_kind;
pub mod types;
pub mod walk;

pub use node::*;
pub use ops::Operation;
pub use token_kind::TokenKind;
pub use types::{DeclarationKeyword, FunctionFlags, Visibility};
