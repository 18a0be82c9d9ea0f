//! Flag sets and small shared enums for declarations.

use bitflags::bitflags;

bitflags! {
    /// Intrinsic properties of a function node.
    ///
    /// `ARROW` marks an unbound (arrow) function; everything else follows
    /// the surface syntax.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FunctionFlags: u8 {
        const ARROW     = 1 << 0;
        const ASYNC     = 1 << 1;
        const GENERATOR = 1 << 2;
        const GETTER    = 1 << 3;
        const SETTER    = 1 << 4;
    }
}

/// Member visibility. Only rendered under the typed dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn text(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

/// The declaration keyword of a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKeyword {
    Const,
    Let,
    Var,
}

impl DeclarationKeyword {
    pub fn text(self) -> &'static str {
        match self {
            DeclarationKeyword::Const => "const",
            DeclarationKeyword::Let => "let",
            DeclarationKeyword::Var => "var",
        }
    }
}
