//! The token produced by the scanner.

use scribe_ast::token_kind::TokenKind;
use scribe_core::text::SourcePos;

/// One lexed token. Positions are 1-based and already projected through the
/// source origin, so they map straight back to the outer document for
/// embedded sources.
///
/// Tokens are immutable after lexing, except for the controlled kind
/// rewrite that splits a shift-right token into close-angle tokens while
/// the parser closes nested generic argument lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text for kinds that carry one (identifiers, literals,
    /// comments); empty for punctuation and keywords whose text is fully
    /// determined by the kind.
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, pos: SourcePos) -> Self {
        Self {
            kind,
            text: String::new(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn with_text(kind: TokenKind, text: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            kind,
            text: text.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    /// The surface text of this token: its own carried text, or the kind's
    /// canonical lexeme.
    pub fn value(&self) -> &str {
        if self.text.is_empty() {
            self.kind.text().unwrap_or("")
        } else {
            &self.text
        }
    }

    /// For a string-literal token the carried text includes the quotes;
    /// this returns the quote character.
    pub fn quote(&self) -> char {
        self.text.chars().next().unwrap_or('"')
    }

    /// Inner text of a string literal, quotes stripped.
    pub fn string_value(&self) -> &str {
        let len = self.text.len();
        if len >= 2 {
            &self.text[1..len - 1]
        } else {
            ""
        }
    }
}
