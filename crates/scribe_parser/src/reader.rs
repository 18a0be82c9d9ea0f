//! The token reader: a seekable cursor with bounded speculative scanning.
//!
//! The cursor always rests on a non-comment token. Comments passed while
//! advancing are queued and drained by the statement-list loop, which lifts
//! them into comment statements; nothing is dropped silently.

use scribe_ast::token_kind::TokenKind;
use scribe_diagnostics::{messages, CompileError, Result};
use scribe_scanner::Token;

pub struct TokenReader {
    tokens: Vec<Token>,
    pos: usize,
    file: Option<String>,
    pending_comments: Vec<Token>,
}

impl TokenReader {
    /// The token list must end with an end-of-file token (the scanner
    /// guarantees this).
    pub fn new(tokens: Vec<Token>, file: Option<String>) -> Self {
        let mut reader = Self {
            tokens,
            pos: 0,
            file,
            pending_comments: Vec::new(),
        };
        reader.queue_comments();
        reader
    }

    /// Queue comment tokens at the cursor and rest on the next
    /// significant token.
    fn queue_comments(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_comment() {
            let comment = self.tokens[self.pos].clone();
            self.pending_comments.push(comment);
            self.pos += 1;
        }
    }

    /// Comments collected since the last drain, in source order.
    pub fn drain_comments(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.pending_comments)
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// The current (significant) token.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// The k-th significant token after the current one (`peek(0)` is the
    /// current token).
    pub fn peek(&self, k: usize) -> &Token {
        let mut index = self.pos;
        let mut remaining = k;
        while remaining > 0 {
            index += 1;
            while index < self.tokens.len() && self.tokens[index].kind.is_comment() {
                index += 1;
            }
            remaining -= 1;
        }
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    /// Move past the current token (and queue any comments that follow).
    pub fn bump(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.queue_comments();
    }

    /// Move by n significant tokens.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfFile)
    }

    /// Consume the current token if it matches.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// The current token must match; returns it and advances.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.at(kind) {
            let token = self.current().clone();
            self.bump();
            return Ok(token);
        }
        Err(self.error_expected(kind))
    }

    /// Advance, then the new current token must match (it is not consumed).
    pub fn expect_next(&mut self, kind: TokenKind) -> Result<Token> {
        self.bump();
        if self.at(kind) {
            return Ok(self.current().clone());
        }
        Err(self.error_expected(kind))
    }

    /// Raw cursor position, for save/restore around speculation.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Restore a previously saved cursor position.
    pub fn restore(&mut self, position: usize) {
        self.pos = position;
    }

    /// Raw access for scan logic; includes comment tokens.
    pub fn token_at(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    /// Scan forward token by token (comments skipped) until the predicate
    /// holds, returning the index of the matching token. With `rewind` the
    /// cursor is restored to its pre-scan position; otherwise it is left on
    /// the matching token. Reaching end of input without a match is an
    /// error.
    pub fn run(&mut self, mut predicate: impl FnMut(&Token) -> bool, rewind: bool) -> Result<usize> {
        let start = self.pos;
        let mut index = self.pos;
        loop {
            let token = &self.tokens[index.min(self.tokens.len() - 1)];
            if !token.kind.is_comment() && predicate(token) {
                if rewind {
                    self.pos = start;
                } else {
                    for passed in start..index {
                        if self.tokens[passed].kind.is_comment() {
                            let comment = self.tokens[passed].clone();
                            self.pending_comments.push(comment);
                        }
                    }
                    self.pos = index;
                    self.queue_comments();
                }
                return Ok(index);
            }
            if token.kind == TokenKind::EndOfFile {
                self.pos = start;
                return Err(self.error(&messages::UNEXPECTED_END_OF_TEXT, &[]));
            }
            index += 1;
        }
    }

    /// Peel one close-angle chevron off the current shift token: `>>`
    /// becomes `>` and `>>>` becomes `>>`, shifted one column right. Used
    /// while closing nested generic argument lists; one chevron is peeled
    /// per list closed.
    pub fn split_close_angle(&mut self) {
        let token = &mut self.tokens[self.pos];
        match token.kind {
            TokenKind::GreaterGreater => {
                token.kind = TokenKind::Greater;
                token.column += 1;
            }
            TokenKind::GreaterGreaterGreater => {
                token.kind = TokenKind::GreaterGreater;
                token.column += 1;
            }
            _ => {}
        }
    }

    /// Error at the current token: expected-vs-found, both described
    /// through the reverse lexeme table.
    pub fn error_expected(&self, kind: TokenKind) -> CompileError {
        let current = self.current();
        CompileError::new(
            &messages::_0_EXPECTED_BUT_FOUND_1,
            &[kind.describe(), current.kind.describe()],
            current.pos(),
            self.file.clone(),
        )
    }

    /// Error at the current token with an arbitrary message.
    pub fn error(&self, message: &scribe_diagnostics::DiagnosticMessage, args: &[&str]) -> CompileError {
        CompileError::new(message, args, self.current().pos(), self.file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::text::SourceOrigin;
    use scribe_scanner::tokenize;

    fn reader(source: &str) -> TokenReader {
        TokenReader::new(tokenize(source, &SourceOrigin::default()).unwrap(), None)
    }

    #[test]
    fn test_current_peek_and_bump() {
        let mut r = reader("a + b");
        assert_eq!(r.kind(), TokenKind::Identifier);
        assert_eq!(r.peek(1).kind, TokenKind::Plus);
        assert_eq!(r.peek(2).kind, TokenKind::Identifier);
        r.bump();
        assert_eq!(r.kind(), TokenKind::Plus);
    }

    #[test]
    fn test_peek_skips_comments() {
        let mut r = reader("a /* note */ b");
        assert_eq!(r.peek(1).kind, TokenKind::Identifier);
        r.bump();
        assert_eq!(r.kind(), TokenKind::Identifier);
        assert_eq!(r.drain_comments().len(), 1);
    }

    #[test]
    fn test_expect_failure_names_both_tokens() {
        let mut r = reader("a");
        let err = r.expect(TokenKind::OpenParen).unwrap_err();
        assert!(err.message.contains("'('"));
        assert!(err.message.contains("identifier"));
    }

    #[test]
    fn test_run_with_rewind_restores_cursor() {
        let mut r = reader("a b c ;");
        let index = r.run(|t| t.kind == TokenKind::Semicolon, true).unwrap();
        assert_eq!(r.token_at(index).kind, TokenKind::Semicolon);
        assert_eq!(r.kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_run_without_match_is_an_error() {
        let mut r = reader("a b");
        let err = r.run(|t| t.kind == TokenKind::Semicolon, true).unwrap_err();
        assert_eq!(err.code, messages::UNEXPECTED_END_OF_TEXT.code);
    }

    #[test]
    fn test_split_close_angle_peels_one_chevron() {
        let mut r = reader("a>>b");
        r.bump();
        assert_eq!(r.kind(), TokenKind::GreaterGreater);
        let column = r.current().column;
        r.split_close_angle();
        assert_eq!(r.kind(), TokenKind::Greater);
        assert_eq!(r.current().column, column + 1);
    }
}
