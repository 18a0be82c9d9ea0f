//! scribe_diagnostics: the fatal-error channel.
//!
//! Every lexical, syntactic, and render error in the toolkit flows through
//! [`CompileError`]: one message, one source position, no recovery. Message
//! templates carry stable codes so callers and tests can match on them
//! without string comparison.

use scribe_core::text::{SourceOrigin, SourcePos};
use thiserror::Error;

/// A diagnostic message template. May contain `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

/// Replace `{0}`, `{1}`, ... in a template with the given arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A fatal, positioned error. The first one raised aborts the current
/// parse or render call.
#[derive(Debug, Clone, Error)]
#[error("{}error SC{code}: {message}", location_prefix(.file, .line, .column))]
pub struct CompileError {
    pub message: String,
    pub code: u32,
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl CompileError {
    /// Build an error from a message template, already-projected position,
    /// and source label.
    pub fn new(message: &DiagnosticMessage, args: &[&str], pos: SourcePos, file: Option<String>) -> Self {
        Self {
            message: format_message(message.message, args),
            code: message.code,
            file,
            line: pos.line,
            column: pos.column,
        }
    }

    /// Build an error with no useful source position (render and
    /// consistency errors raised on synthetic trees). Line and column are
    /// reported as 0.
    pub fn semantic(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            message: format_message(message.message, args),
            code: message.code,
            file: None,
            line: 0,
            column: 0,
        }
    }

    /// Build an error at a fragment-local position, projecting it through
    /// the origin's embedding offsets.
    pub fn at_origin(message: &DiagnosticMessage, args: &[&str], local: SourcePos, origin: &SourceOrigin) -> Self {
        let pos = origin.project(local);
        Self::new(message, args, pos, origin.file.clone())
    }

    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }
}

fn location_prefix(file: &Option<String>, line: &u32, column: &u32) -> String {
    match file {
        Some(file) => format!("{}:{}:{}: ", file, line, column),
        None => format!("{}:{}: ", line, column),
    }
}

/// Result alias used across the toolkit.
pub type Result<T> = std::result::Result<T, CompileError>;

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::DiagnosticMessage;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ------------------------------------------------------------------------
    // Lexical errors (1000-1099)
    // ------------------------------------------------------------------------
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, "Unterminated string literal.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1003, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1004, "Unterminated regular expression literal.");
    pub const UNTERMINATED_BLOCK_COMMENT: DiagnosticMessage = diag!(1005, "Unterminated block comment; '*/' expected.");
    pub const NEWLINE_IN_STRING_LITERAL: DiagnosticMessage = diag!(1006, "Unexpected line break inside string literal.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1007, "Invalid character '{0}'.");
    pub const UNTERMINATED_UNICODE_ESCAPE: DiagnosticMessage = diag!(1008, "Unterminated Unicode escape sequence.");

    // ------------------------------------------------------------------------
    // Syntactic errors (1100-1199)
    // ------------------------------------------------------------------------
    pub const _0_EXPECTED_BUT_FOUND_1: DiagnosticMessage = diag!(1100, "'{0}' expected, but found '{1}'.");
    pub const UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1101, "Unexpected end of text.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1102, "Expression expected, but found '{0}'.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1103, "Declaration or statement expected.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1104, "Identifier expected, but found '{0}'.");
    pub const CONST_DECLARATION_WITHOUT_INITIALIZER: DiagnosticMessage = diag!(1105, "A constant declaration must have an initializer.");
    pub const TRY_WITHOUT_CATCH_OR_FINALLY: DiagnosticMessage = diag!(1106, "A 'try' statement must have a 'catch' or 'finally' clause.");
    pub const MALFORMED_DESTRUCTURING_PATTERN: DiagnosticMessage = diag!(1107, "Malformed destructuring pattern.");
    pub const FOR_HEAD_NOT_ITERABLE: DiagnosticMessage = diag!(1108, "The head of this 'for' statement is neither a classic loop nor an 'in'/'of' iteration.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1109, "Type expected, but found '{0}'.");
    pub const CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!(1110, "'case' or 'default' expected.");
    pub const MODULE_SPECIFIER_EXPECTED: DiagnosticMessage = diag!(1111, "Module specifier string expected.");
    pub const PROPERTY_NAME_EXPECTED: DiagnosticMessage = diag!(1112, "Property name expected, but found '{0}'.");
    pub const UNEXPECTED_MODIFIER: DiagnosticMessage = diag!(1113, "Modifier '{0}' cannot be used here.");

    // ------------------------------------------------------------------------
    // Render / consistency errors (1200-1299)
    // ------------------------------------------------------------------------
    pub const OPERATION_HAS_NO_TEXTUAL_FORM: DiagnosticMessage = diag!(1200, "Operation '{0}' has no textual form.");
    pub const EXPORT_KIND_UNSUPPORTED_IN_MODULE_FORMAT: DiagnosticMessage = diag!(1201, "This declaration kind cannot be exported under the '{0}' module format.");
    pub const REFERENCE_CHAIN_TOO_DEEP: DiagnosticMessage = diag!(1202, "Reference chain exceeds the maximum depth; the parent links most likely form a cycle.");
    pub const CLASS_MEMBER_INDEX_DIVERGED: DiagnosticMessage = diag!(1203, "Class member index no longer matches the member list for '{0}'.");

    // ------------------------------------------------------------------------
    // Host I/O errors (1300-1399)
    // ------------------------------------------------------------------------
    pub const CANNOT_READ_FILE: DiagnosticMessage = diag!(1300, "Cannot read file '{0}': {1}.");
    pub const CANNOT_WRITE_FILE: DiagnosticMessage = diag!(1301, "Cannot write file '{0}': {1}.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected, but found '{1}'.", &[")", "]"]), "')' expected, but found ']'.");
    }

    #[test]
    fn test_error_display_with_file() {
        let err = CompileError::new(
            &messages::UNTERMINATED_STRING_LITERAL,
            &[],
            SourcePos::new(3, 7),
            Some("app.ts".into()),
        );
        assert_eq!(err.to_string(), "app.ts:3:7: error SC1002: Unterminated string literal.");
    }

    #[test]
    fn test_error_projects_origin() {
        let origin = SourceOrigin::embedded("page.html", 20, 0);
        let err = CompileError::at_origin(&messages::INVALID_CHARACTER, &["\\u0000"], SourcePos::new(2, 5), &origin);
        assert_eq!(err.line, 22);
        assert_eq!(err.column, 5);
        assert_eq!(err.file.as_deref(), Some("page.html"));
    }
}
