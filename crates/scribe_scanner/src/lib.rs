//! scribe_scanner: source text to token sequence.
//!
//! `tokenize` runs the character-level sub-state machines (strings,
//! templates, regexes, numbers, comments, escaped identifiers) and then the
//! token-combination pass that folds adjacent single-character tokens into
//! multi-character operators.

mod char_codes;
mod scanner;
mod token;

pub use scanner::{combine_tokens, tokenize};
pub use token::Token;
