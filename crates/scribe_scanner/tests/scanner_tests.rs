//! Scanner integration tests: literal sub-state machines, token
//! combination, and position tracking.

use scribe_ast::token_kind::TokenKind::{self, *};
use scribe_core::text::SourceOrigin;
use scribe_scanner::tokenize;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, &SourceOrigin::default())
        .unwrap_or_else(|err| panic!("tokenize failed for {:?}: {}", source, err))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= **= &&= ||= ??= &= |= ^= >>="),
        vec![
            PlusEquals, MinusEquals, AsteriskEquals, SlashEquals, PercentEquals,
            AsteriskAsteriskEquals, AmpersandAmpersandEquals, BarBarEquals, CoalesceEquals,
            AmpersandEquals, BarEquals, CaretEquals, GreaterGreaterEquals, EndOfFile
        ]
    );
}

#[test]
fn test_equality_and_relational() {
    assert_eq!(
        kinds("== === != !== < <= > >= >> >>>"),
        vec![
            EqualsEquals, EqualsEqualsEquals, ExclamationEquals, ExclamationEqualsEquals,
            Less, LessEquals, Greater, GreaterEquals, GreaterGreater, GreaterGreaterGreater,
            EndOfFile
        ]
    );
}

#[test]
fn test_combination_requires_contiguity() {
    // `? .` with a space stays two tokens; `?.` combines.
    assert_eq!(kinds("? ."), vec![Question, Dot, EndOfFile]);
    assert_eq!(kinds("?."), vec![OptionalChain, EndOfFile]);
    // A dot followed by a digit is a number, never an optional chain.
    assert_eq!(kinds("x?.5:y"), vec![Identifier, Question, NumberLiteral, Colon, Identifier, EndOfFile]);
}

#[test]
fn test_longest_match_wins() {
    assert_eq!(kinds("==="), vec![EqualsEqualsEquals, EndOfFile]);
    assert_eq!(kinds("== ="), vec![EqualsEquals, Equals, EndOfFile]);
    assert_eq!(kinds("...."), vec![Spread, Dot, EndOfFile]);
}

#[test]
fn test_multi_line_template_is_one_token() {
    let tokens = tokenize("`line one\nline two ${x}`", &SourceOrigin::default()).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TemplateLiteral);
    assert_eq!(tokens[0].text, "line one\nline two ${x}");
}

#[test]
fn test_template_tracks_brace_depth_per_nesting_level() {
    let tokens = tokenize("`${ {a: {b: 1}} } and ${`inner ${ {c: 2} }`}`", &SourceOrigin::default()).unwrap();
    assert_eq!(tokens[0].kind, TemplateLiteral);
    assert_eq!(tokens[1].kind, EndOfFile);
}

#[test]
fn test_regex_after_keyword_or_operator() {
    assert_eq!(kinds("return /tmp/;"), vec![ReturnKeyword, RegexLiteral, Semicolon, EndOfFile]);
    assert_eq!(kinds("a = /tmp/;"), vec![Identifier, Equals, RegexLiteral, Semicolon, EndOfFile]);
}

#[test]
fn test_divide_after_value_forms() {
    assert_eq!(kinds("total / 2"), vec![Identifier, Slash, NumberLiteral, EndOfFile]);
    assert_eq!(kinds("f() / 2"), vec![Identifier, OpenParen, CloseParen, Slash, NumberLiteral, EndOfFile]);
    assert_eq!(kinds("arr[0] / 2"), vec![Identifier, OpenBracket, NumberLiteral, CloseBracket, Slash, NumberLiteral, EndOfFile]);
}

#[test]
fn test_slash_before_comment_is_not_a_regex() {
    assert_eq!(kinds("x = 1 // done"), vec![Identifier, Equals, NumberLiteral, LineComment, EndOfFile]);
}

#[test]
fn test_crlf_counts_as_one_line_break() {
    let tokens = tokenize("a\r\nb", &SourceOrigin::default()).unwrap();
    assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
}

#[test]
fn test_unterminated_template_is_fatal() {
    let err = tokenize("`abc ${x", &SourceOrigin::default()).unwrap_err();
    assert!(err.message.contains("template"));
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn test_unterminated_block_comment_is_fatal() {
    let err = tokenize("/* never closed", &SourceOrigin::default()).unwrap_err();
    assert!(err.message.contains("*/"));
}

#[test]
fn test_unterminated_regex_is_fatal() {
    let err = tokenize("const r = /abc", &SourceOrigin::default()).unwrap_err();
    assert!(err.message.contains("regular expression"));
}

#[test]
fn test_invalid_character_is_fatal() {
    let err = tokenize("const x = 1 \u{00A7} 2;", &SourceOrigin::default()).unwrap_err();
    assert!(err.message.contains("Invalid character"));
}
