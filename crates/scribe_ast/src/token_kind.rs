//! TokenKind: every token the lexer can produce.
//!
//! The keyword and punctuation tables here run in both directions: text to
//! kind while lexing, kind back to text for error messages and for
//! re-synthesizing operator/keyword text while rendering.

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfFile,

    // Carriers of text
    Identifier,
    /// An identifier containing a `\u{...}` escape, kept verbatim.
    EscapedIdentifier,
    NumberLiteral,
    BigIntLiteral,
    /// Raw inner text; the quote character is carried in the token text's
    /// first byte position by the scanner (see `Token::quote`).
    StringLiteral,
    /// Raw template text between the backticks, interpolations included.
    TemplateLiteral,
    /// Full `/pattern/flags` text.
    RegexLiteral,
    LineComment,
    BlockComment,

    // Single-character punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    At,
    Hash,
    Tilde,
    Less,
    Greater,
    Equals,
    Exclamation,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    Bar,
    Caret,

    // Combined punctuation (produced by the token-combination pass)
    Arrow,
    Spread,
    OptionalChain,
    Coalesce,
    CoalesceEquals,
    EqualsEquals,
    EqualsEqualsEquals,
    ExclamationEquals,
    ExclamationEqualsEquals,
    LessEquals,
    GreaterEquals,
    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    AsteriskEquals,
    SlashEquals,
    PercentEquals,
    AsteriskAsterisk,
    AsteriskAsteriskEquals,
    AmpersandAmpersand,
    BarBar,
    AmpersandAmpersandEquals,
    BarBarEquals,
    AmpersandEquals,
    BarEquals,
    CaretEquals,
    GreaterGreater,
    GreaterGreaterGreater,
    GreaterGreaterEquals,

    // Keywords
    AbstractKeyword,
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DeclareKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FromKeyword,
    FunctionKeyword,
    GetKeyword,
    IfKeyword,
    ImplementsKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    InterfaceKeyword,
    KeyOfKeyword,
    LetKeyword,
    NewKeyword,
    NullKeyword,
    OfKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    ReturnKeyword,
    SetKeyword,
    StaticKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeKeyword,
    TypeOfKeyword,
    UndefinedKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    YieldKeyword,
}

impl TokenKind {
    /// Look up the keyword kind for an identifier text.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "abstract" => Some(TokenKind::AbstractKeyword),
            "as" => Some(TokenKind::AsKeyword),
            "async" => Some(TokenKind::AsyncKeyword),
            "await" => Some(TokenKind::AwaitKeyword),
            "break" => Some(TokenKind::BreakKeyword),
            "case" => Some(TokenKind::CaseKeyword),
            "catch" => Some(TokenKind::CatchKeyword),
            "class" => Some(TokenKind::ClassKeyword),
            "const" => Some(TokenKind::ConstKeyword),
            "continue" => Some(TokenKind::ContinueKeyword),
            "declare" => Some(TokenKind::DeclareKeyword),
            "default" => Some(TokenKind::DefaultKeyword),
            "delete" => Some(TokenKind::DeleteKeyword),
            "do" => Some(TokenKind::DoKeyword),
            "else" => Some(TokenKind::ElseKeyword),
            "enum" => Some(TokenKind::EnumKeyword),
            "export" => Some(TokenKind::ExportKeyword),
            "extends" => Some(TokenKind::ExtendsKeyword),
            "false" => Some(TokenKind::FalseKeyword),
            "finally" => Some(TokenKind::FinallyKeyword),
            "for" => Some(TokenKind::ForKeyword),
            "from" => Some(TokenKind::FromKeyword),
            "function" => Some(TokenKind::FunctionKeyword),
            "get" => Some(TokenKind::GetKeyword),
            "if" => Some(TokenKind::IfKeyword),
            "implements" => Some(TokenKind::ImplementsKeyword),
            "import" => Some(TokenKind::ImportKeyword),
            "in" => Some(TokenKind::InKeyword),
            "instanceof" => Some(TokenKind::InstanceOfKeyword),
            "interface" => Some(TokenKind::InterfaceKeyword),
            "keyof" => Some(TokenKind::KeyOfKeyword),
            "let" => Some(TokenKind::LetKeyword),
            "new" => Some(TokenKind::NewKeyword),
            "null" => Some(TokenKind::NullKeyword),
            "of" => Some(TokenKind::OfKeyword),
            "private" => Some(TokenKind::PrivateKeyword),
            "protected" => Some(TokenKind::ProtectedKeyword),
            "public" => Some(TokenKind::PublicKeyword),
            "readonly" => Some(TokenKind::ReadonlyKeyword),
            "return" => Some(TokenKind::ReturnKeyword),
            "set" => Some(TokenKind::SetKeyword),
            "static" => Some(TokenKind::StaticKeyword),
            "super" => Some(TokenKind::SuperKeyword),
            "switch" => Some(TokenKind::SwitchKeyword),
            "this" => Some(TokenKind::ThisKeyword),
            "throw" => Some(TokenKind::ThrowKeyword),
            "true" => Some(TokenKind::TrueKeyword),
            "try" => Some(TokenKind::TryKeyword),
            "type" => Some(TokenKind::TypeKeyword),
            "typeof" => Some(TokenKind::TypeOfKeyword),
            "undefined" => Some(TokenKind::UndefinedKeyword),
            "var" => Some(TokenKind::VarKeyword),
            "void" => Some(TokenKind::VoidKeyword),
            "while" => Some(TokenKind::WhileKeyword),
            "yield" => Some(TokenKind::YieldKeyword),
            _ => None,
        }
    }

    /// The surface text of a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::AbstractKeyword => Some("abstract"),
            TokenKind::AsKeyword => Some("as"),
            TokenKind::AsyncKeyword => Some("async"),
            TokenKind::AwaitKeyword => Some("await"),
            TokenKind::BreakKeyword => Some("break"),
            TokenKind::CaseKeyword => Some("case"),
            TokenKind::CatchKeyword => Some("catch"),
            TokenKind::ClassKeyword => Some("class"),
            TokenKind::ConstKeyword => Some("const"),
            TokenKind::ContinueKeyword => Some("continue"),
            TokenKind::DeclareKeyword => Some("declare"),
            TokenKind::DefaultKeyword => Some("default"),
            TokenKind::DeleteKeyword => Some("delete"),
            TokenKind::DoKeyword => Some("do"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::EnumKeyword => Some("enum"),
            TokenKind::ExportKeyword => Some("export"),
            TokenKind::ExtendsKeyword => Some("extends"),
            TokenKind::FalseKeyword => Some("false"),
            TokenKind::FinallyKeyword => Some("finally"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::FromKeyword => Some("from"),
            TokenKind::FunctionKeyword => Some("function"),
            TokenKind::GetKeyword => Some("get"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ImplementsKeyword => Some("implements"),
            TokenKind::ImportKeyword => Some("import"),
            TokenKind::InKeyword => Some("in"),
            TokenKind::InstanceOfKeyword => Some("instanceof"),
            TokenKind::InterfaceKeyword => Some("interface"),
            TokenKind::KeyOfKeyword => Some("keyof"),
            TokenKind::LetKeyword => Some("let"),
            TokenKind::NewKeyword => Some("new"),
            TokenKind::NullKeyword => Some("null"),
            TokenKind::OfKeyword => Some("of"),
            TokenKind::PrivateKeyword => Some("private"),
            TokenKind::ProtectedKeyword => Some("protected"),
            TokenKind::PublicKeyword => Some("public"),
            TokenKind::ReadonlyKeyword => Some("readonly"),
            TokenKind::ReturnKeyword => Some("return"),
            TokenKind::SetKeyword => Some("set"),
            TokenKind::StaticKeyword => Some("static"),
            TokenKind::SuperKeyword => Some("super"),
            TokenKind::SwitchKeyword => Some("switch"),
            TokenKind::ThisKeyword => Some("this"),
            TokenKind::ThrowKeyword => Some("throw"),
            TokenKind::TrueKeyword => Some("true"),
            TokenKind::TryKeyword => Some("try"),
            TokenKind::TypeKeyword => Some("type"),
            TokenKind::TypeOfKeyword => Some("typeof"),
            TokenKind::UndefinedKeyword => Some("undefined"),
            TokenKind::VarKeyword => Some("var"),
            TokenKind::VoidKeyword => Some("void"),
            TokenKind::WhileKeyword => Some("while"),
            TokenKind::YieldKeyword => Some("yield"),
            _ => None,
        }
    }

    /// The surface text of a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenBrace => Some("{"),
            TokenKind::CloseBrace => Some("}"),
            TokenKind::OpenBracket => Some("["),
            TokenKind::CloseBracket => Some("]"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Comma => Some(","),
            TokenKind::Dot => Some("."),
            TokenKind::Colon => Some(":"),
            TokenKind::Question => Some("?"),
            TokenKind::At => Some("@"),
            TokenKind::Hash => Some("#"),
            TokenKind::Tilde => Some("~"),
            TokenKind::Less => Some("<"),
            TokenKind::Greater => Some(">"),
            TokenKind::Equals => Some("="),
            TokenKind::Exclamation => Some("!"),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Asterisk => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Percent => Some("%"),
            TokenKind::Ampersand => Some("&"),
            TokenKind::Bar => Some("|"),
            TokenKind::Caret => Some("^"),
            TokenKind::Arrow => Some("=>"),
            TokenKind::Spread => Some("..."),
            TokenKind::OptionalChain => Some("?."),
            TokenKind::Coalesce => Some("??"),
            TokenKind::CoalesceEquals => Some("??="),
            TokenKind::EqualsEquals => Some("=="),
            TokenKind::EqualsEqualsEquals => Some("==="),
            TokenKind::ExclamationEquals => Some("!="),
            TokenKind::ExclamationEqualsEquals => Some("!=="),
            TokenKind::LessEquals => Some("<="),
            TokenKind::GreaterEquals => Some(">="),
            TokenKind::PlusPlus => Some("++"),
            TokenKind::MinusMinus => Some("--"),
            TokenKind::PlusEquals => Some("+="),
            TokenKind::MinusEquals => Some("-="),
            TokenKind::AsteriskEquals => Some("*="),
            TokenKind::SlashEquals => Some("/="),
            TokenKind::PercentEquals => Some("%="),
            TokenKind::AsteriskAsterisk => Some("**"),
            TokenKind::AsteriskAsteriskEquals => Some("**="),
            TokenKind::AmpersandAmpersand => Some("&&"),
            TokenKind::BarBar => Some("||"),
            TokenKind::AmpersandAmpersandEquals => Some("&&="),
            TokenKind::BarBarEquals => Some("||="),
            TokenKind::AmpersandEquals => Some("&="),
            TokenKind::BarEquals => Some("|="),
            TokenKind::CaretEquals => Some("^="),
            TokenKind::GreaterGreater => Some(">>"),
            TokenKind::GreaterGreaterGreater => Some(">>>"),
            TokenKind::GreaterGreaterEquals => Some(">>="),
            _ => None,
        }
    }

    /// Canonical surface text for any kind that has one.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }

    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.text() {
            return text;
        }
        match self {
            TokenKind::EndOfFile => "end of text",
            TokenKind::Identifier | TokenKind::EscapedIdentifier => "identifier",
            TokenKind::NumberLiteral => "number",
            TokenKind::BigIntLiteral => "bigint",
            TokenKind::StringLiteral => "string",
            TokenKind::TemplateLiteral => "template",
            TokenKind::RegexLiteral => "regular expression",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            _ => "token",
        }
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Whether a token of this kind can end a value-producing expression.
    /// Decides the regex-vs-divide ambiguity: after one of these, `/` is
    /// division.
    pub fn ends_expression_value(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::EscapedIdentifier
                | TokenKind::NumberLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::StringLiteral
                | TokenKind::TemplateLiteral
                | TokenKind::RegexLiteral
                | TokenKind::CloseParen
                | TokenKind::CloseBracket
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::ThisKeyword
                | TokenKind::SuperKeyword
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
                | TokenKind::NullKeyword
                | TokenKind::UndefinedKeyword
        )
    }

    /// Whether this kind is an assignment operator.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::AsteriskEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::AsteriskAsteriskEquals
                | TokenKind::AmpersandAmpersandEquals
                | TokenKind::BarBarEquals
                | TokenKind::CoalesceEquals
                | TokenKind::AmpersandEquals
                | TokenKind::BarEquals
                | TokenKind::CaretEquals
                | TokenKind::GreaterGreaterEquals
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_round_trips() {
        for text in ["const", "instanceof", "interface", "yield", "of"] {
            let kind = TokenKind::from_keyword(text).unwrap();
            assert_eq!(kind.keyword_text(), Some(text));
        }
    }

    #[test]
    fn test_non_keyword_is_none() {
        assert_eq!(TokenKind::from_keyword("constant"), None);
        assert_eq!(TokenKind::from_keyword(""), None);
    }

    #[test]
    fn test_punctuation_text() {
        assert_eq!(TokenKind::Arrow.punctuation_text(), Some("=>"));
        assert_eq!(TokenKind::Spread.punctuation_text(), Some("..."));
        assert_eq!(TokenKind::GreaterGreaterGreater.punctuation_text(), Some(">>>"));
        assert_eq!(TokenKind::Identifier.punctuation_text(), None);
    }

    #[test]
    fn test_describe_falls_back_for_carriers() {
        assert_eq!(TokenKind::Identifier.describe(), "identifier");
        assert_eq!(TokenKind::EndOfFile.describe(), "end of text");
        assert_eq!(TokenKind::CloseParen.describe(), ")");
    }
}
