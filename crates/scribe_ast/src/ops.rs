//! The operation enum shared by expression nodes, the parser, and the
//! renderer.
//!
//! Operator text is never duplicated here: each operation maps back to its
//! token kind and the token kind owns the lexeme. Chain operations (member
//! access, calls, indexing, `new`) are rendered structurally and have no
//! single textual form.

use crate::token_kind::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Assignment
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    RemainderAssign,
    ExponentAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    CoalesceAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShiftRightAssign,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponent,

    // Comparison
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,

    // Logic / bitwise
    LogicalAnd,
    LogicalOr,
    Coalesce,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,

    // Word-form binary operators
    In,
    InstanceOf,

    // Prefix unary
    Not,
    BitNot,
    Negate,
    UnaryPlus,
    TypeOf,
    Delete,
    Void,
    Await,
    Yield,
    Spread,
    Increment,
    Decrement,

    // Postfix unary
    PostIncrement,
    PostDecrement,

    // Chain operations (rendered structurally)
    Access,
    OptionalAccess,
    Index,
    OptionalIndex,
    Call,
    OptionalCall,
    /// `new` with an argument list.
    Initialize,
}

impl Operation {
    /// The token kind whose lexeme spells this operation, if it has one.
    pub fn token_kind(self) -> Option<TokenKind> {
        match self {
            Operation::Assign => Some(TokenKind::Equals),
            Operation::AddAssign => Some(TokenKind::PlusEquals),
            Operation::SubtractAssign => Some(TokenKind::MinusEquals),
            Operation::MultiplyAssign => Some(TokenKind::AsteriskEquals),
            Operation::DivideAssign => Some(TokenKind::SlashEquals),
            Operation::RemainderAssign => Some(TokenKind::PercentEquals),
            Operation::ExponentAssign => Some(TokenKind::AsteriskAsteriskEquals),
            Operation::LogicalAndAssign => Some(TokenKind::AmpersandAmpersandEquals),
            Operation::LogicalOrAssign => Some(TokenKind::BarBarEquals),
            Operation::CoalesceAssign => Some(TokenKind::CoalesceEquals),
            Operation::BitAndAssign => Some(TokenKind::AmpersandEquals),
            Operation::BitOrAssign => Some(TokenKind::BarEquals),
            Operation::BitXorAssign => Some(TokenKind::CaretEquals),
            Operation::ShiftRightAssign => Some(TokenKind::GreaterGreaterEquals),
            Operation::Add => Some(TokenKind::Plus),
            Operation::Subtract => Some(TokenKind::Minus),
            Operation::Multiply => Some(TokenKind::Asterisk),
            Operation::Divide => Some(TokenKind::Slash),
            Operation::Remainder => Some(TokenKind::Percent),
            Operation::Exponent => Some(TokenKind::AsteriskAsterisk),
            Operation::Equal => Some(TokenKind::EqualsEquals),
            Operation::StrictEqual => Some(TokenKind::EqualsEqualsEquals),
            Operation::NotEqual => Some(TokenKind::ExclamationEquals),
            Operation::StrictNotEqual => Some(TokenKind::ExclamationEqualsEquals),
            Operation::Less => Some(TokenKind::Less),
            Operation::Greater => Some(TokenKind::Greater),
            Operation::LessOrEqual => Some(TokenKind::LessEquals),
            Operation::GreaterOrEqual => Some(TokenKind::GreaterEquals),
            Operation::LogicalAnd => Some(TokenKind::AmpersandAmpersand),
            Operation::LogicalOr => Some(TokenKind::BarBar),
            Operation::Coalesce => Some(TokenKind::Coalesce),
            Operation::BitAnd => Some(TokenKind::Ampersand),
            Operation::BitOr => Some(TokenKind::Bar),
            Operation::BitXor => Some(TokenKind::Caret),
            Operation::ShiftRight => Some(TokenKind::GreaterGreater),
            Operation::ShiftRightUnsigned => Some(TokenKind::GreaterGreaterGreater),
            Operation::In => Some(TokenKind::InKeyword),
            Operation::InstanceOf => Some(TokenKind::InstanceOfKeyword),
            Operation::Not => Some(TokenKind::Exclamation),
            Operation::BitNot => Some(TokenKind::Tilde),
            Operation::Negate => Some(TokenKind::Minus),
            Operation::UnaryPlus => Some(TokenKind::Plus),
            Operation::TypeOf => Some(TokenKind::TypeOfKeyword),
            Operation::Delete => Some(TokenKind::DeleteKeyword),
            Operation::Void => Some(TokenKind::VoidKeyword),
            Operation::Await => Some(TokenKind::AwaitKeyword),
            Operation::Yield => Some(TokenKind::YieldKeyword),
            Operation::Spread => Some(TokenKind::Spread),
            Operation::Increment | Operation::PostIncrement => Some(TokenKind::PlusPlus),
            Operation::Decrement | Operation::PostDecrement => Some(TokenKind::MinusMinus),
            Operation::Access => Some(TokenKind::Dot),
            Operation::OptionalAccess => Some(TokenKind::OptionalChain),
            // `<<` never survives the combination pass, so shift-left has a
            // lexeme only through the renderer's own table.
            Operation::ShiftLeft => None,
            Operation::Index
            | Operation::OptionalIndex
            | Operation::Call
            | Operation::OptionalCall
            | Operation::Initialize => None,
        }
    }

    /// The operator lexeme, reconstructed through the reverse lexeme table.
    pub fn text(self) -> Option<&'static str> {
        if self == Operation::ShiftLeft {
            return Some("<<");
        }
        self.token_kind().and_then(TokenKind::text)
    }

    /// Word operators keep surrounding spaces even in minified output;
    /// symbol concatenation would fuse them with their operands.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            Operation::In
                | Operation::InstanceOf
                | Operation::TypeOf
                | Operation::Delete
                | Operation::Void
                | Operation::Await
                | Operation::Yield
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Operation::Assign
                | Operation::AddAssign
                | Operation::SubtractAssign
                | Operation::MultiplyAssign
                | Operation::DivideAssign
                | Operation::RemainderAssign
                | Operation::ExponentAssign
                | Operation::LogicalAndAssign
                | Operation::LogicalOrAssign
                | Operation::CoalesceAssign
                | Operation::BitAndAssign
                | Operation::BitOrAssign
                | Operation::BitXorAssign
                | Operation::ShiftRightAssign
        )
    }

    /// Whether this operation is a postfix chain step (binds tighter than
    /// any binary operator).
    pub fn is_chain(self) -> bool {
        matches!(
            self,
            Operation::Access
                | Operation::OptionalAccess
                | Operation::Index
                | Operation::OptionalIndex
                | Operation::Call
                | Operation::OptionalCall
                | Operation::PostIncrement
                | Operation::PostDecrement
        )
    }

    /// Map a binary-position token to its operation.
    pub fn from_binary_token(kind: TokenKind) -> Option<Operation> {
        match kind {
            TokenKind::Equals => Some(Operation::Assign),
            TokenKind::PlusEquals => Some(Operation::AddAssign),
            TokenKind::MinusEquals => Some(Operation::SubtractAssign),
            TokenKind::AsteriskEquals => Some(Operation::MultiplyAssign),
            TokenKind::SlashEquals => Some(Operation::DivideAssign),
            TokenKind::PercentEquals => Some(Operation::RemainderAssign),
            TokenKind::AsteriskAsteriskEquals => Some(Operation::ExponentAssign),
            TokenKind::AmpersandAmpersandEquals => Some(Operation::LogicalAndAssign),
            TokenKind::BarBarEquals => Some(Operation::LogicalOrAssign),
            TokenKind::CoalesceEquals => Some(Operation::CoalesceAssign),
            TokenKind::AmpersandEquals => Some(Operation::BitAndAssign),
            TokenKind::BarEquals => Some(Operation::BitOrAssign),
            TokenKind::CaretEquals => Some(Operation::BitXorAssign),
            TokenKind::GreaterGreaterEquals => Some(Operation::ShiftRightAssign),
            TokenKind::Plus => Some(Operation::Add),
            TokenKind::Minus => Some(Operation::Subtract),
            TokenKind::Asterisk => Some(Operation::Multiply),
            TokenKind::Slash => Some(Operation::Divide),
            TokenKind::Percent => Some(Operation::Remainder),
            TokenKind::AsteriskAsterisk => Some(Operation::Exponent),
            TokenKind::EqualsEquals => Some(Operation::Equal),
            TokenKind::EqualsEqualsEquals => Some(Operation::StrictEqual),
            TokenKind::ExclamationEquals => Some(Operation::NotEqual),
            TokenKind::ExclamationEqualsEquals => Some(Operation::StrictNotEqual),
            TokenKind::Less => Some(Operation::Less),
            TokenKind::Greater => Some(Operation::Greater),
            TokenKind::LessEquals => Some(Operation::LessOrEqual),
            TokenKind::GreaterEquals => Some(Operation::GreaterOrEqual),
            TokenKind::AmpersandAmpersand => Some(Operation::LogicalAnd),
            TokenKind::BarBar => Some(Operation::LogicalOr),
            TokenKind::Coalesce => Some(Operation::Coalesce),
            TokenKind::Ampersand => Some(Operation::BitAnd),
            TokenKind::Bar => Some(Operation::BitOr),
            TokenKind::Caret => Some(Operation::BitXor),
            TokenKind::GreaterGreater => Some(Operation::ShiftRight),
            TokenKind::GreaterGreaterGreater => Some(Operation::ShiftRightUnsigned),
            TokenKind::InKeyword => Some(Operation::In),
            TokenKind::InstanceOfKeyword => Some(Operation::InstanceOf),
            _ => None,
        }
    }
}
