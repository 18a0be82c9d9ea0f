//! Expression parsing.
//!
//! Precedence climbing: a primary/unary term, a full postfix-chain pass
//! (member access, calls, indexing, postfix increment), then the
//! binary/ternary/cast loop keyed off the precedence table. Every grammar
//! ambiguity is resolved with a bounded scan-and-rewind over the token
//! stream.

use crate::parser::Parser;
use crate::precedence::{binary_precedence, is_right_associative, OperatorPrecedence};
use scribe_ast::node::*;
use scribe_ast::ops::Operation;
use scribe_ast::token_kind::TokenKind;
use scribe_ast::types::FunctionFlags;
use scribe_core::text::SourceOrigin;
use scribe_diagnostics::{messages, Result};
use scribe_scanner::tokenize;

impl Parser {
    /// Parse a full expression.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.parse_value_prec(OperatorPrecedence::Lowest.level())
    }

    /// Precedence climbing over binary, ternary, and cast operators. An
    /// operator is admitted while its precedence is at or above `min`.
    pub(crate) fn parse_value_prec(&mut self, min: u8) -> Result<Value> {
        let mut lhs = self.parse_unary()?;
        loop {
            let kind = self.reader.kind();

            // `expr as Type` binds like a relational operator. The cast
            // disappears under the untyped dialect.
            if kind == TokenKind::AsKeyword {
                if OperatorPrecedence::Relational.level() < min {
                    break;
                }
                self.reader.bump();
                let target = self.parse_type()?;
                lhs = Value::Cast(Cast { value: Box::new(lhs), target });
                continue;
            }

            if kind == TokenKind::Question {
                if OperatorPrecedence::Conditional.level() < min {
                    break;
                }
                self.reader.bump();
                let when_true = self.parse_value_prec(OperatorPrecedence::Assignment.level())?;
                self.reader.expect(TokenKind::Colon)?;
                let when_false = self.parse_value_prec(OperatorPrecedence::Assignment.level())?;
                lhs = Value::Conditional(Conditional {
                    condition: Box::new(lhs),
                    when_true: Box::new(when_true),
                    when_false: Box::new(when_false),
                });
                continue;
            }

            let Some(precedence) = binary_precedence(kind) else { break };
            let level = precedence.level();
            if level < min {
                break;
            }
            let Some(operation) = Operation::from_binary_token(kind) else { break };
            self.reader.bump();
            let next_min = if is_right_associative(kind) { level } else { level + 1 };
            let rhs = self.parse_value_prec(next_min)?;
            lhs = Value::Expression(Expression::binary(lhs, operation, rhs));
        }
        Ok(lhs)
    }

    // ------------------------------------------------------------------------
    // Unary and postfix
    // ------------------------------------------------------------------------

    pub(crate) fn parse_unary(&mut self) -> Result<Value> {
        let operation = match self.reader.kind() {
            TokenKind::Exclamation => Operation::Not,
            TokenKind::Tilde => Operation::BitNot,
            TokenKind::Minus => Operation::Negate,
            TokenKind::Plus => Operation::UnaryPlus,
            TokenKind::PlusPlus => Operation::Increment,
            TokenKind::MinusMinus => Operation::Decrement,
            TokenKind::TypeOfKeyword => Operation::TypeOf,
            TokenKind::DeleteKeyword => Operation::Delete,
            TokenKind::VoidKeyword => Operation::Void,
            TokenKind::AwaitKeyword => Operation::Await,
            TokenKind::YieldKeyword => Operation::Yield,
            TokenKind::Spread => Operation::Spread,
            _ => {
                let primary = self.parse_primary()?;
                return self.parse_postfix(primary);
            }
        };
        self.reader.bump();
        let operand = self.parse_unary()?;
        Ok(Value::Expression(Expression::unary(operation, operand)))
    }

    /// Postfix chain operators bind tighter than any binary operator and
    /// are consumed to exhaustion before the binary loop sees the term.
    fn parse_postfix(&mut self, mut value: Value) -> Result<Value> {
        loop {
            match self.reader.kind() {
                TokenKind::Dot => {
                    self.reader.bump();
                    let name = self.expect_member_name()?;
                    value = apply_member_access(value, name);
                }
                TokenKind::OptionalChain => {
                    self.reader.bump();
                    value = match self.reader.kind() {
                        TokenKind::OpenParen => {
                            let arguments = self.parse_arguments()?;
                            Value::Expression(Expression::new(
                                value,
                                Operation::OptionalCall,
                                Some(Value::ArgumentList(arguments)),
                            ))
                        }
                        TokenKind::OpenBracket => {
                            self.reader.bump();
                            let index = self.parse_value()?;
                            self.reader.expect(TokenKind::CloseBracket)?;
                            Value::Expression(Expression::new(value, Operation::OptionalIndex, Some(index)))
                        }
                        _ => {
                            let name = self.expect_member_name()?;
                            Value::Expression(Expression::new(
                                value,
                                Operation::OptionalAccess,
                                Some(Value::reference(name)),
                            ))
                        }
                    };
                }
                TokenKind::OpenParen => {
                    let arguments = self.parse_arguments()?;
                    value = Value::Expression(Expression::new(
                        value,
                        Operation::Call,
                        Some(Value::ArgumentList(arguments)),
                    ));
                }
                TokenKind::OpenBracket => {
                    self.reader.bump();
                    let index = self.parse_value()?;
                    self.reader.expect(TokenKind::CloseBracket)?;
                    value = Value::Expression(Expression::new(value, Operation::Index, Some(index)));
                }
                TokenKind::PlusPlus => {
                    self.reader.bump();
                    value = Value::Expression(Expression::unary(Operation::PostIncrement, value));
                }
                TokenKind::MinusMinus => {
                    self.reader.bump();
                    value = Value::Expression(Expression::unary(Operation::PostDecrement, value));
                }
                TokenKind::Less if self.type_arguments_precede_call() => {
                    let type_arguments = self.parse_type_argument_list()?;
                    let arguments = self.parse_arguments()?;
                    let mut call = Expression::new(
                        value,
                        Operation::Call,
                        Some(Value::ArgumentList(arguments)),
                    );
                    call.type_arguments = type_arguments;
                    value = Value::Expression(call);
                }
                _ => break,
            }
        }
        Ok(value)
    }

    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Value>> {
        self.reader.expect(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseParen) {
                break;
            }
            arguments.push(self.parse_value()?);
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseParen)?;
        Ok(arguments)
    }

    // ------------------------------------------------------------------------
    // Primary terms
    // ------------------------------------------------------------------------

    fn parse_primary(&mut self) -> Result<Value> {
        match self.reader.kind() {
            TokenKind::NumberLiteral => {
                let text = self.reader.current().text.clone();
                self.reader.bump();
                Ok(Value::Literal(Literal::Number(text)))
            }
            TokenKind::BigIntLiteral => {
                let text = self.reader.current().text.clone();
                self.reader.bump();
                Ok(Value::Literal(Literal::BigInt(text)))
            }
            TokenKind::StringLiteral => {
                let token = self.reader.current().clone();
                self.reader.bump();
                Ok(Value::Literal(Literal::String {
                    text: token.string_value().to_string(),
                    quote: token.quote(),
                }))
            }
            TokenKind::TemplateLiteral => {
                let token = self.reader.current().clone();
                self.reader.bump();
                let parts = self.parse_template_parts(&token.text, token.line)?;
                Ok(Value::Template(TemplateLiteral { parts }))
            }
            TokenKind::RegexLiteral => {
                let text = self.reader.current().text.clone();
                self.reader.bump();
                Ok(Value::Regex(RegexLiteral { text }))
            }
            TokenKind::TrueKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::Boolean(true)))
            }
            TokenKind::FalseKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::Boolean(false)))
            }
            TokenKind::NullKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::Null))
            }
            TokenKind::UndefinedKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::Undefined))
            }
            TokenKind::ThisKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::This))
            }
            TokenKind::SuperKeyword => {
                self.reader.bump();
                Ok(Value::Literal(Literal::Super))
            }
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                // An identifier directly followed by the arrow token is a
                // single-parameter arrow function without parens.
                if self.reader.peek(1).kind == TokenKind::Arrow {
                    return self.parse_single_parameter_arrow(FunctionFlags::empty());
                }
                let name = self.reader.current().text.clone();
                self.reader.bump();
                Ok(Value::Reference(Reference::new(name)))
            }
            TokenKind::AsyncKeyword => self.parse_async_term(),
            TokenKind::OpenParen => {
                // Scan to the matching close paren; an arrow token after it
                // makes this a parameter list, otherwise it is a group.
                if self.paren_starts_arrow_parameters()? {
                    self.parse_parenthesized_arrow(FunctionFlags::empty())
                } else {
                    self.reader.bump();
                    let inner = self.parse_value()?;
                    self.reader.expect(TokenKind::CloseParen)?;
                    Ok(Value::Group(Box::new(inner)))
                }
            }
            TokenKind::OpenBracket => self.parse_array_literal(),
            TokenKind::OpenBrace => self.parse_object_literal(),
            TokenKind::NewKeyword => self.parse_new_expression(),
            TokenKind::FunctionKeyword => {
                let func = self.parse_function_declaration(FunctionFlags::empty())?;
                Ok(Value::Function(Box::new(func)))
            }
            TokenKind::ClassKeyword => {
                let class = self.parse_class_declaration(Vec::new(), false)?;
                Ok(Value::Class(Box::new(class)))
            }
            found => Err(self.reader.error(&messages::EXPRESSION_EXPECTED, &[found.describe()])),
        }
    }

    fn parse_async_term(&mut self) -> Result<Value> {
        self.reader.bump();
        if self.reader.at(TokenKind::FunctionKeyword) {
            let func = self.parse_function_declaration(FunctionFlags::ASYNC)?;
            return Ok(Value::Function(Box::new(func)));
        }
        if self.reader.at(TokenKind::OpenParen) && self.paren_starts_arrow_parameters()? {
            return self.parse_parenthesized_arrow(FunctionFlags::ASYNC);
        }
        if self.reader.at(TokenKind::Identifier) && self.reader.peek(1).kind == TokenKind::Arrow {
            return self.parse_single_parameter_arrow(FunctionFlags::ASYNC);
        }
        // Plain identifier named `async`.
        Ok(Value::reference("async"))
    }

    // ------------------------------------------------------------------------
    // Arrow functions
    // ------------------------------------------------------------------------

    /// Cursor on `(`: scan to the matching close paren and check whether an
    /// arrow token follows.
    fn paren_starts_arrow_parameters(&mut self) -> Result<bool> {
        let mut depth = 0i32;
        let close = self.reader.run(
            |token| match token.kind {
                TokenKind::OpenParen => {
                    depth += 1;
                    false
                }
                TokenKind::CloseParen => {
                    depth -= 1;
                    depth == 0
                }
                _ => false,
            },
            true,
        )?;
        Ok(self.significant_kind_after(close) == TokenKind::Arrow)
    }

    fn significant_kind_after(&self, mut index: usize) -> TokenKind {
        loop {
            index += 1;
            let token = self.reader.token_at(index);
            if !token.kind.is_comment() {
                return token.kind;
            }
        }
    }

    fn parse_parenthesized_arrow(&mut self, flags: FunctionFlags) -> Result<Value> {
        let parameters = self.parse_parameter_list()?;
        self.reader.expect(TokenKind::Arrow)?;
        let body = self.parse_arrow_body()?;
        let mut func = FunctionDecl::new(None);
        func.flags = flags | FunctionFlags::ARROW;
        func.parameters = parameters;
        func.body = Some(body);
        Ok(Value::Function(Box::new(func)))
    }

    fn parse_single_parameter_arrow(&mut self, flags: FunctionFlags) -> Result<Value> {
        let name = self.reader.current().text.clone();
        self.reader.bump();
        self.reader.expect(TokenKind::Arrow)?;
        let body = self.parse_arrow_body()?;
        let mut func = FunctionDecl::new(None);
        func.flags = flags | FunctionFlags::ARROW;
        func.parameters = vec![VariableDecl::named(name)];
        func.body = Some(body);
        Ok(Value::Function(Box::new(func)))
    }

    /// A block body, or a concise expression body modeled as a single
    /// return statement.
    fn parse_arrow_body(&mut self) -> Result<Vec<Statement>> {
        if self.reader.at(TokenKind::OpenBrace) {
            self.parse_block()
        } else {
            Ok(vec![Statement::Return(Some(self.parse_value()?))])
        }
    }

    // ------------------------------------------------------------------------
    // new
    // ------------------------------------------------------------------------

    /// `new` consumes its target at member precedence (no calls), then an
    /// optional argument list; no list means an empty one.
    fn parse_new_expression(&mut self) -> Result<Value> {
        self.reader.expect(TokenKind::NewKeyword)?;
        let mut target = self.parse_primary()?;
        loop {
            match self.reader.kind() {
                TokenKind::Dot => {
                    self.reader.bump();
                    let name = self.expect_member_name()?;
                    target = apply_member_access(target, name);
                }
                TokenKind::OpenBracket => {
                    self.reader.bump();
                    let index = self.parse_value()?;
                    self.reader.expect(TokenKind::CloseBracket)?;
                    target = Value::Expression(Expression::new(target, Operation::Index, Some(index)));
                }
                _ => break,
            }
        }
        let type_arguments = if self.reader.at(TokenKind::Less) && self.type_arguments_precede_call() {
            self.parse_type_argument_list()?
        } else {
            Vec::new()
        };
        let arguments = if self.reader.at(TokenKind::OpenParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let mut expr = Expression::new(
            target,
            Operation::Initialize,
            Some(Value::ArgumentList(arguments)),
        );
        expr.type_arguments = type_arguments;
        Ok(Value::Expression(expr))
    }

    // ------------------------------------------------------------------------
    // Array and object literals
    // ------------------------------------------------------------------------

    fn parse_array_literal(&mut self) -> Result<Value> {
        self.reader.expect(TokenKind::OpenBracket)?;
        let mut slots: Vec<Option<Value>> = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseBracket) {
                break;
            }
            if self.reader.at(TokenKind::Comma) {
                slots.push(None);
                self.reader.bump();
                continue;
            }
            slots.push(Some(self.parse_value()?));
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseBracket)?;
        Ok(Value::Array(slots))
    }

    fn parse_object_literal(&mut self) -> Result<Value> {
        self.reader.expect(TokenKind::OpenBrace)?;
        let mut properties = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseBrace) {
                break;
            }
            if self.reader.consume(TokenKind::Spread) {
                properties.push(ObjectProperty::Spread(self.parse_value()?));
            } else if self.object_entry_is_method() {
                properties.push(ObjectProperty::Method(self.parse_object_method()?));
            } else if self.reader.at(TokenKind::Identifier)
                && matches!(self.reader.peek(1).kind, TokenKind::Comma | TokenKind::CloseBrace)
            {
                let name = self.reader.current().text.clone();
                self.reader.bump();
                properties.push(ObjectProperty::Shorthand(name));
            } else {
                let key = self.parse_property_key()?;
                self.reader.expect(TokenKind::Colon)?;
                let value = self.parse_value()?;
                properties.push(ObjectProperty::Entry { key, value });
            }
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(Value::Object(ObjectLiteral { properties }))
    }

    fn object_entry_is_method(&self) -> bool {
        let kind = self.reader.kind();
        let next = self.reader.peek(1).kind;
        if kind == TokenKind::Asterisk {
            return true;
        }
        if matches!(kind, TokenKind::GetKeyword | TokenKind::SetKeyword | TokenKind::AsyncKeyword)
            && matches!(next, TokenKind::Identifier | TokenKind::EscapedIdentifier)
        {
            return true;
        }
        matches!(kind, TokenKind::Identifier | TokenKind::EscapedIdentifier)
            && matches!(next, TokenKind::OpenParen | TokenKind::Less)
    }

    fn parse_object_method(&mut self) -> Result<FunctionDecl> {
        let mut flags = FunctionFlags::empty();
        loop {
            match self.reader.kind() {
                TokenKind::AsyncKeyword if self.reader.peek(1).kind != TokenKind::OpenParen => {
                    flags |= FunctionFlags::ASYNC;
                    self.reader.bump();
                }
                TokenKind::GetKeyword if self.reader.peek(1).kind != TokenKind::OpenParen => {
                    flags |= FunctionFlags::GETTER;
                    self.reader.bump();
                }
                TokenKind::SetKeyword if self.reader.peek(1).kind != TokenKind::OpenParen => {
                    flags |= FunctionFlags::SETTER;
                    self.reader.bump();
                }
                TokenKind::Asterisk => {
                    flags |= FunctionFlags::GENERATOR;
                    self.reader.bump();
                }
                _ => break,
            }
        }
        let name = self.expect_member_name()?;
        let mut func = FunctionDecl::new(Some(name));
        func.flags = flags;
        func.type_parameters = self.parse_optional_type_parameters()?;
        func.parameters = self.parse_parameter_list()?;
        if self.reader.consume(TokenKind::Colon) {
            func.return_type = Some(self.parse_type()?);
        }
        func.body = Some(self.parse_block()?);
        Ok(func)
    }

    fn parse_property_key(&mut self) -> Result<PropertyKey> {
        match self.reader.kind() {
            TokenKind::StringLiteral => {
                let token = self.reader.current().clone();
                self.reader.bump();
                Ok(PropertyKey::String {
                    text: token.string_value().to_string(),
                    quote: token.quote(),
                })
            }
            TokenKind::NumberLiteral => {
                let text = self.reader.current().text.clone();
                self.reader.bump();
                Ok(PropertyKey::Number(text))
            }
            TokenKind::OpenBracket => {
                self.reader.bump();
                let inner = self.parse_value()?;
                self.reader.expect(TokenKind::CloseBracket)?;
                Ok(PropertyKey::Computed(Box::new(inner)))
            }
            _ => Ok(PropertyKey::Identifier(self.expect_member_name()?)),
        }
    }

    // ------------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------------

    /// Split the raw template text into literal chunks and interpolated
    /// expressions; each `${...}` body is re-tokenized and parsed.
    fn parse_template_parts(&mut self, raw: &str, token_line: u32) -> Result<Vec<TemplatePart>> {
        let chars: Vec<char> = raw.chars().collect();
        let mut parts = Vec::new();
        let mut text = String::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '\\' {
                text.push(chars[i]);
                if let Some(&next) = chars.get(i + 1) {
                    text.push(next);
                }
                i += 2;
                continue;
            }
            if chars[i] == '$' && chars.get(i + 1) == Some(&'{') {
                let end = skip_interpolation(&chars, i + 2);
                let inner: String = chars[i + 2..end.saturating_sub(1)].iter().collect();
                if !text.is_empty() {
                    parts.push(TemplatePart::Text(std::mem::take(&mut text)));
                }
                let sub_origin = SourceOrigin {
                    file: self.origin.file.clone(),
                    line_offset: token_line.saturating_sub(1),
                    column_offset: 0,
                };
                let tokens = tokenize(&inner, &sub_origin)?;
                let mut sub = Parser::new(tokens, sub_origin);
                let value = sub.parse_value()?;
                parts.push(TemplatePart::Expression(value));
                i = end;
                continue;
            }
            text.push(chars[i]);
            i += 1;
        }
        if !text.is_empty() {
            parts.push(TemplatePart::Text(text));
        }
        Ok(parts)
    }

    // ------------------------------------------------------------------------
    // Generic-call detection
    // ------------------------------------------------------------------------

    /// Cursor on `<`: scan forward over what could be a comma-separated
    /// type-argument list (counting shift tokens as multiple chevrons) and
    /// report whether a call-open paren follows the matching close. The
    /// scan never consumes or rewrites tokens; rewriting happens only once
    /// the list is actually parsed.
    fn type_arguments_precede_call(&mut self) -> bool {
        let mut depth = 0i32;
        let mut valid = true;
        let scan = self.reader.run(
            |token| match token.kind {
                TokenKind::Less => {
                    depth += 1;
                    false
                }
                TokenKind::Greater => {
                    depth -= 1;
                    depth <= 0
                }
                TokenKind::GreaterGreater => {
                    depth -= 2;
                    depth <= 0
                }
                TokenKind::GreaterGreaterGreater => {
                    depth -= 3;
                    depth <= 0
                }
                TokenKind::Identifier
                | TokenKind::EscapedIdentifier
                | TokenKind::Dot
                | TokenKind::Comma
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::Bar
                | TokenKind::StringLiteral
                | TokenKind::NumberLiteral
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
                | TokenKind::NullKeyword
                | TokenKind::UndefinedKeyword
                | TokenKind::KeyOfKeyword
                | TokenKind::TypeOfKeyword => false,
                _ => {
                    valid = false;
                    true
                }
            },
            true,
        );
        match scan {
            Ok(index) => {
                valid && depth == 0 && self.significant_kind_after(index) == TokenKind::OpenParen
            }
            Err(_) => false,
        }
    }
}

/// Extend a reference chain with one member, or fall back to a structural
/// access expression when the base is not a plain reference.
fn apply_member_access(value: Value, name: String) -> Value {
    match value {
        Value::Reference(parent) => Value::Reference(Reference::with_parent(name, parent)),
        other => Value::Expression(Expression::new(
            other,
            Operation::Access,
            Some(Value::reference(name)),
        )),
    }
}

/// Index just past the `}` that closes an interpolation opened before
/// `start`. Handles nested braces, nested templates, and quoted strings.
fn skip_interpolation(chars: &[char], start: usize) -> usize {
    let mut depth = 1u32;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            '`' => {
                i = skip_template(chars, i + 1);
                continue;
            }
            '\'' | '"' => {
                i = skip_string(chars, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Index just past the closing backtick of a template whose body starts at
/// `start`.
fn skip_template(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '`' => return i + 1,
            '$' if chars.get(i + 1) == Some(&'{') => {
                i = skip_interpolation(chars, i + 2);
                continue;
            }
            _ => i += 1,
        }
    }
    i
}

/// Index just past the closing quote of a string starting at `start`.
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}
