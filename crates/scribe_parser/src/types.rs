//! Type-annotation parsing.
//!
//! Types are parsed and re-emitted, never checked. Closing a generic
//! argument list peels one chevron at a time off shift tokens: `>>` becomes
//! `>`, `>>>` becomes `>>`.

use crate::parser::Parser;
use scribe_ast::node::*;
use scribe_ast::token_kind::TokenKind;
use scribe_diagnostics::{messages, Result};

impl Parser {
    /// A full type: union of postfix types.
    pub(crate) fn parse_type(&mut self) -> Result<TypeRef> {
        let mut parts = vec![self.parse_type_postfix()?];
        while self.reader.consume(TokenKind::Bar) {
            parts.push(self.parse_type_postfix()?);
        }
        if parts.len() == 1 {
            Ok(parts.pop().unwrap_or(TypeRef::named("never")))
        } else {
            Ok(TypeRef::Union(parts))
        }
    }

    /// A primary type with `[]` array suffixes.
    fn parse_type_postfix(&mut self) -> Result<TypeRef> {
        let mut ty = self.parse_type_primary()?;
        while self.reader.at(TokenKind::OpenBracket)
            && self.reader.peek(1).kind == TokenKind::CloseBracket
        {
            self.reader.bump();
            self.reader.bump();
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_type_primary(&mut self) -> Result<TypeRef> {
        match self.reader.kind() {
            TokenKind::KeyOfKeyword => {
                self.reader.bump();
                Ok(TypeRef::KeyOf(Box::new(self.parse_type_postfix()?)))
            }
            TokenKind::TypeOfKeyword => {
                self.reader.bump();
                Ok(TypeRef::TypeOf(self.parse_dotted_name()?))
            }
            TokenKind::OpenParen => self.parse_function_type(),
            TokenKind::OpenBracket => {
                self.reader.bump();
                let mut elements = Vec::new();
                loop {
                    if self.reader.at(TokenKind::CloseBracket) {
                        break;
                    }
                    elements.push(self.parse_type()?);
                    if !self.reader.consume(TokenKind::Comma) {
                        break;
                    }
                }
                self.reader.expect(TokenKind::CloseBracket)?;
                Ok(TypeRef::Tuple(elements))
            }
            TokenKind::OpenBrace => self.parse_object_type(),
            TokenKind::StringLiteral => {
                let token = self.reader.current().clone();
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::String {
                    text: token.string_value().to_string(),
                    quote: token.quote(),
                }))
            }
            TokenKind::NumberLiteral => {
                let text = self.reader.current().text.clone();
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::Number(text)))
            }
            TokenKind::TrueKeyword => {
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::Boolean(true)))
            }
            TokenKind::FalseKeyword => {
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::Boolean(false)))
            }
            TokenKind::NullKeyword => {
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::Null))
            }
            TokenKind::UndefinedKeyword => {
                self.reader.bump();
                Ok(TypeRef::Literal(Literal::Undefined))
            }
            TokenKind::VoidKeyword => {
                self.reader.bump();
                Ok(TypeRef::named("void"))
            }
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                let name = self.parse_dotted_name()?;
                let type_arguments = if self.reader.at(TokenKind::Less) {
                    self.parse_type_argument_list()?
                } else {
                    Vec::new()
                };
                Ok(TypeRef::Named { name, type_arguments })
            }
            found => Err(self.reader.error(&messages::TYPE_EXPECTED, &[found.describe()])),
        }
    }

    /// `(a: T, b?: U) => R`
    fn parse_function_type(&mut self) -> Result<TypeRef> {
        self.reader.expect(TokenKind::OpenParen)?;
        let mut parameters = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseParen) {
                break;
            }
            let name = self.expect_identifier()?;
            let optional = self.reader.consume(TokenKind::Question);
            let type_ref = if self.reader.consume(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeSignatureParam { name, type_ref, optional });
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseParen)?;
        self.reader.expect(TokenKind::Arrow)?;
        let return_type = self.parse_type()?;
        Ok(TypeRef::Function { parameters, return_type: Box::new(return_type) })
    }

    /// `{ [K in Source]: V }` or `{ a: T; b?: U }`
    fn parse_object_type(&mut self) -> Result<TypeRef> {
        let mapped = self.reader.peek(1).kind == TokenKind::OpenBracket
            && matches!(
                self.reader.peek(2).kind,
                TokenKind::Identifier | TokenKind::EscapedIdentifier
            )
            && self.reader.peek(3).kind == TokenKind::InKeyword;
        self.reader.expect(TokenKind::OpenBrace)?;
        if mapped {
            self.reader.expect(TokenKind::OpenBracket)?;
            let key_name = self.expect_identifier()?;
            self.reader.expect(TokenKind::InKeyword)?;
            let key_source = self.parse_type()?;
            self.reader.expect(TokenKind::CloseBracket)?;
            self.reader.expect(TokenKind::Colon)?;
            let value = self.parse_type()?;
            self.optional_semicolon();
            self.reader.expect(TokenKind::CloseBrace)?;
            return Ok(TypeRef::Mapped {
                key_name,
                key_source: Box::new(key_source),
                value: Box::new(value),
            });
        }
        let mut members = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseBrace) || self.reader.at_end() {
                break;
            }
            members.push(self.parse_type_member()?);
            while self.reader.consume(TokenKind::Semicolon) || self.reader.consume(TokenKind::Comma) {}
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(TypeRef::Object(members))
    }

    /// One member of an interface or object type; methods become
    /// function-typed members.
    pub(crate) fn parse_type_member(&mut self) -> Result<TypeMember> {
        let readonly = self.reader.consume(TokenKind::ReadonlyKeyword);
        let name = self.expect_member_name()?;
        let optional = self.reader.consume(TokenKind::Question);
        if self.reader.at(TokenKind::OpenParen) {
            let signature = self.parse_function_type_from_params()?;
            return Ok(TypeMember { name, optional, readonly, value: signature });
        }
        self.reader.expect(TokenKind::Colon)?;
        let value = self.parse_type()?;
        Ok(TypeMember { name, optional, readonly, value })
    }

    /// A method signature: parameter list plus `:`-annotated return type
    /// (void when omitted).
    fn parse_function_type_from_params(&mut self) -> Result<TypeRef> {
        self.reader.expect(TokenKind::OpenParen)?;
        let mut parameters = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseParen) {
                break;
            }
            let name = self.expect_identifier()?;
            let optional = self.reader.consume(TokenKind::Question);
            let type_ref = if self.reader.consume(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeSignatureParam { name, type_ref, optional });
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseParen)?;
        let return_type = if self.reader.consume(TokenKind::Colon) {
            self.parse_type()?
        } else {
            TypeRef::named("void")
        };
        Ok(TypeRef::Function { parameters, return_type: Box::new(return_type) })
    }

    fn parse_dotted_name(&mut self) -> Result<String> {
        let mut name = self.expect_identifier()?;
        while self.reader.consume(TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_member_name()?);
        }
        Ok(name)
    }

    /// Consume `<T, U, ...>` in type-argument position. The closing token
    /// may be a shift token left by the combination pass; one chevron is
    /// peeled per list closed.
    pub(crate) fn parse_type_argument_list(&mut self) -> Result<Vec<TypeRef>> {
        self.reader.expect(TokenKind::Less)?;
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type()?);
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.close_angle_bracket()?;
        Ok(arguments)
    }

    /// Optional `<T extends U = V, ...>` in declaration position.
    pub(crate) fn parse_optional_type_parameters(&mut self) -> Result<Vec<TypeParameter>> {
        if !self.reader.at(TokenKind::Less) {
            return Ok(Vec::new());
        }
        self.reader.bump();
        let mut parameters = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let constraint = if self.reader.consume(TokenKind::ExtendsKeyword) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.reader.consume(TokenKind::Equals) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeParameter { name, constraint, default });
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.close_angle_bracket()?;
        Ok(parameters)
    }

    fn close_angle_bracket(&mut self) -> Result<()> {
        match self.reader.kind() {
            TokenKind::Greater => {
                self.reader.bump();
                Ok(())
            }
            TokenKind::GreaterGreater | TokenKind::GreaterGreaterGreater => {
                self.reader.split_close_angle();
                Ok(())
            }
            _ => Err(self.reader.error_expected(TokenKind::Greater)),
        }
    }
}
