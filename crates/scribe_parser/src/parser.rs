//! Statement and declaration parsing.
//!
//! Each construct is a small state machine over the token reader. Errors
//! are fatal and immediate; the first one encountered in document order
//! aborts the parse.

use crate::reader::TokenReader;
use indexmap::IndexMap;
use scribe_ast::node::*;
use scribe_ast::token_kind::TokenKind;
use scribe_ast::types::{DeclarationKeyword, FunctionFlags, Visibility};
use scribe_core::text::SourceOrigin;
use scribe_diagnostics::{messages, Result};
use scribe_scanner::{tokenize, Token};

/// Parse a whole source text into its top-level statement list.
pub fn parse_source(text: &str, origin: &SourceOrigin) -> Result<Vec<Statement>> {
    tracing::debug!(
        file = origin.file.as_deref().unwrap_or("<anonymous>"),
        bytes = text.len(),
        "parse source"
    );
    let tokens = tokenize(text, origin)?;
    let mut parser = Parser::new(tokens, origin.clone());
    let statements = parser.parse_statements_until(&[TokenKind::EndOfFile])?;
    Ok(statements)
}

pub struct Parser {
    pub(crate) reader: TokenReader,
    pub(crate) origin: SourceOrigin,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, origin: SourceOrigin) -> Self {
        let file = origin.file.clone();
        Self {
            reader: TokenReader::new(tokens, file),
            origin,
        }
    }

    // ------------------------------------------------------------------------
    // Statement lists and blocks
    // ------------------------------------------------------------------------

    pub(crate) fn parse_statements_until(&mut self, terminators: &[TokenKind]) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            for comment in self.reader.drain_comments() {
                statements.push(comment_statement(comment));
            }
            if terminators.contains(&self.reader.kind()) || self.reader.at_end() {
                break;
            }
            let statement = self.parse_statement()?;
            statements.push(statement);
        }
        Ok(statements)
    }

    pub(crate) fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.reader.expect(TokenKind::OpenBrace)?;
        let statements = self.parse_statements_until(&[TokenKind::CloseBrace])?;
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(statements)
    }

    /// A brace-enclosed block, or a single statement treated as one.
    fn parse_embedded_body(&mut self) -> Result<Vec<Statement>> {
        if self.reader.at(TokenKind::OpenBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    pub(crate) fn optional_semicolon(&mut self) {
        self.reader.consume(TokenKind::Semicolon);
    }

    // ------------------------------------------------------------------------
    // Statement dispatch
    // ------------------------------------------------------------------------

    pub fn parse_statement(&mut self) -> Result<Statement> {
        match self.reader.kind() {
            TokenKind::Semicolon => {
                self.reader.bump();
                Ok(Statement::Empty)
            }
            TokenKind::OpenBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::ConstKeyword | TokenKind::LetKeyword | TokenKind::VarKeyword => {
                let statement = self.parse_variable_statement(false)?;
                self.optional_semicolon();
                Ok(statement)
            }
            TokenKind::FunctionKeyword => {
                Ok(Statement::Function(self.parse_function_declaration(FunctionFlags::empty())?))
            }
            TokenKind::AsyncKeyword if self.reader.peek(1).kind == TokenKind::FunctionKeyword => {
                self.reader.bump();
                Ok(Statement::Function(self.parse_function_declaration(FunctionFlags::ASYNC)?))
            }
            TokenKind::ClassKeyword => {
                Ok(Statement::Class(self.parse_class_declaration(Vec::new(), false)?))
            }
            TokenKind::AbstractKeyword if self.reader.peek(1).kind == TokenKind::ClassKeyword => {
                self.reader.bump();
                Ok(Statement::Class(self.parse_class_declaration(Vec::new(), true)?))
            }
            TokenKind::At => {
                let decorators = self.parse_decorators()?;
                let is_abstract = self.reader.consume(TokenKind::AbstractKeyword);
                if !self.reader.at(TokenKind::ClassKeyword) {
                    return Err(self.reader.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]));
                }
                Ok(Statement::Class(self.parse_class_declaration(decorators, is_abstract)?))
            }
            TokenKind::IfKeyword => self.parse_if_statement(),
            TokenKind::ForKeyword => self.parse_for_statement(),
            TokenKind::WhileKeyword => self.parse_while_statement(),
            TokenKind::DoKeyword => self.parse_do_while_statement(),
            TokenKind::SwitchKeyword => self.parse_switch_statement(),
            TokenKind::TryKeyword => self.parse_try_statement(),
            TokenKind::ThrowKeyword => {
                self.reader.bump();
                let value = self.parse_value()?;
                self.optional_semicolon();
                Ok(Statement::Throw(value))
            }
            TokenKind::ReturnKeyword => {
                self.reader.bump();
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_value()?)
                };
                self.optional_semicolon();
                Ok(Statement::Return(value))
            }
            TokenKind::BreakKeyword => {
                self.reader.bump();
                let label = self.optional_label();
                self.optional_semicolon();
                Ok(Statement::Break(label))
            }
            TokenKind::ContinueKeyword => {
                self.reader.bump();
                let label = self.optional_label();
                self.optional_semicolon();
                Ok(Statement::Continue(label))
            }
            TokenKind::ImportKeyword => self.parse_import_statement(),
            TokenKind::ExportKeyword => self.parse_export_statement(),
            TokenKind::InterfaceKeyword => Ok(Statement::Interface(self.parse_interface_declaration()?)),
            TokenKind::EnumKeyword => Ok(Statement::Enum(self.parse_enum_declaration()?)),
            TokenKind::TypeKeyword if self.reader.peek(1).kind == TokenKind::Identifier => {
                Ok(Statement::TypeAlias(self.parse_type_alias()?))
            }
            _ => {
                let value = self.parse_value()?;
                self.optional_semicolon();
                Ok(Statement::Expression(value))
            }
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.reader.kind(),
            TokenKind::Semicolon | TokenKind::CloseBrace | TokenKind::EndOfFile
        )
    }

    fn optional_label(&mut self) -> Option<String> {
        if self.reader.at(TokenKind::Identifier) {
            let label = self.reader.current().text.clone();
            self.reader.bump();
            Some(label)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------------

    pub(crate) fn expect_identifier(&mut self) -> Result<String> {
        match self.reader.kind() {
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                let name = self.reader.current().text.clone();
                self.reader.bump();
                Ok(name)
            }
            found => Err(self.reader.error(&messages::IDENTIFIER_EXPECTED, &[found.describe()])),
        }
    }

    /// A member name: identifier, escaped identifier, or any keyword.
    pub(crate) fn expect_member_name(&mut self) -> Result<String> {
        match self.reader.kind() {
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                let name = self.reader.current().text.clone();
                self.reader.bump();
                Ok(name)
            }
            kind if kind.is_keyword() => {
                let name = kind.keyword_text().unwrap_or_default().to_string();
                self.reader.bump();
                Ok(name)
            }
            found => Err(self.reader.error(&messages::PROPERTY_NAME_EXPECTED, &[found.describe()])),
        }
    }

    fn expect_module_specifier(&mut self) -> Result<String> {
        if self.reader.at(TokenKind::StringLiteral) {
            let specifier = self.reader.current().string_value().to_string();
            self.reader.bump();
            Ok(specifier)
        } else {
            Err(self.reader.error(&messages::MODULE_SPECIFIER_EXPECTED, &[]))
        }
    }

    // ------------------------------------------------------------------------
    // Variable declarations
    // ------------------------------------------------------------------------

    /// Parse `const|let|var` plus one or more comma-separated declarators.
    /// Inside a `for` head the trailing semicolon is left for the caller
    /// and constants may omit their initializer.
    fn parse_variable_statement(&mut self, in_for_head: bool) -> Result<Statement> {
        let keyword = match self.reader.kind() {
            TokenKind::ConstKeyword => DeclarationKeyword::Const,
            TokenKind::LetKeyword => DeclarationKeyword::Let,
            _ => DeclarationKeyword::Var,
        };
        self.reader.bump();
        let mut declarations = IndexMap::new();
        loop {
            let declarator = self.parse_declarator(Some(keyword), in_for_head)?;
            declarations.insert(declarator.primary_name().to_string(), declarator);
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::Variable(VariableStatement { keyword, declarations }))
    }

    fn parse_declarator(
        &mut self,
        keyword: Option<DeclarationKeyword>,
        allow_missing_initializer: bool,
    ) -> Result<VariableDecl> {
        let target = self.parse_binding_target()?;
        let type_annotation = if self.reader.consume(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.reader.consume(TokenKind::Equals) {
            Some(self.parse_value()?)
        } else {
            None
        };
        if keyword == Some(DeclarationKeyword::Const)
            && initializer.is_none()
            && !allow_missing_initializer
        {
            return Err(self.reader.error(&messages::CONST_DECLARATION_WITHOUT_INITIALIZER, &[]));
        }
        Ok(VariableDecl {
            keyword,
            target,
            type_annotation,
            initializer,
            is_rest: false,
            is_optional: false,
        })
    }

    pub(crate) fn parse_binding_target(&mut self) -> Result<BindingTarget> {
        match self.reader.kind() {
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                let name = self.reader.current().text.clone();
                self.reader.bump();
                Ok(BindingTarget::Name(name))
            }
            TokenKind::OpenBracket => self.parse_array_pattern(),
            TokenKind::OpenBrace => self.parse_object_pattern(),
            found => Err(self.reader.error(&messages::IDENTIFIER_EXPECTED, &[found.describe()])),
        }
    }

    fn parse_array_pattern(&mut self) -> Result<BindingTarget> {
        self.reader.expect(TokenKind::OpenBracket)?;
        let mut slots: Vec<Option<BindingElement>> = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseBracket) {
                break;
            }
            if self.reader.at(TokenKind::Comma) {
                // An elided slot: `[, name]`.
                slots.push(None);
                self.reader.bump();
                continue;
            }
            let is_rest = self.reader.consume(TokenKind::Spread);
            let name = self.expect_identifier()?;
            let default = if self.reader.consume(TokenKind::Equals) {
                Some(self.parse_value()?)
            } else {
                None
            };
            slots.push(Some(BindingElement { name, default, is_rest }));
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader
            .expect(TokenKind::CloseBracket)
            .map_err(|_| self.reader.error(&messages::MALFORMED_DESTRUCTURING_PATTERN, &[]))?;
        Ok(BindingTarget::ArrayPattern(slots))
    }

    fn parse_object_pattern(&mut self) -> Result<BindingTarget> {
        self.reader.expect(TokenKind::OpenBrace)?;
        let mut entries = IndexMap::new();
        loop {
            if self.reader.at(TokenKind::CloseBrace) {
                break;
            }
            if self.reader.consume(TokenKind::Spread) {
                let name = self.expect_identifier()?;
                entries.insert(name.clone(), BindingElement { name, default: None, is_rest: true });
            } else {
                let key = self.expect_member_name()?;
                let local = if self.reader.consume(TokenKind::Colon) {
                    self.expect_identifier()?
                } else {
                    key.clone()
                };
                let default = if self.reader.consume(TokenKind::Equals) {
                    Some(self.parse_value()?)
                } else {
                    None
                };
                entries.insert(key, BindingElement { name: local, default, is_rest: false });
            }
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader
            .expect(TokenKind::CloseBrace)
            .map_err(|_| self.reader.error(&messages::MALFORMED_DESTRUCTURING_PATTERN, &[]))?;
        Ok(BindingTarget::ObjectPattern(entries))
    }

    // ------------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------------

    /// Cursor on the `function` keyword.
    pub(crate) fn parse_function_declaration(&mut self, initial: FunctionFlags) -> Result<FunctionDecl> {
        self.reader.expect(TokenKind::FunctionKeyword)?;
        let mut flags = initial;
        if self.reader.consume(TokenKind::Asterisk) {
            flags |= FunctionFlags::GENERATOR;
        }
        let name = if self.reader.at(TokenKind::Identifier) {
            let name = self.reader.current().text.clone();
            self.reader.bump();
            Some(name)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = if self.reader.consume(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = Some(self.parse_block()?);
        Ok(FunctionDecl { name, flags, type_parameters, parameters, return_type, body })
    }

    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<VariableDecl>> {
        self.reader.expect(TokenKind::OpenParen)?;
        let parameters = self.parse_parameters_until_close()?;
        self.reader.expect(TokenKind::CloseParen)?;
        Ok(parameters)
    }

    /// Comma-separated parameters; stops before the closing paren.
    pub(crate) fn parse_parameters_until_close(&mut self) -> Result<Vec<VariableDecl>> {
        let mut parameters = Vec::new();
        loop {
            if self.reader.at(TokenKind::CloseParen) {
                break;
            }
            parameters.push(self.parse_parameter()?);
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> Result<VariableDecl> {
        let is_rest = self.reader.consume(TokenKind::Spread);
        let target = self.parse_binding_target()?;
        let is_optional = self.reader.consume(TokenKind::Question);
        let type_annotation = if self.reader.consume(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let initializer = if self.reader.consume(TokenKind::Equals) {
            Some(self.parse_value()?)
        } else {
            None
        };
        Ok(VariableDecl {
            keyword: None,
            target,
            type_annotation,
            initializer,
            is_rest,
            is_optional,
        })
    }

    fn parse_decorators(&mut self) -> Result<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.reader.consume(TokenKind::At) {
            decorators.push(Decorator { expression: self.parse_unary()? });
        }
        Ok(decorators)
    }

    // ------------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------------

    /// Cursor on the `class` keyword; decorators and `abstract` already
    /// consumed by the caller.
    pub(crate) fn parse_class_declaration(
        &mut self,
        decorators: Vec<Decorator>,
        is_abstract: bool,
    ) -> Result<ClassDecl> {
        self.reader.expect(TokenKind::ClassKeyword)?;
        let name = if self.reader.at(TokenKind::Identifier) {
            let name = self.reader.current().text.clone();
            self.reader.bump();
            Some(name)
        } else {
            None
        };
        let mut class = ClassDecl::new(name);
        class.decorators = decorators;
        class.is_abstract = is_abstract;
        class.type_parameters = self.parse_optional_type_parameters()?;
        if self.reader.consume(TokenKind::ExtendsKeyword) {
            class.extends = Some(self.parse_type()?);
        }
        if self.reader.consume(TokenKind::ImplementsKeyword) {
            loop {
                class.implements.push(self.parse_type()?);
                if !self.reader.consume(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.reader.expect(TokenKind::OpenBrace)?;
        loop {
            for comment in self.reader.drain_comments() {
                class.add_member(ClassMember {
                    modifiers: MemberModifiers::default(),
                    kind: MemberKind::Comment(comment_node(comment)),
                });
            }
            if self.reader.at(TokenKind::CloseBrace) || self.reader.at_end() {
                break;
            }
            if self.reader.consume(TokenKind::Semicolon) {
                continue;
            }
            let member = self.parse_class_member()?;
            class.add_member(member);
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(class)
    }

    fn parse_class_member(&mut self) -> Result<ClassMember> {
        let mut modifiers = MemberModifiers::default();
        while self.reader.at(TokenKind::At) {
            self.reader.bump();
            modifiers.decorators.push(Decorator { expression: self.parse_unary()? });
        }
        let mut flags = FunctionFlags::empty();
        loop {
            let kind = self.reader.kind();
            // A modifier keyword immediately followed by `(`/`:`/`=`/`?`/`<`
            // is actually the member's name.
            if keyword_is_member_name(kind, self.reader.peek(1).kind) {
                break;
            }
            match kind {
                TokenKind::PublicKeyword => {
                    modifiers.visibility = Some(Visibility::Public);
                    self.reader.bump();
                }
                TokenKind::PrivateKeyword => {
                    modifiers.visibility = Some(Visibility::Private);
                    self.reader.bump();
                }
                TokenKind::ProtectedKeyword => {
                    modifiers.visibility = Some(Visibility::Protected);
                    self.reader.bump();
                }
                TokenKind::StaticKeyword => {
                    modifiers.is_static = true;
                    self.reader.bump();
                }
                TokenKind::AbstractKeyword => {
                    modifiers.is_abstract = true;
                    self.reader.bump();
                }
                TokenKind::ReadonlyKeyword => {
                    modifiers.is_readonly = true;
                    self.reader.bump();
                }
                TokenKind::AsyncKeyword => {
                    flags |= FunctionFlags::ASYNC;
                    self.reader.bump();
                }
                TokenKind::GetKeyword => {
                    flags |= FunctionFlags::GETTER;
                    self.reader.bump();
                }
                TokenKind::SetKeyword => {
                    flags |= FunctionFlags::SETTER;
                    self.reader.bump();
                }
                _ => break,
            }
        }
        if self.reader.consume(TokenKind::Asterisk) {
            flags |= FunctionFlags::GENERATOR;
        }
        let name = self.expect_member_name()?;

        if self.reader.at(TokenKind::OpenParen) || self.reader.at(TokenKind::Less) {
            let mut func = FunctionDecl::new(Some(name));
            func.flags = flags;
            func.type_parameters = self.parse_optional_type_parameters()?;
            func.parameters = self.parse_parameter_list()?;
            if self.reader.consume(TokenKind::Colon) {
                func.return_type = Some(self.parse_type()?);
            }
            if modifiers.is_abstract {
                // Abstract members are body-less declarations.
                self.optional_semicolon();
                func.body = None;
            } else {
                func.body = Some(self.parse_block()?);
            }
            return Ok(ClassMember { modifiers, kind: MemberKind::Method(func) });
        }

        let mut decl = VariableDecl::named(name);
        decl.is_optional = self.reader.consume(TokenKind::Question);
        if self.reader.consume(TokenKind::Colon) {
            decl.type_annotation = Some(self.parse_type()?);
        }
        if self.reader.consume(TokenKind::Equals) {
            decl.initializer = Some(self.parse_value()?);
        }
        self.optional_semicolon();
        Ok(ClassMember { modifiers, kind: MemberKind::Field(decl) })
    }

    // ------------------------------------------------------------------------
    // Control flow
    // ------------------------------------------------------------------------

    fn parse_if_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::IfKeyword)?;
        self.reader.expect(TokenKind::OpenParen)?;
        let condition = self.parse_value()?;
        self.reader.expect(TokenKind::CloseParen)?;
        let then_branch = self.parse_embedded_body()?;
        let else_branch = if self.reader.consume(TokenKind::ElseKeyword) {
            if self.reader.at(TokenKind::IfKeyword) {
                Some(Box::new(self.parse_if_statement()?))
            } else {
                Some(Box::new(Statement::Block(self.parse_embedded_body()?)))
            }
        } else {
            None
        };
        Ok(Statement::If(IfStatement { condition, then_branch, else_branch }))
    }

    /// Disambiguates the C-style head from the iterator head by scanning
    /// forward (bracket-depth tracked) for the first top-level `of`, `in`,
    /// or `;`.
    fn parse_for_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::ForKeyword)?;
        self.reader.expect(TokenKind::OpenParen)?;

        let mut depth = 0i32;
        let decision = self.reader.run(
            |token| match token.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => {
                    depth += 1;
                    false
                }
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    if depth == 0 {
                        true
                    } else {
                        depth -= 1;
                        false
                    }
                }
                TokenKind::Semicolon | TokenKind::InKeyword | TokenKind::OfKeyword => depth == 0,
                _ => false,
            },
            true,
        )?;

        let head = match self.reader.token_at(decision).kind {
            TokenKind::Semicolon | TokenKind::CloseParen => {
                let init = if self.reader.at(TokenKind::Semicolon) {
                    None
                } else if matches!(
                    self.reader.kind(),
                    TokenKind::ConstKeyword | TokenKind::LetKeyword | TokenKind::VarKeyword
                ) {
                    Some(Box::new(self.parse_variable_statement(true)?))
                } else {
                    Some(Box::new(Statement::Expression(self.parse_value()?)))
                };
                self.reader.expect(TokenKind::Semicolon)?;
                let condition = if self.reader.at(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_value()?)
                };
                self.reader.expect(TokenKind::Semicolon)?;
                let update = if self.reader.at(TokenKind::CloseParen) {
                    None
                } else {
                    Some(self.parse_value()?)
                };
                ForHead::Classic { init, condition, update }
            }
            TokenKind::InKeyword | TokenKind::OfKeyword => {
                let keyword = match self.reader.kind() {
                    TokenKind::ConstKeyword => Some(DeclarationKeyword::Const),
                    TokenKind::LetKeyword => Some(DeclarationKeyword::Let),
                    TokenKind::VarKeyword => Some(DeclarationKeyword::Var),
                    _ => None,
                };
                if keyword.is_some() {
                    self.reader.bump();
                }
                let target = self.parse_binding_target()?;
                let binding = VariableDecl {
                    keyword,
                    target,
                    type_annotation: None,
                    initializer: None,
                    is_rest: false,
                    is_optional: false,
                };
                let kind = if self.reader.consume(TokenKind::InKeyword) {
                    IterationKind::In
                } else {
                    self.reader.expect(TokenKind::OfKeyword)?;
                    IterationKind::Of
                };
                let subject = self.parse_value()?;
                ForHead::Iterator { binding, kind, subject }
            }
            _ => return Err(self.reader.error(&messages::FOR_HEAD_NOT_ITERABLE, &[])),
        };
        self.reader.expect(TokenKind::CloseParen)?;
        let body = self.parse_embedded_body()?;
        Ok(Statement::For(ForStatement { head, body }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::WhileKeyword)?;
        self.reader.expect(TokenKind::OpenParen)?;
        let condition = self.parse_value()?;
        self.reader.expect(TokenKind::CloseParen)?;
        let body = self.parse_embedded_body()?;
        Ok(Statement::While(WhileStatement { condition, body }))
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::DoKeyword)?;
        let body = self.parse_embedded_body()?;
        self.reader.expect(TokenKind::WhileKeyword)?;
        self.reader.expect(TokenKind::OpenParen)?;
        let condition = self.parse_value()?;
        self.reader.expect(TokenKind::CloseParen)?;
        self.optional_semicolon();
        Ok(Statement::DoWhile(DoWhileStatement { body, condition }))
    }

    fn parse_switch_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::SwitchKeyword)?;
        self.reader.expect(TokenKind::OpenParen)?;
        let subject = self.parse_value()?;
        self.reader.expect(TokenKind::CloseParen)?;
        self.reader.expect(TokenKind::OpenBrace)?;
        let mut cases = Vec::new();
        loop {
            let leading: Vec<Statement> = self
                .reader
                .drain_comments()
                .into_iter()
                .map(comment_statement)
                .collect();
            if self.reader.at(TokenKind::CloseBrace) || self.reader.at_end() {
                break;
            }
            let test = if self.reader.consume(TokenKind::CaseKeyword) {
                Some(self.parse_value()?)
            } else if self.reader.consume(TokenKind::DefaultKeyword) {
                None
            } else {
                return Err(self.reader.error(&messages::CASE_OR_DEFAULT_EXPECTED, &[]));
            };
            self.reader.expect(TokenKind::Colon)?;
            // The arm runs to the next case/default or the closing brace;
            // there is no explicit terminator, mirroring fallthrough.
            let mut body = leading;
            body.extend(self.parse_statements_until(&[
                TokenKind::CaseKeyword,
                TokenKind::DefaultKeyword,
                TokenKind::CloseBrace,
            ])?);
            cases.push(SwitchCase { test, body });
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(Statement::Switch(SwitchStatement { subject, cases }))
    }

    fn parse_try_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::TryKeyword)?;
        let block = self.parse_block()?;
        let catch = if self.reader.consume(TokenKind::CatchKeyword) {
            let binding = if self.reader.consume(TokenKind::OpenParen) {
                let name = self.expect_identifier()?;
                self.reader.expect(TokenKind::CloseParen)?;
                Some(name)
            } else {
                None
            };
            Some(CatchClause { binding, block: self.parse_block()? })
        } else {
            None
        };
        let finally = if self.reader.consume(TokenKind::FinallyKeyword) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if catch.is_none() && finally.is_none() {
            return Err(self.reader.error(&messages::TRY_WITHOUT_CATCH_OR_FINALLY, &[]));
        }
        Ok(Statement::Try(TryStatement { block, catch, finally }))
    }

    // ------------------------------------------------------------------------
    // Imports and exports
    // ------------------------------------------------------------------------

    fn parse_import_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::ImportKeyword)?;
        let clause = match self.reader.kind() {
            TokenKind::StringLiteral => {
                let specifier = self.expect_module_specifier()?;
                self.optional_semicolon();
                return Ok(Statement::Import(ImportStatement {
                    clause: ImportClause::SideEffect,
                    specifier,
                }));
            }
            TokenKind::Asterisk => {
                self.reader.bump();
                self.reader.expect(TokenKind::AsKeyword)?;
                let alias = self.expect_identifier()?;
                ImportClause::Namespace { alias }
            }
            _ => {
                let type_only = self.reader.at(TokenKind::TypeKeyword)
                    && matches!(
                        self.reader.peek(1).kind,
                        TokenKind::OpenBrace | TokenKind::Identifier
                    );
                if type_only {
                    self.reader.bump();
                }
                let default = if self.reader.at(TokenKind::Identifier) {
                    let name = self.reader.current().text.clone();
                    self.reader.bump();
                    self.reader.consume(TokenKind::Comma);
                    Some(name)
                } else {
                    None
                };
                let mut names = Vec::new();
                if self.reader.consume(TokenKind::OpenBrace) {
                    loop {
                        if self.reader.at(TokenKind::CloseBrace) {
                            break;
                        }
                        let name = self.expect_member_name()?;
                        let alias = if self.reader.consume(TokenKind::AsKeyword) {
                            Some(self.expect_identifier()?)
                        } else {
                            None
                        };
                        names.push(ImportSpecifier { name, alias });
                        if !self.reader.consume(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.reader.expect(TokenKind::CloseBrace)?;
                }
                ImportClause::Named { default, names, type_only }
            }
        };
        self.reader.expect(TokenKind::FromKeyword)?;
        let specifier = self.expect_module_specifier()?;
        self.optional_semicolon();
        Ok(Statement::Import(ImportStatement { clause, specifier }))
    }

    fn parse_export_statement(&mut self) -> Result<Statement> {
        self.reader.expect(TokenKind::ExportKeyword)?;
        if self.reader.consume(TokenKind::DefaultKeyword) {
            let declaration = match self.reader.kind() {
                TokenKind::FunctionKeyword
                | TokenKind::ClassKeyword
                | TokenKind::AsyncKeyword => self.parse_statement()?,
                _ => {
                    let value = self.parse_value()?;
                    self.optional_semicolon();
                    Statement::Expression(value)
                }
            };
            return Ok(Statement::Export(ExportStatement {
                declaration: Box::new(declaration),
                is_default: true,
            }));
        }
        let declaration = self.parse_statement()?;
        Ok(Statement::Export(ExportStatement {
            declaration: Box::new(declaration),
            is_default: false,
        }))
    }

    // ------------------------------------------------------------------------
    // Type-only declarations
    // ------------------------------------------------------------------------

    fn parse_interface_declaration(&mut self) -> Result<InterfaceDecl> {
        self.reader.expect(TokenKind::InterfaceKeyword)?;
        let name = self.expect_identifier()?;
        let type_parameters = self.parse_optional_type_parameters()?;
        let mut extends = Vec::new();
        if self.reader.consume(TokenKind::ExtendsKeyword) {
            loop {
                extends.push(self.parse_type()?);
                if !self.reader.consume(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.reader.expect(TokenKind::OpenBrace)?;
        let mut members = Vec::new();
        loop {
            // Comments inside the body stay queued and surface at the next
            // statement boundary.
            if self.reader.at(TokenKind::CloseBrace) || self.reader.at_end() {
                break;
            }
            members.push(self.parse_type_member()?);
            while self.reader.consume(TokenKind::Semicolon) || self.reader.consume(TokenKind::Comma) {}
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(InterfaceDecl { name, type_parameters, extends, members })
    }

    fn parse_enum_declaration(&mut self) -> Result<EnumDecl> {
        self.reader.expect(TokenKind::EnumKeyword)?;
        let name = self.expect_identifier()?;
        self.reader.expect(TokenKind::OpenBrace)?;
        let mut members = IndexMap::new();
        loop {
            if self.reader.at(TokenKind::CloseBrace) || self.reader.at_end() {
                break;
            }
            let member = self.expect_member_name()?;
            let initializer = if self.reader.consume(TokenKind::Equals) {
                Some(self.parse_value()?)
            } else {
                None
            };
            members.insert(member, initializer);
            if !self.reader.consume(TokenKind::Comma) {
                break;
            }
        }
        self.reader.expect(TokenKind::CloseBrace)?;
        Ok(EnumDecl { name, members })
    }

    fn parse_type_alias(&mut self) -> Result<TypeAliasDecl> {
        self.reader.expect(TokenKind::TypeKeyword)?;
        let name = self.expect_identifier()?;
        let type_parameters = self.parse_optional_type_parameters()?;
        self.reader.expect(TokenKind::Equals)?;
        let value = self.parse_type()?;
        self.optional_semicolon();
        Ok(TypeAliasDecl { name, type_parameters, value })
    }
}

/// A keyword in modifier position is really the member name when the next
/// token starts a signature or annotation.
fn keyword_is_member_name(kind: TokenKind, next: TokenKind) -> bool {
    kind.is_keyword()
        && matches!(
            next,
            TokenKind::OpenParen
                | TokenKind::Less
                | TokenKind::Colon
                | TokenKind::Equals
                | TokenKind::Question
                | TokenKind::Semicolon
        )
}

fn comment_node(token: Token) -> Comment {
    Comment {
        text: token.text,
        block: token.kind == TokenKind::BlockComment,
    }
}

fn comment_statement(token: Token) -> Statement {
    Statement::Comment(comment_node(token))
}
