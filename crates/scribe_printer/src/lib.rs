//! scribe_printer: AST back to source text.
//!
//! One printer, exhaustive over the node set. The settings object decides
//! the surface dialect (typed or untyped), the module format (esm or cjs),
//! minification, indentation, and comment policy. Type-only syntax renders
//! to nothing under the untyped dialect; enums desugar to frozen objects.

use scribe_ast::node::*;
use scribe_ast::ops::Operation;
use scribe_ast::types::FunctionFlags;
use scribe_diagnostics::{messages, CompileError, Result};
use scribe_options::{CommentPolicy, Dialect, EmitOptions, ModuleFormat};

/// Render a top-level statement list: statement separation, blank lines
/// around declarations, import grouping.
pub fn render_statements(statements: &[Statement], options: &EmitOptions) -> Result<String> {
    let mut pieces: Vec<(bool, bool, String)> = Vec::new();
    for statement in statements {
        let text = render_statement(statement, options)?;
        if text.is_empty() {
            continue;
        }
        pieces.push((is_import_like(statement), is_spacious(statement), text));
    }

    let mut out = String::new();
    let mut previous: Option<(bool, bool)> = None;
    for (is_import, spacious, text) in pieces {
        if let Some((prev_import, prev_spacious)) = previous {
            if !options.minify {
                out.push('\n');
                let import_group_ended = prev_import && !is_import;
                if prev_spacious || spacious || import_group_ended {
                    out.push('\n');
                }
            }
        }
        out.push_str(&text);
        previous = Some((is_import, spacious));
    }
    if !options.minify && !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

/// Render a single statement at column zero.
pub fn render_statement(statement: &Statement, options: &EmitOptions) -> Result<String> {
    let mut printer = Printer::new(options);
    printer.print_statement(statement)?;
    Ok(printer.finish())
}

/// Render a single value node.
pub fn render_value(value: &Value, options: &EmitOptions) -> Result<String> {
    let mut printer = Printer::new(options);
    printer.print_value(value)?;
    Ok(printer.finish())
}

fn is_import_like(statement: &Statement) -> bool {
    matches!(statement, Statement::Import(_))
}

fn is_spacious(statement: &Statement) -> bool {
    match statement {
        Statement::Function(_)
        | Statement::Class(_)
        | Statement::Interface(_)
        | Statement::Enum(_) => true,
        Statement::Export(export) => is_spacious(&export.declaration),
        _ => false,
    }
}

/// An arrow body of exactly one return statement renders concisely.
fn is_concise_body(body: &[Statement]) -> bool {
    matches!(body, [Statement::Return(Some(_))])
}

struct Printer<'o> {
    out: String,
    indent: usize,
    options: &'o EmitOptions,
}

impl<'o> Printer<'o> {
    fn new(options: &'o EmitOptions) -> Self {
        Self { out: String::new(), indent: 0, options }
    }

    fn finish(self) -> String {
        self.out
    }

    fn typed(&self) -> bool {
        self.options.dialect == Dialect::Typed
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Optional space, dropped when minifying.
    fn sp(&mut self) {
        if !self.options.minify {
            self.out.push(' ');
        }
    }

    fn newline(&mut self) {
        if !self.options.minify {
            self.out.push('\n');
        }
    }

    fn write_indent(&mut self) {
        if !self.options.minify {
            for _ in 0..self.indent {
                self.out.push_str(&self.options.indent_unit());
            }
        }
    }

    fn fragment(&self, f: impl FnOnce(&mut Printer) -> Result<()>) -> Result<String> {
        let mut child = Printer::new(self.options);
        child.indent = self.indent;
        f(&mut child)?;
        Ok(child.finish())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn print_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Empty => self.write(";"),
            Statement::Expression(value) => {
                self.print_value(value)?;
                self.write(";");
            }
            Statement::Variable(stmt) => self.print_variable_statement(stmt, true)?,
            Statement::Function(func) => self.print_function(func)?,
            Statement::Class(class) => self.print_class(class)?,
            Statement::If(stmt) => self.print_if(stmt)?,
            Statement::For(stmt) => self.print_for(stmt)?,
            Statement::While(stmt) => {
                self.write("while");
                self.sp();
                self.write("(");
                self.print_value(&stmt.condition)?;
                self.write(")");
                self.sp();
                self.print_block(&stmt.body)?;
            }
            Statement::DoWhile(stmt) => {
                self.write("do");
                self.sp();
                self.print_block(&stmt.body)?;
                self.sp();
                self.write("while");
                self.sp();
                self.write("(");
                self.print_value(&stmt.condition)?;
                self.write(");");
            }
            Statement::Switch(stmt) => self.print_switch(stmt)?,
            Statement::Try(stmt) => self.print_try(stmt)?,
            Statement::Throw(value) => {
                self.write("throw ");
                self.print_value(value)?;
                self.write(";");
            }
            Statement::Return(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.print_value(value)?;
                }
                self.write(";");
            }
            Statement::Break(label) => {
                self.write("break");
                if let Some(label) = label {
                    self.write(" ");
                    self.write(label);
                }
                self.write(";");
            }
            Statement::Continue(label) => {
                self.write("continue");
                if let Some(label) = label {
                    self.write(" ");
                    self.write(label);
                }
                self.write(";");
            }
            Statement::Import(stmt) => self.print_import(stmt)?,
            Statement::Export(stmt) => self.print_export(stmt)?,
            Statement::Interface(decl) => {
                if self.typed() {
                    self.print_interface(decl)?;
                }
            }
            Statement::Enum(decl) => self.print_enum(decl)?,
            Statement::TypeAlias(decl) => {
                if self.typed() {
                    self.print_type_alias(decl)?;
                }
            }
            Statement::Comment(comment) => self.print_comment(comment),
            Statement::Block(statements) => self.print_block(statements)?,
        }
        Ok(())
    }

    fn print_block(&mut self, statements: &[Statement]) -> Result<()> {
        self.write("{");
        let printable: Vec<&Statement> = statements.iter().collect();
        if !printable.is_empty() {
            self.indent += 1;
            let mut wrote_any = false;
            for statement in printable {
                let text = self.fragment(|p| p.print_statement(statement))?;
                if text.is_empty() {
                    continue;
                }
                self.newline();
                self.write_indent();
                self.write(&text);
                wrote_any = true;
            }
            self.indent -= 1;
            if wrote_any {
                self.newline();
                self.write_indent();
            }
        }
        self.write("}");
        Ok(())
    }

    fn print_variable_statement(&mut self, stmt: &VariableStatement, with_semicolon: bool) -> Result<()> {
        self.write(stmt.keyword.text());
        self.write(" ");
        let mut first = true;
        for decl in stmt.declarations.values() {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.print_declarator(decl)?;
        }
        if with_semicolon {
            self.write(";");
        }
        Ok(())
    }

    fn print_declarator(&mut self, decl: &VariableDecl) -> Result<()> {
        if decl.is_rest {
            self.write("...");
        }
        self.print_binding_target(&decl.target)?;
        if decl.is_optional && self.typed() {
            self.write("?");
        }
        if self.typed() {
            if let Some(annotation) = &decl.type_annotation {
                self.write(":");
                self.sp();
                self.print_type(annotation)?;
            }
        }
        if let Some(initializer) = &decl.initializer {
            self.sp();
            self.write("=");
            self.sp();
            self.print_value(initializer)?;
        }
        Ok(())
    }

    fn print_binding_target(&mut self, target: &BindingTarget) -> Result<()> {
        match target {
            BindingTarget::Name(name) => self.write(name),
            BindingTarget::ArrayPattern(slots) => {
                self.write("[");
                let mut first = true;
                for slot in slots {
                    if !first {
                        self.write(",");
                        self.sp();
                    }
                    first = false;
                    if let Some(element) = slot {
                        self.print_binding_element(element, None)?;
                    }
                }
                self.write("]");
            }
            BindingTarget::ObjectPattern(entries) => {
                self.write("{");
                self.sp();
                let mut first = true;
                for (key, element) in entries {
                    if !first {
                        self.write(",");
                        self.sp();
                    }
                    first = false;
                    self.print_binding_element(element, Some(key))?;
                }
                self.sp();
                self.write("}");
            }
        }
        Ok(())
    }

    fn print_binding_element(&mut self, element: &BindingElement, key: Option<&str>) -> Result<()> {
        if element.is_rest {
            self.write("...");
        }
        match key {
            Some(key) if key != element.name => {
                self.write(key);
                self.write(":");
                self.sp();
                self.write(&element.name);
            }
            Some(key) => self.write(key),
            None => self.write(&element.name),
        }
        if let Some(default) = &element.default {
            self.sp();
            self.write("=");
            self.sp();
            self.print_value(default)?;
        }
        Ok(())
    }

    fn print_if(&mut self, stmt: &IfStatement) -> Result<()> {
        self.write("if");
        self.sp();
        self.write("(");
        self.print_value(&stmt.condition)?;
        self.write(")");
        self.sp();
        self.print_block(&stmt.then_branch)?;
        if let Some(else_branch) = &stmt.else_branch {
            self.sp();
            self.write("else");
            match else_branch.as_ref() {
                Statement::If(nested) => {
                    self.write(" ");
                    self.print_if(nested)?;
                }
                Statement::Block(statements) => {
                    self.sp();
                    self.print_block(statements)?;
                }
                other => {
                    self.write(" ");
                    self.print_statement(other)?;
                }
            }
        }
        Ok(())
    }

    fn print_for(&mut self, stmt: &ForStatement) -> Result<()> {
        self.write("for");
        self.sp();
        self.write("(");
        match &stmt.head {
            ForHead::Classic { init, condition, update } => {
                if let Some(init) = init {
                    match init.as_ref() {
                        Statement::Variable(vs) => self.print_variable_statement(vs, false)?,
                        Statement::Expression(value) => self.print_value(value)?,
                        other => self.print_statement(other)?,
                    }
                }
                self.write(";");
                if let Some(condition) = condition {
                    self.sp();
                    self.print_value(condition)?;
                }
                self.write(";");
                if let Some(update) = update {
                    self.sp();
                    self.print_value(update)?;
                }
            }
            ForHead::Iterator { binding, kind, subject } => {
                if let Some(keyword) = binding.keyword {
                    self.write(keyword.text());
                    self.write(" ");
                }
                self.print_binding_target(&binding.target)?;
                self.write(" ");
                self.write(kind.text());
                self.write(" ");
                self.print_value(subject)?;
            }
        }
        self.write(")");
        self.sp();
        self.print_block(&stmt.body)?;
        Ok(())
    }

    fn print_switch(&mut self, stmt: &SwitchStatement) -> Result<()> {
        self.write("switch");
        self.sp();
        self.write("(");
        self.print_value(&stmt.subject)?;
        self.write(")");
        self.sp();
        self.write("{");
        self.indent += 1;
        for case in &stmt.cases {
            self.newline();
            self.write_indent();
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.print_value(test)?;
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.indent += 1;
            for inner in &case.body {
                let text = self.fragment(|p| p.print_statement(inner))?;
                if text.is_empty() {
                    continue;
                }
                self.newline();
                self.write_indent();
                self.write(&text);
            }
            self.indent -= 1;
        }
        self.indent -= 1;
        self.newline();
        self.write_indent();
        self.write("}");
        Ok(())
    }

    fn print_try(&mut self, stmt: &TryStatement) -> Result<()> {
        self.write("try");
        self.sp();
        self.print_block(&stmt.block)?;
        if let Some(catch) = &stmt.catch {
            self.sp();
            self.write("catch");
            self.sp();
            if let Some(binding) = &catch.binding {
                self.write("(");
                self.write(binding);
                self.write(")");
                self.sp();
            }
            self.print_block(&catch.block)?;
        }
        if let Some(finally) = &stmt.finally {
            self.sp();
            self.write("finally");
            self.sp();
            self.print_block(finally)?;
        }
        Ok(())
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn print_function(&mut self, func: &FunctionDecl) -> Result<()> {
        if func.is_arrow() {
            return self.print_arrow(func);
        }
        if func.flags.contains(FunctionFlags::ASYNC) {
            self.write("async ");
        }
        self.write("function");
        if func.flags.contains(FunctionFlags::GENERATOR) {
            self.write("*");
        }
        if let Some(name) = &func.name {
            self.write(" ");
            self.write(name);
        }
        self.print_signature(func)?;
        match &func.body {
            Some(body) => {
                self.sp();
                self.print_block(body)?;
            }
            None => self.write(";"),
        }
        Ok(())
    }

    fn print_arrow(&mut self, func: &FunctionDecl) -> Result<()> {
        if func.flags.contains(FunctionFlags::ASYNC) {
            self.write("async ");
        }
        let simple_single = func.parameters.len() == 1
            && matches!(func.parameters[0].target, BindingTarget::Name(_))
            && func.parameters[0].type_annotation.is_none()
            && func.parameters[0].initializer.is_none()
            && !func.parameters[0].is_rest;
        if simple_single {
            self.print_binding_target(&func.parameters[0].target)?;
        } else {
            self.write("(");
            self.print_parameters(&func.parameters)?;
            self.write(")");
        }
        self.sp();
        self.write("=>");
        self.sp();
        match &func.body {
            Some(body) if is_concise_body(body) => {
                if let Some(Statement::Return(Some(value))) = body.first() {
                    self.print_value(value)?;
                }
            }
            Some(body) => self.print_block(body)?,
            None => self.write("{}"),
        }
        Ok(())
    }

    fn print_signature(&mut self, func: &FunctionDecl) -> Result<()> {
        if self.typed() {
            self.print_type_parameters(&func.type_parameters)?;
        }
        self.write("(");
        self.print_parameters(&func.parameters)?;
        self.write(")");
        if self.typed() {
            if let Some(return_type) = &func.return_type {
                self.write(":");
                self.sp();
                self.print_type(return_type)?;
            }
        }
        Ok(())
    }

    fn print_parameters(&mut self, parameters: &[VariableDecl]) -> Result<()> {
        let mut first = true;
        for parameter in parameters {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.print_declarator(parameter)?;
        }
        Ok(())
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn print_class(&mut self, class: &ClassDecl) -> Result<()> {
        for decorator in &class.decorators {
            self.write("@");
            self.print_value(&decorator.expression)?;
            self.newline();
            self.write_indent();
            if self.options.minify {
                self.write(" ");
            }
        }
        if class.is_abstract && self.typed() {
            self.write("abstract ");
        }
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name);
        }
        if self.typed() {
            self.print_type_parameters(&class.type_parameters)?;
        }
        if let Some(extends) = &class.extends {
            self.write(" extends ");
            self.print_type(extends)?;
        }
        if self.typed() && !class.implements.is_empty() {
            self.write(" implements ");
            let mut first = true;
            for implemented in &class.implements {
                if !first {
                    self.write(",");
                    self.sp();
                }
                first = false;
                self.print_type(implemented)?;
            }
        }
        self.sp();
        self.write("{");
        self.indent += 1;
        let mut wrote_any = false;
        for member in class.members() {
            let text = self.fragment(|p| p.print_class_member(member))?;
            if text.is_empty() {
                continue;
            }
            // Re-lexability separator: a generator member starting with `*`
            // must not fuse with the previous member's closing brace.
            if self.options.minify && text.starts_with('*') && !self.out.ends_with(';') {
                self.write(";");
            }
            self.newline();
            self.write_indent();
            self.write(&text);
            wrote_any = true;
        }
        self.indent -= 1;
        if wrote_any {
            self.newline();
            self.write_indent();
        }
        self.write("}");
        Ok(())
    }

    fn print_class_member(&mut self, member: &ClassMember) -> Result<()> {
        if let MemberKind::Comment(comment) = &member.kind {
            self.print_comment(comment);
            return Ok(());
        }
        // Abstract members are type-only syntax.
        if member.modifiers.is_abstract && !self.typed() {
            return Ok(());
        }
        for decorator in &member.modifiers.decorators {
            self.write("@");
            self.print_value(&decorator.expression)?;
            self.newline();
            self.write_indent();
            if self.options.minify {
                self.write(" ");
            }
        }
        if self.typed() {
            if let Some(visibility) = member.modifiers.visibility {
                self.write(visibility.text());
                self.write(" ");
            }
        }
        if member.modifiers.is_static {
            self.write("static ");
        }
        if member.modifiers.is_abstract && self.typed() {
            self.write("abstract ");
        }
        if member.modifiers.is_readonly && self.typed() {
            self.write("readonly ");
        }
        match &member.kind {
            MemberKind::Field(decl) => {
                self.print_declarator(decl)?;
                self.write(";");
            }
            MemberKind::Method(func) => {
                if func.flags.contains(FunctionFlags::ASYNC) {
                    self.write("async ");
                }
                if func.flags.contains(FunctionFlags::GENERATOR) {
                    self.write("*");
                }
                if func.flags.contains(FunctionFlags::GETTER) {
                    self.write("get ");
                } else if func.flags.contains(FunctionFlags::SETTER) {
                    self.write("set ");
                }
                if let Some(name) = &func.name {
                    self.write(name);
                }
                self.print_signature(func)?;
                match &func.body {
                    Some(body) => {
                        self.sp();
                        self.print_block(body)?;
                    }
                    None => self.write(";"),
                }
            }
            MemberKind::Comment(_) => {}
        }
        Ok(())
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn format_specifier(&self, specifier: &str) -> String {
        let relative = specifier.starts_with("./") || specifier.starts_with("../");
        if !relative {
            return specifier.to_string();
        }
        let known = [".ts", ".js"];
        let stripped = known
            .iter()
            .find_map(|ext| specifier.strip_suffix(ext))
            .unwrap_or(specifier);
        if self.options.include_extensions_in_imports {
            format!("{}.{}", stripped, self.options.dialect.extension())
        } else {
            stripped.to_string()
        }
    }

    fn print_import(&mut self, stmt: &ImportStatement) -> Result<()> {
        let specifier = self.format_specifier(&stmt.specifier);
        match self.options.module_format {
            ModuleFormat::Esm => self.print_import_esm(stmt, &specifier),
            ModuleFormat::Cjs => self.print_import_cjs(stmt, &specifier),
        }
    }

    fn print_import_esm(&mut self, stmt: &ImportStatement, specifier: &str) -> Result<()> {
        match &stmt.clause {
            ImportClause::SideEffect => {
                self.write("import ");
                self.write_quoted(specifier);
                self.write(";");
            }
            ImportClause::Namespace { alias } => {
                self.write("import * as ");
                self.write(alias);
                self.write(" from ");
                self.write_quoted(specifier);
                self.write(";");
            }
            ImportClause::Named { default, names, type_only } => {
                if *type_only && !self.typed() {
                    return Ok(());
                }
                self.write("import ");
                if *type_only {
                    self.write("type ");
                }
                if let Some(default) = default {
                    self.write(default);
                    if !names.is_empty() {
                        self.write(",");
                        self.sp();
                    }
                }
                if !names.is_empty() {
                    self.write("{");
                    self.sp();
                    let mut first = true;
                    for name in names {
                        if !first {
                            self.write(",");
                            self.sp();
                        }
                        first = false;
                        self.write(&name.name);
                        if let Some(alias) = &name.alias {
                            self.write(" as ");
                            self.write(alias);
                        }
                    }
                    self.sp();
                    self.write("}");
                }
                self.write(" from ");
                self.write_quoted(specifier);
                self.write(";");
            }
        }
        Ok(())
    }

    /// CommonJS desugaring: imports become `require` call assignments.
    fn print_import_cjs(&mut self, stmt: &ImportStatement, specifier: &str) -> Result<()> {
        match &stmt.clause {
            ImportClause::SideEffect => {
                self.write("require(");
                self.write_quoted(specifier);
                self.write(");");
            }
            ImportClause::Namespace { alias } => {
                self.write("const ");
                self.write(alias);
                self.sp();
                self.write("=");
                self.sp();
                self.write("require(");
                self.write_quoted(specifier);
                self.write(");");
            }
            ImportClause::Named { default, names, type_only } => {
                // Type-only imports have no runtime form.
                if *type_only {
                    return Ok(());
                }
                let mut wrote = false;
                if let Some(default) = default {
                    self.write("const ");
                    self.write(default);
                    self.sp();
                    self.write("=");
                    self.sp();
                    self.write("require(");
                    self.write_quoted(specifier);
                    self.write(");");
                    wrote = true;
                }
                if !names.is_empty() {
                    if wrote {
                        self.newline();
                    }
                    self.write("const");
                    self.sp();
                    self.write("{");
                    self.sp();
                    let mut first = true;
                    for name in names {
                        if !first {
                            self.write(",");
                            self.sp();
                        }
                        first = false;
                        self.write(&name.name);
                        if let Some(alias) = &name.alias {
                            self.write(":");
                            self.sp();
                            self.write(alias);
                        }
                    }
                    self.sp();
                    self.write("}");
                    self.sp();
                    self.write("=");
                    self.sp();
                    self.write("require(");
                    self.write_quoted(specifier);
                    self.write(");");
                }
            }
        }
        Ok(())
    }

    fn print_export(&mut self, stmt: &ExportStatement) -> Result<()> {
        match self.options.module_format {
            ModuleFormat::Esm => {
                let inner = self.fragment(|p| p.print_statement(&stmt.declaration))?;
                if inner.is_empty() {
                    return Ok(());
                }
                self.write("export ");
                if stmt.is_default {
                    self.write("default ");
                }
                self.write(&inner);
                Ok(())
            }
            ModuleFormat::Cjs => self.print_export_cjs(stmt),
        }
    }

    /// CommonJS desugaring: the declaration renders first, followed by a
    /// `module.exports` assignment picked per declaration kind. Type-only
    /// declarations vanish entirely in this format.
    fn print_export_cjs(&mut self, stmt: &ExportStatement) -> Result<()> {
        match stmt.declaration.as_ref() {
            Statement::Interface(_) | Statement::TypeAlias(_) => {
                let inner = self.fragment(|p| p.print_statement(&stmt.declaration))?;
                self.write(&inner);
                Ok(())
            }
            Statement::Expression(value) if stmt.is_default => {
                self.write("module.exports");
                self.sp();
                self.write("=");
                self.sp();
                self.print_value(value)?;
                self.write(";");
                Ok(())
            }
            Statement::Function(_) | Statement::Class(_) | Statement::Enum(_) => {
                let name = stmt
                    .declaration
                    .declared_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        CompileError::semantic(
                            &messages::EXPORT_KIND_UNSUPPORTED_IN_MODULE_FORMAT,
                            &[self.options.module_format.name()],
                        )
                    })?;
                let inner = self.fragment(|p| p.print_statement(&stmt.declaration))?;
                self.write(&inner);
                self.newline();
                self.write_indent();
                if stmt.is_default {
                    self.write("module.exports");
                } else {
                    self.write("module.exports.");
                    self.write(&name);
                }
                self.sp();
                self.write("=");
                self.sp();
                self.write(&name);
                self.write(";");
                Ok(())
            }
            Statement::Variable(vs) => {
                let inner = self.fragment(|p| p.print_statement(&stmt.declaration))?;
                self.write(&inner);
                for name in vs.declarations.keys() {
                    self.newline();
                    self.write_indent();
                    self.write("module.exports.");
                    self.write(name);
                    self.sp();
                    self.write("=");
                    self.sp();
                    self.write(name);
                    self.write(";");
                }
                Ok(())
            }
            _ => Err(CompileError::semantic(
                &messages::EXPORT_KIND_UNSUPPORTED_IN_MODULE_FORMAT,
                &[self.options.module_format.name()],
            )),
        }
    }

    fn write_quoted(&mut self, text: &str) {
        self.write("\"");
        self.write(text);
        self.write("\"");
    }

    // ========================================================================
    // Type-only declarations
    // ========================================================================

    fn print_interface(&mut self, decl: &InterfaceDecl) -> Result<()> {
        self.write("interface ");
        self.write(&decl.name);
        self.print_type_parameters(&decl.type_parameters)?;
        if !decl.extends.is_empty() {
            self.write(" extends ");
            let mut first = true;
            for extended in &decl.extends {
                if !first {
                    self.write(",");
                    self.sp();
                }
                first = false;
                self.print_type(extended)?;
            }
        }
        self.sp();
        self.write("{");
        self.indent += 1;
        for member in &decl.members {
            self.newline();
            self.write_indent();
            self.print_type_member(member)?;
        }
        self.indent -= 1;
        if !decl.members.is_empty() {
            self.newline();
            self.write_indent();
        }
        self.write("}");
        Ok(())
    }

    fn print_type_member(&mut self, member: &TypeMember) -> Result<()> {
        if member.readonly {
            self.write("readonly ");
        }
        self.write(&member.name);
        if member.optional {
            self.write("?");
        }
        if let TypeRef::Function { parameters, return_type } = &member.value {
            self.write("(");
            self.print_type_params_list(parameters)?;
            self.write("):");
            self.sp();
            self.print_type(return_type)?;
        } else {
            self.write(":");
            self.sp();
            self.print_type(&member.value)?;
        }
        self.write(";");
        Ok(())
    }

    /// An enum renders natively under the typed dialect and desugars to a
    /// frozen plain object under the untyped dialect. Auto-numbering
    /// continues from the last explicit integer member.
    fn print_enum(&mut self, decl: &EnumDecl) -> Result<()> {
        if self.typed() {
            self.write("enum ");
            self.write(&decl.name);
            self.sp();
            self.write("{");
            self.indent += 1;
            for (name, initializer) in &decl.members {
                self.newline();
                self.write_indent();
                self.write(name);
                if let Some(initializer) = initializer {
                    self.sp();
                    self.write("=");
                    self.sp();
                    self.print_value(initializer)?;
                }
                self.write(",");
            }
            self.indent -= 1;
            if !decl.members.is_empty() {
                self.newline();
                self.write_indent();
            }
            self.write("}");
            return Ok(());
        }

        self.write("const ");
        self.write(&decl.name);
        self.sp();
        self.write("=");
        self.sp();
        self.write("Object.freeze({");
        self.sp();
        let mut counter: i64 = 0;
        let mut first = true;
        for (name, initializer) in &decl.members {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.write(name);
            self.write(":");
            self.sp();
            match initializer {
                Some(value) => {
                    self.print_value(value)?;
                    if let Value::Literal(Literal::Number(text)) = value {
                        if let Ok(parsed) = text.parse::<i64>() {
                            counter = parsed + 1;
                        }
                    }
                }
                None => {
                    self.write(&counter.to_string());
                    counter += 1;
                }
            }
        }
        self.sp();
        self.write("});");
        Ok(())
    }

    fn print_type_alias(&mut self, decl: &TypeAliasDecl) -> Result<()> {
        self.write("type ");
        self.write(&decl.name);
        self.print_type_parameters(&decl.type_parameters)?;
        self.sp();
        self.write("=");
        self.sp();
        self.print_type(&decl.value)?;
        self.write(";");
        Ok(())
    }

    fn print_type_parameters(&mut self, parameters: &[TypeParameter]) -> Result<()> {
        if parameters.is_empty() {
            return Ok(());
        }
        self.write("<");
        let mut first = true;
        for parameter in parameters {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.write(&parameter.name);
            if let Some(constraint) = &parameter.constraint {
                self.write(" extends ");
                self.print_type(constraint)?;
            }
            if let Some(default) = &parameter.default {
                self.sp();
                self.write("=");
                self.sp();
                self.print_type(default)?;
            }
        }
        self.write(">");
        Ok(())
    }

    fn print_type(&mut self, ty: &TypeRef) -> Result<()> {
        match ty {
            TypeRef::Named { name, type_arguments } => {
                self.write(name);
                if !type_arguments.is_empty() {
                    self.write("<");
                    let mut first = true;
                    for argument in type_arguments {
                        if !first {
                            self.write(",");
                            self.sp();
                        }
                        first = false;
                        self.print_type(argument)?;
                    }
                    self.write(">");
                }
            }
            TypeRef::Function { parameters, return_type } => {
                self.write("(");
                self.print_type_params_list(parameters)?;
                self.write(")");
                self.sp();
                self.write("=>");
                self.sp();
                self.print_type(return_type)?;
            }
            TypeRef::Object(members) => {
                self.write("{");
                self.sp();
                let mut first = true;
                for member in members {
                    if !first {
                        self.sp();
                    }
                    first = false;
                    self.print_type_member(member)?;
                }
                self.sp();
                self.write("}");
            }
            TypeRef::Mapped { key_name, key_source, value } => {
                self.write("{");
                self.sp();
                self.write("[");
                self.write(key_name);
                self.write(" in ");
                self.print_type(key_source)?;
                self.write("]:");
                self.sp();
                self.print_type(value)?;
                self.sp();
                self.write("}");
            }
            TypeRef::Tuple(elements) => {
                self.write("[");
                let mut first = true;
                for element in elements {
                    if !first {
                        self.write(",");
                        self.sp();
                    }
                    first = false;
                    self.print_type(element)?;
                }
                self.write("]");
            }
            TypeRef::Union(parts) => {
                let mut first = true;
                for part in parts {
                    if !first {
                        self.sp();
                        self.write("|");
                        self.sp();
                    }
                    first = false;
                    self.print_type(part)?;
                }
            }
            TypeRef::Array(inner) => {
                let needs_group = matches!(inner.as_ref(), TypeRef::Union(_) | TypeRef::Function { .. });
                if needs_group {
                    self.write("(");
                }
                self.print_type(inner)?;
                if needs_group {
                    self.write(")");
                }
                self.write("[]");
            }
            TypeRef::KeyOf(inner) => {
                self.write("keyof ");
                self.print_type(inner)?;
            }
            TypeRef::TypeOf(name) => {
                self.write("typeof ");
                self.write(name);
            }
            TypeRef::Literal(literal) => self.print_literal(literal),
        }
        Ok(())
    }

    fn print_type_params_list(&mut self, parameters: &[TypeSignatureParam]) -> Result<()> {
        let mut first = true;
        for parameter in parameters {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.write(&parameter.name);
            if parameter.optional {
                self.write("?");
            }
            if let Some(ty) = &parameter.type_ref {
                self.write(":");
                self.sp();
                self.print_type(ty)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn print_comment(&mut self, comment: &Comment) {
        let keep = match self.options.comments {
            CommentPolicy::All => true,
            CommentPolicy::DocstringOnly => comment.is_docstring(),
            CommentPolicy::InfoOnly => comment.is_info(),
            CommentPolicy::None => false,
        };
        if !keep {
            return;
        }
        if comment.block {
            if comment.text.starts_with('*') {
                self.write("/*");
                self.write(&comment.text);
                self.write(" */");
            } else {
                self.write("/* ");
                self.write(&comment.text);
                self.write(" */");
            }
        } else if comment.text.starts_with('!') {
            self.write("//");
            self.write(&comment.text);
        } else {
            self.write("// ");
            self.write(&comment.text);
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn print_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Number(text) | Literal::BigInt(text) => self.write(text),
            Literal::String { text, quote } => {
                let quote = quote.to_string();
                self.write(&quote);
                self.write(text);
                self.write(&quote);
            }
            Literal::Boolean(true) => self.write("true"),
            Literal::Boolean(false) => self.write("false"),
            Literal::Null => self.write("null"),
            Literal::Undefined => self.write("undefined"),
            Literal::This => self.write("this"),
            Literal::Super => self.write("super"),
        }
    }

    fn print_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Literal(literal) => {
                self.print_literal(literal);
                Ok(())
            }
            Value::Reference(reference) => {
                let path = reference.path()?;
                self.write(&path.join("."));
                Ok(())
            }
            Value::Expression(expr) => self.print_expression(expr),
            Value::Conditional(cond) => {
                self.print_value(&cond.condition)?;
                self.sp();
                self.write("?");
                self.sp();
                self.print_value(&cond.when_true)?;
                self.sp();
                self.write(":");
                self.sp();
                self.print_value(&cond.when_false)?;
                Ok(())
            }
            Value::ArgumentList(items) => {
                let mut first = true;
                for item in items {
                    if !first {
                        self.write(",");
                        self.sp();
                    }
                    first = false;
                    self.print_value(item)?;
                }
                Ok(())
            }
            Value::Array(slots) => {
                self.write("[");
                let mut first = true;
                for slot in slots {
                    if !first {
                        self.write(",");
                        self.sp();
                    }
                    first = false;
                    if let Some(item) = slot {
                        self.print_value(item)?;
                    }
                }
                self.write("]");
                Ok(())
            }
            Value::Object(object) => self.print_object(object),
            Value::Template(template) => {
                self.write("`");
                for part in &template.parts {
                    match part {
                        TemplatePart::Text(text) => self.write(text),
                        TemplatePart::Expression(value) => {
                            self.write("${");
                            self.print_value(value)?;
                            self.write("}");
                        }
                    }
                }
                self.write("`");
                Ok(())
            }
            Value::Regex(regex) => {
                self.write(&regex.text);
                Ok(())
            }
            Value::Group(inner) => {
                // A cast group is pointless once the cast itself vanishes.
                if !self.typed() {
                    if let Value::Cast(cast) = inner.as_ref() {
                        return self.print_value(&cast.value);
                    }
                }
                self.write("(");
                self.print_value(inner)?;
                self.write(")");
                Ok(())
            }
            Value::Cast(cast) => {
                self.print_value(&cast.value)?;
                if self.typed() {
                    self.write(" as ");
                    self.print_type(&cast.target)?;
                }
                Ok(())
            }
            Value::Function(func) => self.print_function(func),
            Value::Class(class) => self.print_class(class),
        }
    }

    fn print_object(&mut self, object: &ObjectLiteral) -> Result<()> {
        if object.properties.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.sp();
        let mut first = true;
        for property in &object.properties {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            match property {
                ObjectProperty::Entry { key, value } => {
                    match key {
                        PropertyKey::Identifier(name) => self.write(name),
                        PropertyKey::String { text, quote } => {
                            let quote = quote.to_string();
                            self.write(&quote);
                            self.write(text);
                            self.write(&quote);
                        }
                        PropertyKey::Number(text) => self.write(text),
                        PropertyKey::Computed(inner) => {
                            self.write("[");
                            self.print_value(inner)?;
                            self.write("]");
                        }
                    }
                    self.write(":");
                    self.sp();
                    self.print_value(value)?;
                }
                ObjectProperty::Shorthand(name) => self.write(name),
                ObjectProperty::Spread(inner) => {
                    self.write("...");
                    self.print_value(inner)?;
                }
                ObjectProperty::Method(func) => {
                    if func.flags.contains(FunctionFlags::ASYNC) {
                        self.write("async ");
                    }
                    if func.flags.contains(FunctionFlags::GENERATOR) {
                        self.write("*");
                    }
                    if func.flags.contains(FunctionFlags::GETTER) {
                        self.write("get ");
                    } else if func.flags.contains(FunctionFlags::SETTER) {
                        self.write("set ");
                    }
                    if let Some(name) = &func.name {
                        self.write(name);
                    }
                    self.print_signature(func)?;
                    if let Some(body) = &func.body {
                        self.sp();
                        self.print_block(body)?;
                    }
                }
            }
        }
        self.sp();
        self.write("}");
        Ok(())
    }

    fn print_expression(&mut self, expr: &Expression) -> Result<()> {
        match expr.operation {
            Operation::Access => {
                self.print_value(&expr.lhs)?;
                self.write(".");
                self.print_rhs(expr)?;
                Ok(())
            }
            Operation::OptionalAccess => {
                self.print_value(&expr.lhs)?;
                self.write("?.");
                self.print_rhs(expr)?;
                Ok(())
            }
            Operation::Index => {
                self.print_value(&expr.lhs)?;
                self.write("[");
                self.print_rhs(expr)?;
                self.write("]");
                Ok(())
            }
            Operation::OptionalIndex => {
                self.print_value(&expr.lhs)?;
                self.write("?.[");
                self.print_rhs(expr)?;
                self.write("]");
                Ok(())
            }
            Operation::Call | Operation::OptionalCall => {
                self.print_value(&expr.lhs)?;
                if expr.operation == Operation::OptionalCall {
                    self.write("?.");
                }
                self.print_call_type_arguments(expr)?;
                self.print_call_arguments(expr)?;
                Ok(())
            }
            Operation::Initialize => {
                self.write("new ");
                self.print_value(&expr.lhs)?;
                self.print_call_type_arguments(expr)?;
                self.print_call_arguments(expr)?;
                Ok(())
            }
            Operation::PostIncrement | Operation::PostDecrement => {
                self.print_value(&expr.lhs)?;
                self.write(if expr.operation == Operation::PostIncrement { "++" } else { "--" });
                Ok(())
            }
            operation if expr.rhs.is_none() => {
                // Prefix unary: the operand lives in lhs.
                let text = operation.text().ok_or_else(|| {
                    CompileError::semantic(
                        &messages::OPERATION_HAS_NO_TEXTUAL_FORM,
                        &[&format!("{:?}", operation)],
                    )
                })?;
                self.write(text);
                if operation.is_word() {
                    self.write(" ");
                }
                self.print_value(&expr.lhs)
            }
            operation => {
                let text = operation.text().ok_or_else(|| {
                    CompileError::semantic(
                        &messages::OPERATION_HAS_NO_TEXTUAL_FORM,
                        &[&format!("{:?}", operation)],
                    )
                })?;
                self.print_value(&expr.lhs)?;
                // Word operators keep their spaces even when minifying;
                // fusing them with operands would not re-lex.
                if operation.is_word() {
                    self.write(" ");
                    self.write(text);
                    self.write(" ");
                } else {
                    self.sp();
                    self.write(text);
                    self.sp();
                }
                self.print_rhs(expr)
            }
        }
    }

    fn print_rhs(&mut self, expr: &Expression) -> Result<()> {
        match expr.rhs.as_deref() {
            Some(value) => self.print_value(value),
            None => Err(CompileError::semantic(
                &messages::OPERATION_HAS_NO_TEXTUAL_FORM,
                &[&format!("{:?}", expr.operation)],
            )),
        }
    }

    fn print_call_type_arguments(&mut self, expr: &Expression) -> Result<()> {
        if !self.typed() || expr.type_arguments.is_empty() {
            return Ok(());
        }
        self.write("<");
        let mut first = true;
        for argument in &expr.type_arguments {
            if !first {
                self.write(",");
                self.sp();
            }
            first = false;
            self.print_type(argument)?;
        }
        self.write(">");
        Ok(())
    }

    /// Argument lists that overflow the print width reflow to one argument
    /// per line (never when minifying).
    fn print_call_arguments(&mut self, expr: &Expression) -> Result<()> {
        let arguments = match expr.rhs.as_deref() {
            Some(Value::ArgumentList(arguments)) => arguments,
            Some(other) => {
                self.write("(");
                self.print_value(other)?;
                self.write(")");
                return Ok(());
            }
            None => {
                self.write("()");
                return Ok(());
            }
        };
        let mut rendered = Vec::with_capacity(arguments.len());
        for argument in arguments {
            rendered.push(self.fragment(|p| p.print_value(argument))?);
        }
        let separator = if self.options.minify { "," } else { ", " };
        let single = rendered.join(separator);
        if self.options.minify || single.len() <= self.options.print_width {
            self.write("(");
            self.write(&single);
            self.write(")");
            return Ok(());
        }
        self.write("(");
        self.indent += 1;
        let count = rendered.len();
        for (index, argument) in rendered.iter().enumerate() {
            self.newline();
            self.write_indent();
            self.write(argument);
            if index + 1 < count {
                self.write(",");
            }
        }
        self.indent -= 1;
        self.newline();
        self.write_indent();
        self.write(")");
        Ok(())
    }
}
