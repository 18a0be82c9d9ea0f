//! The AST node set.
//!
//! Two families: value nodes (everything that can appear in expression
//! position) and statement nodes. A module owns its statements, statements
//! own their sub-expressions and nested blocks. All nodes are `Clone`
//! (deep structural copy) and `PartialEq` (structural equality).

use crate::ops::Operation;
use crate::types::{DeclarationKeyword, FunctionFlags, Visibility};
use indexmap::IndexMap;
use scribe_diagnostics::{messages, CompileError, Result};

/// Upper bound on reference-chain walks. A well-formed chain is a few links
/// deep; hitting the bound means the parent links form a cycle.
pub const MAX_REFERENCE_DEPTH: usize = 1024;

// ============================================================================
// Value nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal(Literal),
    Reference(Reference),
    Expression(Expression),
    Conditional(Conditional),
    /// Only ever appears as the rhs of a Call/OptionalCall/Initialize
    /// expression.
    ArgumentList(Vec<Value>),
    /// Array literal; `None` entries are elided slots (`[1, , 2]`).
    Array(Vec<Option<Value>>),
    Object(ObjectLiteral),
    Template(TemplateLiteral),
    Regex(RegexLiteral),
    /// Parenthesized sub-expression.
    Group(Box<Value>),
    /// `expr as Type`. Vanishes (along with its grouping) in untyped output.
    Cast(Cast),
    Function(Box<FunctionDecl>),
    Class(Box<ClassDecl>),
}

impl Value {
    /// Swap this node's contents in place, returning the old contents.
    /// External handles to the node's identity keep pointing at the new
    /// contents.
    pub fn replace_with(&mut self, new: Value) -> Value {
        std::mem::replace(self, new)
    }

    pub fn reference(name: impl Into<String>) -> Value {
        Value::Reference(Reference::new(name))
    }

    pub fn string(text: impl Into<String>) -> Value {
        Value::Literal(Literal::String { text: text.into(), quote: '"' })
    }

    pub fn number(text: impl Into<String>) -> Value {
        Value::Literal(Literal::Number(text.into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal, kept as written (`0xff`, `1_000`, `.5`, ...).
    Number(String),
    BigInt(String),
    /// Raw inner text (escapes preserved) plus the quote character.
    String { text: String, quote: char },
    Boolean(bool),
    Null,
    Undefined,
    This,
    Super,
}

/// A link in a member-access chain. `parent` points *toward the root* of
/// the chain: in `a.b.c`, the node for `c` links to `b`, which links to
/// `a`. Rendering walks parent-before-self.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub parent: Option<Box<Reference>>,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), parent: None }
    }

    pub fn with_parent(name: impl Into<String>, parent: Reference) -> Self {
        Self { name: name.into(), parent: Some(Box::new(parent)) }
    }

    /// Build a chain from a dotted path: `"a.b.c"` becomes c -> b -> a.
    pub fn from_path(path: &str) -> Self {
        let mut iter = path.split('.');
        let mut chain = Reference::new(iter.next().unwrap_or_default());
        for segment in iter {
            chain = Reference::with_parent(segment, chain);
        }
        chain
    }

    /// Segment names root-first. Errors if the chain exceeds the depth
    /// bound (the parent links then almost certainly form a cycle).
    pub fn path(&self) -> Result<Vec<&str>> {
        let mut segments = Vec::new();
        let mut cursor = Some(self);
        while let Some(node) = cursor {
            if segments.len() >= MAX_REFERENCE_DEPTH {
                return Err(CompileError::semantic(&messages::REFERENCE_CHAIN_TOO_DEEP, &[]));
            }
            segments.push(node.name.as_str());
            cursor = node.parent.as_deref();
        }
        segments.reverse();
        Ok(segments)
    }

    /// The root of the chain (`a` in `a.b.c`).
    pub fn root(&self) -> Result<&Reference> {
        let mut cursor = self;
        let mut depth = 0usize;
        while let Some(parent) = cursor.parent.as_deref() {
            depth += 1;
            if depth >= MAX_REFERENCE_DEPTH {
                return Err(CompileError::semantic(&messages::REFERENCE_CHAIN_TOO_DEEP, &[]));
            }
            cursor = parent;
        }
        Ok(cursor)
    }

    /// Mutable access to the chain root, for alias rewriting.
    pub fn root_mut(&mut self) -> Result<&mut Reference> {
        // Bound the walk first so the mutable traversal below cannot loop.
        let mut depth = 0usize;
        {
            let mut cursor = &*self;
            while let Some(parent) = cursor.parent.as_deref() {
                depth += 1;
                if depth >= MAX_REFERENCE_DEPTH {
                    return Err(CompileError::semantic(&messages::REFERENCE_CHAIN_TOO_DEEP, &[]));
                }
                cursor = parent;
            }
        }
        let mut cursor = self;
        for _ in 0..depth {
            cursor = match cursor.parent.as_deref_mut() {
                Some(parent) => parent,
                None => return Err(CompileError::semantic(&messages::REFERENCE_CHAIN_TOO_DEEP, &[])),
            };
        }
        Ok(cursor)
    }

    /// The dotted path text, root-first.
    pub fn path_text(&self) -> Result<String> {
        Ok(self.path()?.join("."))
    }

    /// Whether this chain starts with the given prefix chain (compared
    /// root-first).
    pub fn starts_with(&self, prefix: &Reference) -> Result<bool> {
        let own = self.path()?;
        let pre = prefix.path()?;
        Ok(own.len() >= pre.len() && own[..pre.len()] == pre[..])
    }
}

/// The general expression node: lhs, operation, optional rhs. Unary
/// operations leave `rhs` empty; chain calls carry an argument list there.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub lhs: Box<Value>,
    pub operation: Operation,
    pub rhs: Option<Box<Value>>,
    /// Generic arguments on a Call/Initialize (`f<T>(x)`, `new Map<K, V>()`).
    /// Emitted only under the typed dialect.
    pub type_arguments: Vec<TypeRef>,
}

impl Expression {
    /// Construct an expression. A Call/OptionalCall/Initialize whose rhs is
    /// a bare value (not already an argument list) is wrapped in a
    /// one-element argument list.
    pub fn new(lhs: Value, operation: Operation, rhs: Option<Value>) -> Self {
        let rhs = match (operation, rhs) {
            (
                Operation::Call | Operation::OptionalCall | Operation::Initialize,
                Some(value),
            ) => Some(match value {
                list @ Value::ArgumentList(_) => list,
                bare => Value::ArgumentList(vec![bare]),
            }),
            (_, other) => other,
        };
        Self {
            lhs: Box::new(lhs),
            operation,
            rhs: rhs.map(Box::new),
            type_arguments: Vec::new(),
        }
    }

    pub fn binary(lhs: Value, operation: Operation, rhs: Value) -> Self {
        Self::new(lhs, operation, Some(rhs))
    }

    pub fn unary(operation: Operation, operand: Value) -> Self {
        Self::new(operand, operation, None)
    }

    /// Call arguments, when this is a call-like expression.
    pub fn arguments(&self) -> Option<&[Value]> {
        match self.rhs.as_deref() {
            Some(Value::ArgumentList(args)) => Some(args),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Box<Value>,
    pub when_true: Box<Value>,
    pub when_false: Box<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectLiteral {
    pub properties: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    Entry { key: PropertyKey, value: Value },
    Shorthand(String),
    Spread(Value),
    Method(FunctionDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    String { text: String, quote: char },
    Number(String),
    Computed(Box<Value>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateLiteral {
    pub parts: Vec<TemplatePart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Expression(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegexLiteral {
    /// Full `/pattern/flags` text as written.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub value: Box<Value>,
    pub target: TypeRef,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Value),
    Variable(VariableStatement),
    Function(FunctionDecl),
    Class(ClassDecl),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Switch(SwitchStatement),
    Try(TryStatement),
    Throw(Value),
    Return(Option<Value>),
    Break(Option<String>),
    Continue(Option<String>),
    Import(ImportStatement),
    Export(ExportStatement),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    TypeAlias(TypeAliasDecl),
    Comment(Comment),
    Block(Vec<Statement>),
    Empty,
}

impl Statement {
    /// The declared name, for statements that bind one at the top level.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Statement::Variable(v) => v.declarations.keys().next().map(String::as_str),
            Statement::Function(f) => f.name.as_deref(),
            Statement::Class(c) => c.name.as_deref(),
            Statement::Interface(i) => Some(&i.name),
            Statement::Enum(e) => Some(&e.name),
            Statement::TypeAlias(t) => Some(&t.name),
            Statement::Export(e) => e.declaration.declared_name(),
            _ => None,
        }
    }
}

/// One `const`/`let`/`var` statement. Comma-separated declarators collapse
/// into a single name-keyed map; iteration order is declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    pub keyword: DeclarationKeyword,
    pub declarations: IndexMap<String, VariableDecl>,
}

impl VariableStatement {
    pub fn single(keyword: DeclarationKeyword, decl: VariableDecl) -> Self {
        let mut declarations = IndexMap::new();
        declarations.insert(decl.primary_name().to_string(), decl);
        Self { keyword, declarations }
    }
}

/// A single declarator. Also models parameters and class fields, where the
/// keyword is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub keyword: Option<DeclarationKeyword>,
    pub target: BindingTarget,
    pub type_annotation: Option<TypeRef>,
    pub initializer: Option<Value>,
    /// Rest parameter / rest element (`...args`).
    pub is_rest: bool,
    /// Optional parameter or field (`x?: T`).
    pub is_optional: bool,
}

impl VariableDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            keyword: None,
            target: BindingTarget::Name(name.into()),
            type_annotation: None,
            initializer: None,
            is_rest: false,
            is_optional: false,
        }
    }

    /// The first bound name; keys the declaration map of the statement.
    pub fn primary_name(&self) -> &str {
        match &self.target {
            BindingTarget::Name(name) => name,
            BindingTarget::ArrayPattern(slots) => slots
                .iter()
                .flatten()
                .next()
                .map(|e| e.name.as_str())
                .unwrap_or(""),
            BindingTarget::ObjectPattern(entries) => entries
                .values()
                .next()
                .map(|e| e.name.as_str())
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingTarget {
    Name(String),
    /// Positional slots `0..n`; `None` is an elided slot (`[, x]`).
    ArrayPattern(Vec<Option<BindingElement>>),
    /// Keyed by property name; the element's `name` is the local binding
    /// (differs from the key when aliased, `{ key: alias }`).
    ObjectPattern(IndexMap<String, BindingElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingElement {
    pub name: String,
    pub default: Option<Value>,
    pub is_rest: bool,
}

impl BindingElement {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), default: None, is_rest: false }
    }
}

// ============================================================================
// Functions and classes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub flags: FunctionFlags,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<VariableDecl>,
    pub return_type: Option<TypeRef>,
    /// `None` for abstract members and overload signatures.
    pub body: Option<Vec<Statement>>,
}

impl FunctionDecl {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            flags: FunctionFlags::empty(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            body: Some(Vec::new()),
        }
    }

    pub fn is_arrow(&self) -> bool {
        self.flags.contains(FunctionFlags::ARROW)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub expression: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeRef>,
    pub default: Option<TypeRef>,
}

/// Modifiers accumulated in front of a class member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberModifiers {
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub decorators: Vec<Decorator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub modifiers: MemberModifiers,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Field(VariableDecl),
    Method(FunctionDecl),
    Comment(Comment),
}

impl ClassMember {
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Field(decl) => Some(decl.primary_name()),
            MemberKind::Method(func) => func.name.as_deref(),
            MemberKind::Comment(_) => None,
        }
    }
}

/// A class declaration (or expression). Members live in one ordered list;
/// the lookup maps index into it and are rebuilt on every structural
/// mutation so the two views cannot diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub decorators: Vec<Decorator>,
    pub is_abstract: bool,
    members: Vec<ClassMember>,
    fields: IndexMap<String, usize>,
    static_fields: IndexMap<String, usize>,
    methods: IndexMap<String, usize>,
    static_methods: IndexMap<String, usize>,
    getters: IndexMap<String, usize>,
    setters: IndexMap<String, usize>,
}

impl ClassDecl {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            decorators: Vec::new(),
            is_abstract: false,
            members: Vec::new(),
            fields: IndexMap::new(),
            static_fields: IndexMap::new(),
            methods: IndexMap::new(),
            static_methods: IndexMap::new(),
            getters: IndexMap::new(),
            setters: IndexMap::new(),
        }
    }

    /// Append a member, classifying it into the lookup maps immediately.
    pub fn add_member(&mut self, member: ClassMember) {
        let index = self.members.len();
        self.classify(&member, index);
        self.members.push(member);
    }

    fn classify(&mut self, member: &ClassMember, index: usize) {
        let Some(name) = member.name().map(str::to_string) else {
            return;
        };
        match &member.kind {
            MemberKind::Field(_) => {
                if member.modifiers.is_static {
                    self.static_fields.insert(name, index);
                } else {
                    self.fields.insert(name, index);
                }
            }
            MemberKind::Method(func) => {
                if func.flags.contains(FunctionFlags::GETTER) {
                    self.getters.insert(name, index);
                } else if func.flags.contains(FunctionFlags::SETTER) {
                    self.setters.insert(name, index);
                } else if member.modifiers.is_static {
                    self.static_methods.insert(name, index);
                } else {
                    self.methods.insert(name, index);
                }
            }
            MemberKind::Comment(_) => {}
        }
    }

    /// Rebuild every lookup map from the member list.
    pub fn reindex(&mut self) {
        self.fields.clear();
        self.static_fields.clear();
        self.methods.clear();
        self.static_methods.clear();
        self.getters.clear();
        self.setters.clear();
        let members = std::mem::take(&mut self.members);
        for (index, member) in members.iter().enumerate() {
            let snapshot = member.clone();
            self.classify(&snapshot, index);
        }
        self.members = members;
    }

    pub fn members(&self) -> &[ClassMember] {
        &self.members
    }

    /// Mutate every member in place, then rebuild the lookup maps.
    pub fn for_each_member_mut(&mut self, mut f: impl FnMut(&mut ClassMember)) {
        for member in &mut self.members {
            f(member);
        }
        self.reindex();
    }

    fn lookup(&self, map: &IndexMap<String, usize>, name: &str) -> Result<Option<&ClassMember>> {
        let Some(&index) = map.get(name) else {
            return Ok(None);
        };
        let member = &self.members[index];
        if member.name() != Some(name) {
            return Err(CompileError::semantic(&messages::CLASS_MEMBER_INDEX_DIVERGED, &[name]));
        }
        Ok(Some(member))
    }

    pub fn field(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.fields, name)
    }

    pub fn static_field(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.static_fields, name)
    }

    pub fn method(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.methods, name)
    }

    pub fn static_method(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.static_methods, name)
    }

    pub fn getter(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.getters, name)
    }

    pub fn setter(&self, name: &str) -> Result<Option<&ClassMember>> {
        self.lookup(&self.setters, name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

// ============================================================================
// Control flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Value,
    pub then_branch: Vec<Statement>,
    /// `Statement::If` for an `else if` chain, `Statement::Block` otherwise.
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub head: ForHead,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForHead {
    Classic {
        init: Option<Box<Statement>>,
        condition: Option<Value>,
        update: Option<Value>,
    },
    Iterator {
        binding: VariableDecl,
        kind: IterationKind,
        subject: Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationKind {
    In,
    Of,
}

impl IterationKind {
    pub fn text(self) -> &'static str {
        match self {
            IterationKind::In => "in",
            IterationKind::Of => "of",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Value,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub body: Vec<Statement>,
    pub condition: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub subject: Value,
    pub cases: Vec<SwitchCase>,
}

/// One arm; `test` is `None` for `default`. The body runs to the next
/// `case`/`default`/closing brace, mirroring fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Value>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub block: Vec<Statement>,
    pub catch: Option<CatchClause>,
    pub finally: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub binding: Option<String>,
    pub block: Vec<Statement>,
}

// ============================================================================
// Imports and exports
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub clause: ImportClause,
    /// Module path as written, without quotes.
    pub specifier: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportClause {
    /// `import * as alias from "m"`
    Namespace { alias: String },
    /// `import "m"`
    SideEffect,
    /// `import def, { a, b as c } from "m"`; `type_only` marks
    /// `import type { ... }`.
    Named {
        default: Option<String>,
        names: Vec<ImportSpecifier>,
        type_only: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportSpecifier {
    /// The name this import binds locally.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// An export wrapper around a declaration; `export default <expr>` wraps an
/// expression statement with `is_default`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportStatement {
    pub declaration: Box<Statement>,
    pub is_default: bool,
}

// ============================================================================
// Type-only declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A (possibly dotted) type name with optional generic arguments.
    Named { name: String, type_arguments: Vec<TypeRef> },
    Function { parameters: Vec<TypeSignatureParam>, return_type: Box<TypeRef> },
    /// `{ a: T; b?: U }`
    Object(Vec<TypeMember>),
    /// `{ [K in Source]: V }`
    Mapped { key_name: String, key_source: Box<TypeRef>, value: Box<TypeRef> },
    Tuple(Vec<TypeRef>),
    Union(Vec<TypeRef>),
    /// `T[]`
    Array(Box<TypeRef>),
    KeyOf(Box<TypeRef>),
    /// `typeof x`
    TypeOf(String),
    /// `"literal"` / `42` / `true` in type position.
    Literal(Literal),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named { name: name.into(), type_arguments: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSignatureParam {
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    pub name: String,
    pub optional: bool,
    pub readonly: bool,
    pub value: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<TypeRef>,
    pub members: Vec<TypeMember>,
}

/// Renders as a native enum under the typed dialect and desugars to a
/// frozen plain object under the untyped dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    /// Member name to explicit initializer; `None` auto-numbers.
    pub members: IndexMap<String, Option<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub value: TypeRef,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Captured text with surrounding whitespace trimmed, markers excluded.
    pub text: String,
    pub block: bool,
}

impl Comment {
    pub fn line(text: impl Into<String>) -> Self {
        Self { text: text.into(), block: false }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self { text: text.into(), block: true }
    }

    /// Docstrings are block comments written `/** ... */`.
    pub fn is_docstring(&self) -> bool {
        self.block && self.text.starts_with('*')
    }

    /// Info comments are written `//!` or `/*! ... */`.
    pub fn is_info(&self) -> bool {
        self.text.starts_with('!')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_chain_path() {
        let chain = Reference::from_path("a.b.c");
        assert_eq!(chain.name, "c");
        assert_eq!(chain.path().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(chain.path_text().unwrap(), "a.b.c");
        assert_eq!(chain.root().unwrap().name, "a");
    }

    #[test]
    fn test_reference_starts_with() {
        let chain = Reference::from_path("a.b.c");
        assert!(chain.starts_with(&Reference::from_path("a.b")).unwrap());
        assert!(!chain.starts_with(&Reference::from_path("b")).unwrap());
    }

    #[test]
    fn test_reference_root_mut_renames_root() {
        let mut chain = Reference::from_path("a.b.c");
        chain.root_mut().unwrap().name = "z".to_string();
        assert_eq!(chain.path_text().unwrap(), "z.b.c");
    }

    #[test]
    fn test_call_wraps_bare_argument() {
        let call = Expression::new(
            Value::reference("f"),
            Operation::Call,
            Some(Value::number("1")),
        );
        assert_eq!(call.arguments().unwrap().len(), 1);
    }

    #[test]
    fn test_call_keeps_argument_list() {
        let call = Expression::new(
            Value::reference("f"),
            Operation::Call,
            Some(Value::ArgumentList(vec![Value::number("1"), Value::number("2")])),
        );
        assert_eq!(call.arguments().unwrap().len(), 2);
    }

    #[test]
    fn test_class_classification() {
        let mut class = ClassDecl::new(Some("Widget".into()));
        class.add_member(ClassMember {
            modifiers: MemberModifiers::default(),
            kind: MemberKind::Field(VariableDecl::named("size")),
        });
        let mut getter = FunctionDecl::new(Some("area".into()));
        getter.flags |= FunctionFlags::GETTER;
        class.add_member(ClassMember {
            modifiers: MemberModifiers::default(),
            kind: MemberKind::Method(getter),
        });
        let mut stat = MemberModifiers::default();
        stat.is_static = true;
        class.add_member(ClassMember {
            modifiers: stat,
            kind: MemberKind::Method(FunctionDecl::new(Some("create".into()))),
        });

        assert!(class.field("size").unwrap().is_some());
        assert!(class.getter("area").unwrap().is_some());
        assert!(class.static_method("create").unwrap().is_some());
        assert!(class.method("area").unwrap().is_none());
        assert_eq!(class.members().len(), 3);
    }

    #[test]
    fn test_class_reindex_after_mutation() {
        let mut class = ClassDecl::new(Some("Widget".into()));
        class.add_member(ClassMember {
            modifiers: MemberModifiers::default(),
            kind: MemberKind::Method(FunctionDecl::new(Some("draw".into()))),
        });
        class.for_each_member_mut(|member| {
            if let MemberKind::Method(func) = &mut member.kind {
                func.name = Some("render".into());
            }
        });
        assert!(class.method("draw").unwrap().is_none());
        assert!(class.method("render").unwrap().is_some());
    }

    #[test]
    fn test_replace_with_preserves_identity() {
        let mut value = Value::reference("old");
        let previous = value.replace_with(Value::number("3"));
        assert_eq!(previous, Value::reference("old"));
        assert_eq!(value, Value::number("3"));
    }

    #[test]
    fn test_comment_classes() {
        assert!(Comment::block("* Renders a widget.").is_docstring());
        assert!(Comment::line("! keep this in minified builds").is_info());
        assert!(!Comment::line("plain note").is_docstring());
    }
}
