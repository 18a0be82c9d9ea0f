//! Parser integration tests.
//!
//! Verifies statement structure, expression precedence, and the ambiguity
//! resolutions that downstream rendering depends on.

use scribe_ast::node::*;
use scribe_ast::ops::Operation;
use scribe_ast::types::{DeclarationKeyword, FunctionFlags};
use scribe_core::text::SourceOrigin;
use scribe_diagnostics::CompileError;
use scribe_parser::parse_source;

/// Helper: parse source text and return the statement list.
fn parse(source: &str) -> Vec<Statement> {
    parse_source(source, &SourceOrigin::new("test.ts")).unwrap_or_else(|err| {
        panic!("parse failed for {:?}: {}", source, err);
    })
}

fn parse_err(source: &str) -> CompileError {
    match parse_source(source, &SourceOrigin::new("test.ts")) {
        Ok(_) => panic!("expected a parse error for {:?}", source),
        Err(err) => err,
    }
}

/// Helper: assert the number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(parse(source).len(), expected, "source: {}", source);
}

/// Helper: the value of a single expression statement.
fn parse_value(source: &str) -> Value {
    match parse(source).into_iter().next() {
        Some(Statement::Expression(value)) => value,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

/// Helper: the initializer of `const x = <expr>;`.
fn parse_initializer(expr: &str) -> Value {
    let source = format!("const probe = {};", expr);
    match parse(&source).into_iter().next() {
        Some(Statement::Variable(stmt)) => stmt
            .declarations
            .into_iter()
            .next()
            .and_then(|(_, decl)| decl.initializer)
            .expect("initializer"),
        other => panic!("expected a variable statement, got {:?}", other),
    }
}

// ============================================================================
// Variable declarations
// ============================================================================

#[test]
fn test_parse_const_declaration() {
    assert_statement_count("const x = 42;", 1);
}

#[test]
fn test_parse_multiple_statements() {
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_comma_declarators_collapse_into_one_statement() {
    let statements = parse("let a = 1, b = 2;");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.keyword, DeclarationKeyword::Let);
    assert_eq!(stmt.declarations.len(), 2);
    let names: Vec<&String> = stmt.declarations.keys().collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_const_without_initializer_is_fatal() {
    let err = parse_err("const x;");
    assert!(err.message.contains("initializer"));
}

#[test]
fn test_const_without_initializer_allowed_in_for_head() {
    assert_statement_count("for (const key in table) { use(key); }", 1);
}

#[test]
fn test_typed_declaration() {
    let statements = parse("const x: number = 42;");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    let decl = &stmt.declarations["x"];
    assert_eq!(decl.type_annotation, Some(TypeRef::named("number")));
}

// ============================================================================
// Destructuring
// ============================================================================

#[test]
fn test_array_pattern_with_hole() {
    let statements = parse("const [a, , b] = arr;");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    let decl = stmt.declarations.values().next().expect("declarator");
    let BindingTarget::ArrayPattern(slots) = &decl.target else {
        panic!("expected array pattern");
    };
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].as_ref().map(|e| e.name.as_str()), Some("a"));
    assert!(slots[1].is_none());
    assert_eq!(slots[2].as_ref().map(|e| e.name.as_str()), Some("b"));
}

#[test]
fn test_leading_hole_pattern() {
    let statements = parse("const [, name] = pair;");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    let decl = stmt.declarations.values().next().expect("declarator");
    let BindingTarget::ArrayPattern(slots) = &decl.target else {
        panic!("expected array pattern");
    };
    assert!(slots[0].is_none());
    assert_eq!(slots[1].as_ref().map(|e| e.name.as_str()), Some("name"));
}

#[test]
fn test_object_pattern_alias_default_and_rest() {
    let statements = parse("const { id, name: alias = \"anon\", ...rest } = user;");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    let decl = stmt.declarations.values().next().expect("declarator");
    let BindingTarget::ObjectPattern(entries) = &decl.target else {
        panic!("expected object pattern");
    };
    assert_eq!(entries["id"].name, "id");
    assert_eq!(entries["name"].name, "alias");
    assert!(entries["name"].default.is_some());
    assert!(entries["rest"].is_rest);
    assert_eq!(decl.primary_name(), "id");
}

#[test]
fn test_rest_and_default_parameters() {
    let statements = parse("function f(a = 1, ...rest) {}");
    let Statement::Function(func) = &statements[0] else {
        panic!("expected function");
    };
    assert!(func.parameters[0].initializer.is_some());
    assert!(func.parameters[1].is_rest);
}

// ============================================================================
// Expression precedence
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let value = parse_initializer("2 + 3 * 5");
    let expected = Value::Expression(Expression::binary(
        Value::number("2"),
        Operation::Add,
        Value::Expression(Expression::binary(
            Value::number("3"),
            Operation::Multiply,
            Value::number("5"),
        )),
    ));
    assert_eq!(value, expected);
}

#[test]
fn test_assignment_is_right_associative() {
    let value = parse_value("a = b = c;");
    let expected = Value::Expression(Expression::binary(
        Value::reference("a"),
        Operation::Assign,
        Value::Expression(Expression::binary(
            Value::reference("b"),
            Operation::Assign,
            Value::reference("c"),
        )),
    ));
    assert_eq!(value, expected);
}

#[test]
fn test_grouping_is_explicit_in_the_tree() {
    let value = parse_initializer("(1 + 2) * 3");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Multiply);
    assert!(matches!(expr.lhs.as_ref(), Value::Group(_)));
}

#[test]
fn test_ternary_nests_to_the_right() {
    let value = parse_initializer("a ? b : c ? d : e");
    let Value::Conditional(outer) = &value else { panic!("expected conditional") };
    assert!(matches!(outer.when_false.as_ref(), Value::Conditional(_)));
}

#[test]
fn test_postfix_chain_binds_tighter_than_binary() {
    let value = parse_initializer("a.b() + 1");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Add);
    let Value::Expression(call) = expr.lhs.as_ref() else { panic!("expected call") };
    assert_eq!(call.operation, Operation::Call);
}

#[test]
fn test_reference_chain_from_member_access() {
    let value = parse_value("a.b.c;");
    let Value::Reference(reference) = &value else { panic!("expected reference") };
    assert_eq!(reference.path().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_word_operators() {
    let value = parse_initializer("key in table");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::In);
    let value = parse_initializer("x instanceof Widget");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::InstanceOf);
}

// ============================================================================
// Ambiguity resolution
// ============================================================================

#[test]
fn test_slash_after_identifier_is_division() {
    let value = parse_initializer("x / 2");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Divide);
}

#[test]
fn test_slash_at_expression_start_is_regex() {
    let value = parse_value("/abc/g;");
    assert_eq!(value, Value::Regex(RegexLiteral { text: "/abc/g".into() }));
}

#[test]
fn test_parenthesized_arrow_parameters() {
    let value = parse_initializer("(x) => x");
    let Value::Function(func) = &value else { panic!("expected arrow function") };
    assert!(func.flags.contains(FunctionFlags::ARROW));
    assert_eq!(func.parameters.len(), 1);
    assert_eq!(func.body, Some(vec![Statement::Return(Some(Value::reference("x")))]));
}

#[test]
fn test_bare_parens_are_a_group() {
    let value = parse_initializer("(x)");
    assert_eq!(value, Value::Group(Box::new(Value::reference("x"))));
}

#[test]
fn test_single_parameter_arrow_without_parens() {
    let value = parse_initializer("x => x + 1");
    let Value::Function(func) = &value else { panic!("expected arrow function") };
    assert!(func.flags.contains(FunctionFlags::ARROW));
    assert_eq!(func.parameters[0].primary_name(), "x");
}

#[test]
fn test_async_arrow_function() {
    let value = parse_initializer("async (job) => job.run()");
    let Value::Function(func) = &value else { panic!("expected arrow function") };
    assert!(func.flags.contains(FunctionFlags::ARROW | FunctionFlags::ASYNC));
}

#[test]
fn test_new_without_arguments_gets_empty_argument_list() {
    let value = parse_value("new Widget;");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Initialize);
    assert_eq!(expr.arguments(), Some(&[][..]));
}

#[test]
fn test_optional_chain_three_ways() {
    let branches = [
        ("a?.b;", Operation::OptionalAccess),
        ("a?.(1);", Operation::OptionalCall),
        ("a?.[0];", Operation::OptionalIndex),
    ];
    for (source, operation) in branches {
        let value = parse_value(source);
        let Value::Expression(expr) = &value else { panic!("expected expression") };
        assert_eq!(expr.operation, operation, "source: {}", source);
    }
}

#[test]
fn test_less_than_is_comparison_unless_a_call_follows() {
    let value = parse_initializer("a < b");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Less);

    let value = parse_value("first<string>(input);");
    let Value::Expression(expr) = &value else { panic!("expected expression") };
    assert_eq!(expr.operation, Operation::Call);
    assert_eq!(expr.type_arguments, vec![TypeRef::named("string")]);
}

#[test]
fn test_nested_generic_lists_split_shift_tokens() {
    assert_statement_count("type Nested = Map<string, Array<number>>;", 1);
    assert_statement_count("type Deep = A<B<C<number>>>;", 1);
    let statements = parse("const cells: Array<Array<number>> = [];");
    let Statement::Variable(stmt) = &statements[0] else {
        panic!("expected variable statement");
    };
    let annotation = stmt.declarations["cells"].type_annotation.clone().expect("annotation");
    let TypeRef::Named { name, type_arguments } = annotation else {
        panic!("expected named type");
    };
    assert_eq!(name, "Array");
    assert_eq!(type_arguments.len(), 1);
}

#[test]
fn test_for_head_disambiguation() {
    let statements = parse("for (let i = 0; i < 3; i++) { f(i); }");
    let Statement::For(stmt) = &statements[0] else { panic!("expected for") };
    assert!(matches!(stmt.head, ForHead::Classic { .. }));

    let statements = parse("for (const item of list) { f(item); }");
    let Statement::For(stmt) = &statements[0] else { panic!("expected for") };
    assert!(matches!(
        stmt.head,
        ForHead::Iterator { kind: IterationKind::Of, .. }
    ));

    let statements = parse("for (const key in table) { f(key); }");
    let Statement::For(stmt) = &statements[0] else { panic!("expected for") };
    assert!(matches!(
        stmt.head,
        ForHead::Iterator { kind: IterationKind::In, .. }
    ));
}

// ============================================================================
// Functions and classes
// ============================================================================

#[test]
fn test_function_declaration_flags() {
    let statements = parse("async function go() { await task(); }");
    let Statement::Function(func) = &statements[0] else { panic!("expected function") };
    assert!(func.flags.contains(FunctionFlags::ASYNC));

    let statements = parse("function* gen() { yield 1; }");
    let Statement::Function(func) = &statements[0] else { panic!("expected function") };
    assert!(func.flags.contains(FunctionFlags::GENERATOR));
}

#[test]
fn test_class_members_are_classified_at_parse_time() {
    let source = r#"
        class Person {
            name: string;
            static kind = "person";
            constructor(name: string) {
                this.name = name;
            }
            greet(): string {
                return "Hello, " + this.name;
            }
            get label(): string {
                return this.name;
            }
            static create(name: string): Person {
                return new Person(name);
            }
        }
    "#;
    let statements = parse(source);
    let Statement::Class(class) = &statements[0] else { panic!("expected class") };
    assert!(class.field("name").unwrap().is_some());
    assert!(class.static_field("kind").unwrap().is_some());
    assert!(class.method("constructor").unwrap().is_some());
    assert!(class.method("greet").unwrap().is_some());
    assert!(class.getter("label").unwrap().is_some());
    assert!(class.static_method("create").unwrap().is_some());
    assert_eq!(class.members().len(), 6);
}

#[test]
fn test_abstract_class_member_has_no_body() {
    let statements = parse("abstract class Shape { abstract area(): number; }");
    let Statement::Class(class) = &statements[0] else { panic!("expected class") };
    assert!(class.is_abstract);
    let member = class.method("area").unwrap().expect("area member");
    assert!(member.modifiers.is_abstract);
    let MemberKind::Method(func) = &member.kind else { panic!("expected method") };
    assert!(func.body.is_none());
}

#[test]
fn test_decorated_class() {
    let statements = parse("@component\nclass Panel {}");
    let Statement::Class(class) = &statements[0] else { panic!("expected class") };
    assert_eq!(class.decorators.len(), 1);
}

#[test]
fn test_member_named_like_a_modifier() {
    let statements = parse("class Config { static: boolean = false; get(): number { return 1; } }");
    let Statement::Class(class) = &statements[0] else { panic!("expected class") };
    assert!(class.field("static").unwrap().is_some());
    assert!(class.method("get").unwrap().is_some());
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_else_if_chain() {
    let statements = parse("if (a) { x(); } else if (b) { y(); } else { z(); }");
    let Statement::If(stmt) = &statements[0] else { panic!("expected if") };
    let Some(else_branch) = &stmt.else_branch else { panic!("expected else") };
    assert!(matches!(else_branch.as_ref(), Statement::If(_)));
}

#[test]
fn test_switch_arms_terminate_at_case_boundaries() {
    let source = r#"
        switch (kind) {
            case 1:
                first();
            case 2:
                second();
                break;
            default:
                fallback();
        }
    "#;
    let statements = parse(source);
    let Statement::Switch(stmt) = &statements[0] else { panic!("expected switch") };
    assert_eq!(stmt.cases.len(), 3);
    assert_eq!(stmt.cases[0].body.len(), 1);
    assert_eq!(stmt.cases[1].body.len(), 2);
    assert!(stmt.cases[2].test.is_none());
}

#[test]
fn test_try_requires_catch_or_finally() {
    let err = parse_err("try { risky(); }");
    assert!(err.message.contains("catch"));
    assert_statement_count("try { a(); } finally { b(); }", 1);
    assert_statement_count("try { a(); } catch { b(); }", 1);
}

#[test]
fn test_catch_binding_is_optional() {
    let statements = parse("try { a(); } catch (err) { log(err); }");
    let Statement::Try(stmt) = &statements[0] else { panic!("expected try") };
    assert_eq!(stmt.catch.as_ref().and_then(|c| c.binding.as_deref()), Some("err"));
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_import_forms() {
    let statements = parse(
        "import \"./reset\";\nimport * as util from \"./util\";\nimport Def, { a, b as c } from \"./lib\";\nimport type { Props } from \"./types\";",
    );
    assert_eq!(statements.len(), 4);
    let Statement::Import(side_effect) = &statements[0] else { panic!() };
    assert_eq!(side_effect.clause, ImportClause::SideEffect);
    let Statement::Import(namespace) = &statements[1] else { panic!() };
    assert_eq!(namespace.clause, ImportClause::Namespace { alias: "util".into() });
    let Statement::Import(named) = &statements[2] else { panic!() };
    let ImportClause::Named { default, names, type_only } = &named.clause else { panic!() };
    assert_eq!(default.as_deref(), Some("Def"));
    assert_eq!(names.len(), 2);
    assert_eq!(names[1].local_name(), "c");
    assert!(!type_only);
    let Statement::Import(typed) = &statements[3] else { panic!() };
    let ImportClause::Named { type_only, .. } = &typed.clause else { panic!() };
    assert!(type_only);
}

#[test]
fn test_export_forms() {
    let statements = parse("export const version = 3;\nexport default function main() {}");
    let Statement::Export(value_export) = &statements[0] else { panic!() };
    assert!(!value_export.is_default);
    assert!(matches!(value_export.declaration.as_ref(), Statement::Variable(_)));
    let Statement::Export(default_export) = &statements[1] else { panic!() };
    assert!(default_export.is_default);
    assert_eq!(default_export.declaration.declared_name(), Some("main"));
}

// ============================================================================
// Type-only declarations
// ============================================================================

#[test]
fn test_interface_members() {
    let statements = parse("interface User { id: number; name?: string; greet(prefix: string): string; }");
    let Statement::Interface(decl) = &statements[0] else { panic!("expected interface") };
    assert_eq!(decl.members.len(), 3);
    assert!(decl.members[1].optional);
    assert!(matches!(decl.members[2].value, TypeRef::Function { .. }));
}

#[test]
fn test_enum_members_preserve_order() {
    let statements = parse("enum Color { Red, Green = 5, Blue }");
    let Statement::Enum(decl) = &statements[0] else { panic!("expected enum") };
    let names: Vec<&String> = decl.members.keys().collect();
    assert_eq!(names, vec!["Red", "Green", "Blue"]);
    assert!(decl.members["Green"].is_some());
    assert!(decl.members["Blue"].is_none());
}

#[test]
fn test_type_alias_union() {
    let statements = parse("type Id = string | number;");
    let Statement::TypeAlias(decl) = &statements[0] else { panic!("expected alias") };
    assert!(matches!(decl.value, TypeRef::Union(_)));
}

// ============================================================================
// Templates and comments
// ============================================================================

#[test]
fn test_template_parts() {
    let value = parse_initializer("`Hello ${name}, count: ${count}`");
    let Value::Template(template) = &value else { panic!("expected template") };
    assert_eq!(template.parts.len(), 4);
    assert_eq!(template.parts[0], TemplatePart::Text("Hello ".into()));
    assert_eq!(template.parts[1], TemplatePart::Expression(Value::reference("name")));
}

#[test]
fn test_template_with_object_literal_inside_interpolation() {
    let value = parse_initializer("`v: ${fmt({ depth: 2 })}`");
    let Value::Template(template) = &value else { panic!("expected template") };
    assert_eq!(template.parts.len(), 2);
    assert!(matches!(template.parts[1], TemplatePart::Expression(_)));
}

#[test]
fn test_comments_become_statements() {
    let statements = parse("// first\nconst x = 1;\n/* second */\nconst y = 2;");
    assert_eq!(statements.len(), 4);
    assert_eq!(statements[0], Statement::Comment(Comment::line("first")));
    assert_eq!(statements[2], Statement::Comment(Comment::block("second")));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_reports_expected_and_found() {
    let err = parse_err("const = 5;");
    assert_eq!(err.file.as_deref(), Some("test.ts"));
    assert_eq!((err.line, err.column), (1, 7));
    assert!(err.message.contains("Identifier expected"));
}

#[test]
fn test_error_position_tracks_lines() {
    let err = parse_err("const a = 1;\nconst b = ;");
    assert_eq!((err.line, err.column), (2, 11));
}

#[test]
fn test_embedded_origin_shifts_error_positions() {
    let err = parse_source("const b = ;", &SourceOrigin::embedded("page.html", 30, 0)).unwrap_err();
    assert_eq!(err.file.as_deref(), Some("page.html"));
    assert_eq!((err.line, err.column), (31, 11));
}
