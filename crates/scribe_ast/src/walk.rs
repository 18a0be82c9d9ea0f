//! Mutable tree walking.
//!
//! Downstream passes rewrite trees in place: alias renaming, variable
//! substitution, subtree cloning. The walker visits every value node inside
//! a statement or value tree in post-order (children before the node
//! itself), so a handler that replaces a node's contents never re-visits
//! its own output.

use crate::node::*;
use scribe_diagnostics::Result;

/// Visit every value node in a value tree, children first.
pub fn visit_values_mut(value: &mut Value, f: &mut dyn FnMut(&mut Value)) {
    match value {
        Value::Literal(_) | Value::Reference(_) | Value::Regex(_) => {}
        Value::Expression(expr) => {
            visit_values_mut(&mut expr.lhs, f);
            if let Some(rhs) = expr.rhs.as_deref_mut() {
                visit_values_mut(rhs, f);
            }
        }
        Value::Conditional(cond) => {
            visit_values_mut(&mut cond.condition, f);
            visit_values_mut(&mut cond.when_true, f);
            visit_values_mut(&mut cond.when_false, f);
        }
        Value::ArgumentList(items) => {
            for item in items {
                visit_values_mut(item, f);
            }
        }
        Value::Array(slots) => {
            for slot in slots.iter_mut().flatten() {
                visit_values_mut(slot, f);
            }
        }
        Value::Object(object) => {
            for property in &mut object.properties {
                match property {
                    ObjectProperty::Entry { key, value } => {
                        if let PropertyKey::Computed(inner) = key {
                            visit_values_mut(inner, f);
                        }
                        visit_values_mut(value, f);
                    }
                    ObjectProperty::Spread(inner) => visit_values_mut(inner, f),
                    ObjectProperty::Method(func) => visit_function_values_mut(func, f),
                    ObjectProperty::Shorthand(_) => {}
                }
            }
        }
        Value::Template(template) => {
            for part in &mut template.parts {
                if let TemplatePart::Expression(inner) = part {
                    visit_values_mut(inner, f);
                }
            }
        }
        Value::Group(inner) => visit_values_mut(inner, f),
        Value::Cast(cast) => visit_values_mut(&mut cast.value, f),
        Value::Function(func) => visit_function_values_mut(func, f),
        Value::Class(class) => visit_class_values_mut(class, f),
    }
    f(value);
}

/// Visit every value node reachable from a statement, children first.
pub fn visit_statement_values_mut(statement: &mut Statement, f: &mut dyn FnMut(&mut Value)) {
    match statement {
        Statement::Expression(value) | Statement::Throw(value) => visit_values_mut(value, f),
        Statement::Return(value) => {
            if let Some(value) = value {
                visit_values_mut(value, f);
            }
        }
        Statement::Variable(stmt) => {
            for decl in stmt.declarations.values_mut() {
                visit_decl_values_mut(decl, f);
            }
        }
        Statement::Function(func) => visit_function_values_mut(func, f),
        Statement::Class(class) => visit_class_values_mut(class, f),
        Statement::If(stmt) => {
            visit_values_mut(&mut stmt.condition, f);
            for inner in &mut stmt.then_branch {
                visit_statement_values_mut(inner, f);
            }
            if let Some(else_branch) = stmt.else_branch.as_deref_mut() {
                visit_statement_values_mut(else_branch, f);
            }
        }
        Statement::For(stmt) => {
            match &mut stmt.head {
                ForHead::Classic { init, condition, update } => {
                    if let Some(init) = init.as_deref_mut() {
                        visit_statement_values_mut(init, f);
                    }
                    if let Some(condition) = condition {
                        visit_values_mut(condition, f);
                    }
                    if let Some(update) = update {
                        visit_values_mut(update, f);
                    }
                }
                ForHead::Iterator { binding, subject, .. } => {
                    visit_decl_values_mut(binding, f);
                    visit_values_mut(subject, f);
                }
            }
            for inner in &mut stmt.body {
                visit_statement_values_mut(inner, f);
            }
        }
        Statement::While(stmt) => {
            visit_values_mut(&mut stmt.condition, f);
            for inner in &mut stmt.body {
                visit_statement_values_mut(inner, f);
            }
        }
        Statement::DoWhile(stmt) => {
            for inner in &mut stmt.body {
                visit_statement_values_mut(inner, f);
            }
            visit_values_mut(&mut stmt.condition, f);
        }
        Statement::Switch(stmt) => {
            visit_values_mut(&mut stmt.subject, f);
            for case in &mut stmt.cases {
                if let Some(test) = &mut case.test {
                    visit_values_mut(test, f);
                }
                for inner in &mut case.body {
                    visit_statement_values_mut(inner, f);
                }
            }
        }
        Statement::Try(stmt) => {
            for inner in &mut stmt.block {
                visit_statement_values_mut(inner, f);
            }
            if let Some(catch) = &mut stmt.catch {
                for inner in &mut catch.block {
                    visit_statement_values_mut(inner, f);
                }
            }
            if let Some(finally) = &mut stmt.finally {
                for inner in finally {
                    visit_statement_values_mut(inner, f);
                }
            }
        }
        Statement::Export(stmt) => visit_statement_values_mut(&mut stmt.declaration, f),
        Statement::Enum(stmt) => {
            for initializer in stmt.members.values_mut().flatten() {
                visit_values_mut(initializer, f);
            }
        }
        Statement::Block(statements) => {
            for inner in statements {
                visit_statement_values_mut(inner, f);
            }
        }
        Statement::Import(_)
        | Statement::Interface(_)
        | Statement::TypeAlias(_)
        | Statement::Comment(_)
        | Statement::Break(_)
        | Statement::Continue(_)
        | Statement::Empty => {}
    }
}

fn visit_decl_values_mut(decl: &mut VariableDecl, f: &mut dyn FnMut(&mut Value)) {
    if let Some(initializer) = &mut decl.initializer {
        visit_values_mut(initializer, f);
    }
    match &mut decl.target {
        BindingTarget::Name(_) => {}
        BindingTarget::ArrayPattern(slots) => {
            for element in slots.iter_mut().flatten() {
                if let Some(default) = &mut element.default {
                    visit_values_mut(default, f);
                }
            }
        }
        BindingTarget::ObjectPattern(entries) => {
            for element in entries.values_mut() {
                if let Some(default) = &mut element.default {
                    visit_values_mut(default, f);
                }
            }
        }
    }
}

fn visit_function_values_mut(func: &mut FunctionDecl, f: &mut dyn FnMut(&mut Value)) {
    for parameter in &mut func.parameters {
        visit_decl_values_mut(parameter, f);
    }
    if let Some(body) = &mut func.body {
        for inner in body {
            visit_statement_values_mut(inner, f);
        }
    }
}

fn visit_class_values_mut(class: &mut ClassDecl, f: &mut dyn FnMut(&mut Value)) {
    class.for_each_member_mut(|member| match &mut member.kind {
        MemberKind::Field(decl) => visit_decl_values_mut(decl, f),
        MemberKind::Method(func) => visit_function_values_mut(func, f),
        MemberKind::Comment(_) => {}
    });
}

/// Rename every reference chain rooted at `from` so it roots at `to`.
/// Used for import-alias rewriting when modules are combined.
pub fn rename_reference_roots(statement: &mut Statement, from: &str, to: &str) -> Result<()> {
    let mut failure = None;
    visit_statement_values_mut(statement, &mut |value| {
        if let Value::Reference(reference) = value {
            match reference.root_mut() {
                Ok(root) => {
                    if root.name == from {
                        root.name = to.to_string();
                    }
                }
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Replace every bare reference to `name` with a deep copy of
/// `replacement`. Chained references (`name.field`) are left alone; the
/// chain's identity is the root binding, not the full path.
pub fn substitute_variable(statement: &mut Statement, name: &str, replacement: &Value) {
    visit_statement_values_mut(statement, &mut |value| {
        let matches = matches!(
            value,
            Value::Reference(reference) if reference.parent.is_none() && reference.name == name
        );
        if matches {
            value.replace_with(replacement.clone());
        }
    });
}
