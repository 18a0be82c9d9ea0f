//! scribe_module: module aggregation.
//!
//! A [`Module`] wraps a parsed top-level statement list and keeps
//! class/import/export indices for O(1) lookup. The indices are rebuilt on
//! every structural mutation so they can never drift from the statement
//! list.

mod cache;
mod host;
pub mod paths;

pub use cache::{ModuleCache, GLOBAL_MODULE_CACHE};
pub use host::{FileSystemHost, OsFileSystem};

use indexmap::IndexMap;
use scribe_ast::node::*;
use scribe_core::text::SourceOrigin;
use scribe_diagnostics::{messages, CompileError, Result};
use scribe_options::EmitOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// The file this module was parsed from, when known.
    pub path: Option<PathBuf>,
    statements: Vec<Statement>,
    classes: IndexMap<String, usize>,
    imports: Vec<usize>,
    exports: Vec<usize>,
}

impl Module {
    /// Build a module from a statement list, classifying statements into
    /// the class/import/export indices in one pass.
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut module = Self {
            path: None,
            statements,
            classes: IndexMap::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        };
        module.classify();
        module
    }

    /// Parse source text into a module.
    pub fn from_source(text: &str, origin: &SourceOrigin) -> Result<Self> {
        let statements = scribe_parser::parse_source(text, origin)?;
        let mut module = Self::new(statements);
        module.path = origin.file.as_ref().map(PathBuf::from);
        Ok(module)
    }

    fn classify(&mut self) {
        self.classes.clear();
        self.imports.clear();
        self.exports.clear();
        for (index, statement) in self.statements.iter().enumerate() {
            match statement {
                Statement::Import(_) => self.imports.push(index),
                Statement::Export(export) => {
                    self.exports.push(index);
                    if let Statement::Class(class) = export.declaration.as_ref() {
                        if let Some(name) = &class.name {
                            self.classes.insert(name.clone(), index);
                        }
                    }
                }
                Statement::Class(class) => {
                    if let Some(name) = &class.name {
                        self.classes.insert(name.clone(), index);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Mutate the statement list, then rebuild the indices.
    pub fn edit_statements(&mut self, f: impl FnOnce(&mut Vec<Statement>)) {
        f(&mut self.statements);
        self.classify();
    }

    /// Look up a class declaration by name, seeing through export wrappers.
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        let &index = self.classes.get(name)?;
        match &self.statements[index] {
            Statement::Class(class) => Some(class),
            Statement::Export(export) => match export.declaration.as_ref() {
                Statement::Class(class) => Some(class),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportStatement> {
        self.imports.iter().filter_map(|&index| match &self.statements[index] {
            Statement::Import(import) => Some(import),
            _ => None,
        })
    }

    pub fn exports(&self) -> impl Iterator<Item = &ExportStatement> {
        self.exports.iter().filter_map(|&index| match &self.statements[index] {
            Statement::Export(export) => Some(export),
            _ => None,
        })
    }

    /// Splice a new import at the front of the statement list.
    pub fn add_import(&mut self, import: ImportStatement) {
        self.statements.insert(0, Statement::Import(import));
        self.classify();
    }

    /// Append a new export at the end of the statement list.
    pub fn add_export(&mut self, export: ExportStatement) {
        self.statements.push(Statement::Export(export));
        self.classify();
    }

    /// Point every import of `old` at `new` instead.
    pub fn rewrite_import_specifier(&mut self, old: &str, new: &str) {
        for statement in &mut self.statements {
            if let Statement::Import(import) = statement {
                if import.specifier == old {
                    import.specifier = new.to_string();
                }
            }
        }
    }

    /// Unwrap export wrappers to their inner declarations and strip all
    /// imports. Used when inlining this module's contents into another
    /// file.
    pub fn remove_imports_and_exports(&mut self) {
        let statements = std::mem::take(&mut self.statements);
        self.statements = statements
            .into_iter()
            .filter_map(|statement| match statement {
                Statement::Import(_) => None,
                Statement::Export(export) => Some(*export.declaration),
                other => Some(other),
            })
            .collect();
        self.classify();
    }

    /// Merge another module's statements into this one. Imports that only
    /// bind the two modules to each other (in either direction, compared by
    /// relative path) are dropped first.
    pub fn combine(&mut self, mut other: Module) {
        if let (Some(own_path), Some(other_path)) = (self.path.clone(), other.path.clone()) {
            self.edit_statements(|statements| {
                statements.retain(|statement| match statement {
                    Statement::Import(import) => {
                        !paths::specifier_points_at(&own_path, &import.specifier, &other_path)
                    }
                    _ => true,
                });
            });
            other.edit_statements(|statements| {
                statements.retain(|statement| match statement {
                    Statement::Import(import) => {
                        !paths::specifier_points_at(&other_path, &import.specifier, &own_path)
                    }
                    _ => true,
                });
            });
        }
        self.statements.append(&mut other.statements);
        self.classify();
    }

    /// Render the whole module under the given settings.
    pub fn render(&self, options: &EmitOptions) -> Result<String> {
        tracing::debug!(
            file = self.path.as_deref().map(Path::to_str).flatten().unwrap_or("<anonymous>"),
            statements = self.statements.len(),
            "render module"
        );
        scribe_printer::render_statements(&self.statements, options)
    }

    /// Render and write. A target without a recognized extension gets one
    /// chosen from the dialect. Returns the path actually written.
    pub fn write_to_file(
        &self,
        host: &dyn FileSystemHost,
        path: &Path,
        options: &EmitOptions,
    ) -> Result<PathBuf> {
        let target = match path.extension() {
            Some(_) => path.to_path_buf(),
            None => path.with_extension(options.dialect.extension()),
        };
        let text = self.render(options)?;
        host.write_file(&target, &text).map_err(|err| {
            CompileError::semantic(
                &messages::CANNOT_WRITE_FILE,
                &[&target.display().to_string(), &err.to_string()],
            )
        })?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, file: &str) -> Module {
        Module::from_source(text, &SourceOrigin::new(file)).unwrap()
    }

    #[test]
    fn test_classification_on_construction() {
        let module = parse(
            "import { a } from \"./a\";\nclass Widget {}\nexport class Panel {}\nconst x = 1;",
            "src/ui.ts",
        );
        assert_eq!(module.imports().count(), 1);
        assert_eq!(module.exports().count(), 1);
        assert!(module.class("Widget").is_some());
        assert!(module.class("Panel").is_some());
        assert!(module.class("Missing").is_none());
    }

    #[test]
    fn test_add_import_goes_first_and_add_export_last() {
        let mut module = parse("const x = 1;", "src/a.ts");
        module.add_import(ImportStatement {
            clause: ImportClause::SideEffect,
            specifier: "./setup".into(),
        });
        module.add_export(ExportStatement {
            declaration: Box::new(Statement::Expression(Value::reference("x"))),
            is_default: true,
        });
        assert!(matches!(module.statements()[0], Statement::Import(_)));
        assert!(matches!(module.statements().last(), Some(Statement::Export(_))));
        assert_eq!(module.imports().count(), 1);
        assert_eq!(module.exports().count(), 1);
    }

    #[test]
    fn test_combine_elides_mutual_imports() {
        let mut a = parse(
            "import { b } from \"./b\";\nexport function fa() {}",
            "src/a.ts",
        );
        let b = parse(
            "import { fa } from \"./a\";\nexport function fb() {}",
            "src/b.ts",
        );
        a.combine(b);
        assert_eq!(a.imports().count(), 0);
        assert_eq!(a.exports().count(), 2);
    }

    #[test]
    fn test_combine_keeps_third_party_imports() {
        let mut a = parse("import { b } from \"./b\";\nimport { c } from \"./c\";", "src/a.ts");
        let b = parse("import { d } from \"./d\";", "src/b.ts");
        a.combine(b);
        let specifiers: Vec<&str> = a.imports().map(|i| i.specifier.as_str()).collect();
        assert_eq!(specifiers, vec!["./c", "./d"]);
    }

    #[test]
    fn test_remove_imports_and_exports_unwraps() {
        let mut module = parse(
            "import \"./side\";\nexport const answer = 42;\nexport default function main() {}",
            "src/a.ts",
        );
        module.remove_imports_and_exports();
        assert_eq!(module.imports().count(), 0);
        assert_eq!(module.exports().count(), 0);
        assert!(matches!(module.statements()[0], Statement::Variable(_)));
        assert!(matches!(module.statements()[1], Statement::Function(_)));
    }

    #[test]
    fn test_rewrite_import_specifier() {
        let mut module = parse("import { a } from \"./old\";", "src/a.ts");
        module.rewrite_import_specifier("./old", "./new");
        assert_eq!(module.imports().next().map(|i| i.specifier.as_str()), Some("./new"));
    }

    #[test]
    fn test_edit_statements_reclassifies() {
        let mut module = parse("const x = 1;", "src/a.ts");
        module.edit_statements(|statements| {
            statements.push(Statement::Class(ClassDecl::new(Some("Late".into()))));
        });
        assert!(module.class("Late").is_some());
    }

    #[test]
    fn test_render_round_trips_a_function() {
        let module = parse("export function add(a, b) {\n    return a + b;\n}", "src/math.ts");
        let text = module.render(&EmitOptions::default()).unwrap();
        assert!(text.contains("export function add(a, b)"));
        assert!(text.contains("return a + b;"));
    }
}
