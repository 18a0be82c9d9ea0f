//! scribe_compiler: the toolkit facade.
//!
//! Ties the pipeline together: source text (or files, through the module
//! cache) to [`Module`], and [`Module`] back to text under a fixed
//! settings object. Collaborator layers build on this entry point and
//! catch errors per file.

use scribe_core::text::SourceOrigin;
use scribe_diagnostics::Result;
use std::path::{Path, PathBuf};

// Re-export the pipeline stages so hosts depend on one crate.
pub use scribe_ast as ast;
pub use scribe_diagnostics::CompileError;
pub use scribe_module::{FileSystemHost, Module, ModuleCache, OsFileSystem, GLOBAL_MODULE_CACHE};
pub use scribe_options::EmitOptions;
pub use scribe_parser::parse_source;
pub use scribe_printer::{render_statement, render_statements, render_value};
pub use scribe_scanner::tokenize;

pub struct Compiler {
    pub options: EmitOptions,
    cache: ModuleCache,
}

impl Compiler {
    pub fn new(options: EmitOptions) -> Self {
        Self { options, cache: ModuleCache::new() }
    }

    /// The cache this compiler resolves files through. Population follows
    /// first-resolution-wins; see [`ModuleCache`].
    pub fn cache(&self) -> &ModuleCache {
        &self.cache
    }

    /// Parse standalone source text under a file label.
    pub fn parse_text(&self, text: &str, label: &str) -> Result<Module> {
        Module::from_source(text, &SourceOrigin::new(label))
    }

    /// Parse a fragment embedded in a larger document; reported positions
    /// are shifted by the origin's offsets.
    pub fn parse_fragment(&self, text: &str, origin: &SourceOrigin) -> Result<Module> {
        Module::from_source(text, origin)
    }

    /// Resolve a file through the cache.
    pub fn load(&self, host: &dyn FileSystemHost, path: &Path) -> Result<Module> {
        self.cache.get_or_parse(host, path)
    }

    /// Render a module under this compiler's settings.
    pub fn emit(&self, module: &Module) -> Result<String> {
        module.render(&self.options)
    }

    /// Render and write a module; the extension is chosen from the dialect
    /// when the target lacks one.
    pub fn emit_to_file(
        &self,
        host: &dyn FileSystemHost,
        module: &Module,
        path: &Path,
    ) -> Result<PathBuf> {
        tracing::debug!(target_file = %path.display(), "emit module");
        module.write_to_file(host, path, &self.options)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_emit() {
        let compiler = Compiler::default();
        let module = compiler.parse_text("const x = 1;", "app.ts").unwrap();
        let text = compiler.emit(&module).unwrap();
        assert_eq!(text, "const x = 1;\n");
    }

    #[test]
    fn test_parse_error_carries_label() {
        let compiler = Compiler::default();
        let err = compiler.parse_text("const x = 'abc", "app.ts").unwrap_err();
        assert_eq!(err.file.as_deref(), Some("app.ts"));
    }
}
