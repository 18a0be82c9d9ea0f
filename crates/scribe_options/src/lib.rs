//! scribe_options: render settings.
//!
//! The settings object every render call receives. Deserializable from a
//! JSON config with camelCase keys, so hosts can ship a config file next to
//! their sources.

use serde::{Deserialize, Serialize};

/// The output surface dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Type annotations and type-only declarations are emitted.
    #[default]
    Typed,
    /// Type-only syntax vanishes; enums desugar to frozen objects.
    Untyped,
}

impl Dialect {
    /// The file extension used when a target path lacks one.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Typed => "ts",
            Dialect::Untyped => "js",
        }
    }
}

/// How imports and exports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// `import`/`export` keywords.
    #[default]
    Esm,
    /// `require(...)` assignments and `module.exports` bindings.
    Cjs,
}

impl ModuleFormat {
    pub fn name(self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::Cjs => "cjs",
        }
    }
}

/// Which comments survive rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentPolicy {
    #[default]
    All,
    /// Only `/** ... */` docstrings.
    DocstringOnly,
    /// Only `//!` / `/*! ... */` info comments.
    InfoOnly,
    None,
}

/// Settings for one render pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    pub dialect: Dialect,
    pub minify: bool,
    pub indent_width: usize,
    pub module_format: ModuleFormat,
    pub comments: CommentPolicy,
    /// Keep file extensions on relative import specifiers.
    pub include_extensions_in_imports: bool,
    /// Column budget before a single-line argument list reflows to one
    /// argument per line. Ignored when minifying.
    pub print_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Typed,
            minify: false,
            indent_width: 4,
            module_format: ModuleFormat::Esm,
            comments: CommentPolicy::All,
            include_extensions_in_imports: false,
            print_width: 100,
        }
    }
}

impl EmitOptions {
    pub fn untyped() -> Self {
        Self { dialect: Dialect::Untyped, ..Self::default() }
    }

    pub fn minified() -> Self {
        Self { minify: true, ..Self::default() }
    }

    /// Parse settings from a JSON config string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EmitOptions::default();
        assert_eq!(options.dialect, Dialect::Typed);
        assert_eq!(options.module_format, ModuleFormat::Esm);
        assert!(!options.minify);
        assert_eq!(options.indent_width, 4);
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = EmitOptions::from_json(
            r#"{"dialect": "untyped", "moduleFormat": "cjs", "minify": true, "indentWidth": 2}"#,
        )
        .unwrap();
        assert_eq!(options.dialect, Dialect::Untyped);
        assert_eq!(options.module_format, ModuleFormat::Cjs);
        assert!(options.minify);
        assert_eq!(options.indent_width, 2);
    }

    #[test]
    fn test_dialect_extension() {
        assert_eq!(Dialect::Typed.extension(), "ts");
        assert_eq!(Dialect::Untyped.extension(), "js");
    }
}
