//! Path helpers for import-specifier comparison.
//!
//! Purely lexical: specifiers are resolved against the importing file's
//! directory and normalized without touching the filesystem.

use std::path::{Component, Path, PathBuf};

const SOURCE_EXTENSIONS: &[&str] = &["ts", "js"];

/// Lexically normalize `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else {
                    parts.push(component);
                }
            }
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Resolve a relative import specifier against the importing file's path.
/// Bare (package) specifiers resolve to nothing.
pub fn resolve_specifier(importing_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with("./") && !specifier.starts_with("../") {
        return None;
    }
    let dir = importing_file.parent().unwrap_or_else(|| Path::new(""));
    Some(normalize(&dir.join(specifier)))
}

/// Drop a recognized source extension, if present.
pub fn strip_source_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if SOURCE_EXTENSIONS.contains(&ext) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Whether an import specifier written in `importing_file` points at
/// `target_file`, extension-insensitively.
pub fn specifier_points_at(importing_file: &Path, specifier: &str, target_file: &Path) -> bool {
    match resolve_specifier(importing_file, specifier) {
        Some(resolved) => {
            strip_source_extension(&resolved) == strip_source_extension(&normalize(target_file))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_dot_segments() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    }

    #[test]
    fn test_resolve_specifier_relative() {
        let resolved = resolve_specifier(Path::new("src/views/page.ts"), "../models/user").unwrap();
        assert_eq!(resolved, PathBuf::from("src/models/user"));
    }

    #[test]
    fn test_resolve_specifier_bare_is_none() {
        assert!(resolve_specifier(Path::new("src/page.ts"), "lodash").is_none());
    }

    #[test]
    fn test_specifier_points_at_ignores_extension() {
        assert!(specifier_points_at(
            Path::new("src/a.ts"),
            "./b",
            Path::new("src/b.ts"),
        ));
        assert!(specifier_points_at(
            Path::new("src/a.ts"),
            "./b.js",
            Path::new("src/b.ts"),
        ));
        assert!(!specifier_points_at(
            Path::new("src/a.ts"),
            "./c",
            Path::new("src/b.ts"),
        ));
    }
}
