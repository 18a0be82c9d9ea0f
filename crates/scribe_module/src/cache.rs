//! The module parse cache.
//!
//! Avoids re-parsing a file reached through multiple import paths. The
//! cache is an explicit object with a single-writer-per-key contract:
//! the first resolution wins, later duplicates are discarded. A
//! process-wide instance is provided as the conventional default; hosts
//! that want isolation construct their own.

use crate::host::FileSystemHost;
use crate::paths;
use crate::Module;
use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use scribe_core::text::SourceOrigin;
use scribe_diagnostics::{messages, CompileError, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct ModuleCache {
    entries: Mutex<FxHashMap<PathBuf, Module>>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<PathBuf, Module>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the cached module, if present.
    pub fn lookup(&self, path: &Path) -> Option<Module> {
        self.lock().get(&paths::normalize(path)).cloned()
    }

    /// Insert unless the key is already present; either way, return a copy
    /// of what the cache holds afterwards (first resolution wins).
    pub fn insert_first(&self, path: &Path, module: Module) -> Module {
        let key = paths::normalize(path);
        let mut entries = self.lock();
        entries.entry(key).or_insert(module).clone()
    }

    /// Resolve a file through the cache, reading and parsing on miss.
    pub fn get_or_parse(&self, host: &dyn FileSystemHost, path: &Path) -> Result<Module> {
        let key = paths::normalize(path);
        if let Some(hit) = self.lookup(&key) {
            tracing::debug!(file = %key.display(), "module cache hit");
            return Ok(hit);
        }
        tracing::debug!(file = %key.display(), "module cache miss");
        let text = host.read_file(path).map_err(|err| {
            CompileError::semantic(
                &messages::CANNOT_READ_FILE,
                &[&path.display().to_string(), &err.to_string()],
            )
        })?;
        let origin = SourceOrigin::new(key.display().to_string());
        let module = Module::from_source(&text, &origin)?;
        Ok(self.insert_first(&key, module))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry. Invalidation on source change is the host's
    /// responsibility; nothing here happens automatically.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

lazy_static! {
    /// The process-wide cache most hosts share.
    pub static ref GLOBAL_MODULE_CACHE: ModuleCache = ModuleCache::new();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    struct FakeFs {
        files: HashMap<PathBuf, String>,
        reads: RefCell<usize>,
    }

    impl FakeFs {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                    .collect(),
                reads: RefCell::new(0),
            }
        }
    }

    impl FileSystemHost for FakeFs {
        fn read_file(&self, path: &Path) -> io::Result<String> {
            *self.reads.borrow_mut() += 1;
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }

        fn write_file(&self, _path: &Path, _text: &str) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_second_resolution_hits_cache() {
        let fs = FakeFs::new(&[("/app/a.ts", "const x = 1;")]);
        let cache = ModuleCache::new();
        let first = cache.get_or_parse(&fs, Path::new("/app/a.ts")).unwrap();
        let second = cache.get_or_parse(&fs, Path::new("/app/a.ts")).unwrap();
        assert_eq!(first, second);
        assert_eq!(*fs.reads.borrow(), 1);
    }

    #[test]
    fn test_identity_is_normalized() {
        let fs = FakeFs::new(&[("/app/a.ts", "const x = 1;")]);
        let cache = ModuleCache::new();
        cache.get_or_parse(&fs, Path::new("/app/a.ts")).unwrap();
        assert!(cache.lookup(Path::new("/app/views/../a.ts")).is_some());
    }

    #[test]
    fn test_first_resolution_wins() {
        let cache = ModuleCache::new();
        let first = Module::new(vec![]);
        let mut second = Module::new(vec![]);
        second.path = Some(PathBuf::from("marker"));
        cache.insert_first(Path::new("/app/a.ts"), first.clone());
        let kept = cache.insert_first(Path::new("/app/a.ts"), second);
        assert_eq!(kept, first);
    }

    #[test]
    fn test_missing_file_is_a_positioned_error() {
        let fs = FakeFs::new(&[]);
        let cache = ModuleCache::new();
        let err = cache.get_or_parse(&fs, Path::new("/app/missing.ts")).unwrap_err();
        assert_eq!(err.code, messages::CANNOT_READ_FILE.code);
    }
}
