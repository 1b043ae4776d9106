//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use ade_core::{error::EngineResult, ports::Filesystem};

/// In-memory filesystem for testing. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files (testing helper).
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> EngineResult<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> EngineResult<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_dirs(&self, path: &Path) -> EngineResult<Vec<String>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut names: Vec<String> = inner
            .directories
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter_map(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ade_core::error::EngineError {
    ade_core::error::EngineError::Filesystem {
        path: PathBuf::new(),
        reason: "in-memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_registers_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/identity/user-api/src")).unwrap();
        assert!(fs.exists(Path::new("/out/identity")));
        assert!(fs.exists(Path::new("/out/identity/user-api/src")));
    }

    #[test]
    fn list_dirs_returns_immediate_children_sorted() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/root/billing/svc")).unwrap();
        fs.create_dir_all(Path::new("/root/auth")).unwrap();
        assert_eq!(
            fs.list_dirs(Path::new("/root")).unwrap(),
            vec!["auth", "billing"]
        );
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let clone = fs.clone();
        clone.write_file(Path::new("/x.txt"), "hello").unwrap();
        assert_eq!(fs.read_file(Path::new("/x.txt")).as_deref(), Some("hello"));
    }
}
