//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use ade_core::{error::EngineResult, ports::Filesystem};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> EngineResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> EngineResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dirs(&self, path: &Path) -> EngineResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "stat entry"))?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        // read_dir order is platform-dependent; the port promises sorted names.
        names.sort();
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ade_core::error::EngineError {
    ade_core::error::EngineError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_dirs_is_sorted_and_dirs_only() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("zeta")).unwrap();
        std::fs::create_dir(temp.path().join("alpha")).unwrap();
        std::fs::write(temp.path().join("file.txt"), "x").unwrap();

        let fs = LocalFilesystem::new();
        assert_eq!(fs.list_dirs(temp.path()).unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&nested).unwrap();
        fs.create_dir_all(&nested).unwrap();
        assert!(fs.exists(&nested));
    }

    #[test]
    fn list_dirs_on_missing_path_is_filesystem_error() {
        let fs = LocalFilesystem::new();
        let err = fs.list_dirs(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(
            err,
            ade_core::error::EngineError::Filesystem { .. }
        ));
    }
}
