//! Driven (output) ports — implemented by infrastructure.
//!
//! These traits define what the engine needs from the outside world. The
//! `ade-adapters` crate provides the production implementations; tests use
//! in-memory doubles.

use std::path::Path;

use crate::error::EngineResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ade_adapters::filesystem::LocalFilesystem` (production)
/// - `ade_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Creating a directory
    /// that already exists is not an error.
    fn create_dir_all(&self, path: &Path) -> EngineResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> EngineResult<()>;

    /// Check if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, sorted.
    ///
    /// Sorting makes validation reports deterministic regardless of the
    /// platform's directory iteration order. Files and symlinks to files are
    /// not included; hidden-entry filtering is the caller's concern.
    fn list_dirs(&self, path: &Path) -> EngineResult<Vec<String>>;
}

/// Port for resolving a template reference into raw template text.
///
/// A reference is the remainder of a registry file value after the
/// `TEMPLATE_REF::` marker, e.g. `fastapi/app/main.py`. Implementations fall
/// back to compiled-in defaults when no file backs the reference.
pub trait TemplateSource: Send + Sync {
    fn load(&self, reference: &str) -> EngineResult<String>;
}

/// Port for best-effort repository initialization after a scaffold.
///
/// The engine calls this at most once per successful apply, logs any failure
/// at WARN, and never propagates it — git integration is optional polish,
/// not a core guarantee.
pub trait VcsInitializer: Send + Sync {
    fn init(&self, path: &Path, language: &str) -> EngineResult<()>;
}
