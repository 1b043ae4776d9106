//! Infrastructure adapters for ade.
//!
//! This crate implements the ports defined in `ade_core::ports`. It contains
//! all external dependencies and I/O operations: the real filesystem, the
//! registry file store, the disk-backed template source with compiled-in
//! defaults, and the best-effort git integration.

pub mod builtin_templates;
pub mod filesystem;
pub mod git;
pub mod registry_store;
pub mod template_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::GitCli;
pub use registry_store::{load_registry, save_registry};
pub use template_source::DiskTemplateSource;
