//! Unified error handling for the ade engine.
//!
//! The taxonomy mirrors how failures propagate: registry problems are always
//! fatal and abort before any generation or validation work; request problems
//! are reported before the filesystem is touched; a target-path conflict
//! aborts with no partial write for that step. Validation findings are data,
//! not errors — `StructureValidator` only fails for a missing root path.

use std::path::PathBuf;
use thiserror::Error;

/// Convenient result type alias.
pub type EngineResult<T> = Result<T, EngineError>;

/// Registry loading and schema failures. Always fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// No candidate path pointed at an existing registry file.
    #[error("registry file not found; tried: {}", format_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    /// The registry file exists but could not be read.
    #[error("failed to read registry at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// The registry file is not valid JSON.
    #[error("failed to parse registry JSON: {reason}")]
    Parse { reason: String },

    /// The JSON is well-formed but does not match the registry schema.
    ///
    /// `field` is the dotted path of the offending value (e.g.
    /// `languages.python.frameworks.fastapi.scaffold.folders[2]`).
    #[error("invalid registry schema at `{field}`: expected {expected}")]
    InvalidSchema { field: String, expected: String },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Request-level failures from the scaffold generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaffoldError {
    #[error("language '{language}' not found in registry")]
    UnknownLanguage {
        language: String,
        available: Vec<String>,
    },

    #[error("framework '{framework}' not available for {language}")]
    UnknownFramework {
        framework: String,
        language: String,
        available: Vec<String>,
    },

    /// Service and domain names must match `^[a-z][a-z0-9-]*$`.
    #[error("invalid {field} name '{value}'")]
    InvalidName { field: &'static str, value: String },

    /// The target service path already exists. Scaffolding never overwrites.
    #[error("service path already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// A rendered file or folder path escaped the service directory.
    #[error("template path escapes the service directory: {path}")]
    UnsafePath { path: String },
}

/// Root error type for engine operations.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// Registry not found / malformed / schema-invalid.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Unknown language/framework, invalid names, path conflicts.
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    /// The validation root path does not exist.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// A directory or file operation failed mid-generation. Partial output
    /// may exist and is not cleaned up.
    #[error("filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A referenced template could not be produced by the template source.
    #[error("template '{reference}' could not be loaded: {reason}")]
    Template { reference: String, reason: String },
}

impl EngineError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Registry(RegistryError::NotFound { tried }) => {
                let mut out = vec!["No stack registry file was found. Checked:".into()];
                out.extend(tried.iter().map(|p| format!("  • {}", p.display())));
                out.push("Create one with: ade registry init".into());
                out.push("Or point at an existing file with --registry".into());
                out
            }
            Self::Registry(RegistryError::InvalidSchema { field, expected }) => vec![
                format!("The registry field `{field}` has the wrong shape"),
                format!("Expected {expected}"),
                "Check the registry against: ade registry check".into(),
            ],
            Self::Registry(_) => vec![
                "The registry file could not be loaded".into(),
                "Verify it is valid JSON and readable".into(),
            ],
            Self::Scaffold(ScaffoldError::UnknownLanguage { available, .. }) => {
                let mut out = vec!["Available languages:".into()];
                out.extend(available.iter().map(|l| format!("  • {l}")));
                out
            }
            Self::Scaffold(ScaffoldError::UnknownFramework {
                language,
                available,
                ..
            }) => {
                let mut out = vec![format!("Available frameworks for {language}:")];
                out.extend(available.iter().map(|f| format!("  • {f}")));
                out
            }
            Self::Scaffold(ScaffoldError::InvalidName { field, .. }) => vec![
                format!(
                    "{field} names must start with a letter and contain only \
                     lowercase letters, numbers, and hyphens"
                ),
                "Examples: user-api, identity, billing2".into(),
            ],
            Self::Scaffold(ScaffoldError::AlreadyExists { path }) => vec![
                format!("The directory '{}' already exists", path.display()),
                "Scaffolding never overwrites; choose a different service name".into(),
                "Or preview the scaffold with --preview".into(),
            ],
            Self::Scaffold(ScaffoldError::UnsafePath { .. }) => vec![
                "A scaffold path in the registry resolves outside the service directory".into(),
                "Remove `..` segments and absolute paths from scaffold entries".into(),
            ],
            Self::PathNotFound { path } => vec![
                format!("'{}' does not exist", path.display()),
                "Pass the project root to validate with --path".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Earlier steps are not rolled back; clean up manually if needed".into(),
            ],
            Self::Template { reference, .. } => vec![
                format!("Template reference: {reference}"),
                "Check the templates directory or rely on the built-in defaults".into(),
            ],
        }
    }

    /// Error category for display styling and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Registry(_) => ErrorCategory::Configuration,
            Self::Scaffold(ScaffoldError::AlreadyExists { .. }) => ErrorCategory::Conflict,
            Self::Scaffold(_) => ErrorCategory::Request,
            Self::PathNotFound { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::Template { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Request,
    Conflict,
    NotFound,
    Internal,
}
