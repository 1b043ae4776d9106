//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`ADE_REGISTRY`, `ADE_TEMPLATES`)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registry settings.
    pub registry: RegistryConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry file path, if pinned via environment.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Templates directory overriding the one beside the registry.
    pub local_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig { path: None },
            output: OutputConfig { no_color: false },
            templates: TemplateConfig { local_path: None },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults plus environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("ADE_REGISTRY") {
            if !path.is_empty() {
                config.registry.path = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = std::env::var("ADE_TEMPLATES") {
            if !path.is_empty() {
                config.templates.local_path = Some(PathBuf::from(path));
            }
        }
        tracing::debug!(config_dir = %Self::config_dir().display(), "configuration loaded");
        Ok(config)
    }

    /// Path to the per-user configuration directory.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to the current directory.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("dev", "ade", "ade")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_pinned_paths() {
        let cfg = AppConfig::default();
        assert!(cfg.registry.path.is_none());
        assert!(cfg.templates.local_path.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn config_dir_is_non_empty() {
        assert!(!AppConfig::config_dir().as_os_str().is_empty());
    }
}
