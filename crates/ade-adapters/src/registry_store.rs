//! Registry file loading and saving.
//!
//! The registry is located via an ordered candidate list: the explicit
//! `--registry` override first, then conventional project-relative defaults.
//! The first existing path wins; if none exist the error lists everything
//! that was tried.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use ade_core::{
    error::{EngineResult, RegistryError},
    registry::Registry,
};

/// Project-relative default locations, probed in order after any explicit
/// override.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["config/stack-registry.json", "stack-registry.json"];

/// Load the registry, returning it together with the path it came from.
pub fn load_registry(explicit: Option<&Path>) -> EngineResult<(Registry, PathBuf)> {
    let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    candidates.extend(DEFAULT_CANDIDATES.iter().map(PathBuf::from));

    for candidate in &candidates {
        debug!(path = %candidate.display(), "checking candidate registry path");
        if !candidate.exists() {
            continue;
        }

        let text = std::fs::read_to_string(candidate).map_err(|e| RegistryError::Io {
            path: candidate.clone(),
            reason: e.to_string(),
        })?;
        let registry = Registry::from_json_str(&text)?;

        info!(path = %candidate.display(), "registry loaded");
        return Ok((registry, candidate.clone()));
    }

    Err(RegistryError::NotFound { tried: candidates }.into())
}

/// Write a registry as pretty-printed JSON, creating parent directories.
///
/// A convenience for tooling that regenerates the registry file; not on the
/// scaffold/validate hot path.
pub fn save_registry(registry: &Registry, path: &Path) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| RegistryError::Io {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }

    let mut text = serde_json::to_string_pretty(&registry.to_json_value()).map_err(|e| {
        RegistryError::Io {
            path: path.to_path_buf(),
            reason: format!("failed to serialize registry: {e}"),
        }
    })?;
    text.push('\n');

    std::fs::write(path, text).map_err(|e| RegistryError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), "registry saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ade_core::error::EngineError;
    use tempfile::TempDir;

    fn sample_registry() -> Registry {
        Registry::from_json_str(
            r#"{
                "conventions": {
                    "domainLayout": { "enforce": true, "requiredSubdirs": ["src"] }
                },
                "languages": {
                    "node": { "frameworks": { "express": {
                        "deployment": { "defaultPort": 3000 },
                        "scaffold": { "folders": ["src"], "files": { "index.mjs": "x" } }
                    } } }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.json");
        save_registry(&sample_registry(), &path).unwrap();

        let (registry, found) = load_registry(Some(&path)).unwrap();
        assert_eq!(found, path);
        assert!(registry.language("node").is_some());
    }

    #[test]
    fn missing_everywhere_lists_tried_paths() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        let err = load_registry(Some(&missing)).unwrap_err();
        match err {
            EngineError::Registry(RegistryError::NotFound { tried }) => {
                assert_eq!(tried[0], missing);
                assert!(tried.len() >= 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/registry.json");
        let registry = sample_registry();
        save_registry(&registry, &path).unwrap();

        let (loaded, _) = load_registry(Some(&path)).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn invalid_json_on_disk_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            load_registry(Some(&path)),
            Err(EngineError::Registry(RegistryError::Parse { .. }))
        ));
    }
}
