//! Disk-backed template source with compiled-in fallbacks.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use ade_core::{
    error::{EngineError, EngineResult},
    ports::TemplateSource,
};

use crate::builtin_templates;

/// Resolves template references against a templates directory, falling back
/// to the compiled-in defaults and finally to a placeholder document.
///
/// The placeholder keeps scaffolding usable with a customized registry whose
/// templates have not been written yet; the generated file names the missing
/// reference so the gap is visible in the output.
#[derive(Debug, Clone)]
pub struct DiskTemplateSource {
    root: PathBuf,
}

impl DiskTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Conventional templates directory next to the registry file.
    pub fn beside_registry(registry_path: &Path) -> Self {
        let root = registry_path
            .parent()
            .map(|p| p.join("templates"))
            .unwrap_or_else(|| PathBuf::from("templates"));
        Self::new(root)
    }
}

impl TemplateSource for DiskTemplateSource {
    fn load(&self, reference: &str) -> EngineResult<String> {
        if !is_safe_reference(reference) {
            return Err(EngineError::Template {
                reference: reference.to_string(),
                reason: "reference must be a relative path without `..` segments".into(),
            });
        }

        let full_path = self.root.join(reference);
        if full_path.is_file() {
            debug!(path = %full_path.display(), "loading template from disk");
            return std::fs::read_to_string(&full_path).map_err(|e| EngineError::Template {
                reference: reference.to_string(),
                reason: e.to_string(),
            });
        }

        if let Some(builtin) = builtin_templates::default_for(reference) {
            debug!(reference, "using built-in template");
            return Ok(builtin.to_string());
        }

        debug!(reference, "no template found, emitting placeholder");
        Ok(format!(
            "# {{{{ServiceName}}}} - {{{{Domain}}}}\n\nTemplate not found: {reference}"
        ))
    }
}

fn is_safe_reference(reference: &str) -> bool {
    let path = Path::new(reference);
    !reference.is_empty()
        && path.is_relative()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
