//! Structure validator — checks an existing project tree against the
//! registry's domain-layout convention.
//!
//! Convention violations are data, not errors: the validator only fails for
//! a missing root path. Hard violations (forbidden root directories) land in
//! `errors`; soft omissions (missing required subdirectories) land in
//! `warnings`, since legacy or in-progress services are common. `isValid`
//! is strictly errors-only.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    error::{EngineError, EngineResult},
    ports::Filesystem,
    registry::Registry,
};

/// One validation finding, error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Path relative to the validated root.
    pub path: String,
    pub message: String,
}

/// Options for a validation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Create missing required subdirectories. The report still reflects the
    /// pre-fix state; created paths are recorded in [`ValidationReport::fixed`].
    pub fix: bool,
}

/// Validation outcome.
///
/// Serializes as `{ "isValid": bool, "errors": [...], "warnings": [...] }`,
/// the report surface consumed by out-of-process callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    /// Directories created by `--fix`, for display only.
    #[serde(skip)]
    pub fixed: Vec<String>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            fixed: Vec::new(),
        }
    }
}

/// Walks a project tree against the domain-layout convention.
pub struct StructureValidator {
    filesystem: Box<dyn Filesystem>,
}

impl StructureValidator {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Validate the tree rooted at `root` against `registry`'s convention.
    #[instrument(skip_all, fields(root = %root.display(), fix = options.fix))]
    pub fn validate(
        &self,
        root: &Path,
        registry: &Registry,
        options: &ValidateOptions,
    ) -> EngineResult<ValidationReport> {
        if !self.filesystem.exists(root) {
            return Err(EngineError::PathNotFound {
                path: root.to_path_buf(),
            });
        }

        let layout = &registry.conventions.domain_layout;

        // Validation is a no-op by design when the convention is disabled.
        if !layout.enforce {
            debug!("domain layout not enforced; skipping validation");
            return Ok(ValidationReport::valid());
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut fixed = Vec::new();

        let root_dirs = visible_dirs(self.filesystem.as_ref(), root)?;

        for name in &root_dirs {
            if layout.deny_at_root.iter().any(|d| d == name) {
                errors.push(Finding {
                    path: name.clone(),
                    message: format!("forbidden directory '{name}' at root level"),
                });
                warnings.push(Finding {
                    path: name.clone(),
                    message: format!("consider moving '{name}' into a domain directory"),
                });
            }
        }

        // Remaining root directories are candidate domains; their immediate
        // subdirectories are candidate services.
        for domain in root_dirs
            .iter()
            .filter(|name| !layout.deny_at_root.iter().any(|d| d == *name))
        {
            let domain_path = root.join(domain);
            for service in visible_dirs(self.filesystem.as_ref(), &domain_path)? {
                let service_path = domain_path.join(&service);
                for required in &layout.required_subdirs {
                    let required_path = service_path.join(required);
                    if self.filesystem.exists(&required_path) {
                        continue;
                    }

                    let rel = format!("{domain}/{service}/{required}");
                    warnings.push(Finding {
                        path: rel.clone(),
                        message: format!("missing required directory '{required}'"),
                    });

                    if options.fix {
                        self.filesystem.create_dir_all(&required_path)?;
                        info!(path = %rel, "created missing required directory");
                        fixed.push(rel);
                    }
                }
            }
        }

        Ok(ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            fixed,
        })
    }
}

/// Immediate subdirectories of `path`, hidden entries excluded.
fn visible_dirs(filesystem: &dyn Filesystem, path: &Path) -> EngineResult<Vec<String>> {
    Ok(filesystem
        .list_dirs(path)?
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_to_wire_contract() {
        let report = ValidationReport {
            is_valid: false,
            errors: vec![Finding {
                path: "src".into(),
                message: "forbidden directory 'src' at root level".into(),
            }],
            warnings: Vec::new(),
            fixed: vec!["identity/user-api/docs".into()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["path"], "src");
        // `fixed` is display-only, never serialized.
        assert!(json.get("fixed").is_none());
    }
}
