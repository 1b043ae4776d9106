//! Command handlers. Each module translates parsed arguments into engine
//! calls and renders the outcome; no scaffolding or validation logic lives
//! here.

pub mod completions;
pub mod list;
pub mod registry;
pub mod scaffold;
pub mod validate;

use std::path::Path;

use ade_adapters::DiskTemplateSource;
use ade_core::registry::Registry;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

/// Load the registry, preferring the `--registry` flag over the
/// `ADE_REGISTRY` environment configuration.
pub(crate) fn load_registry(
    global: &GlobalArgs,
    config: &AppConfig,
) -> CliResult<(Registry, std::path::PathBuf)> {
    let explicit = global
        .registry
        .as_deref()
        .or(config.registry.path.as_deref());
    Ok(ade_adapters::load_registry(explicit)?)
}

/// Template source for a registry at `registry_path`, honoring the
/// `ADE_TEMPLATES` override.
pub(crate) fn template_source(config: &AppConfig, registry_path: &Path) -> DiskTemplateSource {
    match &config.templates.local_path {
        Some(root) => DiskTemplateSource::new(root.clone()),
        None => DiskTemplateSource::beside_registry(registry_path),
    }
}
