//! Implementation of the `ade registry` subcommands.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, RegistryCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// The default registry shipped with the binary.
const DEFAULT_REGISTRY: &str = include_str!("../../assets/stack-registry.json");

/// Execute an `ade registry` subcommand.
#[instrument(skip_all)]
pub fn execute(
    command: RegistryCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match command {
        RegistryCommands::Init { path, force } => init(&path, force, &output),
        RegistryCommands::Check => check(&global, &config, &output),
    }
}

fn init(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput {
            message: format!(
                "'{}' already exists; pass --force to overwrite",
                path.display()
            ),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, DEFAULT_REGISTRY)?;

    info!(path = %path.display(), "default registry written");
    output.success(&format!("Registry written to {}", path.display()))?;
    output.print("Edit it to add languages, frameworks, and conventions.")?;
    Ok(())
}

fn check(global: &GlobalArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let (registry, path) = super::load_registry(global, config)?;

    let frameworks: usize = registry
        .languages
        .iter()
        .map(|(_, spec)| spec.frameworks.len())
        .sum();

    output.success(&format!("Registry at {} is valid", path.display()))?;
    output.item(&format!(
        "{} language(s), {} framework(s)",
        registry.languages.len(),
        frameworks
    ))?;
    if !registry.conventions.domain_layout.enforce {
        output.warning("Domain layout enforcement is disabled; ade validate will be a no-op")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ade_core::registry::Registry;

    #[test]
    fn embedded_registry_passes_schema_validation() {
        let registry = Registry::from_json_str(DEFAULT_REGISTRY).unwrap();
        assert_eq!(
            registry.language_names(),
            vec!["python", "node", "go"]
        );
        assert!(registry.conventions.domain_layout.enforce);
        assert_eq!(
            registry.conventions.domain_layout.required_subdirs,
            vec!["src", "tests", "deploy", "docs"]
        );
    }

    #[test]
    fn embedded_ports_match_stack_defaults() {
        let registry = Registry::from_json_str(DEFAULT_REGISTRY).unwrap();
        let port = |lang: &str, fw: &str| {
            registry
                .language(lang)
                .unwrap()
                .framework(fw)
                .unwrap()
                .deployment
                .as_ref()
                .unwrap()
                .default_port
        };
        assert_eq!(port("python", "fastapi"), 8000);
        assert_eq!(port("node", "express"), 3000);
        assert_eq!(port("go", "go-fiber"), 8080);
    }
}
