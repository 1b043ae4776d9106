//! Implementation of the `ade scaffold` command.
//!
//! Responsibility: translate CLI arguments into a `ScaffoldRequest`, call the
//! engine, and display results. No generation logic lives here.

use tracing::{info, instrument};

use ade_adapters::{GitCli, LocalFilesystem};
use ade_core::scaffold::{ScaffoldEngine, ScaffoldRequest, ScaffoldResult};

use crate::{
    cli::{GlobalArgs, ScaffoldArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `ade scaffold` command.
///
/// Dispatch sequence:
/// 1. Load the registry
/// 2. Build the engine from production adapters
/// 3. Generate (preview or apply)
/// 4. Render the result
#[instrument(skip_all, fields(service = %args.service, domain = %args.domain))]
pub fn execute(
    args: ScaffoldArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (registry, registry_path) = super::load_registry(&global, &config)?;

    let request = ScaffoldRequest {
        language: args.language,
        framework: args.framework,
        service: args.service,
        domain: args.domain,
        output_root: args.output,
        preview: args.preview,
        init_git: !args.no_git,
    };

    let engine = ScaffoldEngine::new(
        Box::new(LocalFilesystem::new()),
        Box::new(super::template_source(&config, &registry_path)),
        Some(Box::new(GitCli::new())),
    );

    if !output.wants_json() {
        if request.preview {
            output.header("Preview mode - no files will be created")?;
        } else {
            output.header(&format!(
                "Scaffolding {}/{}...",
                request.domain, request.service
            ))?;
        }
    }

    let result = engine.generate(&request, &registry)?;

    if output.wants_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(|e| CliError::InvalidInput {
                message: format!("failed to serialize result: {e}"),
            })?
        );
        return Ok(());
    }

    if request.preview {
        show_preview(&result, &output)?;
        return Ok(());
    }

    info!(path = %result.root_path.display(), "scaffold applied");

    output.print("")?;
    output.print("Created structure:")?;
    for entry in &result.structure {
        output.item(entry)?;
    }

    if !args.no_install && request.language == "node" {
        output.print("")?;
        output.warning("Run npm install in the service directory to install dependencies")?;
    }

    output.print("")?;
    output.success(&format!(
        "Service created at: {}",
        result.root_path.display()
    ))?;

    Ok(())
}

fn show_preview(result: &ScaffoldResult, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.info(&format!("Would create at: {}", result.root_path.display()))?;
    output.print("")?;
    output.print("Structure:")?;
    for entry in &result.structure {
        output.item(entry)?;
    }
    output.print("")?;
    output.print(&format!("Files to render: {}", result.files.len()))?;
    for path in result.files.keys() {
        output.item(path)?;
    }
    Ok(())
}
