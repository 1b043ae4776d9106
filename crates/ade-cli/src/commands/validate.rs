//! Implementation of the `ade validate` command.

use tracing::instrument;

use ade_adapters::LocalFilesystem;
use ade_core::validate::{StructureValidator, ValidateOptions, ValidationReport};

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `ade validate` command.
///
/// A structurally invalid tree is reported (exit 2 via `InvalidInput`); the
/// command itself only hard-fails when the root path does not exist or the
/// registry cannot be loaded.
#[instrument(skip_all, fields(path = %args.path.display(), fix = args.fix))]
pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (registry, _) = super::load_registry(&global, &config)?;

    let validator = StructureValidator::new(Box::new(LocalFilesystem::new()));
    let report = validator.validate(&args.path, &registry, &ValidateOptions { fix: args.fix })?;

    if output.wants_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| CliError::InvalidInput {
                message: format!("failed to serialize report: {e}"),
            })?
        );
        return finish(&report);
    }

    show_report(&report, &output)?;
    finish(&report)
}

fn show_report(report: &ValidationReport, output: &OutputManager) -> CliResult<()> {
    if report.is_valid && report.warnings.is_empty() {
        output.success("Project structure is valid")?;
        return Ok(());
    }

    if !report.errors.is_empty() {
        output.error("Validation failed:")?;
        for finding in &report.errors {
            output.item(&format!("{}: {}", finding.path, finding.message))?;
        }
    } else {
        output.success("Project structure is valid")?;
    }

    if !report.warnings.is_empty() {
        output.print("")?;
        output.warning("Warnings:")?;
        for finding in &report.warnings {
            output.item(&format!("{}: {}", finding.path, finding.message))?;
        }
    }

    if !report.fixed.is_empty() {
        output.print("")?;
        for created in &report.fixed {
            output.success(&format!("Created: {created}"))?;
        }
    }

    Ok(())
}

fn finish(report: &ValidationReport) -> CliResult<()> {
    if report.is_valid {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: format!(
                "project structure has {} error(s)",
                report.errors.len()
            ),
        })
    }
}
