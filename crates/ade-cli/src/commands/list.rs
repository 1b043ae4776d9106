//! Implementation of the `ade list` command.

use tracing::instrument;

use ade_core::registry::Registry;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `ade list` command.
#[instrument(skip_all)]
pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (registry, _) = super::load_registry(&global, &config)?;

    let languages: Vec<_> = registry
        .languages
        .iter()
        .filter(|(name, _)| args.language.as_deref().is_none_or(|l| l == name))
        .collect();

    if languages.is_empty() {
        if let Some(wanted) = &args.language {
            return Err(CliError::Engine(
                ade_core::error::ScaffoldError::UnknownLanguage {
                    language: wanted.clone(),
                    available: registry.language_names(),
                }
                .into(),
            ));
        }
        output.warning("The registry defines no languages")?;
        return Ok(());
    }

    match args.format {
        ListFormat::Json => print_json(&languages)?,
        ListFormat::List => {
            for (language, spec) in &languages {
                for framework in spec.framework_names() {
                    println!("{language}/{framework}");
                }
            }
        }
        ListFormat::Table => print_table(&languages, &output)?,
    }

    Ok(())
}

fn print_table(
    languages: &[&(String, ade_core::registry::LanguageSpec)],
    output: &OutputManager,
) -> CliResult<()> {
    output.header("Available stacks")?;
    for (language, spec) in languages {
        output.print("")?;
        output.print(language)?;
        for (framework, fw_spec) in &spec.frameworks {
            let port = fw_spec
                .deployment
                .as_ref()
                .map(|d| format!("port {}", d.default_port))
                .unwrap_or_else(|| "default port".into());
            output.item(&format!(
                "{framework}  ({port}, {} files)",
                fw_spec.scaffold.files.len()
            ))?;
        }
    }
    Ok(())
}

fn print_json(languages: &[&(String, ade_core::registry::LanguageSpec)]) -> CliResult<()> {
    let mut doc = serde_json::Map::new();
    for (language, spec) in languages {
        doc.insert(
            (*language).clone(),
            serde_json::Value::from(spec.framework_names()),
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(doc)).map_err(|e| {
            CliError::InvalidInput {
                message: format!("failed to serialize stack list: {e}"),
            }
        })?
    );
    Ok(())
}
