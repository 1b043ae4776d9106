//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "ade",
    bin_name = "ade",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Domain-driven service scaffolding and structure validation",
    long_about = "ade scaffolds services into a domain/service directory layout \
                  from a JSON stack registry and validates existing trees \
                  against the same conventions.",
    after_help = "EXAMPLES:\n\
        \x20 ade scaffold -l python -f fastapi -s user-api -d identity\n\
        \x20 ade scaffold -l node -f express -s checkout -d billing --preview\n\
        \x20 ade validate --path . --fix\n\
        \x20 ade list --language python\n\
        \x20 ade registry init",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new service into the domain layout.
    #[command(
        visible_alias = "s",
        about = "Scaffold a new service",
        after_help = "EXAMPLES:\n\
            \x20 ade scaffold -l python -f fastapi -s user-api -d identity\n\
            \x20 ade scaffold -l go -f go-fiber -s ledger -d billing -o ./services\n\
            \x20 ade scaffold -l node -f express -s checkout -d billing --preview"
    )]
    Scaffold(ScaffoldArgs),

    /// Validate a project tree against the domain-layout convention.
    #[command(
        about = "Validate project structure",
        after_help = "EXAMPLES:\n\
            \x20 ade validate\n\
            \x20 ade validate --path ./my-platform\n\
            \x20 ade validate --fix"
    )]
    Validate(ValidateArgs),

    /// List the languages and frameworks available in the registry.
    #[command(
        visible_alias = "ls",
        about = "List available stacks",
        after_help = "EXAMPLES:\n\
            \x20 ade list\n\
            \x20 ade list --language python\n\
            \x20 ade list --format json"
    )]
    List(ListArgs),

    /// Manage the stack registry file.
    #[command(
        about = "Registry management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 ade registry init\n\
            \x20 ade registry init --path ./config/stack-registry.json\n\
            \x20 ade registry check"
    )]
    Registry(RegistryCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ade completions bash > ~/.local/share/bash-completion/completions/ade\n\
            \x20 ade completions zsh  > ~/.zfunc/_ade\n\
            \x20 ade completions fish > ~/.config/fish/completions/ade.fish"
    )]
    Completions(CompletionsArgs),
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `ade scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Programming language, as named in the registry.
    #[arg(
        short = 'l',
        long = "language",
        value_name = "LANGUAGE",
        help = "Programming language (e.g. python, node, go)"
    )]
    pub language: String,

    /// Framework, as named in the registry under the language.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Framework to use (e.g. fastapi, express, go-fiber)"
    )]
    pub framework: String,

    /// Service name. Lowercase letters, digits, and hyphens.
    #[arg(
        short = 's',
        long = "service",
        value_name = "NAME",
        help = "Service name (e.g. user-api)"
    )]
    pub service: String,

    /// Domain the service belongs to.
    #[arg(
        short = 'd',
        long = "domain",
        value_name = "DOMAIN",
        help = "Domain name (e.g. identity)"
    )]
    pub domain: String,

    /// Output root directory; the service lands at `<output>/<domain>/<service>`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Compute and print the scaffold without creating any files.
    #[arg(
        short = 'p',
        long = "preview",
        help = "Preview the scaffold without writing files"
    )]
    pub preview: bool,

    /// Skip git repository initialization.
    #[arg(long = "no-git", help = "Skip git initialization")]
    pub no_git: bool,

    /// Skip the post-scaffold dependency-install hint.
    #[arg(long = "no-install", help = "Skip dependency installation hints")]
    pub no_install: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `ade validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Root of the project tree to validate.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Path to validate"
    )]
    pub path: PathBuf,

    /// Create missing required subdirectories.
    #[arg(long = "fix", help = "Create missing required directories")]
    pub fix: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `ade list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by language.
    #[arg(
        short = 'l',
        long = "language",
        value_name = "LANGUAGE",
        help = "Filter by language"
    )]
    pub language: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `language/framework` pair per line.
    List,
    /// JSON object keyed by language.
    Json,
}

// ── registry subcommands ──────────────────────────────────────────────────────

/// Subcommands for `ade registry`.
#[derive(Debug, Subcommand)]
pub enum RegistryCommands {
    /// Write the built-in default registry to disk.
    Init {
        /// Destination path.
        #[arg(
            long = "path",
            value_name = "FILE",
            default_value = "config/stack-registry.json",
            help = "Where to write the registry"
        )]
        path: PathBuf,

        /// Overwrite an existing registry file.
        #[arg(long = "force", help = "Overwrite existing registry")]
        force: bool,
    },
    /// Load the registry and report schema problems.
    Check,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `ade completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_scaffold_command() {
        let cli = Cli::parse_from([
            "ade", "scaffold", "-l", "python", "-f", "fastapi", "-s", "user-api", "-d",
            "identity",
        ]);
        match cli.command {
            Commands::Scaffold(args) => {
                assert_eq!(args.language, "python");
                assert_eq!(args.framework, "fastapi");
                assert_eq!(args.service, "user-api");
                assert_eq!(args.domain, "identity");
                assert!(!args.preview);
                assert!(!args.no_git);
            }
            other => panic!("expected Scaffold, got {other:?}"),
        }
    }

    #[test]
    fn scaffold_requires_all_four_identifiers() {
        assert!(Cli::try_parse_from(["ade", "scaffold", "-l", "python"]).is_err());
    }

    #[test]
    fn validate_path_defaults_to_cwd() {
        let cli = Cli::parse_from(["ade", "validate"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(!args.fix);
            }
            other => panic!("expected Validate, got {other:?}"),
        }
    }

    #[test]
    fn registry_flag_is_global() {
        let cli = Cli::parse_from(["ade", "validate", "-r", "custom.json"]);
        assert_eq!(cli.global.registry, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["ade", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
