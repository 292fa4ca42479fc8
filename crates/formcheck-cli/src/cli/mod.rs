//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No validation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "formcheck",
    bin_name = "formcheck",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Live form validation against document fixtures",
    long_about = "formcheck loads a document of forms, wires the validator to every \
                  form, replays user input and submits, and reports which inputs \
                  are invalid and what the page would show.",
    after_help = "EXAMPLES:\n\
        \x20 formcheck check profile.toml --set name=A\n\
        \x20 formcheck check profile.toml --all --submit --output-format json\n\
        \x20 formcheck clear profile.toml --set name=A --html\n\
        \x20 formcheck completions bash > /usr/share/bash-completion/completions/formcheck",
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
    /// Validate the forms of a fixture document.
    #[command(
        visible_alias = "c",
        about = "Validate the forms of a fixture",
        after_help = "EXAMPLES:\n\
            \x20 formcheck check profile.toml\n\
            \x20 formcheck check profile.toml --set name=Anna --set job=Explorer\n\
            \x20 formcheck check profile.toml --all --fail-on-invalid"
    )]
    Check(CheckArgs),

    /// Reset every form of a fixture after replaying input.
    #[command(
        about = "Clear validation state",
        after_help = "EXAMPLES:\n\
            \x20 formcheck clear profile.toml\n\
            \x20 formcheck clear profile.toml --set name=A --html"
    )]
    Clear(ClearArgs),

    /// Initialise a formcheck configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 formcheck init                      # default location\n\
            \x20 formcheck --config ./fc.toml init   # explicit path\n\
            \x20 formcheck init --force              # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 formcheck completions bash > ~/.local/share/bash-completion/completions/formcheck\n\
            \x20 formcheck completions zsh  > ~/.zfunc/_formcheck\n\
            \x20 formcheck completions fish > ~/.config/fish/completions/formcheck.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the formcheck configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 formcheck config get validation.form_selector\n\
            \x20 formcheck config list\n\
            \x20 formcheck config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Fixture selection and input replay shared by `check` and `clear`.
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Fixture describing the document (TOML, or JSON by extension).
    #[arg(value_name = "FIXTURE", help = "Fixture file (TOML or JSON)")]
    pub fixture: PathBuf,

    /// Settings file overriding the configured selectors and classes.
    #[arg(
        short = 's',
        long = "settings",
        value_name = "FILE",
        help = "Settings file (TOML or JSON)"
    )]
    pub settings: Option<PathBuf>,

    /// Type a value into an input, then fire its input event.
    #[arg(
        long = "set",
        value_name = "ID=VALUE",
        value_parser = parse_assignment,
        help = "Type VALUE into the input with id ID (repeatable)"
    )]
    pub assignments: Vec<Assignment>,

    /// Print the resulting document markup.
    #[arg(long = "html", help = "Print the resulting document markup")]
    pub html: bool,
}

/// One `--set ID=VALUE` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: String,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing input id in '{raw}'"));
    }
    Ok(Assignment {
        id: id.to_string(),
        value: value.to_string(),
    })
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `formcheck check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Fire an input event on every input, not only the ones set.
    #[arg(short = 'a', long = "all", help = "Validate every input")]
    pub all: bool,

    /// Fire a submit event on every form after the input events.
    #[arg(long = "submit", help = "Submit every form")]
    pub submit: bool,

    /// Exit with status 5 if any form is invalid.
    #[arg(long = "fail-on-invalid", help = "Exit with status 5 on invalid forms")]
    pub fail_on_invalid: bool,
}

// ── clear ─────────────────────────────────────────────────────────────────────

/// Arguments for `formcheck clear`.
#[derive(Debug, Args)]
pub struct ClearArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `formcheck init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `formcheck completions`.
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

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `formcheck config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `validation.form_selector`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
