//! Clap derive structures for the `ufp` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ufp -- decode UniFi Protect API records into typed entities
#[derive(Debug, Parser)]
#[command(
    name = "ufp",
    version,
    about = "Decode UniFi Protect API records into typed entities",
    long_about = "Reads raw Protect JSON (single records, arrays, or bootstrap dumps),\n\
        identifies each record by its modelKey and decodes it into the matching\n\
        camera, sensor, user, event, ... entity.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// NVR profile whose session is attached to decoded entities
    #[arg(long, short = 'p', env = "UFP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "UFP_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto, or `defaults.color` from config]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode records into typed entities
    #[command(alias = "d")]
    Decode(DecodeArgs),

    /// Show which entity type each record resolves to, without decoding it
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// List every known model key and the entity type it maps to
    Models,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Record input ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON files holding a record, an array of records, or a bootstrap
    /// object (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report records that fail to decode and keep going
    #[arg(long, env = "UFP_SKIP_INVALID")]
    pub skip_invalid: bool,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Decode every record as this model key instead of resolving it
    /// (records must still carry a model key)
    #[arg(long = "as", value_name = "MODEL")]
    pub as_model: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
