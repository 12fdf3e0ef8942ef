//! Command handlers and the shared execution context.

pub mod decode;
pub mod models;
pub mod resolve;

use clap::ValueEnum;
use tracing::debug;

use ufp_core::{DecodeError, ProtectClient};

use crate::cli::{ColorMode, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Resolved global settings: CLI flags layered over config defaults.
pub struct Context {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    /// `defaults.skip_invalid` from the config file.
    pub skip_invalid: bool,
    /// Session handle attached to decoded entities (`--profile`).
    pub session: Option<ProtectClient>,
}

impl Context {
    pub fn from_global(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = ufp_config::load_config()?;

        let output = global
            .output
            .clone()
            .or_else(|| <OutputFormat as ValueEnum>::from_str(&cfg.defaults.output, true).ok())
            .unwrap_or(OutputFormat::Table);
        let color = global
            .color
            .clone()
            .or_else(|| <ColorMode as ValueEnum>::from_str(&cfg.defaults.color, true).ok())
            .unwrap_or(ColorMode::Auto);

        let session = match global.profile.as_deref() {
            Some(name) => {
                let profile = cfg.profile(name)?;
                let client = ufp_config::profile_to_client(profile, name)?;
                debug!(profile = name, url = %client.base_url(), "attaching session handle");
                Some(client)
            }
            None => None,
        };

        Ok(Self {
            output,
            color: output::should_color(&color),
            quiet: global.quiet,
            skip_invalid: cfg.defaults.skip_invalid,
            session,
        })
    }

    /// Apply the batch policy to a failed record: report and continue when
    /// skipping, otherwise abort with the error.
    pub fn on_failure(&self, skip: bool, source: &str, err: DecodeError) -> Result<(), CliError> {
        if skip {
            output::report_skipped(source, &err.to_string(), self.color);
            Ok(())
        } else {
            Err(CliError::from_decode(source, err))
        }
    }
}

pub fn dispatch(cmd: &Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Decode(args) => decode::handle(args, ctx),
        Command::Resolve(args) => resolve::handle(args, ctx),
        Command::Models => models::handle(ctx),
        // Handled in main before a context is built.
        Command::Completions(_) => Ok(()),
    }
}
