//! CLI error types with miette diagnostics.
//!
//! Maps `DecodeError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ufp_config::ConfigError;
use ufp_core::DecodeError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const DECODE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Decoding ─────────────────────────────────────────────────────
    #[error("Record {source_name} has no model key")]
    #[diagnostic(
        code(ufp::missing_model_key),
        help("Protect records carry their type in a `modelKey` (or legacy `modelkey`) field.")
    )]
    MissingModelKey { source_name: String },

    #[error("Record {source_name} has an unrecognized model key")]
    #[diagnostic(
        code(ufp::invalid_model_key),
        help("Run: ufp models to see the accepted model keys")
    )]
    InvalidModelKey {
        source_name: String,
        #[source]
        source: DecodeError,
    },

    #[error("Record {source_name} could not be decoded")]
    #[diagnostic(code(ufp::decode))]
    Decode {
        source_name: String,
        #[source]
        source: DecodeError,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ufp::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ufp::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(ufp::no_credentials),
        help(
            "Set `username` and `password_env` in the profile,\n\
             or export UFP_USERNAME and UFP_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error(transparent)]
    #[diagnostic(code(ufp::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error("Failed to read {path}")]
    #[diagnostic(code(ufp::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}")]
    #[diagnostic(code(ufp::json), help("Check the JSON file contents and try again."))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    /// Wrap a dispatcher failure for the record named `source_name`.
    pub fn from_decode(source_name: impl Into<String>, err: DecodeError) -> Self {
        let source_name = source_name.into();
        match err {
            DecodeError::MissingModelKey => Self::MissingModelKey { source_name },
            DecodeError::InvalidModelKey { .. } | DecodeError::UnknownModelKey { .. } => {
                Self::InvalidModelKey {
                    source_name,
                    source: err,
                }
            }
            other => Self::Decode {
                source_name,
                source: other,
            },
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingModelKey { .. } | Self::InvalidModelKey { .. } | Self::Decode { .. } => {
                exit_code::DECODE
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Config(_) | Self::Read { .. } | Self::Json { .. } => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ──────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: ufp_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
