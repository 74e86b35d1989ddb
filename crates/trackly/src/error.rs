//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use trackly_config::ConfigError;
use trackly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(
        code(trackly::api_error),
        help(
            "The request did not succeed; nothing was changed locally.\n\
             Re-run with -v to see the request, or check: trackly health"
        )
    )]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(trackly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(trackly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: trackly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(
        code(trackly::config),
        help("Check the config file (trackly config path) and TRACKLY_* variables.")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(trackly::not_a_terminal),
        help("Use `trackly issues list` for scripted access.")
    )]
    NotInteractive { command: String },

    #[error("prompt failed: {0}")]
    #[diagnostic(code(trackly::prompt))]
    Prompt(#[from] dialoguer::Error),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    #[diagnostic(code(trackly::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    #[diagnostic(code(trackly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::NotInteractive { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::Config(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "issue".into(),
                reason: message,
            },
            CoreError::NoPendingEdit => CliError::Validation {
                field: "issue".into(),
                reason: "no issue is open for editing".into(),
            },
            CoreError::Api { message, status } => CliError::Api { message, status },
            CoreError::Config { message } => CliError::Config(ConfigError::Validation {
                field: "connection".into(),
                reason: message,
            }),
        }
    }
}
