//! CLI-side configuration: profile selection and flag overrides on top of
//! the shared `trackly-config` crate.
//!
//! Core never sees these types -- it receives a pre-built `ClientConfig`.

use std::time::Duration;

use clap::ValueEnum;
use trackly_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// Re-export the shared config API so command handlers use `crate::config::*`.
pub use trackly_config::{
    Config, Defaults, Profile, config_path, defaults_to_client_config, fallback_client_config,
    load_config, load_config_or_default, profile_to_client_config, save_config,
};

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build the `ClientConfig` for this invocation.
///
/// Precedence: flag / env var > profile > `[defaults]`. Without any
/// profile the API URL defaults to `http://localhost:8000`; naming a
/// profile that does not exist is an error.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    resolve_with(&cfg, global)
}

fn resolve_with(cfg: &Config, global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            tracing::debug!(profile = %profile_name, "using profile");
            match global.api_url.as_deref() {
                Some(url) => {
                    let mut overridden = defaults_to_client_config(url, &cfg.defaults)?;
                    let from_profile = profile_to_client_config(profile, &cfg.defaults)?;
                    overridden.tls = from_profile.tls;
                    overridden.timeout = from_profile.timeout;
                    overridden.page_size = from_profile.page_size;
                    overridden
                }
                None => profile_to_client_config(profile, &cfg.defaults)?,
            }
        }
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => match global.api_url.as_deref() {
            Some(url) => defaults_to_client_config(url, &cfg.defaults)?,
            None => fallback_client_config(&cfg.defaults)?,
        },
    };

    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    Ok(client)
}

/// Fill `--output` and `--color` from `[defaults]` when neither a flag nor
/// `TRACKLY_OUTPUT` chose them. Unparseable values are logged and skipped.
pub fn apply_presentation_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = parse_default("output", &defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_default("color", &defaults.color);
    }
}

fn parse_default<T: ValueEnum>(key: &str, value: &str) -> Option<T> {
    match T::from_str(value, true) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value, "ignoring unrecognised [defaults] setting");
            None
        }
    }
}
