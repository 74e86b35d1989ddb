//! Shared configuration for the trackly CLI.
//!
//! TOML profiles, environment overrides, and translation to
//! `trackly_core::ClientConfig`. The CLI layers flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trackly_core::{
    ClientConfig, DEFAULT_API_URL, MAX_PAGE_SIZE, SortDir, SortField, TlsVerification,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Initial sort column, by wire name (e.g. "updatedAt").
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    trackly_core::DEFAULT_PAGE_SIZE
}
fn default_sort_by() -> String {
    SortField::default().to_string()
}
fn default_sort_dir() -> String {
    SortDir::default().to_string()
}

/// A named API profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API root (e.g., "http://localhost:8000").
    pub api_url: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override page size.
    pub page_size: Option<u32>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "trackly", "trackly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("trackly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, with `TRACKLY_` environment overrides.
///
/// Nested keys use a double underscore: `TRACKLY_DEFAULTS__PAGE_SIZE=25`.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TRACKLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to ClientConfig ─────────────────────────────────────

/// Build a `ClientConfig` from a profile, falling back to `defaults`.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let mut config = defaults_to_client_config(&profile.api_url, defaults)?;

    config.tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    if let Some(secs) = profile.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(size) = profile.page_size {
        config.page_size = validate_page_size(size)?;
    }
    Ok(config)
}

/// Build a `ClientConfig` for `api_url` with only global defaults applied.
pub fn defaults_to_client_config(
    api_url: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let base_url: url::Url = api_url
        .parse()
        .map_err(|_| ConfigError::invalid("api_url", format!("invalid URL: {api_url}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "api_url",
            format!("expected an http(s) URL, got {api_url}"),
        ));
    }

    let sort_by: SortField = defaults.sort_by.parse().map_err(|_| {
        ConfigError::invalid("sort_by", format!("unknown sort field '{}'", defaults.sort_by))
    })?;
    let sort_dir: SortDir = defaults.sort_dir.parse().map_err(|_| {
        ConfigError::invalid(
            "sort_dir",
            format!("expected 'asc' or 'desc', got '{}'", defaults.sort_dir),
        )
    })?;

    let mut config = ClientConfig::new(base_url);
    config.timeout = Duration::from_secs(defaults.timeout);
    config.page_size = validate_page_size(defaults.page_size)?;
    config.sort_by = sort_by;
    config.sort_dir = sort_dir;
    Ok(config)
}

/// `ClientConfig` used when no profile is configured at all.
pub fn fallback_client_config(defaults: &Defaults) -> Result<ClientConfig, ConfigError> {
    defaults_to_client_config(DEFAULT_API_URL, defaults)
}

fn validate_page_size(size: u32) -> Result<u32, ConfigError> {
    if (1..=MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ConfigError::invalid(
            "page_size",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.page_size, 10);
        assert_eq!(cfg.defaults.sort_by, "updatedAt");
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_defaults_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "staging"

[defaults]
page_size = 25
sort_by = "priority"
sort_dir = "asc"

[profiles.staging]
api_url = "https://issues.staging.test/api"
timeout = 5
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("staging"));
        assert_eq!(cfg.defaults.output, "table");

        let profile = &cfg.profiles["staging"];
        let client = profile_to_client_config(profile, &cfg.defaults).unwrap();
        assert_eq!(client.base_url.as_str(), "https://issues.staging.test/api");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.page_size, 25);
        assert_eq!(client.sort_by, SortField::Priority);
        assert_eq!(client.sort_dir, SortDir::Asc);
        assert_eq!(client.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "local".into(),
            Profile {
                api_url: DEFAULT_API_URL.into(),
                insecure: Some(true),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let client = profile_to_client_config(&loaded.profiles["local"], &loaded.defaults).unwrap();
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn rejects_bad_values() {
        let defaults = Defaults::default();
        let bad_url = Profile {
            api_url: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_config(&bad_url, &defaults),
            Err(ConfigError::Validation { ref field, .. }) if field == "api_url"
        ));

        let big_page = Profile {
            api_url: DEFAULT_API_URL.into(),
            page_size: Some(500),
            ..Profile::default()
        };
        assert!(profile_to_client_config(&big_page, &defaults).is_err());

        let bad_sort = Defaults {
            sort_by: "colour".into(),
            ..Defaults::default()
        };
        assert!(fallback_client_config(&bad_sort).is_err());
    }

    #[test]
    fn fallback_points_at_localhost() {
        let client = fallback_client_config(&Defaults::default()).unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(client.page_size, 10);
    }
}
