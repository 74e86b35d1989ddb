//! Config subcommand handlers.

use std::collections::HashMap;
use std::fmt::Write as _;

use dialoguer::{Input, Select};

use trackly_core::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-like text with profiles in name order.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "page_size = {}", cfg.defaults.page_size);
    let _ = writeln!(out, "sort_by = \"{}\"", cfg.defaults.sort_by);
    let _ = write!(out, "sort_dir = \"{}\"", cfg.defaults.sort_dir);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = write!(out, "\n\n[profiles.{name}]");
        let _ = write!(out, "\napi_url = \"{}\"", p.api_url);
        if let Some(ref ca) = p.ca_cert {
            let _ = write!(out, "\nca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = write!(out, "\ninsecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = write!(out, "\ntimeout = {timeout}");
        }
        if let Some(page_size) = p.page_size {
            let _ = write!(out, "\npage_size = {page_size}");
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

fn parse_page_size(value: &str) -> Result<u32, CliError> {
    let hint = format!("must be a number between 1 and {MAX_PAGE_SIZE}");
    let size: u32 = parse_value("page_size", value, &hint)?;
    if (1..=MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(CliError::Validation {
            field: "page_size".into(),
            reason: hint,
        })
    }
}

/// Apply `key = value` to a profile. Accepts `snake_case` and `kebab-case` keys.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            let parsed: url::Url = parse_value("api_url", &value, "must be an http(s) URL")?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CliError::Validation {
                    field: "api_url".into(),
                    reason: "must be an http(s) URL".into(),
                });
            }
            profile.api_url = value;
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(parse_value("insecure", &value, "must be 'true' or 'false'")?);
        }
        "timeout" => {
            profile.timeout = Some(parse_value("timeout", &value, "must be a number (seconds)")?);
        }
        "page_size" | "page-size" => profile.page_size = Some(parse_page_size(&value)?),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: api_url, ca_cert, insecure, \
                     timeout, page_size"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("trackly -- configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()?;

            let api_url: String = Input::new()
                .with_prompt("API URL")
                .default(DEFAULT_API_URL.into())
                .interact_text()?;

            let sizes = ["10", "25", "50", "100"];
            let selection = Select::new()
                .with_prompt("Issues per page")
                .items(&sizes)
                .default(0)
                .interact()?;
            let page_size = sizes
                .get(selection)
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE);

            let mut profile = Profile::default();
            set_profile_key(&mut profile, "api_url", api_url)?;
            if page_size != DEFAULT_PAGE_SIZE {
                profile.page_size = Some(page_size);
            }

            let mut profiles = HashMap::new();
            profiles.insert(profile_name.clone(), profile);

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults: Defaults::default(),
                profiles,
            };
            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: trackly health");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out =
                output::render_single(global.output(), &cfg, format_config, |_| "config".into())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_insert_with(|| Profile {
                api_url: DEFAULT_API_URL.into(),
                ..Profile::default()
            });
            set_profile_key(profile, &key, value)?;

            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: trackly config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
