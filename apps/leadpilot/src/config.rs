use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "leadpilot.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub lead_endpoint: String,
    pub broadcast_endpoint: String,
    pub seed_demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lead_endpoint: "http://127.0.0.1:8080/leads".into(),
            broadcast_endpoint: "http://127.0.0.1:8080/broadcasts".into(),
            seed_demo: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    lead_endpoint: Option<String>,
    broadcast_endpoint: Option<String>,
    seed_demo: Option<bool>,
}

/// Defaults, then the config file (if present), then environment variables.
/// CLI flags are applied by the caller on top.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.lead_endpoint {
        settings.lead_endpoint = v;
    }
    if let Some(v) = file_cfg.broadcast_endpoint {
        settings.broadcast_endpoint = v;
    }
    if let Some(v) = file_cfg.seed_demo {
        settings.seed_demo = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("LEADPILOT_LEAD_ENDPOINT") {
        settings.lead_endpoint = v;
    }
    if let Some(v) = lookup("APP__LEAD_ENDPOINT") {
        settings.lead_endpoint = v;
    }

    if let Some(v) = lookup("LEADPILOT_BROADCAST_ENDPOINT") {
        settings.broadcast_endpoint = v;
    }
    if let Some(v) = lookup("APP__BROADCAST_ENDPOINT") {
        settings.broadcast_endpoint = v;
    }

    if let Some(v) = lookup("LEADPILOT_SEED_DEMO") {
        if let Some(parsed) = parse_flag(&v) {
            settings.seed_demo = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
