use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use site_core::SessionOptions;

pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub submit_delay_ms: u64,
    pub submit_timeout_ms: Option<u64>,
    pub simulate_failure: bool,
    pub event_capacity: usize,
    pub log_filter: String,
    pub projects_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            submit_timeout_ms: None,
            simulate_failure: false,
            event_capacity: 256,
            log_filter: "info".into(),
            projects_path: None,
        }
    }
}

impl Settings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            submit_timeout: self.submit_timeout_ms.map(Duration::from_millis),
            simulate_failure: self.simulate_failure,
            event_capacity: self.event_capacity,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    submit_delay_ms: Option<u64>,
    submit_timeout_ms: Option<u64>,
    simulate_failure: Option<bool>,
    event_capacity: Option<usize>,
    log_filter: Option<String>,
    projects_path: Option<PathBuf>,
}

/// Defaults, then the TOML file, then environment overrides. An explicit
/// `config_path` must exist; the default file is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    settings_from_sources(raw.as_deref(), |name| std::env::var(name).ok())
}

pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid portfolio config")?;
        if let Some(v) = file_cfg.submit_delay_ms {
            settings.submit_delay_ms = v;
        }
        if let Some(v) = file_cfg.submit_timeout_ms {
            settings.submit_timeout_ms = Some(v);
        }
        if let Some(v) = file_cfg.simulate_failure {
            settings.simulate_failure = v;
        }
        if let Some(v) = file_cfg.event_capacity {
            settings.event_capacity = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
        if let Some(v) = file_cfg.projects_path {
            settings.projects_path = Some(v);
        }
    }

    if let Some(v) = env_value(&env, "SUBMIT_DELAY_MS").and_then(|v| v.parse().ok()) {
        settings.submit_delay_ms = v;
    }
    if let Some(v) = env_value(&env, "SUBMIT_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
        settings.submit_timeout_ms = Some(v);
    }
    if let Some(v) = env_value(&env, "SIMULATE_FAILURE").and_then(|v| parse_flag(&v)) {
        settings.simulate_failure = v;
    }
    if let Some(v) = env_value(&env, "EVENT_CAPACITY").and_then(|v| v.parse().ok()) {
        settings.event_capacity = v;
    }
    if let Some(v) = env_value(&env, "LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env_value(&env, "PROJECTS_PATH") {
        settings.projects_path = Some(PathBuf::from(v));
    }

    Ok(settings)
}

/// `APP__<KEY>` wins over `PORTFOLIO_<KEY>`.
fn env_value(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(&format!("APP__{key}"))
        .or_else(|| env(&format!("PORTFOLIO_{key}")))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
