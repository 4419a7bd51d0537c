use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";
pub const API_BASE_PATH: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/v1/".into(),
            token_path: PathBuf::from(".portfolio/token"),
            request_timeout_secs: None,
            user_agent: format!("portfolio-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn base_url(&self) -> Result<Url> {
        normalize_base_url(&self.api_base_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    token_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Defaults, then `portfolio.toml` (or `config_path`), then environment.
pub fn load_settings(config_path: Option<&Path>) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.token_path {
        settings.token_path = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.user_agent {
        settings.user_agent = v;
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PORTFOLIO_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("PORTFOLIO_TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

/// Endpoint paths are joined relative to the base, so the base must end in
/// `/`. A bare host gets the versioned API path.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let raw = if raw.is_empty() {
        ClientSettings::default().api_base_url
    } else if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let mut url = Url::parse(&raw).with_context(|| format!("invalid api base url '{raw}'"))?;
    if url.path() == "/" || url.path().is_empty() {
        url.set_path(API_BASE_PATH);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
