use crate::shared::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://eym-sandha.onrender.com";

pub const ENV_API_BASE_URL: &str = "COMMUNITY_HUB_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "COMMUNITY_HUB_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "COMMUNITY_HUB_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "COMMUNITY_HUB_JSON_LOGS";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// 未設定ならタイムアウトなし
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            user_agent: Some(format!("community-hub/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "community_hub=info,warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// 環境変数で既定値を上書きした設定を返す
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            config.api.base_url = normalize_base_url(&base_url)?;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|err| {
                AppError::Configuration(format!("invalid {ENV_REQUEST_TIMEOUT_SECS}: {err}"))
            })?;
            config.api.request_timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            config.logging.level = level;
        }
        if let Some(raw) = lookup(ENV_JSON_LOGS) {
            config.logging.json = parse_flag(&raw);
        }

        Ok(config)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    let url = reqwest::Url::parse(&trimmed)
        .map_err(|err| AppError::Configuration(format!("Invalid URL: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed),
        _ => Err(AppError::Configuration(
            "URL scheme must be http or https".to_string(),
        )),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
