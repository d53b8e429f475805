//! Panel configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://patch-agent-api:8000";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FINALIZE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Per-call timeouts for the automation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub submit: Duration,
    pub status: Duration,
    pub finalize: Duration,
    pub connect: Duration,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self {
            submit: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
            status: Duration::from_secs(DEFAULT_STATUS_TIMEOUT_SECS),
            finalize: Duration::from_secs(DEFAULT_FINALIZE_TIMEOUT_SECS),
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub api_base_url: String,
    pub port: u16,
    pub timeouts: ApiTimeouts,
}

impl PanelConfig {
    /// Build typed panel config from environment variables.
    ///
    /// Optional:
    /// - `PATCH_API_BASE_URL`: default `http://patch-agent-api:8000`
    /// - `PORT`: default 8501
    /// - `PATCH_API_SUBMIT_TIMEOUT_SECS`: default 10
    /// - `PATCH_API_STATUS_TIMEOUT_SECS`: default 10
    /// - `PATCH_API_FINALIZE_TIMEOUT_SECS`: default 30
    /// - `PATCH_API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or port cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`PanelConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup("PATCH_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        reqwest::Url::parse(&api_base_url)
            .map_err(|e| ConfigError::Invalid { var: "PATCH_API_BASE_URL", reason: e.to_string() })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid { var: "PORT", reason: format!("{raw:?}: {e}") })?,
            None => DEFAULT_PORT,
        };

        let secs = |key: &str, default: u64| {
            Duration::from_secs(
                lookup(key)
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(default),
            )
        };
        let timeouts = ApiTimeouts {
            submit: secs("PATCH_API_SUBMIT_TIMEOUT_SECS", DEFAULT_SUBMIT_TIMEOUT_SECS),
            status: secs("PATCH_API_STATUS_TIMEOUT_SECS", DEFAULT_STATUS_TIMEOUT_SECS),
            finalize: secs("PATCH_API_FINALIZE_TIMEOUT_SECS", DEFAULT_FINALIZE_TIMEOUT_SECS),
            connect: secs("PATCH_API_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, port, timeouts })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
