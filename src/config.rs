//! Client configuration resolved at build time.
//!
//! The browser bundle has no process environment, so values are baked in with
//! `option_env!` and parsed through the same lookup used by tests.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_RESEND_COOLDOWN_SECS: u32 = 60;
pub const DEFAULT_POST_AUTH_PATH: &str = "/role-select";
pub const AUTO_VERIFY_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be an absolute path, got {value:?}")]
    InvalidPath { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the marketplace REST API, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub resend_cooldown_secs: u32,
    /// Route the host navigates to after a successful login.
    pub post_auth_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            resend_cooldown_secs: DEFAULT_RESEND_COOLDOWN_SECS,
            post_auth_path: DEFAULT_POST_AUTH_PATH.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from values captured at compile time.
    ///
    /// Optional:
    /// - `MARKETPLACE_API_BASE_URL`: default `/api`
    /// - `MARKETPLACE_REQUEST_TIMEOUT_SECS`: default 15
    /// - `MARKETPLACE_RESEND_COOLDOWN_SECS`: default 60
    /// - `MARKETPLACE_POST_AUTH_PATH`: default `/role-select`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            "MARKETPLACE_API_BASE_URL" => option_env!("MARKETPLACE_API_BASE_URL"),
            "MARKETPLACE_REQUEST_TIMEOUT_SECS" => option_env!("MARKETPLACE_REQUEST_TIMEOUT_SECS"),
            "MARKETPLACE_RESEND_COOLDOWN_SECS" => option_env!("MARKETPLACE_RESEND_COOLDOWN_SECS"),
            "MARKETPLACE_POST_AUTH_PATH" => option_env!("MARKETPLACE_POST_AUTH_PATH"),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but malformed.
    pub fn from_lookup<'a, F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let api_base_url = lookup("MARKETPLACE_API_BASE_URL")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();

        let timeout_secs = parse_positive(
            "MARKETPLACE_REQUEST_TIMEOUT_SECS",
            lookup("MARKETPLACE_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let resend_cooldown_secs = parse_positive(
            "MARKETPLACE_RESEND_COOLDOWN_SECS",
            lookup("MARKETPLACE_RESEND_COOLDOWN_SECS"),
            u64::from(DEFAULT_RESEND_COOLDOWN_SECS),
        )?;
        let resend_cooldown_secs = u32::try_from(resend_cooldown_secs).map_err(|_| ConfigError::InvalidNumber {
            key: "MARKETPLACE_RESEND_COOLDOWN_SECS",
            value: resend_cooldown_secs.to_string(),
        })?;

        let post_auth_path = match lookup("MARKETPLACE_POST_AUTH_PATH").map(str::trim) {
            None | Some("") => DEFAULT_POST_AUTH_PATH.to_owned(),
            Some(path) if path.starts_with('/') => path.to_owned(),
            Some(path) => {
                return Err(ConfigError::InvalidPath { key: "MARKETPLACE_POST_AUTH_PATH", value: path.to_owned() });
            }
        };

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            resend_cooldown_secs,
            post_auth_path,
        })
    }
}

fn parse_positive(key: &'static str, raw: Option<&str>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber { key, value: raw.to_owned() }),
    }
}
