//! Startup configuration, read once from the environment (and `.env`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::bank::BankClient;
use crate::utils::encryption::{CryptoError, TokenCipher};

const DEFAULT_POLL_SECONDS: u64 = 5;
const DEFAULT_SESSION_FILE: &str = ".escobanks-session.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("SESSION_ENCRYPTION_KEY is unusable: {0}")]
    SessionKey(#[from] CryptoError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:8080`
    pub api_base_url: String,
    /// Interval of the money request poll
    pub poll_interval: Duration,
    pub session_file: PathBuf,
    pub session_cipher: Option<TokenCipher>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: BankClient::DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECONDS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            session_cipher: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get("BANK_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    name: "BANK_API_URL",
                    expected: "an http:// or https:// URL",
                    value: url,
                });
            }
            config.api_base_url = url;
        }

        if let Some(raw) = get("REQUEST_POLL_SECONDS") {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or(ConfigError::Invalid {
                    name: "REQUEST_POLL_SECONDS",
                    expected: "a positive whole number",
                    value: raw.clone(),
                })?;
            config.poll_interval = Duration::from_secs(seconds);
        }

        if let Some(path) = get("SESSION_FILE") {
            config.session_file = PathBuf::from(path.trim());
        }

        if let Some(key) = get("SESSION_ENCRYPTION_KEY") {
            config.session_cipher = Some(TokenCipher::from_hex(&key)?);
        }

        Ok(config)
    }
}
