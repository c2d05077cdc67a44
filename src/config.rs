use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JobMailError, Result};
use crate::models::Account;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Accounts to process, in order. Supplied here rather than in source
    /// so personal addresses never end up in the code.
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Query window: exactly one of the two fields is authoritative.
/// `start_date` wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_days_back")]
    pub days_back: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            days_back: default_days_back(),
            start_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client secret downloaded from Google Cloud Console
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    /// Directory holding one token_<label>.json per account
    #[serde(default = "default_token_dir")]
    pub token_dir: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            token_dir: default_token_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExecutionConfig {
    /// When true, one account's failure is logged and the run moves on to
    /// the next account; when false (default) the run aborts.
    #[serde(default)]
    pub continue_on_error: bool,
}

fn default_days_back() -> Option<u32> {
    Some(500)
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| JobMailError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| JobMailError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for account in &self.accounts {
            if account.label.is_empty() {
                return Err(JobMailError::ConfigError(
                    "account label cannot be empty".to_string(),
                ));
            }
            if !seen.insert(account.label.as_str()) {
                return Err(JobMailError::ConfigError(format!(
                    "duplicate account label {:?}: token caches would collide",
                    account.label
                )));
            }
        }

        if self.window.days_back.is_none() && self.window.start_date.is_none() {
            return Err(JobMailError::ConfigError(
                "window must set days_back or start_date".to_string(),
            ));
        }

        Ok(())
    }
}
