//! Configuration for the news sorter
//!
//! Settings come from an optional TOML file; every section has defaults, so a
//! missing file means "run with defaults". Secrets never live in the file:
//! the file names the environment variables that hold them and
//! [`Credentials::from_env`] reads those once at startup.

use crate::intake::SchedulingPolicy;
use crate::todoist::{GatewayConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SorterConfig {
    #[serde(default)]
    pub todoist: TodoistSection,
    #[serde(default)]
    pub scheduling: SchedulingPolicy,
    #[serde(default)]
    pub bot: BotSection,
}

/// Remote task service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoistSection {
    /// REST endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Name of the project tasks are filed into
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_project_name() -> String {
    "News".to_string()
}

fn default_timeout_secs() -> u64 {
    2
}

impl Default for TodoistSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            project_name: default_project_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Chat bot settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotSection {
    /// Environment variable containing the bot credential
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Reactions that approve a message for intake
    #[serde(default = "default_approve_emojis")]
    pub approve_emojis: BTreeSet<String>,
    /// Port the reaction webhook listens on
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

fn default_token_env() -> String {
    "DISCORD_TOKEN".to_string()
}

fn default_approve_emojis() -> BTreeSet<String> {
    ["😍", "👌", "👍", "✅"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_listen_port() -> u16 {
    8088
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            approve_emojis: default_approve_emojis(),
            listen_port: default_listen_port(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("{0} must be provided by env var")]
    MissingCredential(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SorterConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SorterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.todoist.project_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "todoist.project_name must not be empty".to_string(),
            ));
        }
        if !(self.todoist.base_url.starts_with("http://")
            || self.todoist.base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidConfig(format!(
                "todoist.base_url '{}' must be an http(s) URL",
                self.todoist.base_url
            )));
        }
        if self.todoist.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "todoist.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.scheduling.capacity_per_day == 0 {
            return Err(ConfigError::InvalidConfig(
                "scheduling.capacity_per_day must be at least 1".to_string(),
            ));
        }
        if self.scheduling.max_lookahead_days == 0 {
            return Err(ConfigError::InvalidConfig(
                "scheduling.max_lookahead_days must be at least 1".to_string(),
            ));
        }
        if self.bot.approve_emojis.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "bot.approve_emojis must list at least one emoji".to_string(),
            ));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.todoist.timeout_secs)
    }

    /// Gateway settings for the given API key
    pub fn gateway_config(&self, api_key: &str) -> GatewayConfig {
        GatewayConfig {
            base_url: self.todoist.base_url.clone(),
            api_key: api_key.to_string(),
            timeout: self.http_timeout(),
        }
    }
}

/// Secrets read from the process environment
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"***")
            .field("api_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// Read both credentials; an unset or empty variable is an error
    pub fn from_env(config: &SorterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: get_env_var_required(&config.bot.token_env)?,
            api_key: get_env_var_required(&config.todoist.api_key_env)?,
        })
    }

    /// Read only the task service credential
    pub fn api_key_from_env(config: &SorterConfig) -> Result<String, ConfigError> {
        get_env_var_required(&config.todoist.api_key_env)
    }
}

fn get_env_var_required(env_var_name: &str) -> Result<String, ConfigError> {
    std::env::var(env_var_name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingCredential(env_var_name.to_string()))
}
