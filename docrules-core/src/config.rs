use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, DocRulesError};

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Settings shared by rule-builder sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Mirror every published snapshot to the tracing debug sink.
    #[serde(default)]
    pub debug_panel: Option<bool>,
    /// Text rendered in sidebar summaries when a section has no content.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_placeholder() -> String {
    "-".to_string()
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: default_log_level(),
            debug_panel: None,
            placeholder: default_placeholder(),
        }
    }
}

impl BuilderConfig {
    /// Loads configuration from the process environment (`DOCRULES_*`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix("DOCRULES_")
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `DOCRULES_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let environment = env::var(key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let log_level = env::var(key("LOG")).unwrap_or_else(|_| default_log_level());

        let debug_key = key("DEBUG_PANEL");
        let debug_panel = match env::var(&debug_key) {
            Ok(raw) => Some(parse_flag(&debug_key, &raw)?),
            Err(_) => None,
        };

        let placeholder = env::var(key("PLACEHOLDER")).unwrap_or_else(|_| default_placeholder());

        Ok(Self {
            environment,
            log_level,
            debug_panel,
            placeholder,
        })
    }

    /// Loads configuration from a YAML or JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    /// Whether snapshots should be mirrored to the debug sink.
    pub fn debug_panel_enabled(&self) -> bool {
        self.debug_panel.unwrap_or(!self.is_production())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Helper that loads config and converts to the canonical docrules error type.
pub fn load_builder_config() -> Result<BuilderConfig, DocRulesError> {
    Ok(BuilderConfig::from_env()?)
}
