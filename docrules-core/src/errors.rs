use std::io;

use thiserror::Error;

/// Result type used across the docrules crates.
pub type Result<T> = std::result::Result<T, DocRulesError>;

/// Canonical error representation shared by the docrules crates.
#[derive(Debug, Error)]
pub enum DocRulesError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("deserialization error: {0}")]
    DeserializationError(String),

    #[error("rule builder error: {0}")]
    RuleBuilder(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

impl From<serde_json::Error> for DocRulesError {
    fn from(err: serde_json::Error) -> Self {
        DocRulesError::DeserializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DocRulesError {
    fn from(err: serde_yaml::Error) -> Self {
        DocRulesError::DeserializationError(err.to_string())
    }
}

impl From<anyhow::Error> for DocRulesError {
    fn from(err: anyhow::Error) -> Self {
        DocRulesError::GeneralError(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {key}: {value}")]
    InvalidEnvVar { key: String, value: String },

    #[error("failed to read configuration from {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration from {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<ConfigError> for DocRulesError {
    fn from(value: ConfigError) -> Self {
        DocRulesError::ConfigError(value.to_string())
    }
}
