use std::path::PathBuf;

use docrules_core::DocRulesError;
use thiserror::Error;

/// Errors returned by the rule-builder engines and the replay loader.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("incomplete input: {0}")]
    IncompleteInput(&'static str),
    #[error("index {index} is out of range for {len} entries")]
    InvalidIndex { index: usize, len: usize },
    #[error("no field is currently selected")]
    MissingTarget,
    #[error("field is not part of the catalog: {0}")]
    UnknownField(String),
    #[error("field {field} does not declare the Date type")]
    DateTypeMissing { field: String },
    #[error("unknown {kind}: {value}")]
    UnknownVocabulary { kind: &'static str, value: String },
    #[error("script path does not exist: {0}")]
    MissingPath(String),
    #[error("failed to read script from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script from {path}: {message}")]
    Parse { path: String, message: String },
    #[error("failed to serialize rule set: {0}")]
    Serialization(String),
}

impl RuleError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RuleError::Io {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RuleError::Parse {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }

    /// Checks `index` against a list of `len` entries.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), RuleError> {
        if index < len {
            Ok(())
        } else {
            Err(RuleError::InvalidIndex { index, len })
        }
    }
}

impl From<RuleError> for DocRulesError {
    fn from(value: RuleError) -> Self {
        match value {
            RuleError::Io { source, .. } => DocRulesError::IoError(source),
            RuleError::Serialization(message) => DocRulesError::SerializationError(message),
            other => DocRulesError::RuleBuilder(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_checks_reject_upper_bound() {
        assert!(RuleError::check_index(0, 1).is_ok());
        assert!(matches!(
            RuleError::check_index(1, 1),
            Err(RuleError::InvalidIndex { index: 1, len: 1 })
        ));
        assert!(RuleError::check_index(0, 0).is_err());
    }
}
