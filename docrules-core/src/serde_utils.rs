use crate::errors::{DocRulesError, Result};

/// Serializes a value to pretty JSON with canonical error handling.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| DocRulesError::SerializationError(err.to_string()))
}

/// Serializes a value to compact JSON, as embedded in form submissions.
pub fn to_compact_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| DocRulesError::SerializationError(err.to_string()))
}

/// Deserializes a JSON string into the provided type with shared error semantics.
pub fn from_json_str<T: serde::de::DeserializeOwned>(input: &str) -> Result<T> {
    serde_json::from_str(input).map_err(|err| DocRulesError::DeserializationError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_output_has_no_newlines() {
        let value = serde_json::json!({"fields": ["amount", "issued_at"]});
        let json = to_compact_json(&value).expect("serialize");
        assert!(!json.contains('\n'));

        let pretty = to_pretty_json(&value).expect("serialize");
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn reports_malformed_input() {
        let err = from_json_str::<serde_json::Value>("{\"open\": ").unwrap_err();
        assert!(matches!(err, DocRulesError::DeserializationError(_)));
    }
}
