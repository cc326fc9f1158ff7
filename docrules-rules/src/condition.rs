use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::vocabulary::{LogicalConnective, OperatorCode};

/// Name of a document field, e.g. `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        FieldName::new(value)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        FieldName::new(value)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered set of field names available for the current document.
///
/// The order is the checkbox/radio order of the configuration screens and
/// drives every fan-out and sidebar iteration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<FieldName>", into = "Vec<FieldName>")]
pub struct FieldCatalog(Vec<FieldName>);

impl From<Vec<FieldName>> for FieldCatalog {
    fn from(value: Vec<FieldName>) -> Self {
        FieldCatalog::new(value)
    }
}

impl From<FieldCatalog> for Vec<FieldName> {
    fn from(value: FieldCatalog) -> Self {
        value.0
    }
}

impl FieldCatalog {
    /// Builds a catalog, dropping blank names and repeated entries.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        let mut names: Vec<FieldName> = Vec::new();
        for field in fields {
            let field = field.into();
            if field.as_str().trim().is_empty() || names.contains(&field) {
                continue;
            }
            names.push(field);
        }
        Self(names)
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.0.iter().position(|name| name.as_str() == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    pub(crate) fn require(&self, field: &str) -> Result<usize, RuleError> {
        self.position(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))
    }
}

/// "Hide this content when `field operator value` holds", joined to the
/// preceding conditions with `connective`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibilityCondition {
    pub field: FieldName,
    pub operator: OperatorCode,
    #[serde(default)]
    pub value: String,
    #[serde(default, alias = "logicalOperator")]
    pub connective: LogicalConnective,
}

impl VisibilityCondition {
    pub fn new(
        field: impl Into<FieldName>,
        operator: impl Into<OperatorCode>,
        value: impl Into<String>,
        connective: LogicalConnective,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            connective,
        }
    }

    /// Renders `"<field> <symbol> <value>"`.
    pub fn message(&self) -> String {
        format!(
            "{} {} {}",
            self.field,
            self.operator.symbol(),
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Operator;

    #[test]
    fn catalog_keeps_first_occurrence_order() {
        let catalog = FieldCatalog::new(["b", "a", "b", " ", "c"]);
        let names: Vec<&str> = catalog.fields().iter().map(FieldName::as_str).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(catalog.position("c"), Some(2));
        assert!(matches!(
            catalog.require("zzz"),
            Err(RuleError::UnknownField(name)) if name == "zzz"
        ));
    }

    #[test]
    fn message_uses_operator_symbol() {
        let condition =
            VisibilityCondition::new("status", Operator::NotEquals, "draft", LogicalConnective::Or);
        assert_eq!(condition.message(), "status != draft");

        let unknown = VisibilityCondition::new("status", "starts_with", "dr", LogicalConnective::And);
        assert_eq!(unknown.message(), "status starts_with dr");
    }

    #[test]
    fn reads_legacy_condition_shape() {
        let condition: VisibilityCondition = serde_json::from_str(
            r#"{"field":"total","operator":"mayor_que","value":"10","logicalOperator":"and"}"#,
        )
        .expect("deserialize");
        assert_eq!(condition.message(), "total > 10");
    }
}
