use serde::{Deserialize, Serialize};

use crate::vocabulary::{LogicalConnective, OperatorCode, TypeTag, CUSTOM_DATE_FORMAT};

/// Custom predicate attached to a field rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomValidation {
    pub operator: OperatorCode,
    #[serde(default)]
    pub value: String,
    #[serde(default, alias = "logicalOperator")]
    pub connective: LogicalConnective,
}

impl CustomValidation {
    /// Per-field validations are always joined with `and`.
    pub fn new(operator: impl Into<OperatorCode>, value: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            value: value.into(),
            connective: LogicalConnective::And,
        }
    }

    /// Renders `"<field> <symbol> <value>"`.
    pub fn message(&self, field: &str) -> String {
        format!("{} {} {}", field, self.operator.symbol(), self.value)
    }
}

/// Constraints configured for one document field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationRule {
    #[serde(default)]
    pub required: bool,
    /// Declared types. Set semantics, kept in the order they were added.
    #[serde(default)]
    pub types: Vec<TypeTag>,
    #[serde(default)]
    pub custom_validations: Vec<CustomValidation>,
    /// Only meaningful while `types` contains [`TypeTag::Date`].
    #[serde(default)]
    pub date_format: Option<String>,
}

impl FieldValidationRule {
    pub fn has_type(&self, tag: TypeTag) -> bool {
        self.types.contains(&tag)
    }

    pub fn has_date_type(&self) -> bool {
        self.has_type(TypeTag::Date)
    }

    /// Adds `tag`, returning whether the set changed.
    pub fn insert_type(&mut self, tag: TypeTag) -> bool {
        if self.has_type(tag) {
            return false;
        }
        self.types.push(tag);
        true
    }

    /// Removes `tag`, returning whether the set changed. Dropping `Date`
    /// also clears the date format.
    pub fn remove_type(&mut self, tag: TypeTag) -> bool {
        let before = self.types.len();
        self.types.retain(|existing| *existing != tag);
        if tag == TypeTag::Date {
            self.date_format = None;
        }
        self.types.len() != before
    }

    /// Whether the stored format is the bare custom sentinel.
    pub fn awaits_custom_format(&self) -> bool {
        self.date_format.as_deref() == Some(CUSTOM_DATE_FORMAT)
    }

    /// Entries of the sidebar validations summary.
    pub fn summary_parts(&self, field: &str) -> Vec<String> {
        let mut parts = Vec::with_capacity(self.custom_validations.len() + 1);
        if self.required {
            parts.push("required".to_string());
        }
        parts.extend(self.custom_validations.iter().map(|v| v.message(field)));
        parts
    }
}
