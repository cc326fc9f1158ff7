use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::condition::{FieldName, VisibilityCondition};
use crate::error::RuleError;
use crate::rule::FieldValidationRule;
use crate::vocabulary::is_significant;

/// Snapshot exchanged with the sink: field rules plus visibility conditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetPayload {
    #[serde(default, alias = "validationRules")]
    pub field_validation_rules: BTreeMap<FieldName, FieldValidationRule>,
    #[serde(default, alias = "hiddenConditions")]
    pub visibility_conditions: Vec<VisibilityCondition>,
}

impl RuleSetPayload {
    /// Builds a snapshot, dropping field rules that carry no constraint.
    pub fn from_state(
        rules: &BTreeMap<FieldName, FieldValidationRule>,
        conditions: &[VisibilityCondition],
    ) -> Self {
        Self {
            field_validation_rules: prune_insignificant(rules),
            visibility_conditions: conditions.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_validation_rules.is_empty() && self.visibility_conditions.is_empty()
    }

    pub fn rule(&self, field: &str) -> Option<&FieldValidationRule> {
        self.field_validation_rules.get(field)
    }

    /// Compact JSON, as embedded in a form submission.
    pub fn to_json(&self) -> Result<String, RuleError> {
        docrules_core::serde_utils::to_compact_json(self)
            .map_err(|err| RuleError::Serialization(err.to_string()))
    }

    /// Reads a snapshot previously stored as JSON, e.g. a hidden form field.
    pub fn from_json(raw: &str) -> Result<Self, RuleError> {
        docrules_core::serde_utils::from_json_str(raw)
            .map_err(|err| RuleError::Serialization(err.to_string()))
    }

    /// Indented JSON for inspection panels.
    pub fn to_pretty_json(&self) -> Result<String, RuleError> {
        docrules_core::serde_utils::to_pretty_json(self)
            .map_err(|err| RuleError::Serialization(err.to_string()))
    }
}

/// Keeps only the significant entries of a rule map.
pub fn prune_insignificant(
    rules: &BTreeMap<FieldName, FieldValidationRule>,
) -> BTreeMap<FieldName, FieldValidationRule> {
    rules
        .iter()
        .filter(|(_, rule)| is_significant(rule))
        .map(|(field, rule)| (field.clone(), rule.clone()))
        .collect()
}

/// Template build that a finished rule set is persisted against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionTarget {
    pub template_uuid: String,
    pub build_number: String,
}

impl SubmissionTarget {
    pub fn new(template_uuid: impl Into<String>, build_number: impl Into<String>) -> Self {
        Self {
            template_uuid: template_uuid.into(),
            build_number: build_number.into(),
        }
    }

    /// Relative API path of the external action that stores the rules.
    pub fn endpoint_path(&self) -> String {
        format!(
            "documents/validate/variables/{}/{}",
            encode_path_segment(&self.template_uuid),
            encode_path_segment(&self.build_number)
        )
    }
}

fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
