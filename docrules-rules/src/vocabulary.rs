//! Shared rule vocabulary used by both rule-builder engines.
//!
//! Operators travel through payloads as raw codes ([`OperatorCode`]) so that
//! codes added server-side survive a round trip; the projections below fall
//! back to the raw code whenever it does not resolve to a known [`Operator`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::rule::FieldValidationRule;

/// Closed set of comparison operators understood by the rule builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    Regex,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Contains,
        Operator::Regex,
    ];

    /// Stable machine code carried in payloads.
    pub fn code(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::GreaterOrEqual => "greater_or_equal",
            Operator::LessOrEqual => "less_or_equal",
            Operator::Contains => "contains",
            Operator::Regex => "regex",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Contains => "includes",
            Operator::Regex => "regex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operator::Equals => "Equal to (==)",
            Operator::NotEquals => "Not equal to (!=)",
            Operator::GreaterThan => "Greater than (>)",
            Operator::LessThan => "Less than (<)",
            Operator::GreaterOrEqual => "Greater than or equal to (>=)",
            Operator::LessOrEqual => "Less than or equal to (<=)",
            Operator::Contains => "Contains (includes)",
            Operator::Regex => "Regular expression (regex)",
        }
    }

    /// Resolves a payload code, including the codes emitted by the legacy
    /// Spanish-language configuration screens.
    pub fn from_code(code: &str) -> Option<Self> {
        let operator = match code {
            "equals" | "igual_a" => Operator::Equals,
            "not_equals" | "diferente_de" => Operator::NotEquals,
            "greater_than" | "mayor_que" => Operator::GreaterThan,
            "less_than" | "menor_que" => Operator::LessThan,
            "greater_or_equal" | "mayor_que_igual_a" => Operator::GreaterOrEqual,
            "less_or_equal" | "menor_que_igual_a" => Operator::LessOrEqual,
            "contains" | "contiene" => Operator::Contains,
            "regex" | "expresion_regular" => Operator::Regex,
            _ => return None,
        };
        Some(operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw operator code as stored in conditions and custom validations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OperatorCode(String);

impl OperatorCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn known(&self) -> Option<Operator> {
        Operator::from_code(&self.0)
    }

    pub fn symbol(&self) -> &str {
        operator_symbol(&self.0)
    }

    pub fn label(&self) -> &str {
        operator_label(&self.0)
    }
}

impl From<Operator> for OperatorCode {
    fn from(value: Operator) -> Self {
        OperatorCode::new(value.code())
    }
}

impl From<&str> for OperatorCode {
    fn from(value: &str) -> Self {
        OperatorCode::new(value)
    }
}

impl From<String> for OperatorCode {
    fn from(value: String) -> Self {
        OperatorCode::new(value)
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the fixed symbol for a known operator code, or the code itself.
pub fn operator_symbol(code: &str) -> &str {
    match Operator::from_code(code) {
        Some(operator) => operator.symbol(),
        None => code,
    }
}

/// Returns the human label for a known operator code, or the code itself.
pub fn operator_label(code: &str) -> &str {
    match Operator::from_code(code) {
        Some(operator) => operator.label(),
        None => code,
    }
}

/// Join semantics between successive conditions or validations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalConnective {
    #[default]
    And,
    Or,
}

impl LogicalConnective {
    pub const ALL: [LogicalConnective; 2] = [LogicalConnective::And, LogicalConnective::Or];

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalConnective::And => "and",
            LogicalConnective::Or => "or",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogicalConnective::And => "AND",
            LogicalConnective::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalConnective {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(LogicalConnective::And),
            "or" => Ok(LogicalConnective::Or),
            other => Err(RuleError::UnknownVocabulary {
                kind: "connective",
                value: other.to_string(),
            }),
        }
    }
}

/// Data type a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
}

impl TypeTag {
    pub const ALL: [TypeTag; 6] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "String",
            TypeTag::Number => "Number",
            TypeTag::Boolean => "Boolean",
            TypeTag::Array => "Array",
            TypeTag::Object => "Object",
            TypeTag::Date => "Date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeTag::String => "Text",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| RuleError::UnknownVocabulary {
                kind: "type",
                value: value.to_string(),
            })
    }
}

/// Sentinel date format that opens the free-text pattern input.
pub const CUSTOM_DATE_FORMAT: &str = "custom";

/// Label shown for the custom date format until a pattern is typed.
pub const CUSTOM_DATE_FORMAT_LABEL: &str = "Custom";

/// A selectable date format entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatPreset {
    pub value: &'static str,
    pub label: &'static str,
}

pub const DATE_FORMAT_PRESETS: [DateFormatPreset; 5] = [
    DateFormatPreset {
        value: "YYYY-MM-DD",
        label: "YYYY-MM-DD (2024-12-20)",
    },
    DateFormatPreset {
        value: "MM-DD-YYYY",
        label: "MM-DD-YYYY (12-20-2024)",
    },
    DateFormatPreset {
        value: "MM/DD/YYYY",
        label: "MM/DD/YYYY (12/20/2024)",
    },
    DateFormatPreset {
        value: "DD de MMMM de YYYY",
        label: "DD de MMMM de YYYY (20 de diciembre de 2024)",
    },
    DateFormatPreset {
        value: CUSTOM_DATE_FORMAT,
        label: CUSTOM_DATE_FORMAT_LABEL,
    },
];

/// Returns a fresh rule carrying no constraints.
pub fn default_rule() -> FieldValidationRule {
    FieldValidationRule::default()
}

/// Whether the rule carries at least one real constraint.
///
/// `date_format` does not count: a format without any type, required flag
/// or custom validation is still an empty placeholder.
pub fn is_significant(rule: &FieldValidationRule) -> bool {
    rule.required || !rule.types.is_empty() || !rule.custom_validations.is_empty()
}
