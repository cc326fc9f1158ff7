use serde::{Deserialize, Serialize};

use crate::vocabulary::{LogicalConnective, OperatorCode, TypeTag};

/// One user action on the configuration screens. Each variant maps to
/// exactly one engine operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCommand {
    /// Check or uncheck a field in the visibility step A list.
    ToggleHideField { field: String, checked: bool },
    /// Pick the operator of the visibility condition form.
    SetConditionOperator { operator: OperatorCode },
    /// Type the value of the visibility condition form.
    SetConditionValue { value: String },
    /// Choose the connective radio of the visibility condition form.
    SetConditionConnective { connective: LogicalConnective },
    /// Confirm the visibility condition form.
    AddCondition,
    RemoveCondition { index: usize },

    /// Open the validation card for a field (sidebar radio).
    SelectField { field: String },
    SetRequired { required: bool },
    ToggleType { tag: TypeTag, on: bool },
    SetDateFormat { format: String },
    /// Free-text input shown for the `custom` date format.
    SetCustomDateFormat { pattern: String },
    /// Confirm button or Enter key in the custom date input.
    CloseDateFormat,
    OpenValidationForm,
    CancelValidationForm,
    AddCustomValidation {
        operator: OperatorCode,
        #[serde(default)]
        value: String,
    },
    RemoveCustomValidation { index: usize },
    /// Sidebar delete button of a field.
    DeleteField { field: String },
    /// Delete button of the open card.
    DeleteCurrentField,
}

impl RuleCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RuleCommand::ToggleHideField { .. } => "toggle_hide_field",
            RuleCommand::SetConditionOperator { .. } => "set_condition_operator",
            RuleCommand::SetConditionValue { .. } => "set_condition_value",
            RuleCommand::SetConditionConnective { .. } => "set_condition_connective",
            RuleCommand::AddCondition => "add_condition",
            RuleCommand::RemoveCondition { .. } => "remove_condition",
            RuleCommand::SelectField { .. } => "select_field",
            RuleCommand::SetRequired { .. } => "set_required",
            RuleCommand::ToggleType { .. } => "toggle_type",
            RuleCommand::SetDateFormat { .. } => "set_date_format",
            RuleCommand::SetCustomDateFormat { .. } => "set_custom_date_format",
            RuleCommand::CloseDateFormat => "close_date_format",
            RuleCommand::OpenValidationForm => "open_validation_form",
            RuleCommand::CancelValidationForm => "cancel_validation_form",
            RuleCommand::AddCustomValidation { .. } => "add_custom_validation",
            RuleCommand::RemoveCustomValidation { .. } => "remove_custom_validation",
            RuleCommand::DeleteField { .. } => "delete_field",
            RuleCommand::DeleteCurrentField => "delete_current_field",
        }
    }
}
