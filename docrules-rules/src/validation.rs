use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::condition::{FieldCatalog, FieldName};
use crate::error::RuleError;
use crate::rule::{CustomValidation, FieldValidationRule};
use crate::vocabulary::{default_rule, OperatorCode, TypeTag, CUSTOM_DATE_FORMAT};

/// Display state of the date-format selector inside the editing card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePanel {
    #[default]
    Closed,
    /// Format list visible.
    Open,
    /// Format list visible together with the free-text pattern input.
    CustomEntry,
}

impl DatePanel {
    /// Panel state shown when a card is (re)opened on `rule`: the pattern
    /// input while the bare `custom` sentinel is stored, the format list
    /// while `Date` is declared without a format.
    pub(crate) fn for_rule(rule: &FieldValidationRule) -> Self {
        if rule.awaits_custom_format() {
            DatePanel::CustomEntry
        } else if rule.has_date_type() && rule.date_format.is_none() {
            DatePanel::Open
        } else {
            DatePanel::Closed
        }
    }
}

/// Per-field validation rules, edited one field ("card") at a time.
#[derive(Debug, Clone, Default)]
pub struct FieldValidationEngine {
    catalog: FieldCatalog,
    rules: BTreeMap<FieldName, FieldValidationRule>,
    current: Option<FieldName>,
    date_panel: DatePanel,
    form_open: bool,
}

impl FieldValidationEngine {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &BTreeMap<FieldName, FieldValidationRule> {
        &self.rules
    }

    pub fn rule(&self, field: &str) -> Option<&FieldValidationRule> {
        self.rules.get(field)
    }

    pub fn current_field(&self) -> Option<&FieldName> {
        self.current.as_ref()
    }

    pub fn current_rule(&self) -> Option<&FieldValidationRule> {
        self.current.as_ref().and_then(|field| self.rules.get(field))
    }

    pub fn date_panel(&self) -> DatePanel {
        self.date_panel
    }

    pub fn is_validation_form_open(&self) -> bool {
        self.form_open
    }

    /// Opens the editing card for `field`, installing an empty rule on first
    /// visit. Any other open card is implicitly closed.
    pub fn select_field(&mut self, field: &str) -> Result<(), RuleError> {
        let index = self.catalog.require(field)?;
        let name = self.catalog.fields()[index].clone();
        let rule = self.rules.entry(name.clone()).or_insert_with(default_rule);
        self.date_panel = DatePanel::for_rule(rule);
        self.current = Some(name);
        self.form_open = false;
        debug!(field, "validation card opened");
        Ok(())
    }

    pub fn set_required(&mut self, required: bool) -> Result<(), RuleError> {
        let (field, rule) = self.current_mut()?;
        rule.required = required;
        debug!(field = %field, required, "required flag updated");
        Ok(())
    }

    /// Adds or removes a declared type. Returns whether the type set changed.
    pub fn toggle_type(&mut self, tag: TypeTag, on: bool) -> Result<bool, RuleError> {
        let (field, rule) = self.current_mut()?;
        let changed = if on {
            rule.insert_type(tag)
        } else {
            rule.remove_type(tag)
        };
        debug!(field = %field, tag = %tag, on, changed, "type toggled");

        if tag == TypeTag::Date {
            self.date_panel = if on { DatePanel::Open } else { DatePanel::Closed };
        }
        Ok(changed)
    }

    /// Picks a date format. `"custom"` keeps the pattern input open; any
    /// other value closes the selector.
    pub fn set_date_format(&mut self, format: &str) -> Result<(), RuleError> {
        let (field, rule) = self.current_mut()?;
        if !rule.has_date_type() {
            return Err(RuleError::DateTypeMissing {
                field: field.to_string(),
            });
        }
        rule.date_format = Some(format.to_string());
        debug!(field = %field, format, "date format selected");

        self.date_panel = if format == CUSTOM_DATE_FORMAT {
            DatePanel::CustomEntry
        } else {
            DatePanel::Closed
        };
        Ok(())
    }

    /// Stores the typed custom pattern as the effective format. Blank text
    /// falls back to the `"custom"` sentinel.
    pub fn set_custom_date_format(&mut self, pattern: &str) -> Result<(), RuleError> {
        let (field, rule) = self.current_mut()?;
        if !rule.has_date_type() {
            return Err(RuleError::DateTypeMissing {
                field: field.to_string(),
            });
        }
        let format = if pattern.is_empty() {
            CUSTOM_DATE_FORMAT
        } else {
            pattern
        };
        rule.date_format = Some(format.to_string());
        self.date_panel = DatePanel::CustomEntry;
        Ok(())
    }

    pub fn close_date_format_panel(&mut self) -> Result<(), RuleError> {
        self.current_mut()?;
        self.date_panel = DatePanel::Closed;
        Ok(())
    }

    pub fn open_validation_form(&mut self) -> Result<(), RuleError> {
        self.current_mut()?;
        self.form_open = true;
        Ok(())
    }

    pub fn cancel_validation_form(&mut self) -> Result<(), RuleError> {
        self.current_mut()?;
        self.form_open = false;
        Ok(())
    }

    /// Appends a custom validation joined with `and`. Returns its index.
    pub fn add_custom_validation(
        &mut self,
        operator: impl Into<OperatorCode>,
        value: impl Into<String>,
    ) -> Result<usize, RuleError> {
        let operator = operator.into();
        let (field, rule) = self.current_mut()?;
        if operator.is_empty() {
            warn!(field = %field, "add validation rejected: no operator chosen");
            return Err(RuleError::IncompleteInput("choose an operator"));
        }

        rule.custom_validations
            .push(CustomValidation::new(operator, value));
        let index = rule.custom_validations.len() - 1;
        debug!(field = %field, index, "custom validation added");

        self.form_open = false;
        Ok(index)
    }

    pub fn remove_custom_validation(&mut self, index: usize) -> Result<CustomValidation, RuleError> {
        let (field, rule) = self.current_mut()?;
        let len = rule.custom_validations.len();
        if let Err(err) = RuleError::check_index(index, len) {
            warn!(field = %field, index, len, "remove validation rejected");
            return Err(err);
        }
        let removed = rule.custom_validations.remove(index);
        debug!(field = %field, index, "custom validation removed");
        Ok(removed)
    }

    /// Removes the rule for `field` regardless of its content. Closes the
    /// card when `field` is the one being edited. Returns whether a rule
    /// existed.
    pub fn delete_field(&mut self, field: &str) -> bool {
        let existed = self.rules.remove(field).is_some();
        if self.current.as_ref().is_some_and(|current| current.as_str() == field) {
            self.close_card();
        }
        debug!(field, existed, "field rule deleted");
        existed
    }

    pub fn delete_current_field(&mut self) -> Result<(), RuleError> {
        let field = self.current.clone().ok_or_else(|| {
            warn!("delete card rejected: no field selected");
            RuleError::MissingTarget
        })?;
        self.delete_field(field.as_str());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.rules.clear();
        self.close_card();
    }

    fn close_card(&mut self) {
        self.current = None;
        self.date_panel = DatePanel::Closed;
        self.form_open = false;
    }

    fn current_mut(&mut self) -> Result<(&FieldName, &mut FieldValidationRule), RuleError> {
        let Some(field) = self.current.as_ref() else {
            warn!("field rule operation ignored: no field selected");
            return Err(RuleError::MissingTarget);
        };
        let rule = self
            .rules
            .get_mut(field.as_str())
            .ok_or(RuleError::MissingTarget)?;
        Ok((field, rule))
    }
}
