use tracing::{debug, warn};

use crate::condition::{FieldCatalog, FieldName, VisibilityCondition};
use crate::error::RuleError;
use crate::vocabulary::{LogicalConnective, OperatorCode};

/// Inputs of the condition authoring form (step B).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionDraft {
    pub operator: Option<OperatorCode>,
    pub value: String,
    /// Radio selection; `None` while no connective radio is checked.
    pub connective: Option<LogicalConnective>,
}

/// Builds the ordered list of hide conditions for a document.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRuleEngine {
    catalog: FieldCatalog,
    checked: Vec<bool>,
    draft: ConditionDraft,
    conditions: Vec<VisibilityCondition>,
}

impl VisibilityRuleEngine {
    pub fn new(catalog: FieldCatalog) -> Self {
        let checked = vec![false; catalog.len()];
        Self {
            catalog,
            checked,
            draft: ConditionDraft::default(),
            conditions: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn conditions(&self) -> &[VisibilityCondition] {
        &self.conditions
    }

    pub fn draft(&self) -> &ConditionDraft {
        &self.draft
    }

    pub fn is_checked(&self, field: &str) -> bool {
        self.catalog
            .position(field)
            .map(|index| self.checked[index])
            .unwrap_or(false)
    }

    /// Checked fields in catalog order.
    pub fn selected_fields(&self) -> Vec<FieldName> {
        self.catalog
            .fields()
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(field, _)| field.clone())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        self.checked.iter().any(|checked| *checked)
    }

    /// Connective the next condition would be created with. The first
    /// condition of an empty list always joins with `and`.
    pub fn effective_connective(&self) -> LogicalConnective {
        if self.conditions.is_empty() {
            LogicalConnective::And
        } else {
            self.draft.connective.unwrap_or_default()
        }
    }

    pub fn toggle_field(&mut self, field: &str, checked: bool) -> Result<(), RuleError> {
        let index = self.catalog.require(field)?;
        self.checked[index] = checked;
        debug!(field, checked, "visibility field toggled");
        Ok(())
    }

    /// Chooses the operator; a blank code clears the choice.
    pub fn set_operator(&mut self, operator: impl Into<OperatorCode>) {
        let operator = operator.into();
        self.draft.operator = (!operator.is_empty()).then_some(operator);
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.draft.value = value.into();
    }

    pub fn set_connective(&mut self, connective: LogicalConnective) {
        self.draft.connective = Some(connective);
    }

    /// Appends one condition per selected field and resets the form.
    /// Returns the number of conditions added.
    pub fn add_condition(&mut self) -> Result<usize, RuleError> {
        let selected = self.selected_fields();
        if selected.is_empty() {
            warn!("add condition rejected: no field selected");
            return Err(RuleError::IncompleteInput("select at least one field"));
        }
        let Some(operator) = self.draft.operator.clone() else {
            warn!("add condition rejected: no operator chosen");
            return Err(RuleError::IncompleteInput("choose an operator"));
        };

        let connective = self.effective_connective();
        let value = self.draft.value.clone();
        let added = selected.len();
        let previous = self.conditions.len();

        self.conditions.extend(selected.into_iter().map(|field| {
            VisibilityCondition::new(field, operator.clone(), value.clone(), connective)
        }));

        self.checked.iter_mut().for_each(|checked| *checked = false);
        self.draft = ConditionDraft {
            connective: (previous > 0).then_some(LogicalConnective::And),
            ..ConditionDraft::default()
        };

        debug!(
            added,
            total = self.conditions.len(),
            operator = %operator,
            connective = %connective,
            "visibility conditions added"
        );
        Ok(added)
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<VisibilityCondition, RuleError> {
        if let Err(err) = RuleError::check_index(index, self.conditions.len()) {
            warn!(index, len = self.conditions.len(), "remove condition rejected");
            return Err(err);
        }
        let removed = self.conditions.remove(index);
        debug!(index, field = %removed.field, "visibility condition removed");
        Ok(removed)
    }

    /// Drops every condition, selection and draft input.
    pub fn reset(&mut self) {
        self.checked.iter_mut().for_each(|checked| *checked = false);
        self.draft = ConditionDraft::default();
        self.conditions.clear();
    }
}
