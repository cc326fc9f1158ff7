//! Pure projections of engine state for a rendering adapter.
//!
//! Views hold no state of their own: they are recomputed from the engines
//! after every command and can be rebuilt at any time.

use serde::Serialize;

use crate::validation::{DatePanel, FieldValidationEngine};
use crate::visibility::VisibilityRuleEngine;
use crate::vocabulary::{
    is_significant, LogicalConnective, Operator, OperatorCode, TypeTag, CUSTOM_DATE_FORMAT, CUSTOM_DATE_FORMAT_LABEL,
    DATE_FORMAT_PRESETS,
};

pub const DEFAULT_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldToggleView {
    pub field: String,
    pub checked: bool,
}

/// Entry of an operator dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorOptionView {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectiveOptionView {
    pub connective: LogicalConnective,
    pub label: &'static str,
    pub checked: bool,
}

fn operator_options(selected: Option<&OperatorCode>) -> Vec<OperatorOptionView> {
    Operator::ALL
        .into_iter()
        .map(|operator| OperatorOptionView {
            code: operator.code(),
            label: operator.label(),
            selected: selected.is_some_and(|code| code.as_str() == operator.code()),
        })
        .collect()
}

/// Step B: the authoring form, shown while at least one field is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionFormView {
    pub selected_fields: Vec<String>,
    pub show_connective: bool,
    pub connective: LogicalConnective,
    pub connectives: Vec<ConnectiveOptionView>,
    pub operator: Option<String>,
    pub operators: Vec<OperatorOptionView>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionItemView {
    pub index: usize,
    pub field: String,
    pub symbol: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilityView {
    pub fields: Vec<FieldToggleView>,
    pub form: Option<ConditionFormView>,
    pub conditions: Vec<ConditionItemView>,
}

impl VisibilityView {
    pub fn project(engine: &VisibilityRuleEngine) -> Self {
        let fields = engine
            .catalog()
            .fields()
            .iter()
            .map(|field| FieldToggleView {
                field: field.to_string(),
                checked: engine.is_checked(field.as_str()),
            })
            .collect();

        let form = engine.has_selection().then(|| {
            let connective = engine.effective_connective();
            let operator = engine.draft().operator.as_ref();
            ConditionFormView {
                selected_fields: engine
                    .selected_fields()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                show_connective: !engine.conditions().is_empty(),
                connective,
                connectives: LogicalConnective::ALL
                    .into_iter()
                    .map(|option| ConnectiveOptionView {
                        connective: option,
                        label: option.label(),
                        checked: option == connective,
                    })
                    .collect(),
                operator: operator.map(ToString::to_string),
                operators: operator_options(operator),
                value: engine.draft().value.clone(),
            }
        });

        let conditions = engine
            .conditions()
            .iter()
            .enumerate()
            .map(|(index, condition)| ConditionItemView {
                index,
                field: condition.field.to_string(),
                symbol: condition.operator.symbol().to_string(),
                value: condition.value.clone(),
                message: condition.message(),
            })
            .collect();

        Self {
            fields,
            form,
            conditions,
        }
    }

    pub fn shows_form_empty_state(&self) -> bool {
        self.form.is_none()
    }

    pub fn shows_conditions_empty_state(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfoView {
    pub types_text: String,
    pub validations_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItemView {
    pub field: String,
    pub selected: bool,
    pub required_badge: bool,
    /// Present iff the field carries a significant rule; the delete button
    /// is shown alongside it.
    pub info: Option<FieldInfoView>,
}

impl SidebarItemView {
    pub fn shows_delete(&self) -> bool {
        self.info.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeOptionView {
    pub tag: TypeTag,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateFormatView {
    pub selector_open: bool,
    pub custom_input_open: bool,
    pub label: Option<String>,
    pub options: Vec<DateOptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationItemView {
    pub index: usize,
    pub symbol: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub field: String,
    pub required: bool,
    pub types: Vec<TypeOptionView>,
    pub date_format: DateFormatView,
    pub form_open: bool,
    /// Operator dropdown of the custom validation form.
    pub operators: Vec<OperatorOptionView>,
    pub validations: Vec<ValidationItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationView {
    pub sidebar: Vec<SidebarItemView>,
    pub card: Option<CardView>,
}

impl FieldValidationView {
    pub fn project(engine: &FieldValidationEngine) -> Self {
        Self::project_with(engine, DEFAULT_PLACEHOLDER)
    }

    pub fn project_with(engine: &FieldValidationEngine, placeholder: &str) -> Self {
        let current = engine.current_field();

        let sidebar = engine
            .catalog()
            .fields()
            .iter()
            .map(|field| {
                let rule = engine.rule(field.as_str());
                let info = rule.filter(|rule| is_significant(rule)).map(|rule| {
                    let parts = rule.summary_parts(field.as_str());
                    FieldInfoView {
                        types_text: join_or(
                            rule.types.iter().map(|tag| tag.as_str()),
                            placeholder,
                        ),
                        validations_text: join_or(parts.iter().map(String::as_str), placeholder),
                    }
                });

                SidebarItemView {
                    field: field.to_string(),
                    selected: current == Some(field),
                    required_badge: rule.is_some_and(|rule| rule.required),
                    info,
                }
            })
            .collect();

        let card = current
            .zip(engine.current_rule())
            .map(|(field, rule)| {
                let date_format = rule.date_format.as_deref();
                let is_custom_pattern = date_format.is_some_and(|format| {
                    !DATE_FORMAT_PRESETS.iter().any(|preset| preset.value == format)
                });

                CardView {
                    field: field.to_string(),
                    required: rule.required,
                    types: TypeTag::ALL
                        .into_iter()
                        .map(|tag| TypeOptionView {
                            tag,
                            label: tag.label(),
                            checked: rule.has_type(tag),
                        })
                        .collect(),
                    date_format: DateFormatView {
                        selector_open: engine.date_panel() != DatePanel::Closed,
                        custom_input_open: engine.date_panel() == DatePanel::CustomEntry,
                        label: date_format.filter(|_| rule.has_date_type()).map(|format| {
                            if format == CUSTOM_DATE_FORMAT {
                                CUSTOM_DATE_FORMAT_LABEL.to_string()
                            } else {
                                format.to_string()
                            }
                        }),
                        options: DATE_FORMAT_PRESETS
                            .iter()
                            .map(|preset| DateOptionView {
                                value: preset.value,
                                label: preset.label,
                                checked: date_format == Some(preset.value)
                                    || (preset.value == CUSTOM_DATE_FORMAT && is_custom_pattern),
                            })
                            .collect(),
                    },
                    form_open: engine.is_validation_form_open(),
                    operators: operator_options(None),
                    validations: rule
                        .custom_validations
                        .iter()
                        .enumerate()
                        .map(|(index, validation)| ValidationItemView {
                            index,
                            symbol: validation.operator.symbol().to_string(),
                            value: validation.value.clone(),
                            message: validation.message(field.as_str()),
                        })
                        .collect(),
                }
            });

        Self { sidebar, card }
    }

    pub fn sidebar_item(&self, field: &str) -> Option<&SidebarItemView> {
        self.sidebar.iter().find(|item| item.field == field)
    }
}

fn join_or<'a>(parts: impl Iterator<Item = &'a str>, placeholder: &str) -> String {
    let joined = parts.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::FieldCatalog;
    use crate::vocabulary::Operator;

    #[test]
    fn visibility_steps_follow_state() {
        let mut engine = VisibilityRuleEngine::new(FieldCatalog::new(["title", "total"]));
        let view = VisibilityView::project(&engine);
        assert!(view.shows_form_empty_state());
        assert!(view.shows_conditions_empty_state());

        engine.toggle_field("total", true).expect("toggle");
        let view = VisibilityView::project(&engine);
        let form = view.form.expect("form visible");
        assert_eq!(form.selected_fields, vec!["total".to_string()]);
        assert!(!form.show_connective);

        engine.set_operator(Operator::GreaterThan);
        engine.set_value("100");
        engine.add_condition().expect("add");
        engine.toggle_field("title", true).expect("toggle");

        engine.set_operator(Operator::Contains);
        engine.set_connective(LogicalConnective::Or);

        let view = VisibilityView::project(&engine);
        let form = view.form.as_ref().expect("form visible");
        assert!(form.show_connective);
        assert_eq!(form.connective, LogicalConnective::Or);
        let checked: Vec<&str> = form
            .connectives
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.label)
            .collect();
        assert_eq!(checked, vec!["OR"]);
        let selected: Vec<&str> = form
            .operators
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label)
            .collect();
        assert_eq!(selected, vec!["Contains (includes)"]);
        assert_eq!(form.operators.len(), Operator::ALL.len());
        assert_eq!(view.conditions[0].message, "total > 100");
        assert_eq!(view.conditions[0].symbol, ">");
    }

    #[test]
    fn required_only_field_summary() {
        let mut engine = FieldValidationEngine::new(FieldCatalog::new(["amount", "notes"]));
        engine.select_field("amount").expect("select");
        engine.set_required(true).expect("required");

        let view = FieldValidationView::project(&engine);
        let item = view.sidebar_item("amount").expect("sidebar item");
        assert!(item.required_badge);
        assert!(item.selected);
        assert!(item.shows_delete());
        let info = item.info.as_ref().expect("info");
        assert_eq!(info.types_text, "-");
        assert_eq!(info.validations_text, "required");

        let notes = view.sidebar_item("notes").expect("sidebar item");
        assert!(!notes.required_badge);
        assert!(notes.info.is_none());
    }

    #[test]
    fn summary_joins_types_and_validations() {
        let mut engine = FieldValidationEngine::new(FieldCatalog::new(["amount"]));
        engine.select_field("amount").expect("select");
        engine.toggle_type(TypeTag::Number, true).expect("toggle");
        engine.toggle_type(TypeTag::String, true).expect("toggle");
        engine
            .add_custom_validation(Operator::GreaterThan, "0")
            .expect("add");
        engine
            .add_custom_validation("between", "1..9")
            .expect("add");

        let view = FieldValidationView::project_with(&engine, "n/a");
        let info = view.sidebar[0].info.as_ref().expect("info");
        assert_eq!(info.types_text, "Number, String");
        assert_eq!(info.validations_text, "amount > 0, amount between 1..9");

        let card = view.card.expect("card");
        assert_eq!(card.validations[1].symbol, "between");
        assert!(card
            .types
            .iter()
            .any(|option| option.tag == TypeTag::Number && option.checked));
        assert!(card
            .types
            .iter()
            .any(|option| option.tag == TypeTag::String && option.label == "Text"));
        assert!(card.operators.iter().all(|option| !option.selected));
        assert_eq!(card.operators[0].label, "Equal to (==)");
    }

    #[test]
    fn custom_date_pattern_projection() {
        let mut engine = FieldValidationEngine::new(FieldCatalog::new(["issued_at"]));
        engine.select_field("issued_at").expect("select");
        engine.toggle_type(TypeTag::Date, true).expect("toggle");
        engine.set_date_format(CUSTOM_DATE_FORMAT).expect("format");

        let card = FieldValidationView::project(&engine).card.expect("card");
        assert!(card.date_format.selector_open);
        assert!(card.date_format.custom_input_open);
        assert_eq!(card.date_format.label.as_deref(), Some(CUSTOM_DATE_FORMAT_LABEL));

        engine.set_custom_date_format("DD/MM").expect("pattern");
        engine.close_date_format_panel().expect("close");
        let card = FieldValidationView::project(&engine).card.expect("card");
        assert!(!card.date_format.selector_open);
        assert_eq!(card.date_format.label.as_deref(), Some("DD/MM"));
        let checked: Vec<&str> = card
            .date_format
            .options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.value)
            .collect();
        assert_eq!(checked, vec![CUSTOM_DATE_FORMAT]);
    }

    #[test]
    fn reopened_card_shows_pending_custom_input() {
        let mut engine = FieldValidationEngine::new(FieldCatalog::new(["amount", "issued_at"]));
        engine.select_field("issued_at").expect("select");
        engine.toggle_type(TypeTag::Date, true).expect("toggle");
        engine.set_date_format(CUSTOM_DATE_FORMAT).expect("format");

        engine.select_field("amount").expect("select");
        let card = FieldValidationView::project(&engine).card.expect("card");
        assert!(!card.date_format.selector_open);

        engine.select_field("issued_at").expect("select");
        let card = FieldValidationView::project(&engine).card.expect("card");
        assert!(card.date_format.selector_open);
        assert!(card.date_format.custom_input_open);
        assert_eq!(card.date_format.label.as_deref(), Some(CUSTOM_DATE_FORMAT_LABEL));
    }

    #[test]
    fn no_card_without_selection() {
        let engine = FieldValidationEngine::new(FieldCatalog::new(["amount"]));
        let view = FieldValidationView::project(&engine);
        assert!(view.card.is_none());
        assert!(!view.sidebar[0].selected);
    }
}
