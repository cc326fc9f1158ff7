// Scenario tests driving a full validation session through commands.
use std::sync::Arc;

use docrules::rules::vocabulary::CUSTOM_DATE_FORMAT;
use docrules::rules::{
    FieldCatalog, FieldValidationView, LogicalConnective, Operator, RecordingSink, RuleCommand,
    RuleError, TypeTag, ValidationSession,
};
use docrules::BuilderConfig;
use serde_json::json;
use test_case::test_case;

fn quiet_session(fields: &[&str]) -> (ValidationSession, RecordingSink) {
    let sink = RecordingSink::new();
    let config = BuilderConfig {
        debug_panel: Some(false),
        ..BuilderConfig::default()
    };
    let session = ValidationSession::with_config(
        FieldCatalog::new(fields.iter().copied()),
        Arc::new(sink.clone()),
        &config,
    );
    (session, sink)
}

fn select(field: &str) -> RuleCommand {
    RuleCommand::SelectField {
        field: field.to_string(),
    }
}

#[test]
fn empty_submission() {
    let (session, sink) = quiet_session(&["amount", "issued_at"]);
    let expected = json!({"fieldValidationRules": {}, "visibilityConditions": []});

    assert_eq!(serde_json::to_value(session.payload()).expect("json"), expected);
    let published = sink.latest_payload().expect("initial snapshot");
    assert_eq!(serde_json::to_value(published).expect("json"), expected);
}

#[test]
fn required_only_field() {
    let (mut session, sink) = quiet_session(&["amount"]);
    session
        .replay(vec![select("amount"), RuleCommand::SetRequired { required: true }])
        .expect("replay");

    let rule = session.fields().rule("amount").expect("rule").clone();
    assert!(docrules::rules::is_significant(&rule));
    assert!(sink
        .latest_payload()
        .is_some_and(|payload| payload.rule("amount") == Some(&rule)));

    let view = session.field_view();
    let item = view.sidebar_item("amount").expect("sidebar item");
    assert!(item.required_badge);
    assert_eq!(
        item.info.as_ref().map(|info| info.validations_text.as_str()),
        Some("required")
    );
}

#[test]
fn delete_active_field() {
    let (mut session, sink) = quiet_session(&["amount", "notes"]);
    session
        .replay(vec![
            select("amount"),
            RuleCommand::SetRequired { required: true },
            RuleCommand::DeleteField {
                field: "amount".into(),
            },
        ])
        .expect("replay");

    assert_eq!(session.fields().current_field(), None);
    assert!(session.fields().rule("amount").is_none());
    assert!(session.field_view().card.is_none());
    assert!(sink.latest_payload().is_some_and(|payload| payload.is_empty()));
}

#[test]
fn custom_format_entry() {
    let (mut session, _sink) = quiet_session(&["issued_at"]);
    session
        .replay(vec![
            select("issued_at"),
            RuleCommand::ToggleType {
                tag: TypeTag::Date,
                on: true,
            },
            RuleCommand::SetDateFormat {
                format: CUSTOM_DATE_FORMAT.into(),
            },
            RuleCommand::SetCustomDateFormat {
                pattern: "DD/MM".into(),
            },
        ])
        .expect("replay");

    let payload = session.payload();
    let rule = payload.rule("issued_at").expect("rule");
    assert_eq!(rule.date_format.as_deref(), Some("DD/MM"));
    assert_eq!(rule.types, vec![TypeTag::Date]);
}

#[test]
fn condition_fan_out() {
    let (mut session, _sink) = quiet_session(&["A", "B", "C"]);
    let mut commands: Vec<RuleCommand> = ["A", "B", "C"]
        .into_iter()
        .map(|field| RuleCommand::ToggleHideField {
            field: field.into(),
            checked: true,
        })
        .collect();
    commands.extend([
        RuleCommand::SetConditionOperator {
            operator: Operator::Contains.into(),
        },
        RuleCommand::SetConditionValue { value: "x".into() },
        RuleCommand::SetConditionConnective {
            connective: LogicalConnective::And,
        },
        RuleCommand::AddCondition,
    ]);
    session.replay(commands).expect("replay");

    assert_eq!(
        serde_json::to_value(&session.payload().visibility_conditions).expect("json"),
        json!([
            {"field": "A", "operator": "contains", "value": "x", "connective": "and"},
            {"field": "B", "operator": "contains", "value": "x", "connective": "and"},
            {"field": "C", "operator": "contains", "value": "x", "connective": "and"}
        ])
    );
}

#[test]
fn order_preserved_after_removing_first_validation() {
    let (mut session, _sink) = quiet_session(&["amount"]);
    let mut commands = vec![select("amount")];
    commands.extend(["10", "20", "30"].into_iter().map(|value| {
        RuleCommand::AddCustomValidation {
            operator: Operator::LessThan.into(),
            value: value.into(),
        }
    }));
    commands.push(RuleCommand::RemoveCustomValidation { index: 0 });
    session.replay(commands).expect("replay");

    let messages: Vec<String> = session
        .field_view()
        .card
        .expect("card")
        .validations
        .into_iter()
        .map(|item| item.message)
        .collect();
    assert_eq!(messages, vec!["amount < 20", "amount < 30"]);
}

#[test_case(true ; "adding twice")]
#[test_case(false ; "removing absent")]
fn type_toggling_is_idempotent(on: bool) {
    let (mut session, _sink) = quiet_session(&["amount"]);
    session.dispatch(select("amount")).expect("select");
    if on {
        session
            .dispatch(RuleCommand::ToggleType {
                tag: TypeTag::Number,
                on: true,
            })
            .expect("toggle");
    }
    let before = session.fields().rule("amount").cloned();

    session
        .dispatch(RuleCommand::ToggleType {
            tag: TypeTag::Number,
            on,
        })
        .expect("toggle");

    assert_eq!(session.fields().rule("amount").cloned(), before);
}

#[test_case(RuleCommand::RemoveCondition { index: 0 } ; "visibility condition")]
#[test_case(RuleCommand::RemoveCustomValidation { index: 5 } ; "custom validation")]
fn out_of_range_removal_is_reported(command: RuleCommand) {
    let (mut session, sink) = quiet_session(&["amount"]);
    session.dispatch(select("amount")).expect("select");
    let published = sink.len();

    let err = session.dispatch(command).unwrap_err();
    assert!(matches!(err, RuleError::InvalidIndex { .. }));
    assert_eq!(sink.len(), published);
}

#[test_case(RuleCommand::SetRequired { required: true } ; "required flag")]
#[test_case(RuleCommand::ToggleType { tag: TypeTag::Date, on: true } ; "type toggle")]
#[test_case(RuleCommand::CloseDateFormat ; "date panel")]
#[test_case(RuleCommand::RemoveCustomValidation { index: 0 } ; "validation removal")]
fn field_commands_need_a_target(command: RuleCommand) {
    let (mut session, _sink) = quiet_session(&["amount"]);
    let err = session.dispatch(command).unwrap_err();
    assert!(matches!(err, RuleError::MissingTarget));
    assert!(session.fields().rules().is_empty());
}

#[test]
fn date_format_never_outlives_date_type() {
    let (mut session, _sink) = quiet_session(&["issued_at"]);
    session
        .replay(vec![
            select("issued_at"),
            RuleCommand::ToggleType {
                tag: TypeTag::Date,
                on: true,
            },
            RuleCommand::SetDateFormat {
                format: "MM/DD/YYYY".into(),
            },
            RuleCommand::ToggleType {
                tag: TypeTag::String,
                on: true,
            },
            RuleCommand::ToggleType {
                tag: TypeTag::Date,
                on: false,
            },
        ])
        .expect("replay");

    let rule = session.fields().rule("issued_at").expect("rule");
    assert_eq!(rule.date_format, None);
    assert_eq!(rule.types, vec![TypeTag::String]);

    let view = FieldValidationView::project(session.fields());
    let card = view.card.expect("card");
    assert!(!card.date_format.selector_open);
    assert!(card.date_format.label.is_none());
}

#[test]
fn placeholder_comes_from_config() {
    let sink = RecordingSink::new();
    let config = BuilderConfig {
        debug_panel: Some(false),
        placeholder: "none".into(),
        ..BuilderConfig::default()
    };
    let mut session =
        ValidationSession::with_config(FieldCatalog::new(["amount"]), Arc::new(sink), &config);
    session
        .replay(vec![select("amount"), RuleCommand::SetRequired { required: true }])
        .expect("replay");

    let view = session.field_view();
    let info = view.sidebar[0].info.as_ref().expect("info");
    assert_eq!(info.types_text, "none");
}
