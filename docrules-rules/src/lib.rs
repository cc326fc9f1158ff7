//! Rule builders behind the document validation screens.
//!
//! Two engines share one vocabulary: the [`VisibilityRuleEngine`] collects
//! ordered hide conditions over selected fields, and the
//! [`FieldValidationEngine`] edits per-field required/type/date-format
//! rules with custom predicate validations. A [`ValidationSession`] owns
//! both, dispatches [`RuleCommand`]s to them and publishes a pruned
//! [`RuleSetPayload`] to a [`RuleSetSink`] after every change.

mod command;
mod condition;
mod error;
mod loader;
mod payload;
mod rule;
mod session;
mod sink;
mod validation;
mod view;
mod visibility;
pub mod vocabulary;

pub use command::RuleCommand;
pub use condition::{FieldCatalog, FieldName, VisibilityCondition};
pub use error::RuleError;
pub use loader::{load_script, parse_script, ReplayScript};
pub use payload::{prune_insignificant, RuleSetPayload, SubmissionTarget};
pub use rule::{CustomValidation, FieldValidationRule};
pub use session::{ValidationScreen, ValidationSession};
pub use sink::{FanoutSink, NullSink, RecordingSink, RuleSetSink, SnapshotEntry, TracingSink};
pub use validation::{DatePanel, FieldValidationEngine};
pub use view::{
    CardView, ConditionFormView, ConditionItemView, ConnectiveOptionView, DateFormatView,
    DateOptionView, FieldInfoView, FieldToggleView, FieldValidationView, OperatorOptionView,
    SidebarItemView, TypeOptionView, ValidationItemView, VisibilityView,
};
pub use visibility::{ConditionDraft, VisibilityRuleEngine};
pub use vocabulary::{
    default_rule, is_significant, operator_label, operator_symbol, LogicalConnective, Operator,
    OperatorCode, TypeTag,
};
