use std::sync::Arc;

use docrules_core::BuilderConfig;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::command::RuleCommand;
use crate::condition::FieldCatalog;
use crate::error::RuleError;
use crate::payload::RuleSetPayload;
use crate::sink::{FanoutSink, RuleSetSink, TracingSink};
use crate::validation::FieldValidationEngine;
use crate::view::{FieldValidationView, VisibilityView};
use crate::visibility::VisibilityRuleEngine;

/// State of one configuration screen visit: both engines plus the sink
/// that mirrors their combined payload.
pub struct ValidationSession {
    id: Uuid,
    visibility: VisibilityRuleEngine,
    fields: FieldValidationEngine,
    sink: Arc<dyn RuleSetSink>,
    placeholder: String,
}

impl ValidationSession {
    /// Starts a session and publishes the initial (empty) snapshot.
    pub fn new(catalog: FieldCatalog, sink: Arc<dyn RuleSetSink>) -> Self {
        Self::with_config(catalog, sink, &BuilderConfig::default())
    }

    pub fn with_config(
        catalog: FieldCatalog,
        sink: Arc<dyn RuleSetSink>,
        config: &BuilderConfig,
    ) -> Self {
        let sink: Arc<dyn RuleSetSink> = if config.debug_panel_enabled() {
            Arc::new(FanoutSink::new().with(sink).with(Arc::new(TracingSink)))
        } else {
            sink
        };

        let session = Self {
            id: Uuid::new_v4(),
            visibility: VisibilityRuleEngine::new(catalog.clone()),
            fields: FieldValidationEngine::new(catalog),
            sink,
            placeholder: config.placeholder.clone(),
        };
        info!(session = %session.id, fields = session.catalog().len(), "validation session started");
        session.publish();
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &FieldCatalog {
        self.fields.catalog()
    }

    pub fn visibility(&self) -> &VisibilityRuleEngine {
        &self.visibility
    }

    pub fn fields(&self) -> &FieldValidationEngine {
        &self.fields
    }

    /// Current pruned snapshot.
    pub fn payload(&self) -> RuleSetPayload {
        RuleSetPayload::from_state(self.fields.rules(), self.visibility.conditions())
    }

    pub fn visibility_view(&self) -> VisibilityView {
        VisibilityView::project(&self.visibility)
    }

    pub fn field_view(&self) -> FieldValidationView {
        FieldValidationView::project_with(&self.fields, &self.placeholder)
    }

    /// Applies one command. Successful commands publish a fresh snapshot;
    /// rejected ones leave state and sink untouched.
    pub fn dispatch(&mut self, command: RuleCommand) -> Result<(), RuleError> {
        let name = command.name();
        match self.apply(command) {
            Ok(()) => {
                debug!(session = %self.id, command = name, "command applied");
                self.publish();
                Ok(())
            }
            Err(err) => {
                warn!(session = %self.id, command = name, error = %err, "command rejected");
                Err(err)
            }
        }
    }

    /// Dispatches commands in order, stopping at the first rejection.
    /// Returns the number of commands applied.
    pub fn replay<I>(&mut self, commands: I) -> Result<usize, RuleError>
    where
        I: IntoIterator<Item = RuleCommand>,
    {
        let mut applied = 0;
        for command in commands {
            self.dispatch(command)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Clears both engines and publishes the empty snapshot.
    pub fn reset(&mut self) {
        self.visibility.reset();
        self.fields.reset();
        self.publish();
    }

    fn apply(&mut self, command: RuleCommand) -> Result<(), RuleError> {
        match command {
            RuleCommand::ToggleHideField { field, checked } => {
                self.visibility.toggle_field(&field, checked)
            }
            RuleCommand::SetConditionOperator { operator } => {
                self.visibility.set_operator(operator);
                Ok(())
            }
            RuleCommand::SetConditionValue { value } => {
                self.visibility.set_value(value);
                Ok(())
            }
            RuleCommand::SetConditionConnective { connective } => {
                self.visibility.set_connective(connective);
                Ok(())
            }
            RuleCommand::AddCondition => self.visibility.add_condition().map(|_| ()),
            RuleCommand::RemoveCondition { index } => {
                self.visibility.remove_condition(index).map(|_| ())
            }
            RuleCommand::SelectField { field } => self.fields.select_field(&field),
            RuleCommand::SetRequired { required } => self.fields.set_required(required),
            RuleCommand::ToggleType { tag, on } => self.fields.toggle_type(tag, on).map(|_| ()),
            RuleCommand::SetDateFormat { format } => self.fields.set_date_format(&format),
            RuleCommand::SetCustomDateFormat { pattern } => {
                self.fields.set_custom_date_format(&pattern)
            }
            RuleCommand::CloseDateFormat => self.fields.close_date_format_panel(),
            RuleCommand::OpenValidationForm => self.fields.open_validation_form(),
            RuleCommand::CancelValidationForm => self.fields.cancel_validation_form(),
            RuleCommand::AddCustomValidation { operator, value } => {
                self.fields.add_custom_validation(operator, value).map(|_| ())
            }
            RuleCommand::RemoveCustomValidation { index } => {
                self.fields.remove_custom_validation(index).map(|_| ())
            }
            RuleCommand::DeleteField { field } => {
                self.fields.delete_field(&field);
                Ok(())
            }
            RuleCommand::DeleteCurrentField => self.fields.delete_current_field(),
        }
    }

    fn publish(&self) {
        self.sink.publish(&self.payload());
    }
}

impl std::fmt::Debug for ValidationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationSession")
            .field("id", &self.id)
            .field("visibility", &self.visibility)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of the configuration screen.
///
/// `enter` on an active screen keeps the live session instead of
/// registering a second one; `leave` tears it down so the next `enter`
/// starts from empty state.
#[derive(Debug, Default)]
pub struct ValidationScreen {
    config: BuilderConfig,
    session: Option<ValidationSession>,
}

impl ValidationScreen {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ValidationSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ValidationSession> {
        self.session.as_mut()
    }

    pub fn enter(
        &mut self,
        catalog: FieldCatalog,
        sink: Arc<dyn RuleSetSink>,
    ) -> &mut ValidationSession {
        let session = match self.session.take() {
            Some(existing) => {
                debug!(session = %existing.id(), "screen already initialized");
                existing
            }
            None => ValidationSession::with_config(catalog, sink, &self.config),
        };
        self.session.insert(session)
    }

    /// Tears the session down, returning its final payload.
    pub fn leave(&mut self) -> Option<RuleSetPayload> {
        let session = self.session.take()?;
        info!(session = %session.id(), "validation session closed");
        Some(session.payload())
    }
}
