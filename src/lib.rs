//! docrules: rule builders for document template fields.
//!
//! The workspace is split into two crates:
//!
//! * `docrules-core`: configuration, logging setup and the canonical error type
//! * `docrules-rules`: the visibility and field validation rule engines,
//!   their view projections, sinks and session lifecycle
//!
//! This crate re-exports both and offers [`bootstrap`] for hosts that want
//! the environment-driven defaults.

pub use docrules_core as core;
pub use docrules_rules as rules;

pub use docrules_core::{BuilderConfig, DocRulesError, Environment};
pub use docrules_rules::{
    FieldCatalog, RuleCommand, RuleError, RuleSetPayload, RuleSetSink, ValidationScreen,
    ValidationSession,
};

use anyhow::Context;
use tracing::info;

/// Loads `DOCRULES_*` configuration, installs the tracing subscriber and
/// returns an inactive configuration screen.
pub fn bootstrap() -> anyhow::Result<ValidationScreen> {
    let config = docrules_core::config::load_builder_config()
        .context("failed to load rule builder configuration")?;
    // A subscriber installed by the host takes precedence.
    if docrules_core::logging::init_from_config(&config).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    info!(environment = ?config.environment, "rule builder ready");
    Ok(ValidationScreen::new(config))
}
