//! Core shared library for the docrules workspace.
//!
//! This crate exposes the ambient pieces every rule-builder host depends
//! on: the canonical error type, configuration loading, JSON helpers and
//! logging setup.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;

pub use config::{BuilderConfig, Environment};
pub use errors::{ConfigError, DocRulesError, Result as CoreResult};
