use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, warn};

use crate::payload::RuleSetPayload;

/// Write-only consumer of rule-set snapshots.
///
/// Sessions publish a full, pruned snapshot after every mutation. The
/// consumer (a debug panel, a hidden form field, …) owns any further
/// transport.
#[cfg_attr(test, mockall::automock)]
pub trait RuleSetSink: Send + Sync {
    fn publish(&self, snapshot: &RuleSetPayload);
}

/// Sink that drops every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RuleSetSink for NullSink {
    fn publish(&self, _snapshot: &RuleSetPayload) {}
}

/// Logs each snapshot as indented JSON, the equivalent of the debug panel.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl RuleSetSink for TracingSink {
    fn publish(&self, snapshot: &RuleSetPayload) {
        match snapshot.to_pretty_json() {
            Ok(json) => debug!(
                target: "docrules::debug_panel",
                fields = snapshot.field_validation_rules.len(),
                conditions = snapshot.visibility_conditions.len(),
                "{json}"
            ),
            Err(err) => warn!(error = %err, "failed to render rule-set snapshot"),
        }
    }
}

/// Versioned entry recorded by [`RecordingSink`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotEntry {
    pub version: u32,
    pub payload: RuleSetPayload,
    pub published_at: DateTime<Utc>,
}

/// In-memory sink keeping every published snapshot with a version number.
///
/// History is unbounded; meant for tests and inspection over a single
/// session, not for long-lived hosts.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    inner: Arc<RwLock<Vec<SnapshotEntry>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<SnapshotEntry> {
        self.inner.read().last().cloned()
    }

    pub fn latest_payload(&self) -> Option<RuleSetPayload> {
        self.inner.read().last().map(|entry| entry.payload.clone())
    }

    /// Compact JSON of the latest snapshot, as a hidden form field would hold it.
    pub fn latest_json(&self) -> Option<String> {
        self.latest_payload()
            .and_then(|payload| payload.to_json().ok())
    }

    pub fn history(&self) -> Vec<SnapshotEntry> {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl RuleSetSink for RecordingSink {
    fn publish(&self, snapshot: &RuleSetPayload) {
        let mut inner = self.inner.write();
        let version = inner.last().map(|last| last.version.saturating_add(1)).unwrap_or(1);
        inner.push(SnapshotEntry {
            version,
            payload: snapshot.clone(),
            published_at: Utc::now(),
        });
    }
}

/// Forwards each snapshot to several sinks in order.
#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn RuleSetSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn RuleSetSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl RuleSetSink for FanoutSink {
    fn publish(&self, snapshot: &RuleSetPayload) {
        for sink in &self.sinks {
            sink.publish(snapshot);
        }
    }
}
