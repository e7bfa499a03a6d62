//! Diagnostic sinks for auto-derived inverse relations
//!
//! The declarator reports each inverse it registers to a [`DiagnosticSink`].
//! The default sink logs through `tracing`; tests use [`RecordingSink`].

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::relation::RelationKind;

/// Placeholder used when a model's name cannot be resolved
pub const UNNAMED_MODEL: &str = "?";

/// An inverse relation registered on the target of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseDefined {
    /// Resolved name of the model the inverse was registered on
    pub target: Option<String>,
    /// Inverse registration performed on the target
    pub kind: RelationKind,
    /// Resolved name of the model the inverse points back to
    pub source: Option<String>,
}

impl fmt::Display for InverseDefined {
    /// Formats as `Post.belongsTo(User)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.target.as_deref().unwrap_or(UNNAMED_MODEL),
            self.kind.method_name(),
            self.source.as_deref().unwrap_or(UNNAMED_MODEL),
        )
    }
}

/// Receives diagnostics from the declarator
pub trait DiagnosticSink {
    /// Called once per successful declaration that registered an inverse
    fn inverse_defined(&self, event: &InverseDefined);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn inverse_defined(&self, event: &InverseDefined) {
        (**self).inverse_defined(event)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn inverse_defined(&self, event: &InverseDefined) {
        (**self).inverse_defined(event)
    }
}

/// Logs each event as `"<prefix> Auto-defined: Post.belongsTo(User)"` at info level
#[derive(Debug, Clone)]
pub struct TracingSink {
    prefix: String,
}

impl TracingSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// The line this sink logs for an event
    pub fn format(&self, event: &InverseDefined) -> String {
        if self.prefix.is_empty() {
            format!("Auto-defined: {}", event)
        } else {
            format!("{} Auto-defined: {}", self.prefix, event)
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TRACE_PREFIX)
    }
}

impl DiagnosticSink for TracingSink {
    fn inverse_defined(&self, event: &InverseDefined) {
        tracing::info!(
            target: "relaxql",
            inverse = %event.kind,
            "{}",
            self.format(event)
        );
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn inverse_defined(&self, _event: &InverseDefined) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<InverseDefined>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<InverseDefined> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Events rendered as `Target.method(Source)` lines
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn inverse_defined(&self, event: &InverseDefined) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }
}
