//! Hook interface: entries, hooks and hook factories

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::error::HookError;
use crate::level::Severity;

/// One log record as seen by hooks.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Severity,
    pub message: String,
    /// Structured fields, rendered to strings at the logging call site
    pub fields: BTreeMap<String, String>,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: BTreeMap::new(),
            timestamp: Local::now(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.insert(key.into(), value.to_string());
        self
    }
}

/// A delivery target for log entries.
pub trait Hook: Send + Sync {
    /// Severities this hook wants to receive.
    fn levels(&self) -> Vec<Severity>;

    /// Deliver one entry.
    fn fire(&self, entry: &Entry) -> Result<(), HookError>;
}

/// Hook constructor: builds a hook from textual factory arguments.
///
/// An argument may be a JSON options object, a query-style spec
/// (`case=upper&prefix=app_`), a `prefix,suffix` pair or a bare namespace
/// prefix; each factory decides what it accepts.
pub type Creator = Arc<dyn Fn(&[String]) -> Result<Box<dyn Hook>, HookError> + Send + Sync>;

/// A named hook constructor that can be registered with a provider.
pub trait HookFactory: Send + Sync {
    /// Name this factory registers under.
    fn face(&self) -> &str;

    /// Build a hook from the given arguments.
    fn create(&self, args: &[String]) -> Result<Box<dyn Hook>, HookError>;
}
