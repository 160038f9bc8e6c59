//! Severity-tagged, timestamped log events emitted while decoding and nesting.
//!
//! Events are delivered to a caller-supplied [`LogSink`] and mirrored into the [`log`] facade.
//! They are purely observational: no decision of the decoder or the engine depends on them.

use std::fmt::Display;
use std::sync::Mutex;

use jiff::Timestamp;
use log::Level;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Severity::Info | Severity::Success => Level::Info,
            Severity::Warning => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Success => "success",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: Timestamp,
    pub severity: Severity,
    pub message: String,
}

impl LogEvent {
    pub fn now(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            severity,
            message: message.into(),
        }
    }
}

/// Receiver of [`LogEvent`]s.
/// Implemented for every `Fn(LogEvent) + Send + Sync` closure.
pub trait LogSink: Send + Sync {
    fn accept(&self, event: LogEvent);
}

impl<F> LogSink for F
where
    F: Fn(LogEvent) + Send + Sync,
{
    fn accept(&self, event: LogEvent) {
        self(event)
    }
}

/// Sink that drops all events. They still reach the [`log`] facade.
pub struct NoSink;

impl LogSink for NoSink {
    fn accept(&self, _event: LogEvent) {}
}

/// Sink that keeps every event in memory, in emission order.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn accept(&self, event: LogEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Emits events for one component, tagging the mirrored [`log`] records with `prefix`.
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    sink: &'a dyn LogSink,
    prefix: &'static str,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a dyn LogSink, prefix: &'static str) -> Self {
        Self { sink, prefix }
    }

    pub fn emit(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        log::log!(severity.level(), "{} {}", self.prefix, message);
        self.sink.accept(LogEvent::now(severity, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Severity::Success, message)
    }
}
