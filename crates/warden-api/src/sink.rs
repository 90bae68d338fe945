//! # Log Sinks
//!
//! The reporting pipeline emits server-side log records through the
//! [`LogSink`] trait instead of calling `tracing` directly, so tests
//! can assert on exactly which records a request produced. Production
//! wires in [`TracingSink`]; tests wire in [`MemorySink`].

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;

/// Server-side log level. Mirrors the classic three-level scheme the
/// reporting contract is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Severe => "SEVERE",
        };
        f.write_str(label)
    }
}

/// One emitted log record.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl LogRecord {
    pub fn severe(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Severe,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Destination for reporting-pipeline log records.
pub trait LogSink: Send + Sync {
    fn record(&self, record: LogRecord);
}

/// Production sink: forwards records to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, record: LogRecord) {
        match record.severity {
            Severity::Info => tracing::info!("{}", record.message),
            Severity::Warning => tracing::warn!("{}", record.message),
            Severity::Severe => tracing::error!("{}", record.message),
        }
    }
}

/// Test sink: keeps records in memory for assertions.
///
/// Lock discipline: the mutex is only ever held for a push or a clone,
/// never across an await point.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }
}

impl LogSink for MemorySink {
    fn record(&self, record: LogRecord) {
        self.records.lock().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Severe.to_string(), "SEVERE");
    }

    #[test]
    fn memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.record(LogRecord::severe("first"));
        sink.record(LogRecord::severe("second"));
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].message, "second");
        assert_eq!(records[0].severity, Severity::Severe);
    }
}
