//! # Logging Capability
//!
//! The store never reaches for a process-wide logger on its own. It owns a
//! [`StoreLogger`] handed to it at construction, so the host decides where
//! diagnostics go:
//!
//! - [`TracingLogger`]: the default; forwards to `tracing` events under the
//!   `jsonkeep::store` target. Whatever subscriber the host installs sees them.
//! - [`MemoryLogger`]: keeps every record in memory. Tests use it to assert on
//!   what a failed load or save reported.
//!
//! Only two levels exist because the store only emits two kinds of records:
//! debug for recovered read failures, error for failed writes and failed
//! temp-file cleanup.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Sink for the store's diagnostics.
pub trait StoreLogger: Send + Sync {
    fn debug(&self, message: &str);

    fn error(&self, message: &str);
}

impl<L: StoreLogger + ?Sized> StoreLogger for &L {
    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl StoreLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "jsonkeep::store", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "jsonkeep::store", "{}", message);
    }
}

/// Captures records instead of emitting them.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_string(),
            });
    }
}

impl StoreLogger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
