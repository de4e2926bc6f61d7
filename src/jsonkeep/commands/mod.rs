//! # Command Layer
//!
//! Business logic behind each CLI subcommand. Commands take a [`JsonStore`]
//! and plain arguments, and return a [`CmdResult`]. They never print and never
//! exit; `main.rs` decides how results look on a terminal.
//!
//! Writes go through [`JsonStore::try_save`] so a failed save surfaces as an
//! error instead of only a log line.
//!
//! [`JsonStore`]: crate::store::JsonStore
//! [`JsonStore::try_save`]: crate::store::JsonStore::try_save

use crate::config::StoreConfig;
use crate::model::Document;
use serde_json::Value;

pub mod config;
pub mod get;
pub mod ip;
pub mod merge;
pub mod set;
pub mod show;
pub mod slug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// A JSON value to print in canonical form
    pub document: Option<Document>,
    /// Plain text output (slugs, addresses)
    pub output: Vec<String>,
    pub config: Option<StoreConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_output(mut self, line: impl Into<String>) -> Self {
        self.output.push(line.into());
        self
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Reads a command-line value as JSON, or as a plain string if it isn't JSON.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
