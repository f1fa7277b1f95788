//! Core types for the log view engines.
//!
//! This module provides:
//! - [`LogId`] — Unique identifier for log entries
//! - [`LogEntry`] — One log line with metadata
//! - [`VirtualItem`] — Flattened list item: entry or date separator
//! - [`SeparatorInfo`] — Position record for a date separator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogId(pub u64);

/// One log line as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier for this entry.
    pub id: LogId,
    /// When the line was produced.
    pub timestamp: DateTime<Utc>,
    /// The log message.
    pub message: String,
    /// Backend labels (task name, stream, node, ...).
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl LogEntry {
    /// Creates an entry without labels.
    #[must_use]
    pub fn new(id: LogId, timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            message: message.into(),
            labels: HashMap::new(),
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Position record for one date separator in the flattened list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorInfo {
    /// Local calendar date key, `YYYY-MM-DD`.
    pub date_key: String,
    /// Timestamp of the first entry under this separator.
    pub date: DateTime<Utc>,
    /// Absolute position of the separator in the flattened item list.
    pub index: usize,
}

/// A virtualization-ready list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VirtualItem {
    /// A synthetic row marking a change of calendar date.
    Separator(SeparatorInfo),
    /// A log entry row.
    Entry(LogEntry),
}

impl VirtualItem {
    /// Returns the separator record, if this item is one.
    #[must_use]
    pub fn as_separator(&self) -> Option<&SeparatorInfo> {
        match self {
            Self::Separator(info) => Some(info),
            Self::Entry(_) => None,
        }
    }

    /// Returns the log entry, if this item is one.
    #[must_use]
    pub fn as_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Separator(_) => None,
            Self::Entry(entry) => Some(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_builder_sets_labels() {
        let entry = LogEntry::new(LogId(1), Utc::now(), "hello").with_label("task", "train");
        assert_eq!(entry.labels.get("task").map(String::as_str), Some("train"));
    }

    #[test]
    fn virtual_item_accessors() {
        let entry = LogEntry::new(LogId(1), Utc::now(), "hello");
        let item = VirtualItem::Entry(entry.clone());
        assert_eq!(item.as_entry(), Some(&entry));
        assert!(item.as_separator().is_none());

        let info = SeparatorInfo {
            date_key: "2024-01-15".to_string(),
            date: Utc::now(),
            index: 0,
        };
        let item = VirtualItem::Separator(info.clone());
        assert_eq!(item.as_separator(), Some(&info));
        assert!(item.as_entry().is_none());
    }

    #[test]
    fn entry_serialization_round_trip() {
        let entry = LogEntry::new(LogId(7), Utc::now(), "line").with_label("stream", "stdout");
        let json = serde_json::to_string(&entry).expect("serialize");
        let parsed: LogEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(entry, parsed);
    }
}
