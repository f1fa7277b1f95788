//! # osmo-logview
//!
//! Data engines behind the OSMO console's log and event views.
//!
//! This crate provides:
//!
//! - [`LogEntry`] / [`VirtualItem`] — Log lines and flattened list rows
//! - [`FlattenTracker`] — Incremental flattening with date separators and
//!   explicit reset signaling
//! - [`combine_entries`] — Identity-stable merge of historical and
//!   live-streamed entries
//! - [`classify_reason`] — Event-reason bucketing for the timeline
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use osmo_logview::{FlattenTracker, LogEntry, LogId};
//!
//! let entries = vec![LogEntry::new(LogId(1), Utc::now(), "started")];
//! let mut tracker = FlattenTracker::new();
//! let snapshot = tracker.update(&entries);
//! // One separator row plus the entry itself.
//! assert_eq!(snapshot.items.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod events;
pub mod flatten;
pub mod merge;
pub mod types;

// Re-export main types
pub use events::{EventClass, EventSeverity, EventStage, classify_reason};
pub use flatten::{
    FlattenOutput, FlattenSnapshot, FlattenTracker, append_flatten, full_flatten, local_date_key,
};
pub use merge::combine_entries;
pub use types::{LogEntry, LogId, SeparatorInfo, VirtualItem};
