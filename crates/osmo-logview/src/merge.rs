//! Merging of historical and live-streamed log entries.
//!
//! A log view holds two sources: `query` entries (paginated history,
//! replaced wholesale on refetch) and `tail` entries (live stream,
//! appended). The merge is a pure function of the two snapshots; replacement
//! of the query side already carries reset semantics from its data source,
//! so no buffering state lives here.

use std::sync::Arc;

use crate::types::LogEntry;

/// Merges historical entries with the live tail by timestamp.
///
/// Tail entries at or before the newest historical timestamp are dropped as
/// duplicates of the historical window. When the merge would change nothing
/// (either side empty, or no tail entry survives), the untouched input `Arc`
/// is returned so callers can detect the no-op by pointer identity.
#[must_use]
pub fn combine_entries(query: &Arc<Vec<LogEntry>>, tail: &Arc<Vec<LogEntry>>) -> Arc<Vec<LogEntry>> {
    if tail.is_empty() {
        return Arc::clone(query);
    }
    if query.is_empty() {
        return Arc::clone(tail);
    }

    let Some(max_ts) = query.iter().map(|e| e.timestamp).max() else {
        return Arc::clone(tail);
    };
    let surviving: Vec<LogEntry> = tail
        .iter()
        .filter(|e| e.timestamp > max_ts)
        .cloned()
        .collect();
    if surviving.is_empty() {
        return Arc::clone(query);
    }

    let mut combined = Vec::with_capacity(query.len() + surviving.len());
    combined.extend_from_slice(query);
    combined.extend(surviving);
    Arc::new(combined)
}
