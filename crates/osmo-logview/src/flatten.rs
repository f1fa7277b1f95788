//! Incremental log flattening with date separators.
//!
//! Converts a flat, possibly-streaming list of log entries into a
//! virtualization-ready item list, inserting a separator row whenever the
//! local calendar date changes between consecutive entries. The
//! [`FlattenTracker`] classifies every update as no-change, append, or reset
//! so the common streaming case stays O(new entries) and consumers can tell
//! when previously measured row heights must be discarded.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::types::{LogEntry, LogId, SeparatorInfo, VirtualItem};

/// Local calendar date key (`YYYY-MM-DD`) for a timestamp.
///
/// Deliberately local time, not UTC: the separator marks the user-facing
/// day boundary.
#[must_use]
pub fn local_date_key(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

/// Output of one flattening pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlattenOutput {
    /// Flattened rows, separators interleaved with entries.
    pub items: Vec<VirtualItem>,
    /// Separator positions; `items[s.index]` is always the separator itself.
    pub separators: Vec<SeparatorInfo>,
}

fn push_entries(
    items: &mut Vec<VirtualItem>,
    separators: &mut Vec<SeparatorInfo>,
    last_key: &mut Option<String>,
    entries: &[LogEntry],
) {
    for entry in entries {
        let key = local_date_key(entry.timestamp);
        if last_key.as_deref() != Some(key.as_str()) {
            let info = SeparatorInfo {
                date_key: key.clone(),
                date: entry.timestamp,
                index: items.len(),
            };
            separators.push(info.clone());
            items.push(VirtualItem::Separator(info));
            *last_key = Some(key);
        }
        items.push(VirtualItem::Entry(entry.clone()));
    }
}

/// Flattens the full entry list. O(n).
#[must_use]
pub fn full_flatten(entries: &[LogEntry]) -> FlattenOutput {
    let mut items = Vec::with_capacity(entries.len());
    let mut separators = Vec::new();
    let mut last_key = None;
    push_entries(&mut items, &mut separators, &mut last_key, entries);
    FlattenOutput { items, separators }
}

/// Extends a previous result with new trailing entries. O(new entries).
///
/// The previous arrays are copied, never mutated in place.
#[must_use]
pub fn append_flatten(
    prev: &FlattenOutput,
    new_entries: &[LogEntry],
    prev_last_date_key: Option<&str>,
) -> FlattenOutput {
    let mut items = Vec::with_capacity(prev.items.len() + new_entries.len());
    items.extend_from_slice(&prev.items);
    let mut separators = prev.separators.clone();
    let mut last_key = prev_last_date_key.map(str::to_string);
    push_entries(&mut items, &mut separators, &mut last_key, new_entries);
    FlattenOutput { items, separators }
}

/// Fingerprint of the last seen entry list.
#[derive(Debug, Clone, Default)]
struct PrevEntriesState {
    first_id: Option<LogId>,
    len: usize,
    last_date_key: Option<String>,
}

/// Memoized flattened view of the current log list.
#[derive(Debug, Clone)]
pub struct FlattenSnapshot {
    /// Flattened rows. The same allocation is handed back verbatim on a
    /// no-change update, so hosts can skip work by pointer identity.
    pub items: Arc<Vec<VirtualItem>>,
    /// Separator positions, same identity guarantee.
    pub separators: Arc<Vec<SeparatorInfo>>,
    /// Bumped on every reset; unchanged by appends. A bump tells consumers
    /// to discard position caches such as measured row heights.
    pub reset_count: u64,
}

/// Owns the incremental flattening of one log view.
///
/// Each call to [`update`](Self::update) is classified against the previous
/// call: identical list → memoized result; pure tail growth → append; any
/// other transition (shrink, changed head, to/from empty) → full reset.
#[derive(Debug, Default)]
pub struct FlattenTracker {
    prev: PrevEntriesState,
    items: Arc<Vec<VirtualItem>>,
    separators: Arc<Vec<SeparatorInfo>>,
    reset_count: u64,
}

impl FlattenTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resets so far.
    #[must_use]
    pub fn reset_count(&self) -> u64 {
        self.reset_count
    }

    fn snapshot(&self) -> FlattenSnapshot {
        FlattenSnapshot {
            items: Arc::clone(&self.items),
            separators: Arc::clone(&self.separators),
            reset_count: self.reset_count,
        }
    }

    fn remember(&mut self, entries: &[LogEntry]) {
        self.prev = PrevEntriesState {
            first_id: entries.first().map(|e| e.id),
            len: entries.len(),
            last_date_key: entries.last().map(|e| local_date_key(e.timestamp)),
        };
    }

    /// Reconciles the tracker with the current entry list.
    pub fn update(&mut self, entries: &[LogEntry]) -> FlattenSnapshot {
        let first_id = entries.first().map(|e| e.id);

        // No change: hand back the memoized allocations so dependents that
        // key off identity do not re-trigger.
        if entries.len() == self.prev.len && first_id == self.prev.first_id {
            return self.snapshot();
        }

        // Append: only the new tail is visited.
        if self.prev.len > 0 && entries.len() > self.prev.len && first_id == self.prev.first_id {
            let prev_output = FlattenOutput {
                items: self.items.as_ref().clone(),
                separators: self.separators.as_ref().clone(),
            };
            let output = append_flatten(
                &prev_output,
                &entries[self.prev.len..],
                self.prev.last_date_key.as_deref(),
            );
            self.items = Arc::new(output.items);
            self.separators = Arc::new(output.separators);
            self.remember(entries);
            return self.snapshot();
        }

        // Reset: shrink, changed head, or transition to/from empty.
        debug!(len = entries.len(), "log flatten reset");
        let output = full_flatten(entries);
        self.items = Arc::new(output.items);
        self.separators = Arc::new(output.separators);
        self.reset_count += 1;
        self.remember(entries);
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    /// Entry pinned to a local-time day so separator expectations hold
    /// regardless of the machine's timezone.
    fn entry_on_day(id: u64, day: u32, hour: u32) -> LogEntry {
        let local = Local
            .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .single()
            .expect("unambiguous local time");
        LogEntry::new(LogId(id), local.with_timezone(&Utc), format!("line {id}"))
    }

    fn assert_separator_invariant(output: &FlattenOutput) {
        for sep in &output.separators {
            let item = output.items.get(sep.index).expect("index in range");
            assert_eq!(item.as_separator(), Some(sep));
        }
    }

    // =========================================================================
    // Full Flatten Tests
    // =========================================================================

    #[test]
    fn empty_input_flattens_to_nothing() {
        let output = full_flatten(&[]);
        assert!(output.items.is_empty());
        assert!(output.separators.is_empty());
    }

    #[test]
    fn separator_inserted_per_day_change() {
        let entries = vec![
            entry_on_day(1, 10, 8),
            entry_on_day(2, 10, 9),
            entry_on_day(3, 11, 8),
        ];
        let output = full_flatten(&entries);
        assert_eq!(output.separators.len(), 2);
        assert_eq!(output.items.len(), 5);
        assert_separator_invariant(&output);
    }

    #[test]
    fn single_day_gets_one_leading_separator() {
        let entries = vec![entry_on_day(1, 10, 8), entry_on_day(2, 10, 20)];
        let output = full_flatten(&entries);
        assert_eq!(output.separators.len(), 1);
        assert_eq!(output.separators[0].index, 0);
    }

    // =========================================================================
    // Append Tests
    // =========================================================================

    #[test]
    fn append_equals_full_flatten() {
        let all = vec![
            entry_on_day(1, 10, 8),
            entry_on_day(2, 10, 9),
            entry_on_day(3, 11, 8),
            entry_on_day(4, 12, 8),
        ];
        let prev = full_flatten(&all[..2]);
        let last_key = Some(local_date_key(all[1].timestamp));
        let appended = append_flatten(&prev, &all[2..], last_key.as_deref());
        assert_eq!(appended, full_flatten(&all));
    }

    #[test]
    fn append_same_day_adds_no_separator() {
        let all = vec![entry_on_day(1, 10, 8), entry_on_day(2, 10, 9)];
        let prev = full_flatten(&all[..1]);
        let last_key = Some(local_date_key(all[0].timestamp));
        let appended = append_flatten(&prev, &all[1..], last_key.as_deref());
        assert_eq!(appended.separators.len(), 1);
    }

    #[test]
    fn append_does_not_mutate_previous_output() {
        let all = vec![entry_on_day(1, 10, 8), entry_on_day(2, 11, 8)];
        let prev = full_flatten(&all[..1]);
        let before = prev.clone();
        let _ = append_flatten(&prev, &all[1..], Some("2024-03-10"));
        assert_eq!(prev, before);
    }

    // =========================================================================
    // Tracker Tests
    // =========================================================================

    #[test]
    fn no_change_returns_identical_allocations() {
        let entries = vec![entry_on_day(1, 10, 8), entry_on_day(2, 10, 9)];
        let mut tracker = FlattenTracker::new();
        let first = tracker.update(&entries);
        let second = tracker.update(&entries);
        assert!(Arc::ptr_eq(&first.items, &second.items));
        assert!(Arc::ptr_eq(&first.separators, &second.separators));
        assert_eq!(first.reset_count, second.reset_count);
    }

    #[test]
    fn append_matches_full_flatten_without_reset() {
        let mut all = vec![entry_on_day(1, 10, 8), entry_on_day(2, 10, 9)];
        let mut tracker = FlattenTracker::new();
        let before = tracker.update(&all);

        all.push(entry_on_day(3, 11, 8));
        let after = tracker.update(&all);

        assert_eq!(*after.items, full_flatten(&all).items);
        assert_eq!(after.reset_count, before.reset_count);
    }

    #[test]
    fn changed_head_resets_exactly_once() {
        let mut tracker = FlattenTracker::new();
        let first = tracker.update(&[entry_on_day(1, 10, 8)]);
        let replaced = tracker.update(&[entry_on_day(99, 10, 8), entry_on_day(100, 11, 8)]);
        assert_eq!(replaced.reset_count, first.reset_count + 1);
    }

    #[test]
    fn shrink_is_a_reset() {
        let entries = vec![entry_on_day(1, 10, 8), entry_on_day(2, 10, 9)];
        let mut tracker = FlattenTracker::new();
        let before = tracker.update(&entries);
        let after = tracker.update(&entries[..1]);
        assert_eq!(after.reset_count, before.reset_count + 1);
    }

    #[test]
    fn empty_to_empty_does_not_bump_reset() {
        let mut tracker = FlattenTracker::new();
        let first = tracker.update(&[]);
        let second = tracker.update(&[]);
        assert_eq!(first.reset_count, 0);
        assert_eq!(second.reset_count, 0);
        assert!(first.items.is_empty());
    }

    #[test]
    fn nonempty_to_empty_bumps_reset() {
        let mut tracker = FlattenTracker::new();
        let populated = tracker.update(&[entry_on_day(1, 10, 8)]);
        let emptied = tracker.update(&[]);
        assert_eq!(emptied.reset_count, populated.reset_count + 1);
        assert!(emptied.items.is_empty());
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    proptest! {
        #[test]
        fn separator_index_invariant_holds(hours in proptest::collection::vec(0u64..200, 0..40)) {
            let mut offset = 0;
            let entries: Vec<LogEntry> = hours
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    offset += h;
                    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
                        .single()
                        .expect("valid timestamp");
                    LogEntry::new(
                        LogId(i as u64),
                        base + chrono::TimeDelta::hours(offset as i64),
                        format!("line {i}"),
                    )
                })
                .collect();
            let output = full_flatten(&entries);
            assert_separator_invariant(&output);
        }

        #[test]
        fn append_is_equivalent_to_full(
            hours in proptest::collection::vec(0u64..100, 1..30),
            split in 0usize..30,
        ) {
            let mut offset = 0;
            let entries: Vec<LogEntry> = hours
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    offset += h;
                    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
                        .single()
                        .expect("valid timestamp");
                    LogEntry::new(
                        LogId(i as u64),
                        base + chrono::TimeDelta::hours(offset as i64),
                        format!("line {i}"),
                    )
                })
                .collect();
            let split = split.min(entries.len());
            let prev = full_flatten(&entries[..split]);
            let last_key = entries[..split].last().map(|e| local_date_key(e.timestamp));
            let appended = append_flatten(&prev, &entries[split..], last_key.as_deref());
            prop_assert_eq!(appended, full_flatten(&entries));
        }
    }
}
