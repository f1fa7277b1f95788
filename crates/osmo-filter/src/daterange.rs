//! Date range parsing for chip-valued date filters.
//!
//! A stored chip value is plain text (`"2024-01-01..2024-01-15"`, a single
//! day, or a preset label like `"last 7 days"`), so ranges survive URL
//! round-trips without re-serialization. Preset labels are resolved fresh on
//! every parse — a chip committed yesterday still means "the last 7 days as
//! of now".

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive UTC time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the window (midnight UTC of the first day).
    pub start: DateTime<Utc>,
    /// End of the window (last millisecond of the final day).
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Checks whether a timestamp falls inside the window (inclusive).
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// A named date range offered as a one-step suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangePreset {
    /// Display label, also the stored chip value.
    pub label: &'static str,
    /// Number of calendar days the window spans, ending today.
    pub days: u32,
}

/// Presets offered by date fields, in display order.
pub const DATE_RANGE_PRESETS: &[DateRangePreset] = &[
    DateRangePreset {
        label: "today",
        days: 1,
    },
    DateRangePreset {
        label: "last 7 days",
        days: 7,
    },
    DateRangePreset {
        label: "last 30 days",
        days: 30,
    },
    DateRangePreset {
        label: "last 90 days",
        days: 90,
    },
    DateRangePreset {
        label: "last 365 days",
        days: 365,
    },
];

impl DateRangePreset {
    /// Renders the preset as explicit range text, computed from today's UTC
    /// date at call time. Deliberately not cached.
    #[must_use]
    pub fn value(&self) -> String {
        let today = Utc::now().date_naive();
        let start = today - TimeDelta::days(i64::from(self.days) - 1);
        format!("{start}..{today}")
    }
}

/// Midnight UTC of the given day.
fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Last millisecond of the given UTC day, making end bounds inclusive.
fn day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_milli_opt(23, 59, 59, 999)?.and_utc())
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parses a date filter chip value into an inclusive UTC window.
///
/// Three forms are tried in order: an explicit `start..end` range, a single
/// day, then a preset label (resolved by recursing on its freshly computed
/// range text). Malformed components or start after end yield `None`.
#[must_use]
pub fn parse_date_range_value(input: &str) -> Option<DateRange> {
    let trimmed = input.trim();

    if let Some((start_text, end_text)) = trimmed.split_once("..") {
        let start_date = parse_iso_date(start_text)?;
        let end_date = parse_iso_date(end_text)?;
        if start_date > end_date {
            return None;
        }
        return Some(DateRange {
            start: day_start(start_date)?,
            end: day_end(end_date)?,
        });
    }

    if let Some(date) = parse_iso_date(trimmed) {
        return Some(DateRange {
            start: day_start(date)?,
            end: day_end(date)?,
        });
    }

    let preset = DATE_RANGE_PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(trimmed))?;
    parse_date_range_value(&preset.value())
}
