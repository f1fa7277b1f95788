//! # osmo-filter
//!
//! Filter primitives for OSMO console list views (workflows, pools,
//! resources, datasets).
//!
//! This crate provides:
//!
//! - [`NumericFilter`] — Parsed comparison expressions (`>=90%`, `<10`)
//! - [`parse_date_range_value`] — ISO ranges, single days, and named presets
//! - [`SearchChip`] — One committed, atomic filter criterion
//! - [`SearchField`] / [`FieldSpec`] — Per-column filter strategy objects
//! - [`FilterDefinition`] / [`active_filters`] — The unified active-filter row
//!
//! ## Example
//!
//! ```rust
//! use osmo_filter::{parse_numeric_filter, CompareOp, SearchChip, chip_values};
//!
//! let filter = parse_numeric_filter(">=90%").expect("valid expression");
//! assert_eq!(filter.operator, CompareOp::GreaterOrEqual);
//! assert!(filter.is_percent);
//!
//! let chips = vec![SearchChip::new("status", "RUNNING", "Status: Running")];
//! assert_eq!(chip_values(&chips, "status"), vec!["RUNNING"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod active;
pub mod chip;
pub mod daterange;
pub mod error;
pub mod field;
pub mod numeric;

// Re-export main types
pub use active::{ActiveFilter, FilterDefinition, active_filters, clear_all, remove_filter};
pub use chip::{SearchChip, chip_values, first_chip_value, sorted_for_key};
pub use daterange::{DATE_RANGE_PRESETS, DateRange, DateRangePreset, parse_date_range_value};
pub use error::{FilterError, Validity};
pub use field::{FieldSpec, SearchField};
pub use numeric::{
    CompareOp, NumericFilter, NumericFilterOptions, NumericMatcher, compare_numeric,
    parse_numeric_filter, validate_numeric_filter,
};
