//! # osmo-search
//!
//! Keyboard-driven navigation engine for the OSMO console's chip-based
//! search inputs.
//!
//! This crate provides:
//!
//! - [`SearchEngine`] — One dispatcher per key over a two-level (field →
//!   value) suggestion hierarchy
//! - [`NavigationState`] — The frozen-cycle-list navigation state
//! - [`ParsedInput`] — Per-keystroke view of the `field:query` grammar
//! - [`SearchPreset`] — Named chip sets offered as one-step suggestions
//! - [`InputActions`] / [`InputSnapshot`] — The seam to the host input widget
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use osmo_filter::{FieldSpec, SearchField};
//! use osmo_search::{SearchEngine, SearchKey, InputSnapshot, InputActions};
//! use osmo_filter::SearchChip;
//!
//! struct Host;
//! impl InputActions for Host {
//!     fn set_input(&mut self, _text: &str) {}
//!     fn commit_chip(&mut self, _chip: SearchChip) {}
//!     fn show_error(&mut self, _message: &str) {}
//!     fn focus_chip(&mut self, _index: usize) {}
//!     fn unfocus_chips(&mut self) {}
//!     fn remove_chip(&mut self, _index: usize) {}
//!     fn open_dropdown(&mut self) {}
//!     fn close_dropdown(&mut self) {}
//!     fn blur_input(&mut self) {}
//! }
//!
//! let status: Arc<dyn FieldSpec> = Arc::new(
//!     SearchField::<()>::new("status", "status:", "Filter by status", |(), _| true),
//! );
//! let mut engine = SearchEngine::new(vec![status], Vec::new());
//! let snapshot = InputSnapshot::default();
//! engine.handle_key(SearchKey::Escape, &snapshot, &mut Host);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod input;
pub mod state;
pub mod suggest;

// Re-export main types
pub use engine::{FREE_TEXT_FIELD, InputActions, InputSnapshot, SearchEngine, SearchKey};
pub use input::ParsedInput;
pub use state::{CycleItem, CycleItemKind, NavigationLevel, NavigationState, SearchPreset};
pub use suggest::{field_level_items, live_cycle_items, value_level_items};
