//! The keyboard navigation engine for the chip search input.
//!
//! One dispatcher routes raw key presses to one handler per key. The
//! navigational keys (Tab, Enter, Escape, Up/Down) own the
//! [`NavigationState`]; the non-navigational keys (Left/Right, Backspace,
//! Delete) are pure functions of a read-only [`InputSnapshot`] acting through
//! the [`InputActions`] effect interface and never touch navigation state.

use std::sync::Arc;

use osmo_filter::{FieldSpec, FilterError, SearchChip};
use tracing::debug;

use crate::input::ParsedInput;
use crate::state::{CycleItem, CycleItemKind, NavigationLevel, NavigationState, SearchPreset};
use crate::suggest::{field_level_items, live_cycle_items, value_level_items};

/// Chip field name used for plain free-text commits.
pub const FREE_TEXT_FIELD: &str = "search";

/// Keys the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Tab, with Shift reversing the cycle direction.
    Tab {
        /// Whether Shift was held.
        shift: bool,
    },
    /// Enter.
    Enter,
    /// Escape.
    Escape,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
}

/// Read-only view of the host input at the moment of a key press.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Current search-box text.
    pub input: String,
    /// Caret position within the text.
    pub cursor: usize,
    /// Number of committed chips.
    pub chip_count: usize,
    /// Index of the focused chip, if focus is on a chip rather than the input.
    pub focused_chip: Option<usize>,
    /// Whether the suggestion dropdown is open.
    pub dropdown_open: bool,
}

/// Effects the engine can request from the host input.
pub trait InputActions {
    /// Replaces the search-box text.
    fn set_input(&mut self, text: &str);
    /// Commits a chip to the active filter list.
    fn commit_chip(&mut self, chip: SearchChip);
    /// Shows a validation message next to the input.
    fn show_error(&mut self, message: &str);
    /// Moves focus onto a chip.
    fn focus_chip(&mut self, index: usize);
    /// Returns focus from chips to the input.
    fn unfocus_chips(&mut self);
    /// Removes a chip by index.
    fn remove_chip(&mut self, index: usize);
    /// Opens the suggestion dropdown.
    fn open_dropdown(&mut self);
    /// Closes the suggestion dropdown.
    fn close_dropdown(&mut self);
    /// Blurs the input entirely.
    fn blur_input(&mut self);
}

/// Wrap-around index step over a non-empty cycle list.
fn advance(len: usize, current: Option<usize>, forward: bool) -> usize {
    match current {
        None => {
            if forward {
                0
            } else {
                len - 1
            }
        }
        Some(i) => {
            if forward {
                (i + 1) % len
            } else {
                (i + len - 1) % len
            }
        }
    }
}

fn chip_label(field_name: &str, value: &str) -> String {
    let mut chars = field_name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{capitalized}: {value}")
}

/// Keyboard engine over a fixed set of fields and presets.
///
/// The host owns the input text, chip list, and dropdown; the engine owns
/// only the navigation state and drives the host through [`InputActions`].
pub struct SearchEngine {
    fields: Vec<Arc<dyn FieldSpec>>,
    presets: Vec<SearchPreset>,
    nav: NavigationState,
}

impl SearchEngine {
    /// Creates an engine for the given fields and presets.
    #[must_use]
    pub fn new(fields: Vec<Arc<dyn FieldSpec>>, presets: Vec<SearchPreset>) -> Self {
        Self {
            fields,
            presets,
            nav: NavigationState::Idle,
        }
    }

    /// Current navigation level, `None` when idle.
    #[must_use]
    pub fn navigation_level(&self) -> Option<NavigationLevel> {
        self.nav.level()
    }

    /// Input text of the highlighted suggestion, when one is highlighted.
    #[must_use]
    pub fn highlighted_value(&self) -> Option<&str> {
        self.nav.highlighted_item().map(|item| item.fill.as_str())
    }

    /// The selectable rows the dropdown should show: the frozen cycle list
    /// while navigating, live suggestions otherwise.
    #[must_use]
    pub fn display_selectables(&self, snapshot: &InputSnapshot) -> Vec<CycleItem> {
        if let NavigationState::Navigating { items, .. } = &self.nav {
            if !items.is_empty() {
                return items.clone();
            }
        }
        let parsed = ParsedInput::parse(&self.fields, &snapshot.input);
        live_cycle_items(&self.fields, &self.presets, &parsed, &snapshot.input)
    }

    /// External reset: back to idle, discarding any cycle list.
    pub fn reset(&mut self) {
        self.nav = NavigationState::Idle;
    }

    /// Routes one key press.
    pub fn handle_key(
        &mut self,
        key: SearchKey,
        snapshot: &InputSnapshot,
        actions: &mut dyn InputActions,
    ) {
        match key {
            SearchKey::Tab { shift } => self.handle_tab(!shift, snapshot, actions),
            SearchKey::Enter => self.handle_enter(snapshot, actions),
            SearchKey::Escape => self.handle_escape(snapshot, actions),
            SearchKey::ArrowDown => self.handle_arrow_cycle(true, snapshot, actions),
            SearchKey::ArrowUp => self.handle_arrow_cycle(false, snapshot, actions),
            SearchKey::ArrowLeft => Self::handle_arrow_left(snapshot, actions),
            SearchKey::ArrowRight => Self::handle_arrow_right(snapshot, actions),
            SearchKey::Backspace => Self::handle_backspace(snapshot, actions),
            SearchKey::Delete => Self::handle_delete(snapshot, actions),
        }
    }

    /// Advances the cycle while navigating. Re-snapshots live suggestions
    /// when the cycle list is empty (right after a level transition).
    fn cycle_advance(
        &mut self,
        forward: bool,
        snapshot: &InputSnapshot,
        actions: &mut dyn InputActions,
    ) {
        let NavigationState::Navigating {
            level,
            items,
            highlighted,
        } = std::mem::take(&mut self.nav)
        else {
            return;
        };

        let (items, index) = if items.is_empty() {
            let parsed = ParsedInput::parse(&self.fields, &snapshot.input);
            let fresh = match level {
                NavigationLevel::Field => {
                    field_level_items(&self.fields, &self.presets, &snapshot.input)
                }
                NavigationLevel::Value => parsed
                    .field
                    .map(|i| value_level_items(self.fields[i].as_ref(), &parsed.query))
                    .unwrap_or_default(),
            };
            if fresh.is_empty() {
                self.nav = NavigationState::Navigating {
                    level,
                    items,
                    highlighted,
                };
                return;
            }
            let index = if forward { 0 } else { fresh.len() - 1 };
            (fresh, index)
        } else {
            let index = advance(items.len(), highlighted, forward);
            (items, index)
        };

        if let Some(item) = items.get(index) {
            actions.set_input(&item.fill);
        }
        self.nav = NavigationState::Navigating {
            level,
            items,
            highlighted: Some(index),
        };
    }

    fn handle_tab(
        &mut self,
        forward: bool,
        snapshot: &InputSnapshot,
        actions: &mut dyn InputActions,
    ) {
        if matches!(self.nav, NavigationState::Navigating { .. }) {
            self.cycle_advance(forward, snapshot, actions);
            return;
        }

        let parsed = ParsedInput::parse(&self.fields, &snapshot.input);
        let items = live_cycle_items(&self.fields, &self.presets, &parsed, &snapshot.input);
        if items.is_empty() {
            // Nothing cycleable; let the host keep default Tab focus traversal.
            return;
        }
        if items.len() == 1 && !matches!(items[0].kind, CycleItemKind::Preset(_)) {
            // Single live match: autocomplete without entering navigation.
            actions.set_input(&items[0].fill);
            return;
        }
        if !snapshot.dropdown_open {
            return;
        }

        // Freeze the live suggestions into an immutable cycle list so further
        // Tabs step a stable set even as suggestions recompute per keystroke.
        let level = if parsed.has_prefix {
            NavigationLevel::Value
        } else {
            NavigationLevel::Field
        };
        let index = if forward { 0 } else { items.len() - 1 };
        debug!(?level, count = items.len(), "entering suggestion navigation");
        if let Some(item) = items.get(index) {
            actions.set_input(&item.fill);
        }
        self.nav = NavigationState::Navigating {
            level,
            items,
            highlighted: Some(index),
        };
    }

    fn handle_enter(&mut self, snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        if !snapshot.dropdown_open {
            actions.open_dropdown();
            return;
        }

        match std::mem::take(&mut self.nav) {
            NavigationState::Navigating {
                level: NavigationLevel::Field,
                items,
                highlighted,
            } => match highlighted.and_then(|i| items.get(i)) {
                Some(item) => match item.kind {
                    CycleItemKind::Preset(index) => {
                        // Reset precedes the commit so rapid Enters cannot
                        // interleave partial navigation state.
                        let chips = self
                            .presets
                            .get(index)
                            .map(|p| p.chips.clone())
                            .unwrap_or_default();
                        for chip in chips {
                            actions.commit_chip(chip);
                        }
                        actions.set_input("");
                        actions.close_dropdown();
                    }
                    CycleItemKind::Field => {
                        // Descend to value level with an empty cycle list;
                        // the next advance re-snapshots value suggestions.
                        actions.set_input(&item.fill);
                        self.nav = NavigationState::Navigating {
                            level: NavigationLevel::Value,
                            items: Vec::new(),
                            highlighted: None,
                        };
                    }
                    CycleItemKind::Value => {
                        self.commit_from_input(&item.fill.clone(), actions);
                    }
                },
                None => self.commit_from_input(&snapshot.input, actions),
            },
            NavigationState::Navigating {
                level: NavigationLevel::Value,
                ..
            }
            | NavigationState::Idle => self.commit_from_input(&snapshot.input, actions),
        }
    }

    /// Commits the current input as a chip: `field:query` when the prefix is
    /// known, free text otherwise. Validation failures surface through
    /// `show_error` and leave the input untouched.
    fn commit_from_input(&mut self, input: &str, actions: &mut dyn InputActions) {
        let parsed = ParsedInput::parse(&self.fields, input);
        if parsed.has_prefix {
            if let Some(index) = parsed.field {
                let field = &self.fields[index];
                if parsed.query.is_empty() {
                    actions.show_error(
                        &FilterError::MissingQuery(field.prefix().to_string()).to_string(),
                    );
                    return;
                }
                if let Err(err) = field.validate(&parsed.query) {
                    actions.show_error(&err.to_string());
                    return;
                }
                debug!(field = field.name(), "committing field chip");
                actions.commit_chip(SearchChip::new(
                    field.name(),
                    &parsed.query,
                    chip_label(field.name(), &parsed.query),
                ));
                actions.set_input("");
                actions.close_dropdown();
                return;
            }
        }
        let text = input.trim();
        if text.is_empty() {
            return;
        }
        actions.commit_chip(SearchChip::new(
            FREE_TEXT_FIELD,
            text,
            format!("Search: {text}"),
        ));
        actions.set_input("");
        actions.close_dropdown();
    }

    fn handle_escape(&mut self, snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        match std::mem::take(&mut self.nav) {
            NavigationState::Navigating {
                level: NavigationLevel::Value,
                ..
            } => {
                // Step back a level; the discarded value cycle list is
                // rebuilt fresh on the next advance.
                actions.set_input("");
                self.nav = NavigationState::Navigating {
                    level: NavigationLevel::Field,
                    items: Vec::new(),
                    highlighted: None,
                };
            }
            NavigationState::Navigating {
                level: NavigationLevel::Field,
                ..
            } => {
                actions.set_input("");
            }
            NavigationState::Idle => {
                if snapshot.dropdown_open {
                    actions.close_dropdown();
                } else {
                    actions.blur_input();
                }
            }
        }
    }

    fn handle_arrow_cycle(
        &mut self,
        forward: bool,
        snapshot: &InputSnapshot,
        actions: &mut dyn InputActions,
    ) {
        // Only meaningful while navigating; otherwise the host's own list
        // navigation keeps the key.
        if matches!(self.nav, NavigationState::Navigating { .. }) {
            self.cycle_advance(forward, snapshot, actions);
        }
    }

    fn handle_arrow_left(snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        match snapshot.focused_chip {
            Some(index) => {
                if index > 0 {
                    actions.focus_chip(index - 1);
                }
            }
            None => {
                if snapshot.cursor == 0 && snapshot.chip_count > 0 {
                    actions.focus_chip(snapshot.chip_count - 1);
                }
            }
        }
    }

    fn handle_arrow_right(snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        if let Some(index) = snapshot.focused_chip {
            if index + 1 < snapshot.chip_count {
                actions.focus_chip(index + 1);
            } else {
                actions.unfocus_chips();
            }
        }
    }

    /// Removes chip `index` and moves focus to the neighbor, clamped, or
    /// clears focus when the list empties.
    fn remove_and_refocus(index: usize, snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        actions.remove_chip(index);
        let remaining = snapshot.chip_count - 1;
        if remaining == 0 {
            actions.unfocus_chips();
        } else {
            actions.focus_chip(index.min(remaining - 1));
        }
    }

    fn handle_backspace(snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        if !snapshot.input.is_empty() || snapshot.chip_count == 0 {
            return;
        }
        match snapshot.focused_chip {
            // First Backspace only focuses the last chip; it does not delete.
            None => actions.focus_chip(snapshot.chip_count - 1),
            Some(index) => Self::remove_and_refocus(index, snapshot, actions),
        }
    }

    fn handle_delete(snapshot: &InputSnapshot, actions: &mut dyn InputActions) {
        if !snapshot.input.is_empty() {
            return;
        }
        // Unlike Backspace there is no focus-last-chip preamble.
        if let Some(index) = snapshot.focused_chip {
            Self::remove_and_refocus(index, snapshot, actions);
        }
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("fields", &self.fields.len())
            .field("presets", &self.presets.len())
            .field("nav", &self.nav)
            .finish()
    }
}
