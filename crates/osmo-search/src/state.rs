//! Navigation state for the chip search input.

use osmo_filter::SearchChip;
use serde::{Deserialize, Serialize};

/// The two hierarchy levels of suggestion navigation, mirroring the
/// `field:value` input grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationLevel {
    /// Cycling candidate field prefixes and presets.
    Field,
    /// Cycling candidate values for the typed field prefix.
    Value,
}

/// What a cycle item stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleItemKind {
    /// A field prefix; selecting it fills the prefix and descends a level.
    Field,
    /// A concrete value; selecting it completes `field:value`.
    Value,
    /// A preset (index into the engine's preset list); selecting it commits
    /// its chips immediately.
    Preset(usize),
}

/// One entry of a frozen cycle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleItem {
    /// What selecting this item does.
    pub kind: CycleItemKind,
    /// Text shown in the dropdown row.
    pub display: String,
    /// Text placed in the input while this item is highlighted.
    pub fill: String,
}

/// Keyboard navigation state.
///
/// The cycle list and highlight exist only while navigating; the list is
/// frozen at navigation entry so rapid Tab presses step through a stable set
/// even as live suggestions recompute per keystroke. Mutated only inside the
/// engine's dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Default interaction: free typing, arrow-key chip focus, plain Enter.
    #[default]
    Idle,
    /// Cycling a frozen item list at one of the two levels.
    Navigating {
        /// Which level is being cycled.
        level: NavigationLevel,
        /// Frozen candidate list. Empty right after a level transition,
        /// to be re-snapshotted from live suggestions on the next advance.
        items: Vec<CycleItem>,
        /// Highlighted index; always a valid index into `items` when set.
        highlighted: Option<usize>,
    },
}

impl NavigationState {
    /// Current level, or `None` when idle.
    #[must_use]
    pub fn level(&self) -> Option<NavigationLevel> {
        match self {
            Self::Idle => None,
            Self::Navigating { level, .. } => Some(*level),
        }
    }

    /// The highlighted cycle item, when navigating with a highlight.
    #[must_use]
    pub fn highlighted_item(&self) -> Option<&CycleItem> {
        match self {
            Self::Idle => None,
            Self::Navigating {
                items, highlighted, ..
            } => highlighted.and_then(|i| items.get(i)),
        }
    }
}

/// A named, pre-built set of chips offered as a one-step suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreset {
    /// Display label, e.g. `"Active workflows"`.
    pub label: String,
    /// Chips committed when the preset is selected.
    pub chips: Vec<SearchChip>,
}

impl SearchPreset {
    /// Creates a preset.
    #[must_use]
    pub fn new(label: impl Into<String>, chips: Vec<SearchChip>) -> Self {
        Self {
            label: label.into(),
            chips,
        }
    }
}
