//! Chip/token filter model.
//!
//! A chip is one committed, atomic filter criterion. Chips are never mutated
//! in place: changes are expressed as remove-old/add-new at the owning
//! feature's filter-state layer. That immutability lets the same chip list
//! serve as a query cache key and as a URL-serializable value.

use serde::{Deserialize, Serialize};

/// One committed filter criterion.
///
/// The active list is an ordered sequence (insertion order is display
/// order). Uniqueness by `(field, value)` is a call-site concern, not
/// enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchChip {
    /// The field this chip filters on.
    pub field: String,
    /// The committed value.
    pub value: String,
    /// Display label, e.g. `"Status: Running"`.
    pub label: String,
}

impl SearchChip {
    /// Creates a chip.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            label: label.into(),
        }
    }
}

/// All committed values for a field, in insertion order.
#[must_use]
pub fn chip_values<'a>(chips: &'a [SearchChip], field: &str) -> Vec<&'a str> {
    chips
        .iter()
        .filter(|c| c.field == field)
        .map(|c| c.value.as_str())
        .collect()
}

/// First committed value for a field, for single-valued fields like
/// free-text search.
#[must_use]
pub fn first_chip_value<'a>(chips: &'a [SearchChip], field: &str) -> Option<&'a str> {
    chips
        .iter()
        .find(|c| c.field == field)
        .map(|c| c.value.as_str())
}

/// Copy of the chip list with values sorted within each field.
///
/// Display order is insertion order, but cache keys need a stable shape:
/// `status:A status:B` and `status:B status:A` select the same rows and must
/// produce the same key.
#[must_use]
pub fn sorted_for_key(chips: &[SearchChip]) -> Vec<SearchChip> {
    let mut sorted = chips.to_vec();
    sorted.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.value.cmp(&b.value)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chips() -> Vec<SearchChip> {
        vec![
            SearchChip::new("status", "RUNNING", "Status: Running"),
            SearchChip::new("name", "foo", "Search: foo"),
            SearchChip::new("status", "PENDING", "Status: Pending"),
        ]
    }

    #[test]
    fn chip_values_preserves_insertion_order() {
        let chips = sample_chips();
        assert_eq!(chip_values(&chips, "status"), vec!["RUNNING", "PENDING"]);
    }

    #[test]
    fn first_chip_value_returns_first_match() {
        let chips = sample_chips();
        assert_eq!(first_chip_value(&chips, "status"), Some("RUNNING"));
        assert_eq!(first_chip_value(&chips, "name"), Some("foo"));
        assert_eq!(first_chip_value(&chips, "pool"), None);
    }

    #[test]
    fn sorted_for_key_is_order_independent() {
        let mut reversed = sample_chips();
        reversed.reverse();
        assert_eq!(sorted_for_key(&sample_chips()), sorted_for_key(&reversed));
    }

    #[test]
    fn sorted_for_key_does_not_touch_input() {
        let chips = sample_chips();
        let _ = sorted_for_key(&chips);
        assert_eq!(chips, sample_chips());
    }

    #[test]
    fn chip_serialization_round_trip() {
        let chip = SearchChip::new("status", "RUNNING", "Status: Running");
        let json = serde_json::to_string(&chip).expect("serialize");
        let parsed: SearchChip = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(chip, parsed);
    }
}
