//! Live suggestion computation for the search dropdown.
//!
//! These functions recompute per keystroke; the navigation engine snapshots
//! their output into a frozen cycle list when navigation mode is entered.

use std::sync::Arc;

use osmo_filter::FieldSpec;

use crate::input::ParsedInput;
use crate::state::{CycleItem, CycleItemKind, SearchPreset};

fn starts_with_ignore_case(candidate: &str, typed: &str) -> bool {
    candidate
        .get(..typed.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(typed))
}

/// Field-level selectables: matching field prefixes followed by matching
/// presets. An empty input matches everything.
#[must_use]
pub fn field_level_items(
    fields: &[Arc<dyn FieldSpec>],
    presets: &[SearchPreset],
    typed: &str,
) -> Vec<CycleItem> {
    let mut items: Vec<CycleItem> = fields
        .iter()
        .filter(|f| starts_with_ignore_case(f.prefix(), typed))
        .map(|f| CycleItem {
            kind: CycleItemKind::Field,
            display: format!("{} {}", f.prefix(), f.hint()),
            fill: f.prefix().to_string(),
        })
        .collect();
    items.extend(
        presets
            .iter()
            .enumerate()
            .filter(|(_, p)| starts_with_ignore_case(&p.label, typed))
            .map(|(index, p)| CycleItem {
                kind: CycleItemKind::Preset(index),
                display: p.label.clone(),
                fill: p.label.clone(),
            }),
    );
    items
}

/// Value-level selectables for one field: candidate values matching the
/// typed query, filled back as complete `field:value` text.
#[must_use]
pub fn value_level_items(field: &dyn FieldSpec, query: &str) -> Vec<CycleItem> {
    field
        .values()
        .into_iter()
        .filter(|v| starts_with_ignore_case(v, query))
        .map(|v| CycleItem {
            kind: CycleItemKind::Value,
            display: v.clone(),
            fill: format!("{}{v}", field.prefix()),
        })
        .collect()
}

/// The live cycleable set for the current input: value suggestions once a
/// known field prefix is typed, field prefixes and presets otherwise.
/// An unknown prefix offers nothing.
#[must_use]
pub fn live_cycle_items(
    fields: &[Arc<dyn FieldSpec>],
    presets: &[SearchPreset],
    parsed: &ParsedInput,
    raw: &str,
) -> Vec<CycleItem> {
    if parsed.has_prefix {
        return match parsed.field {
            Some(index) => value_level_items(fields[index].as_ref(), &parsed.query),
            None => Vec::new(),
        };
    }
    field_level_items(fields, presets, raw)
}
