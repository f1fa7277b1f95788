//! Generic active-filter aggregator.
//!
//! List pages hold several independent filter sources (free-text search,
//! set selections, numeric ranges). The aggregator folds them into one
//! uniform "active filters" row with shared remove/clear semantics. It holds
//! no state of its own — the output is recomputed from the live definitions
//! on every call, so the displayed chips can never drift from the predicates
//! actually applied.

type GetValuesFn = Box<dyn Fn() -> Vec<String>>;
type GetLabelFn = Box<dyn Fn(&str) -> String>;
type RemoveFn = Box<dyn Fn(&str)>;
type ClearFn = Box<dyn Fn()>;

/// Display-level projection of one active criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    /// Which definition produced this entry.
    pub kind: String,
    /// The underlying filter value.
    pub value: String,
    /// Label shown on the removable chip.
    pub label: String,
}

/// Binding between a display row and its owning filter primitive.
pub struct FilterDefinition {
    kind: String,
    get_values: GetValuesFn,
    get_label: Option<GetLabelFn>,
    remove: RemoveFn,
    clear: ClearFn,
}

impl FilterDefinition {
    /// Creates a definition for one filter source.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        get_values: impl Fn() -> Vec<String> + 'static,
        remove: impl Fn(&str) + 'static,
        clear: impl Fn() + 'static,
    ) -> Self {
        Self {
            kind: kind.into(),
            get_values: Box::new(get_values),
            get_label: None,
            remove: Box::new(remove),
            clear: Box::new(clear),
        }
    }

    /// Sets a label formatter; without one the raw value is the label.
    #[must_use]
    pub fn with_label(mut self, get_label: impl Fn(&str) -> String + 'static) -> Self {
        self.get_label = Some(Box::new(get_label));
        self
    }

    /// The definition's kind key.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl std::fmt::Debug for FilterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterDefinition")
            .field("kind", &self.kind)
            .finish()
    }
}

/// Folds all definitions into the current active-filter list.
#[must_use]
pub fn active_filters(definitions: &[FilterDefinition]) -> Vec<ActiveFilter> {
    definitions
        .iter()
        .flat_map(|def| {
            (def.get_values)().into_iter().map(|value| {
                let label = match &def.get_label {
                    Some(get_label) => get_label(&value),
                    None => value.clone(),
                };
                ActiveFilter {
                    kind: def.kind.clone(),
                    value,
                    label,
                }
            })
        })
        .collect()
}

/// Routes a chip removal to the definition that owns it.
///
/// Unknown kinds are ignored; a stale chip click must not panic the page.
pub fn remove_filter(definitions: &[FilterDefinition], filter: &ActiveFilter) {
    if let Some(def) = definitions.iter().find(|d| d.kind == filter.kind) {
        (def.remove)(&filter.value);
    }
}

/// Clears every filter source.
pub fn clear_all(definitions: &[FilterDefinition]) {
    for def in definitions {
        (def.clear)();
    }
}
