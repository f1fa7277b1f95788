//! Search field definitions.
//!
//! A [`SearchField`] is the strategy object behind one filterable column:
//! its chip prefix, input hints, candidate values, validation, and item
//! matching. One instance is built per column at table-definition time and
//! is read-only afterwards.
//!
//! The keyboard engine only needs the input-facing half (prefix, hints,
//! values, validation), which is the [`FieldSpec`] trait; item matching stays
//! on the concrete, item-typed [`SearchField`].

use crate::error::Validity;

/// Input-facing contract of a filterable field.
///
/// This is the seam between filter definitions and the search input: the
/// keyboard engine cycles and validates against `dyn FieldSpec` without
/// knowing the item type being filtered.
pub trait FieldSpec: Send + Sync {
    /// Field key stored in committed chips.
    fn name(&self) -> &str;

    /// Typed prefix that selects this field, e.g. `"status:"`.
    fn prefix(&self) -> &str;

    /// Hint shown while the field's prefix is typed.
    fn hint(&self) -> &str;

    /// Hint for free-form values, when the field accepts them.
    fn free_form_hint(&self) -> Option<&str> {
        None
    }

    /// Candidate values offered as suggestions.
    fn values(&self) -> Vec<String>;

    /// Validates a value before commit.
    fn validate(&self, _value: &str) -> Validity {
        Ok(())
    }
}

type ValuesFn = Box<dyn Fn() -> Vec<String> + Send + Sync>;
type ValidateFn = Box<dyn Fn(&str) -> Validity + Send + Sync>;
type MatchFn<T> = Box<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// A filterable column definition for items of type `T`.
pub struct SearchField<T> {
    name: String,
    prefix: String,
    hint: String,
    free_form_hint: Option<String>,
    values: ValuesFn,
    validate: Option<ValidateFn>,
    matches: MatchFn<T>,
}

impl<T> SearchField<T> {
    /// Creates a field with a name, prefix, hint, and item matcher.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        hint: impl Into<String>,
        matches: impl Fn(&T, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            hint: hint.into(),
            free_form_hint: None,
            values: Box::new(Vec::new),
            validate: None,
            matches: Box::new(matches),
        }
    }

    /// Sets the candidate-value provider.
    #[must_use]
    pub fn with_values(mut self, values: impl Fn() -> Vec<String> + Send + Sync + 'static) -> Self {
        self.values = Box::new(values);
        self
    }

    /// Sets the value validator.
    #[must_use]
    pub fn with_validate(
        mut self,
        validate: impl Fn(&str) -> Validity + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Sets the free-form hint.
    #[must_use]
    pub fn with_free_form_hint(mut self, hint: impl Into<String>) -> Self {
        self.free_form_hint = Some(hint.into());
        self
    }

    /// Evaluates the field's matcher against an item.
    #[must_use]
    pub fn matches(&self, item: &T, value: &str) -> bool {
        (self.matches)(item, value)
    }
}

impl<T> FieldSpec for SearchField<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn hint(&self) -> &str {
        &self.hint
    }

    fn free_form_hint(&self) -> Option<&str> {
        self.free_form_hint.as_deref()
    }

    fn values(&self) -> Vec<String> {
        (self.values)()
    }

    fn validate(&self, value: &str) -> Validity {
        match &self.validate {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }
}

impl<T> std::fmt::Debug for SearchField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchField")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::numeric::{NumericFilterOptions, NumericMatcher, validate_numeric_filter};

    struct Workflow {
        status: String,
        gpus_free: f64,
        gpus_total: f64,
    }

    fn status_field() -> SearchField<Workflow> {
        SearchField::new("status", "status:", "Filter by status", |w: &Workflow, v| {
            w.status.eq_ignore_ascii_case(v)
        })
        .with_values(|| vec!["RUNNING".to_string(), "PENDING".to_string()])
    }

    #[test]
    fn field_matches_items() {
        let field = status_field();
        let workflow = Workflow {
            status: "RUNNING".to_string(),
            gpus_free: 0.0,
            gpus_total: 0.0,
        };
        assert!(field.matches(&workflow, "running"));
        assert!(!field.matches(&workflow, "pending"));
    }

    #[test]
    fn field_spec_exposes_values() {
        let field = status_field();
        let spec: &dyn FieldSpec = &field;
        assert_eq!(spec.name(), "status");
        assert_eq!(spec.prefix(), "status:");
        assert_eq!(spec.values(), vec!["RUNNING", "PENDING"]);
        assert_eq!(spec.validate("anything"), Ok(()));
    }

    #[test]
    fn numeric_field_composes_with_matcher() {
        let matcher = NumericMatcher::new(|w: &Workflow| w.gpus_free)
            .with_max(|w: &Workflow| w.gpus_total);
        let field = SearchField::new("gpus", "gpus:", "Filter by free GPUs", move |w, v| {
            matcher.matches(w, v)
        })
        .with_validate(|v| validate_numeric_filter(v, NumericFilterOptions::default()))
        .with_free_form_hint(">=N or >=N%");

        let workflow = Workflow {
            status: "RUNNING".to_string(),
            gpus_free: 6.0,
            gpus_total: 8.0,
        };
        assert!(field.matches(&workflow, ">=75%"));
        assert_eq!(field.validate(">=101%"), Err(FilterError::PercentOutOfRange));
        assert_eq!(field.free_form_hint(), Some(">=N or >=N%"));
    }
}
