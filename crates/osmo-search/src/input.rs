//! Parsing of the raw search-box text.
//!
//! The input grammar is `field:query`. A [`ParsedInput`] is derived from the
//! raw text on every keystroke and never mutated in place.

use std::sync::Arc;

use osmo_filter::FieldSpec;

/// Transient view of the current search-box text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Whether the text carries a `field:` prefix (known or not).
    pub has_prefix: bool,
    /// Index into the engine's field list, when the prefix is a known field.
    pub field: Option<usize>,
    /// Text after the prefix, or the whole input without one.
    pub query: String,
}

impl ParsedInput {
    /// Derives the parsed view from raw text against the known fields.
    #[must_use]
    pub fn parse(fields: &[Arc<dyn FieldSpec>], raw: &str) -> Self {
        if let Some(colon) = raw.find(':') {
            let prefix = &raw[..=colon];
            let field = fields.iter().position(|f| f.prefix() == prefix);
            return Self {
                has_prefix: true,
                field,
                query: raw[colon + 1..].to_string(),
            };
        }
        Self {
            has_prefix: false,
            field: None,
            query: raw.to_string(),
        }
    }
}
