//! Numeric filter expression engine.
//!
//! Parses and evaluates comparison expressions typed into list-view filter
//! boxes, such as `>=90%` (at least 90 percent free) or `<10` (fewer than
//! ten). The same engine backs both percentage-style and discrete-count
//! fields; which forms a field accepts is controlled per call site through
//! [`NumericFilterOptions`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FilterError, Validity};

/// Grammar for a numeric filter expression: operator, number, optional `%`.
///
/// Two-character operators come before their one-character prefixes so `>=`
/// never half-matches as `>`.
static NUMERIC_FILTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(>=|<=|>|<|=)(\d+(?:\.\d+)?)(%)?$").unwrap_or_else(|_| unreachable!())
});

/// Comparison operators accepted by the numeric filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `=`
    Equal,
}

impl CompareOp {
    /// Parses an operator token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">=" => Some(Self::GreaterOrEqual),
            "<=" => Some(Self::LessOrEqual),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "=" => Some(Self::Equal),
            _ => None,
        }
    }

    /// Returns the operator's textual form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Equal => "=",
        }
    }

    /// Applies the operator to `actual` against `target`.
    #[must_use]
    pub fn apply(self, actual: f64, target: f64) -> bool {
        match self {
            Self::GreaterOrEqual => actual >= target,
            Self::LessOrEqual => actual <= target,
            Self::Greater => actual > target,
            Self::Less => actual < target,
            Self::Equal => (actual - target).abs() < f64::EPSILON,
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed numeric filter expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFilter {
    /// The comparison operator.
    pub operator: CompareOp,
    /// The target value to compare against.
    pub value: f64,
    /// Whether the expression carried a `%` suffix.
    pub is_percent: bool,
}

/// Which expression forms a field accepts.
#[derive(Debug, Clone, Copy)]
pub struct NumericFilterOptions {
    /// Accept `%`-suffixed expressions.
    pub allow_percent: bool,
    /// Accept plain (count) expressions.
    pub allow_discrete: bool,
}

impl Default for NumericFilterOptions {
    fn default() -> Self {
        Self {
            allow_percent: true,
            allow_discrete: true,
        }
    }
}

/// Parses a numeric filter expression.
///
/// Returns `None` for anything outside the grammar, including non-finite or
/// negative values. Never panics on malformed input.
#[must_use]
pub fn parse_numeric_filter(input: &str) -> Option<NumericFilter> {
    let caps = NUMERIC_FILTER_REGEX.captures(input.trim())?;
    let operator = CompareOp::from_token(caps.get(1)?.as_str())?;
    let value: f64 = caps.get(2)?.as_str().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(NumericFilter {
        operator,
        value,
        is_percent: caps.get(3).is_some(),
    })
}

/// Validates a numeric filter expression against the field's options.
///
/// Returns `Ok(())` or the specific user-facing message for the rejection.
pub fn validate_numeric_filter(input: &str, options: NumericFilterOptions) -> Validity {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FilterError::Empty);
    }
    if !trimmed.starts_with(['>', '<', '=']) {
        return Err(FilterError::MissingOperator);
    }
    let Some(filter) = parse_numeric_filter(trimmed) else {
        return Err(FilterError::UnparsableValue);
    };
    if filter.is_percent {
        if !options.allow_percent {
            return Err(FilterError::PercentNotAllowed);
        }
        if filter.value > 100.0 {
            return Err(FilterError::PercentOutOfRange);
        }
    } else if !options.allow_discrete {
        return Err(FilterError::DiscreteNotAllowed);
    }
    Ok(())
}

/// Compares an actual value against a filter target.
///
/// Percentages are integer-granularity by contract: the actual value is
/// rounded to the nearest integer before the comparison, so `=67%` matches
/// 66.7.
#[must_use]
pub fn compare_numeric(actual: f64, operator: CompareOp, target: f64, is_percent: bool) -> bool {
    let actual = if is_percent { actual.round() } else { actual };
    operator.apply(actual, target)
}

/// Accessor for a numeric field on an item.
pub type ValueAccessor<T> = Box<dyn Fn(&T) -> f64 + Send + Sync>;

/// Item predicate built from a filter expression string.
///
/// One matcher serves both the discrete and percentage renditions of a field
/// (e.g. GPUs free vs. GPUs free %): with a max accessor present, a percent
/// expression compares `value / max * 100`, otherwise the raw value.
pub struct NumericMatcher<T> {
    get_value: ValueAccessor<T>,
    get_max: Option<ValueAccessor<T>>,
}

impl<T> NumericMatcher<T> {
    /// Creates a matcher over a single value accessor.
    #[must_use]
    pub fn new(get_value: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            get_value: Box::new(get_value),
            get_max: None,
        }
    }

    /// Adds a max accessor, enabling percentage comparisons.
    #[must_use]
    pub fn with_max(mut self, get_max: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        self.get_max = Some(Box::new(get_max));
        self
    }

    /// Evaluates the filter expression against an item.
    ///
    /// An unparsable expression matches nothing.
    #[must_use]
    pub fn matches(&self, item: &T, filter: &str) -> bool {
        let Some(parsed) = parse_numeric_filter(filter) else {
            return false;
        };
        let raw = (self.get_value)(item);
        let actual = if parsed.is_percent {
            match &self.get_max {
                Some(get_max) => {
                    let max = get_max(item);
                    if max == 0.0 { 0.0 } else { raw / max * 100.0 }
                }
                None => raw,
            }
        } else {
            raw
        };
        compare_numeric(actual, parsed.operator, parsed.value, parsed.is_percent)
    }
}

impl<T> std::fmt::Debug for NumericMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericMatcher")
            .field("has_max", &self.get_max.is_some())
            .finish()
    }
}
