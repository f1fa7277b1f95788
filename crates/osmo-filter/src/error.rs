//! Error types for filter primitives.

use thiserror::Error;

/// Validation outcome for user-typed filter input.
///
/// Expected bad input is a message, not a failure: every variant renders as
/// the text the search box shows next to the rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The input was empty after trimming.
    #[error("Enter a filter value")]
    Empty,

    /// No comparison operator at the start of the input.
    #[error("Start with a comparison operator (>=, <=, >, <, =)")]
    MissingOperator,

    /// The text after the operator is not a non-negative number.
    #[error("Enter a number after the operator")]
    UnparsableValue,

    /// A percent value was given but this field only accepts counts.
    #[error("This field does not accept percentages")]
    PercentNotAllowed,

    /// A plain count was given but this field only accepts percentages.
    #[error("This field requires a percentage (e.g. >=90%)")]
    DiscreteNotAllowed,

    /// Percent values may not exceed 100.
    #[error("Percentage cannot exceed 100")]
    PercentOutOfRange,

    /// A field prefix was typed with nothing after it.
    #[error("Enter a value after \"{0}\"")]
    MissingQuery(String),
}

/// Result type alias for filter validation.
pub type Validity = Result<(), FilterError>;
