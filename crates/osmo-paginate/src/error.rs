//! Error types for pagination.

use thiserror::Error;

/// Errors that can occur while serving a page.
#[derive(Debug, Error)]
pub enum PaginateError {
    /// The upstream fetch failed.
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Result alias for pagination operations.
pub type Result<T> = std::result::Result<T, PaginateError>;
