//! # osmo-paginate
//!
//! Cursor/offset pagination for OSMO console resource tables.
//!
//! The backend serves some resource lists only in bulk, so the console
//! fetches the whole dataset once and pages through it locally. This crate
//! provides:
//!
//! - [`PageCache`] — Fetch-once cache serving pages as slices
//! - [`encode_cursor`] / [`decode_cursor`] — Opaque base64 offset cursors
//! - [`ResourceFetcher`] / [`ResourceItem`] — Integration traits for the
//!   backing store
//!
//! Cursors are forgiving: a malformed cursor addresses the first page
//! instead of erroring. Staleness is the caller's problem; mutate a
//! resource, then call [`PageCache::invalidate`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod cursor;
pub mod error;

// Re-export main types
pub use cache::{
    DEFAULT_FULL_FETCH_LIMIT, Page, PageCache, PageCacheConfig, PageRequest, ResourceFetcher,
    ResourceItem,
};
pub use cursor::{decode_cursor, encode_cursor};
pub use error::{PaginateError, Result};
