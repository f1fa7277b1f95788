//! Opaque page cursors.
//!
//! A cursor is a base64-encoded decimal offset into the cached dataset.
//! Clients treat it as opaque; the encoding exists so the wire format can
//! change without breaking callers that round-trip cursors verbatim.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

/// Encodes an offset into an opaque cursor string.
#[must_use]
pub fn encode_cursor(offset: usize) -> String {
    STANDARD.encode(offset.to_string())
}

/// Decodes a cursor back into an offset.
///
/// A malformed cursor decodes to offset 0 rather than failing the request;
/// the caller gets the first page instead of an error page.
#[must_use]
pub fn decode_cursor(cursor: &str) -> usize {
    let Ok(bytes) = STANDARD.decode(cursor) else {
        debug!(cursor, "cursor is not valid base64, falling back to offset 0");
        return 0;
    };
    let Ok(text) = String::from_utf8(bytes) else {
        debug!(cursor, "cursor payload is not UTF-8, falling back to offset 0");
        return 0;
    };
    text.parse().unwrap_or_else(|_| {
        debug!(cursor, "cursor payload is not a number, falling back to offset 0");
        0
    })
}
