//! Response classification.
//!
//! Maps an HTTP status and raw response body onto success or a structured
//! [`ShelfError::Http`]. A malformed error body never surfaces as a decoding
//! failure; it degrades to the status-code fallback table so the caller always
//! sees the real HTTP failure.

use serde::Deserialize;

use crate::ShelfError;

/// Message used when the error body carries no usable `message`.
pub const FALLBACK_MESSAGE: &str = "Failed Shelf response.";

/// Shape of the JSON error body returned by Shelf.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    code: String,
}

/// Returns `true` if `status` signals success (`200 <= status < 400`).
pub fn is_success(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Returns the fallback error code for a status with no parseable error body.
pub fn fallback_code(status: u16) -> &'static str {
    match status {
        400 => "bad_request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "resource_not_found",
        500 => "internal_server_error",
        503 => "service_unavailable",
        504 => "gateway_timeout",
        _ => "unknown_error",
    }
}

/// Classifies one HTTP exchange.
///
/// Success statuses return `Ok(())` regardless of body content. Any other
/// status returns [`ShelfError::Http`] carrying the body's `code`/`message`
/// when both are present as strings, or the fallback table otherwise.
pub fn classify(status: u16, raw_body: &[u8]) -> Result<(), ShelfError> {
    if is_success(status) {
        return Ok(());
    }

    let error = match serde_json::from_slice::<ErrorBody>(raw_body) {
        Ok(body) => ShelfError::Http {
            status,
            code: body.code,
            message: body.message,
        },
        Err(_) => ShelfError::Http {
            status,
            code: fallback_code(status).to_string(),
            message: FALLBACK_MESSAGE.to_string(),
        },
    };

    tracing::debug!(status, code = error.code(), "Shelf request failed");
    Err(error)
}
