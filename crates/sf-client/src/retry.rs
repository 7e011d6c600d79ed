//! Retry classification.
//!
//! This crate never retries on its own. It only tells the caller whether a
//! status code is worth resubmitting; backoff and resubmission are the
//! caller's business.

/// HTTP status codes that signal a retry-worthy failure.
pub const RETRYABLE_STATUS_CODES: [u16; 3] = [500, 503, 403];

/// Returns true iff `status` is one of [`RETRYABLE_STATUS_CODES`].
pub fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}
