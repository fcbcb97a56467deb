//! crates/field_booking_core/src/error.rs
//!
//! The error taxonomy shared by every core operation. Each variant is a
//! distinct failure kind so callers can tell bad input apart from a broken
//! data store, a broken payload and a broken image library.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller supplied missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The booking store could not answer.
    #[error("Data fetch failed: {0}")]
    DataFetch(#[from] PortError),

    /// The requested booking collides with an existing one.
    #[error("Booking conflict: {0}")]
    Conflict(String),

    /// The PromptPay payload could not be built from the given values.
    #[error("Payload encoding error: {0}")]
    Encoding(String),

    /// The QR image library failed to render the payload.
    #[error("QR rendering error: {0}")]
    QrRender(String),
}

/// A convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;
