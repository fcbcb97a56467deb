//! crates/field_booking_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or
//! image libraries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Booking, NewBooking, NewPayment, Payment};
use crate::error::CoreResult;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The store refused a write that would clash with data it already holds.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_booking_by_id(&self, booking_id: i64) -> PortResult<Booking>;

    /// Bookings for `field_id` whose start falls in `[day_start, day_end)`,
    /// leaving out `exclude_booking_id` when given.
    async fn get_bookings_for_field_between(
        &self,
        field_id: i64,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        exclude_booking_id: Option<i64>,
    ) -> PortResult<Vec<Booking>>;

    /// Inserts `booking`. Implementations must refuse, with
    /// `PortError::Conflict`, a booking that overlaps another booking of the
    /// same field, even when both requests passed the read-side check.
    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking>;

    async fn save_payment(&self, payment: NewPayment) -> PortResult<Payment>;
}

/// Turns a text payload into an embeddable image.
pub trait QrRenderer: Send + Sync {
    /// Renders `payload` as a PNG and returns it as a base64 data URI.
    fn render_data_uri(&self, payload: &str) -> CoreResult<String>;
}
