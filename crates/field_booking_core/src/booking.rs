//! crates/field_booking_core/src/booking.rs
//!
//! Booking creation with collision checks, and payment recording.

use crate::availability::day_bounds;
use crate::domain::{Booking, NewBooking, NewPayment, Payment};
use crate::error::{CoreError, CoreResult};
use crate::ports::{BookingStore, PortError};

/// Validates and stores `new_booking`.
///
/// The booking must lie within one UTC day and must not intersect any other
/// booking for the same field on that day. Bookings that only share a
/// boundary are allowed. The read-side check gives a readable message; a
/// clash that slips past it is still refused by the store's insert.
pub async fn create_booking(store: &dyn BookingStore, new_booking: NewBooking) -> CoreResult<Booking> {
    if new_booking.field_id <= 0 {
        return Err(CoreError::Validation("fieldId must be a positive integer".to_string()));
    }
    if new_booking.customer_name.trim().is_empty() {
        return Err(CoreError::Validation("customerName is required".to_string()));
    }
    if new_booking.start_time >= new_booking.end_time {
        return Err(CoreError::Validation("startTime must be before endTime".to_string()));
    }

    let (day_start, day_end) = day_bounds(new_booking.start_time.date_naive());
    if new_booking.end_time > day_end {
        return Err(CoreError::Validation(
            "a booking must start and end on the same day".to_string(),
        ));
    }

    let existing = store
        .get_bookings_for_field_between(new_booking.field_id, day_start, day_end, None)
        .await?;
    if let Some(clash) = existing
        .iter()
        .find(|b| b.collides_with(new_booking.start_time, new_booking.end_time))
    {
        return Err(CoreError::Conflict(format!(
            "field {} is already booked from {} to {}",
            clash.field_id,
            clash.start_time.format("%H:%M"),
            clash.end_time.format("%H:%M")
        )));
    }

    store.create_booking(new_booking).await.map_err(|e| match e {
        PortError::Conflict(msg) => CoreError::Conflict(msg),
        other => CoreError::DataFetch(other),
    })
}

/// Records a payment against an existing booking.
pub async fn record_payment(store: &dyn BookingStore, new_payment: NewPayment) -> CoreResult<Payment> {
    if new_payment.amount.is_zero() {
        return Err(CoreError::Validation("amount must be greater than zero".to_string()));
    }
    store.get_booking_by_id(new_payment.booking_id).await?;
    Ok(store.save_payment(new_payment).await?)
}
