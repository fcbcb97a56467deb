//! In-memory `BookingStore` used by the core's unit tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Mutex;

use crate::domain::{Booking, NewBooking, NewPayment, Payment};
use crate::ports::{BookingStore, PortError, PortResult};

#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
    payments: Mutex<Vec<Payment>>,
    pub fail_reads: bool,
    /// Day reads return nothing, as if other requests' inserts were not yet visible.
    pub stale_reads: bool,
}

impl InMemoryBookingStore {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Mutex::new(bookings),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn with_stale_reads(mut self) -> Self {
        self.stale_reads = true;
        self
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn get_booking_by_id(&self, booking_id: i64) -> PortResult<Booking> {
        if self.fail_reads {
            return Err(PortError::Unexpected("store offline".to_string()));
        }
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Booking {} not found", booking_id)))
    }

    async fn get_bookings_for_field_between(
        &self,
        field_id: i64,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        exclude_booking_id: Option<i64>,
    ) -> PortResult<Vec<Booking>> {
        if self.fail_reads {
            return Err(PortError::Unexpected("store offline".to_string()));
        }
        if self.stale_reads {
            return Ok(Vec::new());
        }
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.field_id == field_id)
            .filter(|b| b.start_time >= day_start && b.start_time < day_end)
            .filter(|b| Some(b.id) != exclude_booking_id)
            .cloned()
            .collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        if bookings
            .iter()
            .any(|b| b.field_id == booking.field_id && b.collides_with(booking.start_time, booking.end_time))
        {
            return Err(PortError::Conflict("booking overlaps an existing booking".to_string()));
        }
        let stored = Booking {
            id: bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1,
            field_id: booking.field_id,
            customer_name: booking.customer_name,
            phone: booking.phone,
            start_time: booking.start_time,
            end_time: booking.end_time,
        };
        bookings.push(stored.clone());
        Ok(stored)
    }

    async fn save_payment(&self, payment: NewPayment) -> PortResult<Payment> {
        let mut payments = self.payments.lock().unwrap();
        let stored = Payment {
            id: payments.len() as i64 + 1,
            booking_id: payment.booking_id,
            method: payment.method,
            amount: payment.amount,
            status: payment.method.initial_status(),
            reference: payment.reference,
            created_at: Utc::now(),
        };
        payments.push(stored.clone());
        Ok(stored)
    }
}

/// `2024-01-01` at the given UTC time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    on(2024, 1, 1, hour, minute)
}

pub fn on(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    Utc.from_utc_datetime(&naive)
}

pub fn booking(id: i64, field_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
    Booking {
        id,
        field_id,
        customer_name: format!("Customer {}", id),
        phone: None,
        start_time: start,
        end_time: end,
    }
}
