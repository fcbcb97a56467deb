//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `BookingStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use field_booking_core::domain::{Booking, NewBooking, NewPayment, Payment};
use field_booking_core::ports::{BookingStore, PortError, PortResult};
use field_booking_core::Amount;
use sqlx::{FromRow, PgPool};

/// Postgres error code for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres error code raised by `bookings_no_overlap`.
const EXCLUSION_VIOLATION: &str = "23P01";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `BookingStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct BookingRecord {
    id: i64,
    field_id: i64,
    customer_name: String,
    phone: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}
impl BookingRecord {
    fn to_domain(self) -> Booking {
        Booking {
            id: self.id,
            field_id: self.field_id,
            customer_name: self.customer_name,
            phone: self.phone,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[derive(FromRow)]
struct PaymentRecord {
    id: i64,
    booking_id: i64,
    method: String,
    amount_satang: i64,
    status: String,
    reference: Option<String>,
    created_at: DateTime<Utc>,
}
impl PaymentRecord {
    fn to_domain(self) -> PortResult<Payment> {
        Ok(Payment {
            id: self.id,
            booking_id: self.booking_id,
            method: self.method.parse().map_err(PortError::Unexpected)?,
            amount: Amount::from_satang(u64::try_from(self.amount_satang).map_err(|_| {
                PortError::Unexpected(format!("payment {} has a negative amount", self.id))
            })?),
            status: self.status.parse().map_err(PortError::Unexpected)?,
            reference: self.reference,
            created_at: self.created_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `BookingStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl BookingStore for DbAdapter {
    async fn get_booking_by_id(&self, booking_id: i64) -> PortResult<Booking> {
        let record = sqlx::query_as::<_, BookingRecord>(
            "SELECT id, field_id, customer_name, phone, start_time, end_time
             FROM bookings WHERE id = $1",
        )
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Booking {} not found", booking_id)),
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }

    async fn get_bookings_for_field_between(
        &self,
        field_id: i64,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        exclude_booking_id: Option<i64>,
    ) -> PortResult<Vec<Booking>> {
        let records = sqlx::query_as::<_, BookingRecord>(
            "SELECT id, field_id, customer_name, phone, start_time, end_time
             FROM bookings
             WHERE field_id = $1
               AND start_time >= $2
               AND start_time < $3
               AND ($4::BIGINT IS NULL OR id <> $4)
             ORDER BY start_time ASC, id ASC",
        )
        .bind(field_id)
        .bind(day_start)
        .bind(day_end)
        .bind(exclude_booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> PortResult<Booking> {
        let field_id = booking.field_id;
        let record = sqlx::query_as::<_, BookingRecord>(
            "INSERT INTO bookings (field_id, customer_name, phone, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, field_id, customer_name, phone, start_time, end_time",
        )
        .bind(booking.field_id)
        .bind(booking.customer_name)
        .bind(booking.phone)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let code = e
                .as_database_error()
                .and_then(|d| d.code())
                .map(|code| code.into_owned());
            match code.as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => PortError::NotFound(format!("Field {} not found", field_id)),
                Some(EXCLUSION_VIOLATION) => PortError::Conflict(format!(
                    "field {} is already booked for part of that time",
                    field_id
                )),
                _ => unexpected(e),
            }
        })?;
        Ok(record.to_domain())
    }

    async fn save_payment(&self, payment: NewPayment) -> PortResult<Payment> {
        let amount_satang = i64::try_from(payment.amount.satang())
            .map_err(|_| PortError::Unexpected("payment amount is too large".to_string()))?;
        let record = sqlx::query_as::<_, PaymentRecord>(
            "INSERT INTO payments (booking_id, method, amount_satang, status, reference)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, booking_id, method, amount_satang, status, reference, created_at",
        )
        .bind(payment.booking_id)
        .bind(payment.method.as_str())
        .bind(amount_satang)
        .bind(payment.method.initial_status().as_str())
        .bind(payment.reference)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        record.to_domain()
    }
}
