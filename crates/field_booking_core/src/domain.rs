//! crates/field_booking_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

use crate::money::Amount;

/// A reservation of one field for a contiguous span of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub field_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Booking {
    /// Half-open intersection test: bookings that only touch at a boundary
    /// do not collide.
    pub fn collides_with(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }
}

/// A booking that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub field_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    PromptPay,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::PromptPay => "promptpay",
        }
    }

    /// Cash is taken at the counter; transfers and QR payments wait for slip review.
    pub fn initial_status(&self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Confirmed,
            PaymentMethod::BankTransfer | PaymentMethod::PromptPay => {
                PaymentStatus::PendingVerification
            }
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "cash" => Ok(PaymentMethod::Cash),
            "promptpay" => Ok(PaymentMethod::PromptPay),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    PendingVerification,
    Confirmed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PendingVerification => "pending_verification",
            PaymentStatus::Confirmed => "confirmed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_verification" => Ok(PaymentStatus::PendingVerification),
            "confirmed" => Ok(PaymentStatus::Confirmed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// A recorded payment against a booking.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub method: PaymentMethod,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: i64,
    pub method: PaymentMethod,
    pub amount: Amount,
    pub reference: Option<String>,
}

/// Where deposits are paid to and how much they are.
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub promptpay_id: String,
    pub deposit_amount: Amount,
    pub qr_validity: Duration,
}

/// A rendered deposit QR code handed back to the customer.
#[derive(Debug, Clone)]
pub struct PaymentQr {
    pub qr_code: String,
    pub amount: Amount,
    pub expires_at: DateTime<Utc>,
    pub promptpay_id: String,
}
