pub mod availability;
pub mod booking;
pub mod domain;
pub mod error;
pub mod money;
pub mod payment;
pub mod ports;
pub mod promptpay;

#[cfg(test)]
pub(crate) mod test_support;

pub use availability::{check_overlapping_times, unavailable_times, LabelSet, OverlapQuery, UnavailableTimes};
pub use booking::{create_booking, record_payment};
pub use domain::{
    Booking, NewBooking, NewPayment, Payment, PaymentMethod, PaymentQr, PaymentSettings,
    PaymentStatus,
};
pub use error::{CoreError, CoreResult};
pub use money::Amount;
pub use payment::generate_payment_qr;
pub use ports::{BookingStore, PortError, PortResult, QrRenderer};
pub use promptpay::{encode_payload, PromptPayRequest};
