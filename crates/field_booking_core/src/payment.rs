//! crates/field_booking_core/src/payment.rs
//!
//! Deposit QR codes for existing bookings.

use chrono::{DateTime, Utc};

use crate::domain::{PaymentQr, PaymentSettings};
use crate::error::CoreResult;
use crate::ports::{BookingStore, QrRenderer};
use crate::promptpay::{encode_payload, PromptPayRequest};

/// Builds the PromptPay deposit QR for `booking_id`.
///
/// The booking must exist. Payload encoding failures surface as
/// `CoreError::Encoding`, image failures as `CoreError::QrRender`.
pub async fn generate_payment_qr(
    store: &dyn BookingStore,
    renderer: &dyn QrRenderer,
    settings: &PaymentSettings,
    booking_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<PaymentQr> {
    store.get_booking_by_id(booking_id).await?;

    let request = PromptPayRequest::new(&settings.promptpay_id, settings.deposit_amount)?;
    let payload = encode_payload(&request)?;
    let qr_code = renderer.render_data_uri(&payload)?;

    Ok(PaymentQr {
        qr_code,
        amount: request.amount(),
        expires_at: now + settings.qr_validity,
        promptpay_id: request.payee_id().to_string(),
    })
}
