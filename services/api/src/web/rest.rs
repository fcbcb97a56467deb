//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::http_error;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use field_booking_core::{
    check_overlapping_times, create_booking, generate_payment_qr, record_payment, Amount, Booking,
    NewBooking, NewPayment, OverlapQuery, Payment, PaymentMethod,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        overlapping_times_handler,
        create_booking_handler,
        payment_qr_handler,
        record_payment_handler,
        health_handler,
    ),
    components(
        schemas(
            OverlappingTimesResponse,
            CreateBookingRequest,
            BookingResponse,
            PaymentQrResponse,
            RecordPaymentRequest,
            PaymentMethodDto,
            PaymentResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Field Booking API", description = "Availability, bookings and deposit payments for football fields.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Query string of the overlap endpoint. Values are validated by the core so
/// that a missing parameter gets the same clear message as a malformed one.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OverlapParams {
    /// The field to check.
    pub field_id: Option<String>,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Booking being edited; its own span is ignored.
    pub exclude_id: Option<String>,
}

/// Labels that cannot be chosen as a new start or a new end.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverlappingTimesResponse {
    pub start_times: Vec<String>,
    pub end_times: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub field_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub field_id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            field_id: b.field_id,
            customer_name: b.customer_name,
            phone: b.phone,
            start_time: b.start_time,
            end_time: b.end_time,
        }
    }
}

/// A deposit QR code and the terms it encodes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQrResponse {
    /// PNG image as a base64 data URI.
    pub qr_code: String,
    /// Amount in baht.
    pub amount: f64,
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "promptPayId")]
    pub promptpay_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodDto {
    BankTransfer,
    Cash,
    #[serde(rename = "promptpay")]
    PromptPay,
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(m: PaymentMethodDto) -> Self {
        match m {
            PaymentMethodDto::BankTransfer => PaymentMethod::BankTransfer,
            PaymentMethodDto::Cash => PaymentMethod::Cash,
            PaymentMethodDto::PromptPay => PaymentMethod::PromptPay,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub method: PaymentMethodDto,
    /// Amount in baht.
    pub amount: f64,
    /// Transfer slip or transaction reference.
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: i64,
    pub booking_id: i64,
    pub method: String,
    pub amount: f64,
    pub status: String,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            booking_id: p.booking_id,
            method: p.method.as_str().to_string(),
            amount: p.amount.as_baht(),
            status: p.status.as_str().to_string(),
            reference: p.reference,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the time labels already taken on a field for one day.
#[utoipa::path(
    get,
    path = "/bookings/overlapping-times",
    params(OverlapParams),
    responses(
        (status = 200, description = "Unavailable start and end labels", body = OverlappingTimesResponse),
        (status = 400, description = "Missing or malformed fieldId, date or excludeId"),
        (status = 503, description = "Booking data is unavailable")
    )
)]
pub async fn overlapping_times_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<OverlapParams>,
) -> Result<Json<OverlappingTimesResponse>, (StatusCode, String)> {
    const CONTEXT: &str = "Failed to check overlapping times";

    let query = OverlapQuery::parse(
        params.field_id.as_deref(),
        params.date.as_deref(),
        params.exclude_id.as_deref(),
    )
    .map_err(|e| http_error(CONTEXT, e))?;

    let times = check_overlapping_times(app_state.store.as_ref(), &query)
        .await
        .map_err(|e| http_error(CONTEXT, e))?;
    debug!(
        "Field {} on {}: {} start and {} end labels blocked",
        query.field_id,
        query.date,
        times.start_times.len(),
        times.end_times.len()
    );

    Ok(Json(OverlappingTimesResponse {
        start_times: times.start_times.into_vec(),
        end_times: times.end_times.into_vec(),
    }))
}

/// Book a field for a time span.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid booking span or customer details"),
        (status = 404, description = "Field not found"),
        (status = 409, description = "The span collides with an existing booking")
    )
)]
pub async fn create_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let booking = create_booking(
        app_state.store.as_ref(),
        NewBooking {
            field_id: req.field_id,
            customer_name: req.customer_name.trim().to_string(),
            phone: req.phone,
            start_time: req.start_time,
            end_time: req.end_time,
        },
    )
    .await
    .map_err(|e| http_error("Failed to create booking", e))?;

    info!(
        "Booking {} created for field {} ({} - {})",
        booking.id, booking.field_id, booking.start_time, booking.end_time
    );
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// Generate the PromptPay deposit QR code for a booking.
#[utoipa::path(
    post,
    path = "/bookings/{id}/payment-qr",
    params(
        ("id" = i64, Path, description = "The booking to pay the deposit for.")
    ),
    responses(
        (status = 200, description = "QR code generated", body = PaymentQrResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Payload encoding or QR rendering failed")
    )
)]
pub async fn payment_qr_handler(
    State(app_state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<Json<PaymentQrResponse>, (StatusCode, String)> {
    let qr = generate_payment_qr(
        app_state.store.as_ref(),
        app_state.qr_renderer.as_ref(),
        &app_state.config.payment,
        booking_id,
        Utc::now(),
    )
    .await
    .map_err(|e| http_error("Failed to generate payment QR code", e))?;

    Ok(Json(PaymentQrResponse {
        qr_code: qr.qr_code,
        amount: qr.amount.as_baht(),
        expires_at: qr.expires_at,
        promptpay_id: qr.promptpay_id,
    }))
}

/// Record a bank transfer, cash or PromptPay payment for a booking.
#[utoipa::path(
    post,
    path = "/bookings/{id}/payments",
    request_body = RecordPaymentRequest,
    params(
        ("id" = i64, Path, description = "The booking being paid for.")
    ),
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn record_payment_handler(
    State(app_state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    const CONTEXT: &str = "Failed to record payment";

    let amount = Amount::from_baht(req.amount).map_err(|e| http_error(CONTEXT, e))?;
    let payment = record_payment(
        app_state.store.as_ref(),
        NewPayment {
            booking_id,
            method: req.method.into(),
            amount,
            reference: req.reference,
        },
    )
    .await
    .map_err(|e| http_error(CONTEXT, e))?;

    info!(
        "Payment {} of {} by {} recorded for booking {}",
        payment.id, payment.amount, payment.method, payment.booking_id
    );
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Serves the generated OpenAPI document.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
