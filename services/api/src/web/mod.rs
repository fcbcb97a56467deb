pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    create_booking_handler, health_handler, openapi_handler, overlapping_times_handler,
    payment_qr_handler, record_payment_handler,
};
use state::AppState;

/// Builds the API router. Cross-cutting layers (CORS, tracing) are added by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings/overlapping-times", get(overlapping_times_handler))
        .route("/bookings/{id}/payment-qr", post(payment_qr_handler))
        .route("/bookings/{id}/payments", post(record_payment_handler))
        .with_state(app_state)
}
