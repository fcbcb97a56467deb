//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use field_booking_core::ports::{BookingStore, QrRenderer};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub qr_renderer: Arc<dyn QrRenderer>,
    pub config: Arc<Config>,
}
