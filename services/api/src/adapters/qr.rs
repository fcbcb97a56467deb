//! services/api/src/adapters/qr.rs
//!
//! This module contains the QR code adapter. It implements the `QrRenderer`
//! port from the `core` crate using the `qrcode` crate for the symbol, the
//! `image` crate for PNG output and `base64` for the data URI.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use field_booking_core::{CoreError, CoreResult, QrRenderer};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Renders payloads as black-on-white PNG QR codes.
#[derive(Clone, Debug)]
pub struct QrCodeAdapter {
    width: u32,
    margin: u32,
    ec_level: EcLevel,
}

impl Default for QrCodeAdapter {
    /// 256 px wide, error correction level M, one module of margin.
    fn default() -> Self {
        Self::new(256, 1, EcLevel::M)
    }
}

impl QrCodeAdapter {
    /// Creates a new `QrCodeAdapter`.
    pub fn new(width: u32, margin: u32, ec_level: EcLevel) -> Self {
        Self {
            width,
            margin,
            ec_level,
        }
    }

    /// Rasterises the symbol to a square image `width` pixels wide. When the
    /// symbol has more modules than pixels, the image grows to one pixel per module.
    fn rasterise(&self, code: &QrCode) -> GrayImage {
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let total = modules + 2 * self.margin;
        let size = self.width.max(total);
        let margin = self.margin;

        GrayImage::from_fn(size, size, |x, y| {
            let mx = x * total / size;
            let my = y * total / size;
            if mx < margin || my < margin || mx >= margin + modules || my >= margin + modules {
                return LIGHT;
            }
            let index = ((my - margin) * modules + (mx - margin)) as usize;
            match colors[index] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        })
    }
}

//=========================================================================================
// `QrRenderer` Trait Implementation
//=========================================================================================

impl QrRenderer for QrCodeAdapter {
    fn render_data_uri(&self, payload: &str) -> CoreResult<String> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)
            .map_err(|e| CoreError::QrRender(format!("cannot encode {} bytes: {}", payload.len(), e)))?;

        let image = self.rasterise(&code);
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CoreError::QrRender(e.to_string()))?;

        Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
    }
}
