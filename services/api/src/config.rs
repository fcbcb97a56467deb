//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::Duration;
use field_booking_core::{Amount, PaymentSettings};
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub cors_allowed_origin: String,
    pub payment: PaymentSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- Load Payment Settings ---
        let promptpay_id =
            lookup("PROMPTPAY_ID").ok_or_else(|| ConfigError::MissingVar("PROMPTPAY_ID".to_string()))?;

        let deposit_str = lookup("DEPOSIT_AMOUNT").unwrap_or_else(|| "500.00".to_string());
        let deposit_amount = deposit_str
            .parse::<Amount>()
            .map_err(|e| ConfigError::InvalidValue("DEPOSIT_AMOUNT".to_string(), e.to_string()))?;

        let ttl_str = lookup("PAYMENT_QR_TTL_MINUTES").unwrap_or_else(|| "15".to_string());
        let ttl_minutes = ttl_str
            .parse::<i64>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PAYMENT_QR_TTL_MINUTES".to_string(),
                    format!("'{}' is not a positive number of minutes", ttl_str),
                )
            })?;

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_allowed_origin,
            payment: PaymentSettings {
                promptpay_id,
                deposit_amount,
                qr_validity: Duration::minutes(ttl_minutes),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/fields"),
            ("PROMPTPAY_ID", "0812345678"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.payment.deposit_amount.to_string(), "500.00");
        assert_eq!(config.payment.qr_validity, Duration::minutes(15));
    }

    #[test]
    fn reads_payment_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/fields"),
            ("PROMPTPAY_ID", "1234567890123"),
            ("DEPOSIT_AMOUNT", "300.5"),
            ("PAYMENT_QR_TTL_MINUTES", "30"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.payment.promptpay_id, "1234567890123");
        assert_eq!(config.payment.deposit_amount.satang(), 30050);
        assert_eq!(config.payment.qr_validity, Duration::minutes(30));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn missing_required_vars_are_reported() {
        let err = Config::from_lookup(lookup_from(&[("PROMPTPAY_ID", "0812345678")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "DATABASE_URL"));

        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "PROMPTPAY_ID"));
    }

    #[test]
    fn invalid_values_are_reported() {
        let base = [("DATABASE_URL", "postgres://x"), ("PROMPTPAY_ID", "0812345678")];
        for (key, value) in [
            ("BIND_ADDRESS", "not-an-address"),
            ("DEPOSIT_AMOUNT", "5.005"),
            ("PAYMENT_QR_TTL_MINUTES", "0"),
            ("RUST_LOG", "loud"),
        ] {
            let mut pairs = base.to_vec();
            pairs.push((key, value));
            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(ref k, _) if k == key),
                "expected {} to be rejected",
                key
            );
        }
    }
}
