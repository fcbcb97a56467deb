//! Builds the PromptPay payment payload for a payee and a fixed amount.

use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::promptpay::crc16::crc16_hex;
use crate::promptpay::tlv::TlvWriter;

const PAYLOAD_FORMAT_INDICATOR: &str = "01";
const MERCHANT_AID: &str = "A000000677010111";
const BILL_PAYMENT_AID: &str = "A000000677010114";
const COUNTRY_CODE_MARKER: &str = "0000";
const CURRENCY_THB: &str = "764";
const COUNTRY_CODE: &str = "TH";
const ADDITIONAL_DATA: &str = "0000";
const CHECKSUM_LEN: usize = 4;

/// A payee and the amount to request from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayRequest {
    payee_id: String,
    amount: Amount,
}

impl PromptPayRequest {
    /// Strips spaces and dashes from `payee_id` and validates what is left.
    pub fn new(payee_id: &str, amount: Amount) -> CoreResult<Self> {
        let normalized: String = payee_id
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if normalized.is_empty() {
            return Err(CoreError::Validation("payee id is required".to_string()));
        }
        if !normalized.is_ascii() {
            return Err(CoreError::Encoding(format!(
                "payee id '{}' contains non-ASCII characters",
                payee_id
            )));
        }
        if !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "payee id '{}' must contain only digits",
                payee_id
            )));
        }

        Ok(Self {
            payee_id: normalized,
            amount,
        })
    }

    pub fn payee_id(&self) -> &str {
        &self.payee_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Encodes `request` as a TLV payload terminated by its CRC16 checksum.
/// The output depends only on the request.
pub fn encode_payload(request: &PromptPayRequest) -> CoreResult<String> {
    let mut w = TlvWriter::new();
    w.field("00", PAYLOAD_FORMAT_INDICATOR)?;
    w.nested("01", |inner| {
        inner.field("00", MERCHANT_AID)?;
        Ok(())
    })?;
    w.nested("02", |inner| {
        inner.field("00", BILL_PAYMENT_AID)?;
        Ok(())
    })?;
    w.nested("29", |inner| {
        inner.field("01", &request.payee_id)?;
        Ok(())
    })?;
    w.field("30", COUNTRY_CODE_MARKER)?;
    w.field("53", CURRENCY_THB)?;
    w.field("54", &request.amount.to_string())?;
    w.field("58", COUNTRY_CODE)?;
    w.field("62", ADDITIONAL_DATA)?;
    Ok(w.finish_with_crc())
}

/// True when the last four characters are the CRC16 of everything before them.
pub fn has_valid_checksum(payload: &str) -> bool {
    if !payload.is_ascii() || payload.len() < CHECKSUM_LEN {
        return false;
    }
    let (body, checksum) = payload.split_at(payload.len() - CHECKSUM_LEN);
    crc16_hex(body) == checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payee_id: &str, satang: u64) -> PromptPayRequest {
        PromptPayRequest::new(payee_id, Amount::from_satang(satang)).unwrap()
    }

    #[test]
    fn encodes_mobile_number_payload() {
        let payload = encode_payload(&request("0812345678", 10000)).unwrap();
        assert_eq!(
            payload,
            concat!(
                "000201",
                "01200016A000000677010111",
                "02200016A000000677010114",
                "291401100812345678",
                "30040000",
                "5303764",
                "5406100.00",
                "5802TH",
                "62040000",
                "6304DD14",
            )
        );
    }

    #[test]
    fn encodes_national_id_payload() {
        let payload = encode_payload(&request("1234567890123", 50000)).unwrap();
        assert!(payload.contains("291701131234567890123"));
        assert!(payload.contains("5406500.00"));
        assert!(payload.ends_with("6304F425"));
    }

    #[test]
    fn checksum_round_trips() {
        let payload = encode_payload(&request("0812345678", 10000)).unwrap();
        let (body, checksum) = payload.split_at(payload.len() - 4);
        assert!(body.ends_with("6304"));
        assert_eq!(crc16_hex(body), checksum);
        assert!(has_valid_checksum(&payload));
    }

    #[test]
    fn zero_padded_checksum_for_zero_amount() {
        let payload = encode_payload(&request("0812345678", 0)).unwrap();
        assert!(payload.contains("54040.00"));
        assert!(payload.ends_with("63040941"));
    }

    #[test]
    fn spaces_and_dashes_are_stripped() {
        let plain = encode_payload(&request("0812345678", 10000)).unwrap();
        let formatted = encode_payload(&request(" 081-234 5678 ", 10000)).unwrap();
        assert_eq!(plain, formatted);
    }

    #[test]
    fn same_input_gives_identical_payload() {
        let a = encode_payload(&request("0812345678", 12345)).unwrap();
        let b = encode_payload(&request("0812345678", 12345)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tampered_payload_fails_checksum() {
        let payload = encode_payload(&request("0812345678", 10000)).unwrap();
        let tampered = payload.replace("100.00", "900.00");
        assert!(!has_valid_checksum(&tampered));
        assert!(!has_valid_checksum("abc"));
    }

    #[test]
    fn rejects_empty_and_non_digit_payees() {
        for bad in ["", " - ", "08123x5678"] {
            assert!(
                matches!(
                    PromptPayRequest::new(bad, Amount::from_satang(100)),
                    Err(CoreError::Validation(_))
                ),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn non_ascii_payee_is_an_encoding_error() {
        let err = PromptPayRequest::new("๐๘๑๒๓๔๕๖๗๘", Amount::from_satang(100)).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn overlong_payee_is_an_encoding_error() {
        let long_id = "1".repeat(97);
        let err = encode_payload(&request(&long_id, 100)).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }
}
