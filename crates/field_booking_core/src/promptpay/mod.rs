//! PromptPay payment payloads: a TLV text format closed by a CRC16 checksum.

pub mod crc16;
pub mod payload;
pub mod tlv;

pub use crc16::{crc16_ccitt_false, crc16_hex};
pub use payload::{encode_payload, has_valid_checksum, PromptPayRequest};
pub use tlv::TlvWriter;
