//! A small writer for tag-length-value text fields.
//!
//! Each field is a 2-digit tag, a 2-digit zero-padded length and the value.

use crate::error::{CoreError, CoreResult};
use crate::promptpay::crc16::crc16_hex;

const MAX_VALUE_LEN: usize = 99;
const CHECKSUM_TAG: &str = "63";

#[derive(Debug, Default)]
pub struct TlvWriter {
    buf: String,
}

impl TlvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag`, the length of `value` and `value`.
    pub fn field(&mut self, tag: &str, value: &str) -> CoreResult<&mut Self> {
        if tag.len() != 2 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Encoding(format!("invalid TLV tag '{}'", tag)));
        }
        if !value.is_ascii() {
            return Err(CoreError::Encoding(format!(
                "value for tag {} contains non-ASCII characters",
                tag
            )));
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(CoreError::Encoding(format!(
                "value for tag {} is {} characters long, the limit is {}",
                tag,
                value.len(),
                MAX_VALUE_LEN
            )));
        }
        self.buf.push_str(tag);
        self.buf.push_str(&format!("{:02}", value.len()));
        self.buf.push_str(value);
        Ok(self)
    }

    /// Appends a field whose value is itself a TLV sequence.
    pub fn nested<F>(&mut self, tag: &str, build: F) -> CoreResult<&mut Self>
    where
        F: FnOnce(&mut TlvWriter) -> CoreResult<()>,
    {
        let mut inner = TlvWriter::new();
        build(&mut inner)?;
        self.field(tag, &inner.buf)
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Appends the `6304` checksum header and the CRC computed over
    /// everything written so far, header included.
    pub fn finish_with_crc(mut self) -> String {
        self.buf.push_str(CHECKSUM_TAG);
        self.buf.push_str("04");
        let crc = crc16_hex(&self.buf);
        self.buf.push_str(&crc);
        self.buf
    }
}
