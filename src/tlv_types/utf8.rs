use super::{delegate_primitive_body, findings_suffix, EM_INVALID_ENCODING};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;

const REPLACEMENT: char = '\u{FFFD}';

/// ASN.1 UTF8String.
///
/// Decoding walks the value-field code-unit by code-unit: overlong forms,
/// 5-/6-octet sequences, surrogates, code points past U+10FFFF and stray
/// continuation octets are each replaced by U+FFFD, and the node carries a
/// single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8String {
    body: PrimitiveBody,
    value: String,
}

impl Utf8String {
    pub fn new(text: &str) -> Utf8String {
        Utf8String {
            body: PrimitiveBody::assemble(
                Tag::UTF8_STRING,
                Bytes::copy_from_slice(text.as_bytes()),
                Vec::new(),
            ),
            value: text.to_string(),
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let (decoded, clean) = decode_tolerant(&value);
        let findings = if clean {
            Vec::new()
        } else {
            vec![EM_INVALID_ENCODING.to_string()]
        };
        Ok(Utf8String {
            body: PrimitiveBody::new(tag, value, findings)?,
            value: decoded,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn comment(&self) -> String {
        format!(
            " # UTF8String := \"{}\"{}",
            self.value,
            findings_suffix(self.body.findings())
        )
    }
}

delegate_primitive_body!(Utf8String);

/// Best-effort UTF-8 decoding. Returns the decoded text and whether the
/// input was fully conformant.
fn decode_tolerant(bytes: &[u8]) -> (String, bool) {
    let mut out = String::with_capacity(bytes.len());
    let mut clean = true;
    let mut index = 0;

    while index < bytes.len() {
        let lead = bytes[index];
        let sequence_len = if lead < 0x80 {
            1
        } else if lead & 0xE0 == 0xC0 {
            2
        } else if lead & 0xF0 == 0xE0 {
            3
        } else if lead & 0xF8 == 0xF0 {
            4
        } else {
            // Stray continuation octet or 5-/6-octet lead.
            0
        };

        if sequence_len == 0 || index + sequence_len > bytes.len() {
            out.push(REPLACEMENT);
            clean = false;
            index += 1;
            continue;
        }

        let tail = &bytes[index + 1..index + sequence_len];
        if tail.iter().any(|&octet| octet & 0xC0 != 0x80) {
            out.push(REPLACEMENT);
            clean = false;
            index += 1;
            continue;
        }

        let code_point = match sequence_len {
            1 => u32::from(lead),
            2 => (u32::from(lead & 0x1F) << 6) | u32::from(tail[0] & 0x3F),
            3 => {
                (u32::from(lead & 0x0F) << 12)
                    | (u32::from(tail[0] & 0x3F) << 6)
                    | u32::from(tail[1] & 0x3F)
            }
            _ => {
                (u32::from(lead & 0x07) << 18)
                    | (u32::from(tail[0] & 0x3F) << 12)
                    | (u32::from(tail[1] & 0x3F) << 6)
                    | u32::from(tail[2] & 0x3F)
            }
        };

        let in_range = match sequence_len {
            1 => true,
            2 => code_point >= 0x80,
            3 => code_point >= 0x800 && !(0xD800..=0xDFFF).contains(&code_point),
            _ => (0x10000..=0x10FFFF).contains(&code_point),
        };

        match char::from_u32(code_point) {
            Some(decoded) if in_range => {
                out.push(decoded);
                index += sequence_len;
            }
            _ => {
                out.push(REPLACEMENT);
                clean = false;
                index += 1;
            }
        }
    }

    (out, clean)
}
