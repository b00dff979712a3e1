use super::{delegate_primitive_body, findings_suffix, EM_ABSENT};
use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use crate::tlv_err;
use bytes::Bytes;

/// ASN.1 BIT STRING. The value-field carries one unused-bits octet
/// followed by the content octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    body: PrimitiveBody,
    unused_bits: u8,
    content: Bytes,
}

impl BitString {
    pub const EM_7: &'static str = "numberOfUnusedBits out of range";
    pub const EM_GT0: &'static str = "numberOfUnusedBits > 0 but empty bit-string";

    pub fn new(unused_bits: u8, content: &[u8]) -> Result<Self, TlvError> {
        if unused_bits > 7 {
            return Err(tlv_err!(ErrorCode::InvalidArgument, Self::EM_7));
        }
        if content.is_empty() && unused_bits != 0 {
            return Err(tlv_err!(ErrorCode::InvalidArgument, Self::EM_GT0));
        }
        let mut value = Vec::with_capacity(1 + content.len());
        value.push(unused_bits);
        value.extend_from_slice(content);
        Ok(BitString {
            body: PrimitiveBody::assemble(Tag::BIT_STRING, Bytes::from(value), Vec::new()),
            unused_bits,
            content: Bytes::copy_from_slice(content),
        })
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let mut findings = Vec::new();
        let (unused_bits, content) = if value.is_empty() {
            findings.push(EM_ABSENT.to_string());
            (0, Bytes::new())
        } else {
            let unused_bits = value[0];
            let content = value.slice(1..);
            if unused_bits > 7 {
                findings.push(Self::EM_7.to_string());
            }
            if content.is_empty() && unused_bits > 0 {
                findings.push(Self::EM_GT0.to_string());
            }
            (unused_bits, content)
        };
        Ok(BitString {
            body: PrimitiveBody::new(tag, value, findings)?,
            unused_bits,
            content,
        })
    }

    /// The first octet of the value-field, as read. Values above 7 only
    /// occur on nodes carrying the out-of-range finding.
    pub fn number_of_unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// Defensive copy of the content octets (without the unused-bits
    /// octet).
    pub fn content(&self) -> Vec<u8> {
        self.content.to_vec()
    }

    /// Renders the bits as groups of eight separated by a space, the final
    /// group truncated by the unused bits. Empty when no bit survives.
    pub fn to_bit_string(unused_bits: u8, content: &[u8]) -> String {
        let total_bits = 8 * content.len();
        if usize::from(unused_bits) >= total_bits {
            return String::new();
        }
        let keep = total_bits - usize::from(unused_bits);
        let mut out = String::with_capacity(keep + keep / 8);
        for index in 0..keep {
            if index > 0 && index % 8 == 0 {
                out.push(' ');
            }
            let bit = (content[index / 8] >> (7 - index % 8)) & 1;
            out.push(if bit == 1 { '1' } else { '0' });
        }
        out
    }

    pub fn comment(&self) -> String {
        let noun = if self.unused_bits == 1 { "bit" } else { "bits" };
        format!(
            " # BITSTRING: {} unused {}: '{}'{}",
            self.unused_bits,
            noun,
            Self::to_bit_string(self.unused_bits, &self.content),
            findings_suffix(self.body.findings())
        )
    }
}

delegate_primitive_body!(BitString);
