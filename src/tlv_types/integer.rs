use super::{delegate_primitive_body, findings_suffix, EM_ABSENT};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// ASN.1 INTEGER, stored as an arbitrary-precision signed integer.
///
/// The canonical form is the shortest two's-complement big-endian
/// representation. An encoding whose first nine bits are all equal is
/// tolerated but reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    body: PrimitiveBody,
    value: BigInt,
}

impl Integer {
    pub const EM_9: &'static str = "9 MSBit all equal";

    pub fn new(value: impl Into<BigInt>) -> Integer {
        let value = value.into();
        let encoded = value.to_signed_bytes_be();
        Integer {
            body: PrimitiveBody::assemble(Tag::INTEGER, Bytes::from(encoded), Vec::new()),
            value,
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let mut findings = Vec::new();
        let decoded = if value.is_empty() {
            findings.push(EM_ABSENT.to_string());
            BigInt::zero()
        } else {
            if value.len() >= 2 {
                let first = value[0];
                let second_msbit = value[1] & 0x80;
                if (first == 0x00 && second_msbit == 0x00) || (first == 0xFF && second_msbit == 0x80)
                {
                    findings.push(Self::EM_9.to_string());
                }
            }
            BigInt::from_signed_bytes_be(&value)
        };
        Ok(Integer {
            body: PrimitiveBody::new(tag, value, findings)?,
            value: decoded,
        })
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    pub fn comment(&self) -> String {
        format!(
            " # INTEGER := {}{}",
            self.value,
            findings_suffix(self.body.findings())
        )
    }
}

delegate_primitive_body!(Integer);
