use super::{delegate_primitive_body, findings_suffix, EM_ABSENT, EM_WRONG_LENGTH};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;

/// ASN.1 BOOLEAN. Canonical value-field is a single octet, `0x00` or
/// `0xFF`; any other nonzero octet still decodes to `true` with a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    body: PrimitiveBody,
    value: bool,
}

impl Boolean {
    pub const TRUE: Boolean = Boolean {
        body: PrimitiveBody::from_static(Tag::BOOLEAN, Bytes::from_static(&[0xFF])),
        value: true,
    };

    pub const FALSE: Boolean = Boolean {
        body: PrimitiveBody::from_static(Tag::BOOLEAN, Bytes::from_static(&[0x00])),
        value: false,
    };

    pub fn new(value: bool) -> Boolean {
        if value { Self::TRUE } else { Self::FALSE }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let mut findings = Vec::new();
        let decoded = match value.len() {
            0 => {
                findings.push(EM_ABSENT.to_string());
                false
            }
            1 => match value[0] {
                0x00 => false,
                0xFF => true,
                _ => {
                    findings.push("non-canonical TRUE encoding".to_string());
                    true
                }
            },
            _ => {
                findings.push(EM_WRONG_LENGTH.to_string());
                value.iter().any(|&octet| octet != 0)
            }
        };
        Ok(Boolean {
            body: PrimitiveBody::new(tag, value, findings)?,
            value: decoded,
        })
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn comment(&self) -> String {
        format!(
            " # BOOLEAN := {}{}",
            self.value,
            findings_suffix(self.body.findings())
        )
    }
}

delegate_primitive_body!(Boolean);
