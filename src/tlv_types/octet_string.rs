use super::delegate_primitive_body;
use crate::errors::TlvError;
use crate::source::{BufferSource, Source};
use crate::tag::Tag;
use crate::tlv::{PrimitiveBody, Tlv};
use bytes::Bytes;

/// ASN.1 OCTET STRING: opaque bytes, often transporting nested TLV
/// structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    body: PrimitiveBody,
}

impl OctetString {
    pub fn new(data: &[u8]) -> OctetString {
        OctetString {
            body: PrimitiveBody::assemble(
                Tag::OCTET_STRING,
                Bytes::copy_from_slice(data),
                Vec::new(),
            ),
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        Ok(OctetString {
            body: PrimitiveBody::new(tag, value, Vec::new())?,
        })
    }

    /// Defensive copy of the content.
    pub fn decoded(&self) -> Vec<u8> {
        self.body.value_field()
    }

    /// The content re-parsed as TLV structures, when it frames completely
    /// into one or more valid nodes.
    pub fn embedded_tlvs(&self) -> Option<Vec<Tlv>> {
        if self.body.value().is_empty() {
            return None;
        }
        let mut source = BufferSource::new(self.body.value().clone());
        let mut nodes = Vec::new();
        while source.remaining() > 0 {
            match Tlv::read(&mut source) {
                Ok(node) if node.is_valid() => nodes.push(node),
                _ => return None,
            }
        }
        Some(nodes)
    }

    pub fn comment(&self) -> String {
        " # OCTETSTRING".to_string()
    }
}

delegate_primitive_body!(OctetString);
