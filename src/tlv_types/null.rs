use super::{delegate_primitive_body, findings_suffix, EM_WRONG_LENGTH};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;

/// ASN.1 NULL: an empty value-field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Null {
    body: PrimitiveBody,
}

impl Null {
    pub const NULL: Null = Null {
        body: PrimitiveBody::from_static(Tag::NULL, Bytes::new()),
    };

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let findings = if value.is_empty() {
            Vec::new()
        } else {
            vec![EM_WRONG_LENGTH.to_string()]
        };
        Ok(Null {
            body: PrimitiveBody::new(tag, value, findings)?,
        })
    }

    pub fn comment(&self) -> String {
        format!(" # NULL{}", findings_suffix(self.body.findings()))
    }
}

delegate_primitive_body!(Null);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::Tlv;

    #[test]
    fn test_singleton() {
        assert_eq!(Null::NULL.encoded().as_ref(), &[0x05, 0x00]);
        assert!(Null::NULL.is_valid());
        assert_eq!(Null::NULL.comment(), " # NULL");
    }

    #[test]
    fn test_parse_matches_singleton() {
        let node = Tlv::parse(&[0x05, 0x00]).unwrap();
        assert_eq!(node, Tlv::Null(Null::NULL));
    }

    #[test]
    fn test_nonempty_value_field() {
        let node = Tlv::parse(&[0x05, 0x01, 0x00]).unwrap();
        let Tlv::Null(value) = &node else {
            panic!("expected Null")
        };
        assert_eq!(value.findings(), [EM_WRONG_LENGTH]);
        assert!(!value.is_valid());
    }
}
