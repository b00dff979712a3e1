use super::{delegate_primitive_body, findings_suffix, EM_ABSENT, EM_INVALID_ENCODING};
use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use crate::tlv_err;
use bytes::Bytes;

/// ASN.1 OBJECT IDENTIFIER.
///
/// Sub-identifiers are base-128 with a more-follows bit; the first one
/// packs the leading two components as `X*40 + Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    body: PrimitiveBody,
    components: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn new(components: &[u64]) -> Result<Self, TlvError> {
        if components.len() < 2 {
            return Err(tlv_err!(
                ErrorCode::InvalidArgument,
                "at least 2 components required"
            ));
        }
        let first = components[0];
        let second = components[1];
        if first > 2 {
            return Err(tlv_err!(
                ErrorCode::InvalidArgument,
                "first component must be 0, 1, or 2"
            ));
        }
        if first < 2 && second > 39 {
            return Err(tlv_err!(
                ErrorCode::InvalidArgument,
                "second component must be <= 39 if first is 0 or 1"
            ));
        }
        let leading = first
            .checked_mul(40)
            .and_then(|v| v.checked_add(second))
            .ok_or_else(|| tlv_err!(ErrorCode::InvalidArgument, "second component out of range"))?;

        let mut value = Vec::new();
        write_subidentifier(leading, &mut value);
        for &component in &components[2..] {
            write_subidentifier(component, &mut value);
        }
        Ok(ObjectIdentifier {
            body: PrimitiveBody::assemble(Tag::OBJECT_IDENTIFIER, Bytes::from(value), Vec::new()),
            components: components.to_vec(),
        })
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let mut findings = Vec::new();
        let mut components = Vec::new();

        if value.is_empty() {
            findings.push(EM_ABSENT.to_string());
        } else {
            let mut rest: &[u8] = &value;
            let mut first = true;
            while !rest.is_empty() {
                match read_subidentifier(rest) {
                    Some((subidentifier, consumed)) => {
                        rest = &rest[consumed..];
                        if first {
                            first = false;
                            // X is capped at 2, everything beyond 79 is Y.
                            if subidentifier < 80 {
                                components.push(subidentifier / 40);
                                components.push(subidentifier % 40);
                            } else {
                                components.push(2);
                                components.push(subidentifier - 80);
                            }
                        } else {
                            components.push(subidentifier);
                        }
                    }
                    None => {
                        findings.push(EM_INVALID_ENCODING.to_string());
                        break;
                    }
                }
            }
        }

        Ok(ObjectIdentifier {
            body: PrimitiveBody::new(tag, value, findings)?,
            components,
        })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Dotted decimal notation, e.g. `1.2.840.113549`.
    pub fn dotted(&self) -> String {
        self.components
            .iter()
            .map(|component| component.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn comment(&self) -> String {
        format!(
            " # OID := {}{}",
            self.dotted(),
            findings_suffix(self.body.findings())
        )
    }
}

delegate_primitive_body!(ObjectIdentifier);

/// One base-128 sub-identifier; `None` on zero padding, a dangling
/// more-follows bit, or u64 overflow.
fn read_subidentifier(data: &[u8]) -> Option<(u64, usize)> {
    // A leading 0x80 octet carries no payload; the encoding must be
    // minimal.
    if data.first() == Some(&0x80) {
        return None;
    }
    let mut value: u64 = 0;
    for (index, &octet) in data.iter().enumerate() {
        value = value
            .checked_mul(128)?
            .checked_add(u64::from(octet & 0x7F))?;
        if octet & 0x80 == 0 {
            return Some((value, index + 1));
        }
    }
    None
}

fn write_subidentifier(value: u64, out: &mut Vec<u8>) {
    let mut chunks = vec![(value & 0x7F) as u8];
    let mut rest = value >> 7;
    while rest != 0 {
        chunks.push(0x80 | (rest & 0x7F) as u8);
        rest >>= 7;
    }
    chunks.reverse();
    out.extend_from_slice(&chunks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::Tlv;

    fn parse_oid(data: &[u8]) -> ObjectIdentifier {
        match Tlv::parse(data).unwrap() {
            Tlv::ObjectIdentifier(value) => value,
            other => panic!("expected ObjectIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_sha256_with_rsa() {
        // 1.2.840.113549.1.1.11
        let data = [
            0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B,
        ];
        let value = parse_oid(&data);
        assert_eq!(value.components(), &[1, 2, 840, 113549, 1, 1, 11]);
        assert_eq!(value.dotted(), "1.2.840.113549.1.1.11");
        assert!(value.is_valid());
        assert_eq!(value.comment(), " # OID := 1.2.840.113549.1.1.11");
    }

    #[test]
    fn test_encode_round_trip() {
        let value = ObjectIdentifier::new(&[1, 2, 840, 113549, 1, 1, 11]).unwrap();
        assert_eq!(
            value.encoded().as_ref(),
            &[0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B]
        );
        assert_eq!(parse_oid(value.encoded().as_ref()), value);
    }

    #[test]
    fn test_first_octet_split_with_large_y() {
        // 2.100: leading sub-identifier is 180, above the 80 threshold.
        let value = ObjectIdentifier::new(&[2, 100]).unwrap();
        assert_eq!(value.encoded().as_ref(), &[0x06, 0x02, 0x81, 0x34]);
        assert_eq!(parse_oid(value.encoded().as_ref()).components(), &[2, 100]);
    }

    #[test]
    fn test_constructor_validation() {
        assert_eq!(
            ObjectIdentifier::new(&[1]).unwrap_err().code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            ObjectIdentifier::new(&[3, 1]).unwrap_err().code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            ObjectIdentifier::new(&[1, 40]).unwrap_err().code(),
            ErrorCode::InvalidArgument
        );
        assert!(ObjectIdentifier::new(&[2, 40]).is_ok());
    }

    #[test]
    fn test_absent_value_field() {
        let value = parse_oid(&[0x06, 0x00]);
        assert_eq!(value.findings(), [EM_ABSENT]);
        assert!(value.components().is_empty());
        assert_eq!(value.comment(), " # OID := , findings: value-field absent");
    }

    #[test]
    fn test_dangling_continuation_octet() {
        let value = parse_oid(&[0x06, 0x02, 0x2A, 0x80]);
        assert_eq!(value.findings(), [EM_INVALID_ENCODING]);
        // The leading sub-identifier was still decoded.
        assert_eq!(value.components(), &[1, 2]);
        // Re-encode stays byte-faithful.
        assert_eq!(value.encoded().as_ref(), &[0x06, 0x02, 0x2A, 0x80]);
    }

    #[test]
    fn test_leading_zero_padding_in_subidentifier() {
        // 0x80 0x01 is a zero-padded encoding of 1.
        let value = parse_oid(&[0x06, 0x02, 0x80, 0x01]);
        assert_eq!(value.findings(), [EM_INVALID_ENCODING]);
        assert!(value.components().is_empty());
        assert_eq!(value.encoded().as_ref(), &[0x06, 0x02, 0x80, 0x01]);
    }

    #[test]
    fn test_leading_zero_padding_after_valid_subidentifier() {
        let value = parse_oid(&[0x06, 0x03, 0x2A, 0x80, 0x01]);
        assert_eq!(value.findings(), [EM_INVALID_ENCODING]);
        assert_eq!(value.components(), &[1, 2]);
    }

    #[test]
    fn test_subidentifier_overflow() {
        // Ten 0xFF octets push past u64.
        let mut data = vec![0x06, 0x0B, 0x2A];
        data.extend_from_slice(&[0xFF; 9]);
        data.push(0x7F);
        let value = parse_oid(&data);
        assert_eq!(value.findings(), [EM_INVALID_ENCODING]);
    }
}
