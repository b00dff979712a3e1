use super::{delegate_primitive_body, findings_suffix, EM_WRONG_CHARSET};
use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use crate::tlv_err;
use bytes::Bytes;

/// Restricted-charset string types. One octet is one character; octets
/// outside the type's charset decode to U+FFFD and yield a finding.
macro_rules! charset_string_type {
    ($name:ident, $tag:expr, $label:literal, $accept:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            body: PrimitiveBody,
            value: String,
        }

        impl $name {
            pub fn new(text: &str) -> Result<Self, TlvError> {
                let mut octets = Vec::with_capacity(text.len());
                for character in text.chars() {
                    if character as u32 > 0xFF || !($accept)(character) {
                        return Err(tlv_err!(
                            ErrorCode::InvalidArgument,
                            "invalid content for {}",
                            $label
                        ));
                    }
                    octets.push(character as u8);
                }
                Ok($name {
                    body: PrimitiveBody::assemble($tag, Bytes::from(octets), Vec::new()),
                    value: text.to_string(),
                })
            }

            pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
                let value = PrimitiveBody::read_value_field(source)?;
                Self::from_value_field(tag, value)
            }

            pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
                let mut clean = true;
                let mut decoded = String::with_capacity(value.len());
                for &octet in value.iter() {
                    let character = octet as char;
                    if ($accept)(character) {
                        decoded.push(character);
                    } else {
                        decoded.push('\u{FFFD}');
                        clean = false;
                    }
                }
                let findings = if clean {
                    Vec::new()
                } else {
                    vec![EM_WRONG_CHARSET.to_string()]
                };
                Ok($name {
                    body: PrimitiveBody::new(tag, value, findings)?,
                    value: decoded,
                })
            }

            pub fn value(&self) -> &str {
                &self.value
            }

            pub fn comment(&self) -> String {
                format!(
                    " # {} := \"{}\"{}",
                    $label,
                    self.value,
                    findings_suffix(self.body.findings())
                )
            }
        }

        delegate_primitive_body!($name);
    };
}

charset_string_type!(
    PrintableString,
    Tag::PRINTABLE_STRING,
    "PrintableString",
    |c: char| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?'
            )
    }
);

charset_string_type!(Ia5String, Tag::IA5_STRING, "IA5String", |c: char| c
    .is_ascii());

// T.61 in full is a moving target; every octet is taken as Latin-1.
charset_string_type!(
    TeletexString,
    Tag::TELETEX_STRING,
    "TeletexString",
    |c: char| c as u32 <= 0xFF
);
