mod bit_string;
mod boolean;
mod date;
mod end_of_contents;
mod generic;
mod integer;
mod null;
mod object_identifier;
mod octet_string;
mod sequence;
mod set;
mod strings;
mod utc_time;
mod utf8;

pub use bit_string::BitString;
pub use boolean::Boolean;
pub use date::Date;
pub use end_of_contents::EndOfContents;
pub use generic::{Constructed, Primitive};
pub use integer::Integer;
pub use null::Null;
pub use object_identifier::ObjectIdentifier;
pub use octet_string::OctetString;
pub use sequence::Sequence;
pub use set::Set;
pub use strings::{Ia5String, PrintableString, TeletexString};
pub use utc_time::UtcTime;
pub use utf8::Utf8String;

pub(crate) const EM_ABSENT: &str = "value-field absent";
pub(crate) const EM_WRONG_LENGTH: &str = "wrong length of value-field";
pub(crate) const EM_WRONG_CHARSET: &str = "wrong charset";
pub(crate) const EM_WRONG_FORMAT: &str = "wrong format";
pub(crate) const EM_INVALID_ENCODING: &str = "invalid encoding";

/// Comment suffix for invalid nodes; the first finding speaks for the node.
pub(crate) fn findings_suffix(findings: &[String]) -> String {
    match findings.first() {
        Some(first) => format!(", findings: {}", first),
        None => String::new(),
    }
}

/// Shared accessors every primitive variant delegates to its body.
macro_rules! delegate_primitive_body {
    ($ty:ident) => {
        impl $ty {
            pub fn tag(&self) -> &$crate::tag::Tag {
                self.body.tag()
            }

            pub fn length_of_value_field(&self) -> u64 {
                self.body.length_of_value_field()
            }

            pub fn length_field(&self) -> Vec<u8> {
                self.body.length_field()
            }

            pub fn value_field(&self) -> Vec<u8> {
                self.body.value_field()
            }

            pub fn findings(&self) -> &[String] {
                self.body.findings()
            }

            pub fn is_valid(&self) -> bool {
                self.body.is_valid()
            }

            pub fn encoded(&self) -> bytes::Bytes {
                self.body.encoded()
            }

            pub(crate) fn body(&self) -> &$crate::tlv::PrimitiveBody {
                &self.body
            }
        }
    };
}

/// Shared accessors every constructed variant delegates to its body.
macro_rules! delegate_constructed_body {
    ($ty:ident) => {
        impl $ty {
            pub fn tag(&self) -> &$crate::tag::Tag {
                self.body.tag()
            }

            pub fn length_of_value_field(&self) -> u64 {
                self.body.length_of_value_field()
            }

            pub fn length_field(&self) -> Vec<u8> {
                self.body.length_field()
            }

            pub fn value_field(&self) -> Vec<u8> {
                self.body.value_field()
            }

            pub fn findings(&self) -> &[String] {
                self.body.findings()
            }

            pub fn is_valid(&self) -> bool {
                self.body.is_valid()
            }

            pub fn encoded(&self) -> bytes::Bytes {
                self.body.encoded()
            }

            /// First child with a matching tag, if any.
            pub fn get(&self, tag: &$crate::tag::Tag) -> Option<&$crate::tlv::Tlv> {
                self.body.get(tag)
            }

            /// Read-only view of the child list.
            pub fn template(&self) -> &[$crate::tlv::Tlv] {
                self.body.children()
            }

            pub(crate) fn body(&self) -> &$crate::tlv::ConstructedBody {
                &self.body
            }
        }
    };
}

pub(crate) use delegate_constructed_body;
pub(crate) use delegate_primitive_body;
