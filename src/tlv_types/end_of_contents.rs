use super::{delegate_primitive_body, findings_suffix, EM_WRONG_LENGTH};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;

/// The end-of-contents marker terminating indefinite-length constructed
/// encodings; on the wire it is the two octets `00 00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfContents {
    body: PrimitiveBody,
}

impl EndOfContents {
    pub const EOC: EndOfContents = EndOfContents {
        body: PrimitiveBody::from_static(Tag::END_OF_CONTENTS, Bytes::new()),
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
        Ok(EndOfContents {
            body: PrimitiveBody::new(tag, value, findings)?,
        })
    }

    pub fn comment(&self) -> String {
        format!(" # EndOfContent{}", findings_suffix(self.body.findings()))
    }
}

delegate_primitive_body!(EndOfContents);
