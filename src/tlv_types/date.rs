use super::{delegate_primitive_body, EM_WRONG_FORMAT};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;
use chrono::{Datelike, NaiveDate};

/// DATE, dispatched on the two-octet tag-field `1F 1F`. The value-field is
/// exactly eight ASCII digits, `YYYYMMDD`, naming a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    body: PrimitiveBody,
    value: Option<NaiveDate>,
}

impl Date {
    pub fn new(value: NaiveDate) -> Date {
        let text = format!("{:04}{:02}{:02}", value.year(), value.month(), value.day());
        Date {
            body: PrimitiveBody::assemble(Tag::DATE, Bytes::from(text.into_bytes()), Vec::new()),
            value: Some(value),
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let decoded = decode_date(&value);
        let findings = if decoded.is_some() {
            Vec::new()
        } else {
            vec![EM_WRONG_FORMAT.to_string()]
        };
        Ok(Date {
            body: PrimitiveBody::new(tag, value, findings)?,
            value: decoded,
        })
    }

    /// The calendar date, absent when the value-field is malformed.
    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn comment(&self) -> String {
        match self.value {
            Some(date) => format!(" # DATE := {}", date.format("%Y-%m-%d")),
            None => format!(
                " # DATE, findings: wrong format, value-field as UTF-8: {}",
                String::from_utf8_lossy(self.body.value())
            ),
        }
    }
}

delegate_primitive_body!(Date);

fn decode_date(value: &[u8]) -> Option<NaiveDate> {
    if value.len() != 8 || !value.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let digit = |index: usize| i32::from(value[index] - b'0');
    let year = digit(0) * 1000 + digit(1) * 100 + digit(2) * 10 + digit(3);
    let month = (digit(4) * 10 + digit(5)) as u32;
    let day = (digit(6) * 10 + digit(7)) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}
