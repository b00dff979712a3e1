use super::{delegate_primitive_body, EM_WRONG_FORMAT};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::PrimitiveBody;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// ASN.1 UTC TIME: `YYMMDDhhmm`, optional seconds, terminated by `Z` or a
/// `±hhmm` offset. Two-digit years window at 50: 00–49 are the 2000s,
/// 50–99 the 1900s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcTime {
    body: PrimitiveBody,
    value: Option<DateTime<Utc>>,
}

impl UtcTime {
    pub fn new(value: DateTime<Utc>) -> UtcTime {
        let text = value.format("%y%m%d%H%M%SZ").to_string();
        UtcTime {
            body: PrimitiveBody::assemble(Tag::UTC_TIME, Bytes::from(text.into_bytes()), Vec::new()),
            value: Some(value),
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Self::from_value_field(tag, value)
    }

    pub(crate) fn from_value_field(tag: Tag, value: Bytes) -> Result<Self, TlvError> {
        let decoded = decode_utc_time(&value);
        let findings = if decoded.is_some() {
            Vec::new()
        } else {
            vec![EM_WRONG_FORMAT.to_string()]
        };
        Ok(UtcTime {
            body: PrimitiveBody::new(tag, value, findings)?,
            value: decoded,
        })
    }

    /// The point in time, normalized to UTC; absent when the value-field is
    /// malformed.
    pub fn value(&self) -> Option<DateTime<Utc>> {
        self.value
    }

    pub fn comment(&self) -> String {
        match self.value {
            Some(time) => format!(" # UTCTime := {}", time.format("%Y-%m-%dT%H:%M:%SZ")),
            None => format!(
                " # UTCTime, findings: wrong format, value-field as UTF-8: {}",
                String::from_utf8_lossy(self.body.value())
            ),
        }
    }
}

delegate_primitive_body!(UtcTime);

fn decode_utc_time(value: &[u8]) -> Option<DateTime<Utc>> {
    let text = std::str::from_utf8(value).ok()?;
    let year = text.get(0..2)?;
    if !year.bytes().all(|octet| octet.is_ascii_digit()) {
        return None;
    }
    // Expand the two-digit year so chrono does not apply its own window.
    let century = if year.parse::<u32>().ok()? >= 50 {
        "19"
    } else {
        "20"
    };
    let expanded = format!("{century}{text}");

    for format in ["%Y%m%d%H%M%SZ", "%Y%m%d%H%MZ"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&expanded, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y%m%d%H%M%S%z", "%Y%m%d%H%M%z"] {
        if let Ok(zoned) = DateTime::parse_from_str(&expanded, format) {
            return Some(zoned.with_timezone(&Utc));
        }
    }
    None
}
