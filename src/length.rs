use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tlv_err;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Definite(u64),
    Indefinite,
}

/// Reads one length-field.
///
/// Long-form encodings padded with leading zero octets are accepted
/// silently; the padding never reaches the decoded value. A length whose
/// numeric value does not fit a signed 63-bit integer is fatal.
pub fn read_length(source: &mut dyn Source) -> Result<Length, TlvError> {
    let head = source.read_exact(1)?[0];

    if head == 0x80 {
        return Ok(Length::Indefinite);
    }
    if head & 0x80 == 0 {
        return Ok(Length::Definite(u64::from(head)));
    }

    let count = (head & 0x7F) as usize;
    let octets = source.read_exact(count)?;
    let significant: Vec<u8> = octets
        .iter()
        .copied()
        .skip_while(|&octet| octet == 0)
        .collect();

    if significant.len() > 8 || (significant.len() == 8 && significant[0] & 0x80 != 0) {
        return Err(tlv_err!(ErrorCode::LengthOverflow, "length too big"));
    }

    let value = significant
        .iter()
        .fold(0u64, |length, &octet| (length << 8) | u64::from(octet));
    Ok(Length::Definite(value))
}

/// Encodes a length in the shortest legal form.
pub fn encode_length(length: u64) -> Vec<u8> {
    if length <= 0x7F {
        return vec![length as u8];
    }

    let mut octets = Vec::new();
    let mut rest = length;
    while rest != 0 {
        octets.push((rest & 0xFF) as u8);
        rest >>= 8;
    }

    let mut encoded = Vec::with_capacity(1 + octets.len());
    encoded.push(0x80 | octets.len() as u8);
    for octet in octets.iter().rev() {
        encoded.push(*octet);
    }
    encoded
}
