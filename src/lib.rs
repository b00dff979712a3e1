//! BER/DER TLV codec for smart-card and PKI data structures.
//!
//! Parsing is tolerant: a TLV that frames correctly but violates a DER
//! rule still decodes, carrying its violations as findings on the node.
//! Only inputs that cannot be framed at all fail with a [`TlvError`].
//! Encoding is always canonical (shortest-form length-fields, definite
//! lengths).

pub mod errors;
pub mod length;
pub mod source;
pub mod tag;
pub mod tlv;
pub mod tlv_types;

pub use errors::{ErrorCode, TlvError};
pub use source::{BufferSource, Source, StreamSource};
pub use tag::{Tag, TagClass};
pub use tlv::Tlv;
pub use tlv_types::{
    BitString, Boolean, Constructed, Date, EndOfContents, Ia5String, Integer, Null,
    ObjectIdentifier, OctetString, Primitive, PrintableString, Sequence, Set, TeletexString,
    UtcTime, Utf8String,
};

/// Parses exactly one TLV out of the buffer; trailing bytes are fatal.
pub fn parse(data: &[u8]) -> Result<Tlv, TlvError> {
    Tlv::parse(data)
}

/// Reads one TLV from the source, leaving the source positioned after it.
pub fn read(source: &mut dyn Source) -> Result<Tlv, TlvError> {
    Tlv::read(source)
}

/// Canonical encoding of the node.
pub fn encode(node: &Tlv) -> Vec<u8> {
    node.encoded().to_vec()
}

/// Writes the canonical encoding into the sink.
pub fn encode_to<W: std::io::Write>(node: &Tlv, sink: &mut W) -> std::io::Result<()> {
    node.encode_to(sink)
}

/// Hierarchical human-readable rendering of the node.
pub fn to_string_tree(node: &Tlv) -> String {
    node.to_string_tree()
}
