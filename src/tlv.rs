use crate::errors::{ErrorCode, TlvError};
use crate::length::{self, Length};
use crate::source::{BufferSource, Source};
use crate::tag::{Tag, TagClass};
use crate::tlv_err;
use crate::tlv_types::{
    BitString, Boolean, Constructed, Date, EndOfContents, Ia5String, Integer, Null,
    ObjectIdentifier, OctetString, Primitive, PrintableString, Sequence, Set, TeletexString,
    UtcTime, Utf8String,
};
use bytes::Bytes;
use std::fmt;
use std::sync::OnceLock;

/// Ceiling on nested constructed levels; keeps hostile input from
/// exhausting the stack.
pub const MAXIMUM_NODE_DEPTH: usize = 50;

/// Shared state of every primitive TLV: tag, raw value-field, findings,
/// and the memoized derived forms.
#[derive(Debug, Clone)]
pub struct PrimitiveBody {
    tag: Tag,
    value: Bytes,
    findings: Vec<String>,
    encoded: OnceLock<Bytes>,
    hash: OnceLock<i32>,
}

impl PrimitiveBody {
    pub(crate) fn new(tag: Tag, value: Bytes, findings: Vec<String>) -> Result<Self, TlvError> {
        if tag.is_constructed() {
            return Err(tlv_err!(
                ErrorCode::ConstructedForPrimitive,
                "constructed encoding indicated for primitive type"
            ));
        }
        Ok(Self::assemble(tag, value, findings))
    }

    /// Unchecked variant for call sites whose tag is known primitive.
    pub(crate) fn assemble(tag: Tag, value: Bytes, findings: Vec<String>) -> Self {
        PrimitiveBody {
            tag,
            value,
            findings,
            encoded: OnceLock::new(),
            hash: OnceLock::new(),
        }
    }

    pub(crate) const fn from_static(tag: Tag, value: Bytes) -> Self {
        PrimitiveBody {
            tag,
            value,
            findings: Vec::new(),
            encoded: OnceLock::new(),
            hash: OnceLock::new(),
        }
    }

    /// Reads length-field and value-field for a primitive TLV whose tag has
    /// already been consumed.
    pub(crate) fn read_value_field(source: &mut dyn Source) -> Result<Bytes, TlvError> {
        match length::read_length(source)? {
            Length::Indefinite => Err(tlv_err!(
                ErrorCode::IndefiniteLengthForbidden,
                "indefinite form for length-field not allowed"
            )),
            Length::Definite(count) => {
                let count = usize::try_from(count)
                    .map_err(|_| tlv_err!(ErrorCode::LengthOverflow, "length too big"))?;
                source.read_exact(count)
            }
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn length_of_value_field(&self) -> u64 {
        self.value.len() as u64
    }

    pub fn length_field(&self) -> Vec<u8> {
        length::encode_length(self.length_of_value_field())
    }

    /// Defensive copy of the value-field.
    pub fn value_field(&self) -> Vec<u8> {
        self.value.to_vec()
    }

    pub(crate) fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn encoded(&self) -> Bytes {
        self.encoded
            .get_or_init(|| {
                let length_field = self.length_field();
                let mut out =
                    Vec::with_capacity(self.tag.field_len() + length_field.len() + self.value.len());
                out.extend_from_slice(&self.tag.field());
                out.extend_from_slice(&length_field);
                out.extend_from_slice(&self.value);
                Bytes::from(out)
            })
            .clone()
    }

    pub(crate) fn total_encoded_length(&self) -> u64 {
        self.tag.field_len() as u64 + self.length_field().len() as u64
            + self.length_of_value_field()
    }

    pub(crate) fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| {
            tag_hash(&self.tag).wrapping_add(array_hash(&self.value))
        })
    }
}

impl PartialEq for PrimitiveBody {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value == other.value
    }
}

impl Eq for PrimitiveBody {}

/// Shared state of every constructed TLV: tag and the ordered, immutable
/// child list. The length is always derived from the children, so a node
/// parsed from an indefinite-length encoding re-encodes definite.
#[derive(Debug, Clone)]
pub struct ConstructedBody {
    tag: Tag,
    children: Vec<Tlv>,
    findings: Vec<String>,
    encoded: OnceLock<Bytes>,
    hash: OnceLock<i32>,
}

impl ConstructedBody {
    pub(crate) fn new(tag: Tag, children: Vec<Tlv>, findings: Vec<String>) -> Result<Self, TlvError> {
        if !tag.is_constructed() {
            return Err(tlv_err!(
                ErrorCode::InvalidArgument,
                "primitive encoding indicated for constructed type"
            ));
        }
        Ok(Self::assemble(tag, children, findings))
    }

    pub(crate) fn assemble(tag: Tag, children: Vec<Tlv>, findings: Vec<String>) -> Self {
        ConstructedBody {
            tag,
            children,
            findings,
            encoded: OnceLock::new(),
            hash: OnceLock::new(),
        }
    }

    /// Reads length-field and children for a constructed TLV whose tag has
    /// already been consumed. A definite length frames a sub-buffer that
    /// must be consumed exactly; the indefinite form reads children until
    /// the end-of-contents sentinel, which is consumed and dropped.
    pub(crate) fn read_children(
        source: &mut dyn Source,
        depth: usize,
    ) -> Result<Vec<Tlv>, TlvError> {
        match length::read_length(source)? {
            Length::Definite(count) => {
                let count = usize::try_from(count)
                    .map_err(|_| tlv_err!(ErrorCode::LengthOverflow, "length too big"))?;
                let mut sub_source = BufferSource::new(source.read_exact(count)?);
                let mut children = Vec::new();
                while sub_source.remaining() > 0 {
                    children.push(Tlv::read_at_depth(&mut sub_source, depth + 1)?);
                }
                Ok(children)
            }
            Length::Indefinite => {
                let mut children = Vec::new();
                loop {
                    let child = Tlv::read_at_depth(source, depth + 1)?;
                    if child.is_end_of_contents_marker() {
                        return Ok(children);
                    }
                    children.push(child);
                }
            }
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn length_of_value_field(&self) -> u64 {
        self.children.iter().map(Tlv::total_encoded_length).sum()
    }

    pub fn length_field(&self) -> Vec<u8> {
        length::encode_length(self.length_of_value_field())
    }

    /// The value-field of a constructed TLV is the concatenation of its
    /// children's encodings. Defensive copy.
    pub fn value_field(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for child in &self.children {
            out.extend_from_slice(&child.encoded());
        }
        out
    }

    pub fn children(&self) -> &[Tlv] {
        &self.children
    }

    /// First child with a matching tag, if any.
    pub fn get(&self, tag: &Tag) -> Option<&Tlv> {
        self.children.iter().find(|child| child.tag() == tag)
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn is_valid(&self) -> bool {
        self.findings.is_empty() && self.children.iter().all(Tlv::is_valid)
    }

    pub fn encoded(&self) -> Bytes {
        self.encoded
            .get_or_init(|| {
                let mut out = Vec::new();
                out.extend_from_slice(&self.tag.field());
                out.extend_from_slice(&self.length_field());
                for child in &self.children {
                    out.extend_from_slice(&child.encoded());
                }
                Bytes::from(out)
            })
            .clone()
    }

    pub(crate) fn total_encoded_length(&self) -> u64 {
        self.tag.field_len() as u64 + self.length_field().len() as u64
            + self.length_of_value_field()
    }

    pub(crate) fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| {
            let mut hash = 1i32;
            for child in &self.children {
                hash = hash.wrapping_mul(31).wrapping_add(child.hash_code());
            }
            tag_hash(&self.tag).wrapping_add(hash)
        })
    }
}

impl PartialEq for ConstructedBody {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.children == other.children
    }
}

impl Eq for ConstructedBody {}

fn tag_hash(tag: &Tag) -> i32 {
    let ms_int = (tag.packed() >> 32) as i32;
    let ls_int = tag.packed() as i32;
    ms_int.wrapping_mul(31).wrapping_add(ls_int).wrapping_mul(31)
}

fn array_hash(bytes: &[u8]) -> i32 {
    let mut hash = 1i32;
    for &octet in bytes {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(octet as i8));
    }
    hash
}

/// Any TLV node: one arm per concrete ASN.1 type plus the generic
/// primitive/constructed fallbacks for undispatched tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tlv {
    Boolean(Boolean),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null(Null),
    EndOfContents(EndOfContents),
    ObjectIdentifier(ObjectIdentifier),
    Utf8String(Utf8String),
    PrintableString(PrintableString),
    TeletexString(TeletexString),
    Ia5String(Ia5String),
    UtcTime(UtcTime),
    Date(Date),
    Sequence(Sequence),
    Set(Set),
    Primitive(Primitive),
    Constructed(Constructed),
}

enum BodyRef<'a> {
    Primitive(&'a PrimitiveBody),
    Constructed(&'a ConstructedBody),
}

impl Tlv {
    /// Reads one TLV from the source, leaving the source positioned after
    /// it.
    pub fn read(source: &mut dyn Source) -> Result<Tlv, TlvError> {
        Self::read_at_depth(source, 1)
    }

    pub(crate) fn read_at_depth(source: &mut dyn Source, depth: usize) -> Result<Tlv, TlvError> {
        if depth > MAXIMUM_NODE_DEPTH {
            return Err(tlv_err!(
                ErrorCode::NestingTooDeep,
                "excessive nesting depth was reached"
            ));
        }
        let tag = Tag::read(source)?;
        Self::read_body(tag, source, depth)
    }

    fn read_body(tag: Tag, source: &mut dyn Source, depth: usize) -> Result<Tlv, TlvError> {
        if tag.class() == TagClass::Universal {
            match tag.packed() {
                0x00 => return EndOfContents::read(tag, source).map(Tlv::EndOfContents),
                0x01 => return Boolean::read(tag, source).map(Tlv::Boolean),
                0x02 => return Integer::read(tag, source).map(Tlv::Integer),
                0x03 => return BitString::read(tag, source).map(Tlv::BitString),
                0x04 => return OctetString::read(tag, source).map(Tlv::OctetString),
                0x05 => return Null::read(tag, source).map(Tlv::Null),
                0x06 => return ObjectIdentifier::read(tag, source).map(Tlv::ObjectIdentifier),
                0x0C => return Utf8String::read(tag, source).map(Tlv::Utf8String),
                0x13 => return PrintableString::read(tag, source).map(Tlv::PrintableString),
                0x14 => return TeletexString::read(tag, source).map(Tlv::TeletexString),
                0x16 => return Ia5String::read(tag, source).map(Tlv::Ia5String),
                0x17 => return UtcTime::read(tag, source).map(Tlv::UtcTime),
                0x1F1F => return Date::read(tag, source).map(Tlv::Date),
                0x30 => return Sequence::read(tag, source, depth).map(Tlv::Sequence),
                0x31 => return Set::read(tag, source, depth).map(Tlv::Set),
                _ => {}
            }
        }
        if tag.is_constructed() {
            Constructed::read(tag, source, depth).map(Tlv::Constructed)
        } else {
            Primitive::read(tag, source).map(Tlv::Primitive)
        }
    }

    /// Parses exactly one TLV out of the buffer; trailing bytes are fatal.
    pub fn parse(data: &[u8]) -> Result<Tlv, TlvError> {
        let mut source = BufferSource::new(Bytes::copy_from_slice(data));
        let node = Self::read(&mut source)?;
        if source.remaining() != 0 {
            return Err(tlv_err!(
                ErrorCode::TrailingData,
                "trailing unparsed data is present"
            ));
        }
        Ok(node)
    }

    fn body(&self) -> BodyRef<'_> {
        match self {
            Tlv::Boolean(node) => BodyRef::Primitive(node.body()),
            Tlv::Integer(node) => BodyRef::Primitive(node.body()),
            Tlv::BitString(node) => BodyRef::Primitive(node.body()),
            Tlv::OctetString(node) => BodyRef::Primitive(node.body()),
            Tlv::Null(node) => BodyRef::Primitive(node.body()),
            Tlv::EndOfContents(node) => BodyRef::Primitive(node.body()),
            Tlv::ObjectIdentifier(node) => BodyRef::Primitive(node.body()),
            Tlv::Utf8String(node) => BodyRef::Primitive(node.body()),
            Tlv::PrintableString(node) => BodyRef::Primitive(node.body()),
            Tlv::TeletexString(node) => BodyRef::Primitive(node.body()),
            Tlv::Ia5String(node) => BodyRef::Primitive(node.body()),
            Tlv::UtcTime(node) => BodyRef::Primitive(node.body()),
            Tlv::Date(node) => BodyRef::Primitive(node.body()),
            Tlv::Sequence(node) => BodyRef::Constructed(node.body()),
            Tlv::Set(node) => BodyRef::Constructed(node.body()),
            Tlv::Primitive(node) => BodyRef::Primitive(node.body()),
            Tlv::Constructed(node) => BodyRef::Constructed(node.body()),
        }
    }

    pub fn tag(&self) -> &Tag {
        match self.body() {
            BodyRef::Primitive(body) => body.tag(),
            BodyRef::Constructed(body) => body.tag(),
        }
    }

    pub fn length_of_value_field(&self) -> u64 {
        match self.body() {
            BodyRef::Primitive(body) => body.length_of_value_field(),
            BodyRef::Constructed(body) => body.length_of_value_field(),
        }
    }

    pub fn length_field(&self) -> Vec<u8> {
        match self.body() {
            BodyRef::Primitive(body) => body.length_field(),
            BodyRef::Constructed(body) => body.length_field(),
        }
    }

    /// Raw value-field octets for primitives, concatenated child encodings
    /// for constructed nodes. Always a fresh copy.
    pub fn value_field(&self) -> Vec<u8> {
        match self.body() {
            BodyRef::Primitive(body) => body.value_field(),
            BodyRef::Constructed(body) => body.value_field(),
        }
    }

    pub fn findings(&self) -> &[String] {
        match self.body() {
            BodyRef::Primitive(body) => body.findings(),
            BodyRef::Constructed(body) => body.findings(),
        }
    }

    /// A node is valid iff it has no findings and every child is valid.
    pub fn is_valid(&self) -> bool {
        match self.body() {
            BodyRef::Primitive(body) => body.is_valid(),
            BodyRef::Constructed(body) => body.is_valid(),
        }
    }

    pub fn encoded(&self) -> Bytes {
        match self.body() {
            BodyRef::Primitive(body) => body.encoded(),
            BodyRef::Constructed(body) => body.encoded(),
        }
    }

    pub fn encode_to<W: std::io::Write>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(&self.encoded())
    }

    pub(crate) fn total_encoded_length(&self) -> u64 {
        match self.body() {
            BodyRef::Primitive(body) => body.total_encoded_length(),
            BodyRef::Constructed(body) => body.total_encoded_length(),
        }
    }

    /// Child list of a constructed node.
    pub fn children(&self) -> Option<&[Tlv]> {
        match self.body() {
            BodyRef::Primitive(_) => None,
            BodyRef::Constructed(body) => Some(body.children()),
        }
    }

    /// First child with a matching tag.
    pub fn get(&self, tag: &Tag) -> Option<&Tlv> {
        match self.body() {
            BodyRef::Primitive(_) => None,
            BodyRef::Constructed(body) => body.get(tag),
        }
    }

    pub(crate) fn is_end_of_contents_marker(&self) -> bool {
        matches!(self, Tlv::EndOfContents(node) if node.length_of_value_field() == 0)
    }

    /// Per-type human-readable annotation; empty for undispatched tags.
    pub fn comment(&self) -> String {
        match self {
            Tlv::Boolean(node) => node.comment(),
            Tlv::Integer(node) => node.comment(),
            Tlv::BitString(node) => node.comment(),
            Tlv::OctetString(node) => node.comment(),
            Tlv::Null(node) => node.comment(),
            Tlv::EndOfContents(node) => node.comment(),
            Tlv::ObjectIdentifier(node) => node.comment(),
            Tlv::Utf8String(node) => node.comment(),
            Tlv::PrintableString(node) => node.comment(),
            Tlv::TeletexString(node) => node.comment(),
            Tlv::Ia5String(node) => node.comment(),
            Tlv::UtcTime(node) => node.comment(),
            Tlv::Date(node) => node.comment(),
            Tlv::Sequence(node) => node.comment(),
            Tlv::Set(node) => node.comment(),
            Tlv::Primitive(_) | Tlv::Constructed(_) => String::new(),
        }
    }

    /// Hierarchical rendering, one line per node.
    #[mutants::skip]
    pub fn to_string_tree(&self) -> String {
        self.to_string_with(" ", "|  ", true)
    }

    /// `delimiter` separates the hex fields within a line, `indent` is
    /// repeated once per nesting level.
    #[mutants::skip]
    pub fn to_string_with(&self, delimiter: &str, indent: &str, add_comment: bool) -> String {
        let mut lines = Vec::new();
        self.render_into(0, delimiter, indent, add_comment, &mut lines);
        lines.join("\n")
    }

    #[mutants::skip]
    fn render_into(
        &self,
        depth: usize,
        delimiter: &str,
        indent: &str,
        add_comment: bool,
        lines: &mut Vec<String>,
    ) {
        let mut line = indent.repeat(depth);
        line.push_str(&hex::encode_upper(self.tag().field()));
        line.push_str(delimiter);
        line.push_str(&hex::encode_upper(self.length_field()));
        if let BodyRef::Primitive(body) = self.body() {
            if !body.value().is_empty() {
                line.push_str(delimiter);
                line.push_str(&hex::encode_upper(body.value()));
            }
        }
        if add_comment {
            line.push_str(&self.comment());
        }
        lines.push(line);

        if let Some(children) = self.children() {
            for child in children {
                child.render_into(depth + 1, delimiter, indent, add_comment, lines);
            }
        } else if let Tlv::OctetString(node) = self {
            // Octet-strings often transport embedded TLV structures; show
            // them when the content frames completely into valid nodes.
            if let Some(embedded) = node.embedded_tlvs() {
                for child in &embedded {
                    child.render_into(depth + 1, delimiter, indent, add_comment, lines);
                }
            }
        }
    }

    pub(crate) fn hash_code(&self) -> i32 {
        match self.body() {
            BodyRef::Primitive(body) => body.hash_code(),
            BodyRef::Constructed(body) => body.hash_code(),
        }
    }
}

impl std::hash::Hash for Tlv {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[mutants::skip]
impl fmt::Display for Tlv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_tree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[test]
    fn test_dispatch_universal_types() {
        assert!(matches!(Tlv::parse(&[0x01, 0x01, 0xFF]), Ok(Tlv::Boolean(_))));
        assert!(matches!(Tlv::parse(&[0x02, 0x01, 0x0A]), Ok(Tlv::Integer(_))));
        assert!(matches!(Tlv::parse(&[0x03, 0x02, 0x00, 0xAA]), Ok(Tlv::BitString(_))));
        assert!(matches!(Tlv::parse(&[0x04, 0x00]), Ok(Tlv::OctetString(_))));
        assert!(matches!(Tlv::parse(&[0x05, 0x00]), Ok(Tlv::Null(_))));
        assert!(matches!(Tlv::parse(&[0x00, 0x00]), Ok(Tlv::EndOfContents(_))));
        assert!(matches!(Tlv::parse(&[0x06, 0x01, 0x2A]), Ok(Tlv::ObjectIdentifier(_))));
        assert!(matches!(Tlv::parse(&[0x0C, 0x01, 0x41]), Ok(Tlv::Utf8String(_))));
        assert!(matches!(Tlv::parse(&[0x13, 0x01, 0x41]), Ok(Tlv::PrintableString(_))));
        assert!(matches!(Tlv::parse(&[0x14, 0x01, 0x41]), Ok(Tlv::TeletexString(_))));
        assert!(matches!(Tlv::parse(&[0x16, 0x01, 0x41]), Ok(Tlv::Ia5String(_))));
        assert!(matches!(Tlv::parse(&[0x30, 0x00]), Ok(Tlv::Sequence(_))));
        assert!(matches!(Tlv::parse(&[0x31, 0x00]), Ok(Tlv::Set(_))));
        assert!(matches!(
            Tlv::parse(&[0x1F, 0x1F, 0x08, 0x32, 0x30, 0x32, 0x31, 0x30, 0x31, 0x30, 0x31]),
            Ok(Tlv::Date(_))
        ));
    }

    #[test]
    fn test_dispatch_falls_back_to_generic() {
        // Context-specific primitive.
        assert!(matches!(Tlv::parse(&[0x81, 0x01, 0x11]), Ok(Tlv::Primitive(_))));
        // Context-specific constructed.
        assert!(matches!(Tlv::parse(&[0xA1, 0x00]), Ok(Tlv::Constructed(_))));
        // Universal, but not in the dispatch table (tag 9, REAL).
        assert!(matches!(Tlv::parse(&[0x09, 0x01, 0x00]), Ok(Tlv::Primitive(_))));
        // Primitive encoding of SEQUENCE's tag number is not a SEQUENCE.
        assert!(matches!(Tlv::parse(&[0x10, 0x00]), Ok(Tlv::Primitive(_))));
    }

    #[test]
    fn test_parse_trailing_data_rejected() {
        let err = Tlv::parse(&[0x02, 0x01, 0x00, 0xFF]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TrailingData);
    }

    #[test]
    fn test_read_leaves_rest_available() {
        let mut source = BufferSource::new(vec![0x02, 0x01, 0x00, 0x05, 0x00]);
        let first = Tlv::read(&mut source).unwrap();
        assert!(matches!(first, Tlv::Integer(_)));
        let second = Tlv::read(&mut source).unwrap();
        assert!(matches!(second, Tlv::Null(_)));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_indefinite_length_constructed() {
        // SEQUENCE, indefinite length, one INTEGER child, then EOC.
        let data = [0x30, 0x80, 0x02, 0x01, 0x2A, 0x00, 0x00];
        let node = Tlv::parse(&data).unwrap();
        let children = node.children().unwrap();
        assert_eq!(children.len(), 1);
        // Re-encoding is definite and canonical.
        assert_eq!(node.encoded().as_ref(), &[0x30, 0x03, 0x02, 0x01, 0x2A]);
        assert!(node.is_valid());
    }

    #[test]
    fn test_indefinite_length_for_primitive_rejected() {
        let err = Tlv::parse(&[0x02, 0x80, 0x00, 0x00]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndefiniteLengthForbidden);
        assert_eq!(err.reason(), "indefinite form for length-field not allowed");
    }

    #[test]
    fn test_indefinite_length_missing_sentinel() {
        let err = Tlv::parse(&[0x30, 0x80, 0x02, 0x01, 0x2A]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BufferUnderflow);
    }

    fn nested_sequences(levels: usize) -> Vec<u8> {
        let mut data: Vec<u8> = Vec::new();
        for _ in 0..levels {
            let mut wrapped = vec![0x30, data.len() as u8];
            wrapped.extend_from_slice(&data);
            data = wrapped;
        }
        data
    }

    #[test]
    fn test_nesting_depth_boundary() {
        // 50 nested sequences put the innermost node exactly at the limit.
        assert!(Tlv::parse(&nested_sequences(50)).is_ok());

        let err = Tlv::parse(&nested_sequences(51)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NestingTooDeep);
    }

    #[test]
    fn test_declared_length_overrunning_child_is_underflow() {
        // SEQUENCE declares 4 value octets but the child claims 5.
        let err = Tlv::parse(&[0x30, 0x04, 0x02, 0x05, 0x01, 0x02]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BufferUnderflow);
    }

    #[test]
    fn test_equality_and_hash() {
        let a = Tlv::parse(&[0x02, 0x01, 0x0A]).unwrap();
        let b = Tlv::parse(&[0x02, 0x01, 0x0A]).unwrap();
        let c = Tlv::parse(&[0x02, 0x01, 0x0B]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let hash_of = |node: &Tlv| {
            let mut hasher = DefaultHasher::new();
            node.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn test_encoded_memoized_and_stable() {
        let node = Tlv::parse(&[0x30, 0x03, 0x02, 0x01, 0x0A]).unwrap();
        let first = node.encoded();
        let second = node.encoded();
        assert_eq!(first, second);
        assert_eq!(first.as_ref(), &[0x30, 0x03, 0x02, 0x01, 0x0A]);
    }

    #[test]
    fn test_value_field_is_fresh_copy() {
        let node = Tlv::parse(&[0x04, 0x02, 0x47, 0x14]).unwrap();
        let mut first = node.value_field();
        let second = node.value_field();
        assert_eq!(first, second);
        first[0] = 0x00;
        assert_eq!(node.value_field(), vec![0x47, 0x14]);
    }

    #[test]
    fn test_get_finds_first_match() {
        let data = [0x30, 0x08, 0x81, 0x01, 0x11, 0x81, 0x01, 0x22, 0x05, 0x00];
        let node = Tlv::parse(&data).unwrap();
        let tag = Tag::new(TagClass::ContextSpecific, false, 1).unwrap();
        let child = node.get(&tag).unwrap();
        assert_eq!(child.value_field(), vec![0x11]);
        assert!(node.get(&Tag::INTEGER).is_none());
    }

    #[test]
    fn test_encode_to_writes_encoding() {
        let node = Tlv::parse(&[0x02, 0x01, 0x7F]).unwrap();
        let mut sink = Vec::new();
        node.encode_to(&mut sink).unwrap();
        assert_eq!(sink, vec![0x02, 0x01, 0x7F]);
    }

    #[test]
    fn test_findings_do_not_invalidate_ancestors_validity_is_recursive() {
        // SEQUENCE containing a non-minimal INTEGER: the child is invalid,
        // the parent has no findings of its own but reports invalid.
        let data = [0x30, 0x04, 0x02, 0x02, 0x00, 0x7F];
        let node = Tlv::parse(&data).unwrap();
        assert!(node.findings().is_empty());
        assert!(!node.is_valid());
    }
}
