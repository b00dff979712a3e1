use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tlv_err;
use bytes::Bytes;
use std::cmp::Ordering;
use std::fmt;

/// The tag must fit into a 64-bit packed word.
pub const MAXIMUM_TAG_FIELD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    pub(crate) fn from_top_byte(top_byte: u8) -> Self {
        [
            TagClass::Universal,
            TagClass::Application,
            TagClass::ContextSpecific,
            TagClass::Private,
        ][(top_byte >> 6) as usize]
    }

    pub(crate) fn top_byte_flags(&self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x01 << 6,
            TagClass::ContextSpecific => 0x02 << 6,
            TagClass::Private => 0x03 << 6,
        }
    }
}

/// A decoded tag-field.
///
/// Identity lives in the packed word: the raw tag-field octets concatenated
/// big-endian into a `u64`. Equality, hashing, and ordering all use it.
#[derive(Debug, Clone)]
pub struct Tag {
    field: Bytes,
    packed: u64,
    number: u64,
    class: TagClass,
    constructed: bool,
}

impl Tag {
    const fn universal(field: &'static [u8], packed: u64, number: u64, constructed: bool) -> Tag {
        Tag {
            field: Bytes::from_static(field),
            packed,
            number,
            class: TagClass::Universal,
            constructed,
        }
    }

    pub const END_OF_CONTENTS: Tag = Tag::universal(&[0x00], 0x00, 0, false);
    pub const BOOLEAN: Tag = Tag::universal(&[0x01], 0x01, 1, false);
    pub const INTEGER: Tag = Tag::universal(&[0x02], 0x02, 2, false);
    pub const BIT_STRING: Tag = Tag::universal(&[0x03], 0x03, 3, false);
    pub const OCTET_STRING: Tag = Tag::universal(&[0x04], 0x04, 4, false);
    pub const NULL: Tag = Tag::universal(&[0x05], 0x05, 5, false);
    pub const OBJECT_IDENTIFIER: Tag = Tag::universal(&[0x06], 0x06, 6, false);
    pub const UTF8_STRING: Tag = Tag::universal(&[0x0C], 0x0C, 12, false);
    pub const SEQUENCE: Tag = Tag::universal(&[0x30], 0x30, 16, true);
    pub const SET: Tag = Tag::universal(&[0x31], 0x31, 17, true);
    pub const PRINTABLE_STRING: Tag = Tag::universal(&[0x13], 0x13, 19, false);
    pub const TELETEX_STRING: Tag = Tag::universal(&[0x14], 0x14, 20, false);
    pub const IA5_STRING: Tag = Tag::universal(&[0x16], 0x16, 22, false);
    pub const UTC_TIME: Tag = Tag::universal(&[0x17], 0x17, 23, false);
    /// DATE is dispatched on the exact two-octet tag-field `1F 1F`.
    pub const DATE: Tag = Tag::universal(&[0x1F, 0x1F], 0x1F1F, 31, false);

    /// Builds a tag from its classification triple, materializing the
    /// canonical (minimal) tag-field.
    pub fn new(class: TagClass, constructed: bool, number: u64) -> Result<Tag, TlvError> {
        let mut top_byte = class.top_byte_flags();
        if constructed {
            top_byte |= 0x20;
        }

        let mut field = Vec::new();
        if number < 0x1F {
            field.push(top_byte | number as u8);
        } else {
            field.push(top_byte | 0x1F);
            let mut chunks = Vec::new();
            let mut rest = number;
            while rest != 0 {
                chunks.push((rest & 0x7F) as u8);
                rest >>= 7;
            }
            for (index, chunk) in chunks.iter().rev().enumerate() {
                let mut octet = *chunk;
                if index != chunks.len() - 1 {
                    octet |= 0x80;
                }
                field.push(octet);
            }
        }

        if field.len() > MAXIMUM_TAG_FIELD_LENGTH {
            return Err(tlv_err!(
                ErrorCode::TagTooLong,
                "tag too long for this implementation"
            ));
        }

        let packed = pack(&field);
        Ok(Tag {
            field: Bytes::from(field),
            packed,
            number,
            class,
            constructed,
        })
    }

    /// Reads one tag-field from the source.
    pub fn read(source: &mut dyn Source) -> Result<Tag, TlvError> {
        let head = source.read_exact(1)?[0];
        let class = TagClass::from_top_byte(head);
        let constructed = head & 0x20 != 0;

        let mut field = vec![head];
        let number = if head & 0x1F != 0x1F {
            (head & 0x1F) as u64
        } else {
            let mut value: u64 = 0;
            loop {
                let octet = source.read_exact(1)?[0];
                field.push(octet);
                if field.len() > MAXIMUM_TAG_FIELD_LENGTH {
                    return Err(tlv_err!(
                        ErrorCode::TagTooLong,
                        "tag too long for this implementation"
                    ));
                }
                value = (value << 7) | u64::from(octet & 0x7F);
                if octet & 0x80 == 0 {
                    break;
                }
            }
            value
        };

        let packed = pack(&field);
        Ok(Tag {
            field: Bytes::from(field),
            packed,
            number,
            class,
            constructed,
        })
    }

    pub fn packed(&self) -> u64 {
        self.packed
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// The raw tag-field octets.
    pub fn field(&self) -> Bytes {
        self.field.clone()
    }

    pub(crate) fn field_len(&self) -> usize {
        self.field.len()
    }

    /// Canonical SET order: class encoding first, then the packed word.
    pub fn canonical_cmp(&self, other: &Tag) -> Ordering {
        (self.class.top_byte_flags(), self.packed)
            .cmp(&(other.class.top_byte_flags(), other.packed))
    }
}

fn pack(field: &[u8]) -> u64 {
    field.iter().fold(0u64, |word, &octet| (word << 8) | u64::from(octet))
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.packed == other.packed
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.packed.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_cmp(other)
    }
}

#[mutants::skip]
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class_str = match self.class {
            TagClass::Universal => "Universal",
            TagClass::Application => "Application",
            TagClass::ContextSpecific => "ContextSpecific",
            TagClass::Private => "Private",
        };
        let pc = if self.constructed {
            "constructed"
        } else {
            "primitive"
        };
        write!(
            f,
            "Tag(0x{:02X}, tagNumber: {}, tagClass: {}, {})",
            self.packed, self.number, class_str, pc
        )
    }
}
