use super::delegate_constructed_body;
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::{ConstructedBody, Tlv};

/// ASN.1 SEQUENCE: an ordered list of children, no further constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    body: ConstructedBody,
}

impl Sequence {
    pub fn new(children: Vec<Tlv>) -> Sequence {
        Sequence {
            body: ConstructedBody::assemble(Tag::SEQUENCE, children, Vec::new()),
        }
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source, depth: usize) -> Result<Self, TlvError> {
        let children = ConstructedBody::read_children(source, depth)?;
        Ok(Sequence {
            body: ConstructedBody::new(tag, children, Vec::new())?,
        })
    }

    /// A new sequence with the child appended; this node is unchanged.
    pub fn add(&self, child: Tlv) -> Sequence {
        let mut children = self.body.children().to_vec();
        children.push(child);
        Sequence {
            body: ConstructedBody::assemble(self.body.tag().clone(), children, Vec::new()),
        }
    }

    pub fn comment(&self) -> String {
        let count = self.body.children().len();
        let noun = if count == 1 { "element" } else { "elements" };
        format!(" # SEQUENCE with {} {}", count, noun)
    }
}

delegate_constructed_body!(Sequence);
