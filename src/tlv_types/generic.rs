use super::{delegate_constructed_body, delegate_primitive_body};
use crate::errors::TlvError;
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::{ConstructedBody, PrimitiveBody, Tlv};
use bytes::Bytes;

/// Fallback for primitive TLVs whose tag has no dedicated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    body: PrimitiveBody,
}

impl Primitive {
    pub fn new(tag: Tag, value: &[u8]) -> Result<Self, TlvError> {
        Ok(Primitive {
            body: PrimitiveBody::new(tag, Bytes::copy_from_slice(value), Vec::new())?,
        })
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source) -> Result<Self, TlvError> {
        let value = PrimitiveBody::read_value_field(source)?;
        Ok(Primitive {
            body: PrimitiveBody::new(tag, value, Vec::new())?,
        })
    }
}

delegate_primitive_body!(Primitive);

/// Fallback for constructed TLVs whose tag has no dedicated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructed {
    body: ConstructedBody,
}

impl Constructed {
    pub fn new(tag: Tag, children: Vec<Tlv>) -> Result<Self, TlvError> {
        Ok(Constructed {
            body: ConstructedBody::new(tag, children, Vec::new())?,
        })
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source, depth: usize) -> Result<Self, TlvError> {
        let children = ConstructedBody::read_children(source, depth)?;
        Ok(Constructed {
            body: ConstructedBody::new(tag, children, Vec::new())?,
        })
    }

    /// A new node with the child appended; this node is unchanged.
    pub fn add(&self, child: Tlv) -> Constructed {
        let mut children = self.body.children().to_vec();
        children.push(child);
        Constructed {
            body: ConstructedBody::assemble(self.body.tag().clone(), children, Vec::new()),
        }
    }
}

delegate_constructed_body!(Constructed);
