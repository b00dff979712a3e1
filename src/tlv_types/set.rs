use super::delegate_constructed_body;
use crate::errors::{ErrorCode, TlvError};
use crate::source::Source;
use crate::tag::Tag;
use crate::tlv::{ConstructedBody, Tlv};
use crate::tlv_err;

/// ASN.1 SET.
///
/// Tags must be mutually exclusive, and the canonical order is ascending
/// by `(class, packed tag)`. Value-constructed sets enforce both; sets
/// parsed from a source keep the encountered order and report violations
/// as findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    body: ConstructedBody,
}

impl Set {
    pub fn new(children: Vec<Tlv>) -> Result<Set, TlvError> {
        if has_duplicate_tags(&children) {
            return Err(tlv_err!(
                ErrorCode::InvalidArgument,
                "some tags occur more than once"
            ));
        }
        Ok(Set {
            body: ConstructedBody::assemble(Tag::SET, Self::sort(children), Vec::new()),
        })
    }

    pub(crate) fn read(tag: Tag, source: &mut dyn Source, depth: usize) -> Result<Self, TlvError> {
        let children = ConstructedBody::read_children(source, depth)?;
        let mut findings = Vec::new();
        if has_duplicate_tags(&children) {
            findings.push("tags not mutual exclusive".to_string());
        }
        if !is_canonically_sorted(&children) {
            findings.push("tags not correctly sorted".to_string());
        }
        Ok(Set {
            body: ConstructedBody::new(tag, children, findings)?,
        })
    }

    /// A new set with the child inserted at its canonical position; this
    /// node is unchanged.
    pub fn add(&self, child: Tlv) -> Result<Set, TlvError> {
        if self
            .body
            .children()
            .iter()
            .any(|sibling| sibling.tag() == child.tag())
        {
            return Err(tlv_err!(ErrorCode::InvalidArgument, "tag already present"));
        }
        let mut children = self.body.children().to_vec();
        children.push(child);
        Ok(Set {
            body: ConstructedBody::assemble(
                self.body.tag().clone(),
                Self::sort(children),
                Vec::new(),
            ),
        })
    }

    /// Canonical ordering primitive: keeps the first occurrence of each
    /// tag, drops later duplicates, sorts ascending by `(class, tag)`.
    pub fn sort(children: Vec<Tlv>) -> Vec<Tlv> {
        let mut unique: Vec<Tlv> = Vec::with_capacity(children.len());
        for child in children {
            if !unique.iter().any(|kept| kept.tag() == child.tag()) {
                unique.push(child);
            }
        }
        unique.sort_by(|a, b| a.tag().canonical_cmp(b.tag()));
        unique
    }

    pub fn comment(&self) -> String {
        let count = self.body.children().len();
        let noun = if count == 1 { "element" } else { "elements" };
        format!(" # SET with {} {}", count, noun)
    }
}

delegate_constructed_body!(Set);

fn has_duplicate_tags(children: &[Tlv]) -> bool {
    for (index, child) in children.iter().enumerate() {
        if children[index + 1..]
            .iter()
            .any(|other| other.tag() == child.tag())
        {
            return true;
        }
    }
    false
}

fn is_canonically_sorted(children: &[Tlv]) -> bool {
    children
        .windows(2)
        .all(|pair| pair[0].tag().canonical_cmp(pair[1].tag()) != std::cmp::Ordering::Greater)
}
