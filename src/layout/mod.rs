//! Two-pass layout: sizes bottom-up, then positions top-down.

pub(crate) mod driver;
pub(crate) mod map;
pub(crate) mod place;
pub(crate) mod policy;
pub(crate) mod resolve;

use crate::tree::model::NodeId;

/// Chain of nodes currently on the traversal path, innermost first.
///
/// Kept on the call stack and shared immutably, so parallel workers can each extend it
/// without coordination.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ancestors<'a> {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<&'a Ancestors<'a>>,
}

impl Ancestors<'_> {
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        let mut cur = Some(self);
        while let Some(link) = cur {
            if link.id == id {
                return true;
            }
            cur = link.parent;
        }
        false
    }
}
