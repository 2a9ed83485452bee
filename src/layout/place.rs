use crate::foundation::core::{Point, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::Ancestors;
use crate::layout::map::{PositionMap, SizeMap};
use crate::layout::policy::{ContainerFrame, PolicyRegistry};
use crate::tree::model::{LayoutTree, NodeId, NodeKind};

/// Assign absolute positions top-down for the subtree rooted at `node`, with `node` at
/// `origin`.
///
/// Every visited node must already have a size in `sizes`; the first one that does not fails
/// the pass with [`LayoutError::UnresolvedSize`]. Children are placed in order in a single
/// forward sweep per container. A node reached twice is [`LayoutError::MalformedTree`].
pub fn assign_positions(
    tree: &LayoutTree,
    registry: &PolicyRegistry,
    sizes: &SizeMap,
    node: NodeId,
    origin: Point,
) -> LayoutResult<PositionMap> {
    let assigner = PositionAssigner {
        tree,
        registry,
        sizes,
    };
    let mut positions = PositionMap::with_capacity(tree.len());
    assigner.place_node(node, origin, None, &mut positions)?;
    tracing::debug!(node = %node, placed = positions.len(), "position pass complete");
    Ok(positions)
}

struct PositionAssigner<'a> {
    tree: &'a LayoutTree,
    registry: &'a PolicyRegistry,
    sizes: &'a SizeMap,
}

impl PositionAssigner<'_> {
    fn size_of(&self, id: NodeId) -> LayoutResult<Size> {
        self.tree.node(id)?;
        self.sizes.get(id).ok_or(LayoutError::UnresolvedSize(id))
    }

    fn place_node(
        &self,
        id: NodeId,
        origin: Point,
        parent: Option<&Ancestors<'_>>,
        out: &mut PositionMap,
    ) -> LayoutResult<()> {
        if parent.is_some_and(|p| p.contains(id)) {
            return Err(LayoutError::CycleDetected(id));
        }
        let size = self.size_of(id)?;
        if out.insert(id, origin).is_some() {
            return Err(LayoutError::malformed(format!(
                "node {id} has more than one parent"
            )));
        }

        let NodeKind::Container {
            kind,
            style,
            children,
        } = &self.tree.node(id)?.kind
        else {
            return Ok(());
        };

        let policy = self.registry.get(kind)?;
        let frame = ContainerFrame {
            origin,
            size,
            style: *style,
        };
        let here = Ancestors { id, parent };
        let child_sizes = children
            .iter()
            .map(|&child| self.size_of(child))
            .collect::<LayoutResult<Vec<_>>>()?;
        let mut cursor = policy.start_cursor(&frame, &child_sizes);
        for (&child, &child_size) in children.iter().zip(&child_sizes) {
            let placement = policy.place(&frame, cursor, child_size);
            self.place_node(child, placement.origin, Some(&here), out)?;
            cursor = placement.next_cursor;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/place.rs"]
mod tests;
