use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::foundation::core::{Point, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::math::{clamp_to, is_valid_proposal};
use crate::layout::Ancestors;
use crate::layout::driver::{Geometry, LayoutOpts};
use crate::layout::map::SizeMap;
use crate::layout::place::assign_positions;
use crate::layout::policy::PolicyRegistry;
use crate::tree::model::{LayoutTree, NodeId, NodeKind};

/// How leaves treat the size their parent proposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafSizing {
    /// Leaves keep their intrinsic content size whatever the proposal.
    #[default]
    Intrinsic,
    /// Leaves shrink to the proposal on each axis where their content is larger.
    ClampToProposal,
}

/// A tree whose size pass has completed.
///
/// Positions can only be assigned through [`SizedTree::place`], so a sized tree is the only
/// way into the position pass from the high-level API.
#[derive(Debug, Clone)]
pub struct SizedTree<'t> {
    tree: &'t LayoutTree,
    registry: &'t PolicyRegistry,
    node: NodeId,
    sizes: SizeMap,
}

impl<'t> SizedTree<'t> {
    /// Node the size pass started from.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Resolved size of `id`.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.sizes.get(id)
    }

    /// All resolved sizes.
    pub fn sizes(&self) -> &SizeMap {
        &self.sizes
    }

    /// Drop the tree borrow and keep the sizes.
    pub fn into_sizes(self) -> SizeMap {
        self.sizes
    }

    /// Run the position pass with the sized node at `origin`.
    pub fn place(self, origin: Point) -> LayoutResult<Geometry> {
        let positions = assign_positions(self.tree, self.registry, &self.sizes, self.node, origin)?;
        Ok(Geometry::new(self.sizes, positions))
    }
}

/// Resolve sizes bottom-up for the subtree rooted at `node`.
///
/// Every node first narrows `proposed` through its [`Sizing`](crate::Sizing), containers
/// hand their children the proposal their policy derives from that, and combine the resolved
/// child sizes once all of them are known. Each node is sized at most once: reaching a node
/// a second time is [`LayoutError::MalformedTree`], or [`LayoutError::CycleDetected`] when it
/// is its own ancestor. Nothing is returned on error.
///
/// The pass recurses once per tree level, so very deep trees (thousands of levels) need a
/// correspondingly large thread stack.
pub fn resolve_sizes<'t>(
    tree: &'t LayoutTree,
    registry: &'t PolicyRegistry,
    node: NodeId,
    proposed: Size,
    opts: &LayoutOpts,
) -> LayoutResult<SizedTree<'t>> {
    check_proposal(proposed)?;
    let resolver = SizeResolver {
        tree,
        registry,
        opts,
        claimed: (0..tree.len()).map(|_| AtomicBool::new(false)).collect(),
    };
    let mut resolved = Vec::with_capacity(tree.len());
    resolver.resolve_node(node, proposed, None, &mut resolved)?;

    let mut sizes = SizeMap::with_capacity(tree.len());
    for (id, size) in resolved {
        sizes.insert(id, size);
    }
    tracing::debug!(node = %node, sized = sizes.len(), "size pass complete");
    Ok(SizedTree {
        tree,
        registry,
        node,
        sizes,
    })
}

pub(crate) fn check_proposal(proposed: Size) -> LayoutResult<()> {
    if is_valid_proposal(proposed) {
        return Ok(());
    }
    Err(LayoutError::invalid_proposal(format!(
        "proposed size must be finite and non-negative, got {}x{}",
        proposed.width, proposed.height
    )))
}

struct SizeResolver<'a> {
    tree: &'a LayoutTree,
    registry: &'a PolicyRegistry,
    opts: &'a LayoutOpts,
    // One flag per arena slot, set when a worker starts sizing that node.
    claimed: Vec<AtomicBool>,
}

impl SizeResolver<'_> {
    fn claim(&self, id: NodeId, parent: Option<&Ancestors<'_>>) -> LayoutResult<()> {
        if parent.is_some_and(|p| p.contains(id)) {
            return Err(LayoutError::CycleDetected(id));
        }
        let slot = self
            .claimed
            .get(id.index())
            .ok_or_else(|| LayoutError::malformed(format!("node {id} is not in the tree")))?;
        if slot.swap(true, Ordering::Relaxed) {
            return Err(LayoutError::malformed(format!(
                "node {id} has more than one parent"
            )));
        }
        Ok(())
    }

    fn resolve_node(
        &self,
        id: NodeId,
        proposed: Size,
        parent: Option<&Ancestors<'_>>,
        out: &mut Vec<(NodeId, Size)>,
    ) -> LayoutResult<Size> {
        self.claim(id, parent)?;
        let node = self.tree.node(id)?;
        node.sizing
            .check()
            .map_err(|msg| LayoutError::malformed(format!("node {id}: {msg}")))?;
        let available = node.sizing.available(proposed);

        let content = match &node.kind {
            NodeKind::Leaf { content } => {
                if !is_valid_proposal(*content) {
                    return Err(LayoutError::malformed(format!(
                        "leaf {id} has invalid content size {}x{}",
                        content.width, content.height
                    )));
                }
                match self.opts.leaf_sizing {
                    LeafSizing::Intrinsic => *content,
                    LeafSizing::ClampToProposal => clamp_to(*content, available),
                }
            }
            NodeKind::Container {
                kind,
                style,
                children,
            } => {
                style
                    .check()
                    .map_err(|msg| LayoutError::malformed(format!("container {id}: {msg}")))?;
                let policy = self.registry.get(kind)?;
                let child_proposed = policy.child_proposal(available, style, children.len());
                let here = Ancestors { id, parent };

                let child_sizes = if self.opts.parallel
                    && children.len() >= self.opts.parallel_min_children.max(2)
                {
                    self.resolve_children_parallel(children, child_proposed, &here, out)?
                } else {
                    let mut sizes = Vec::with_capacity(children.len());
                    for &child in children {
                        sizes.push(self.resolve_node(child, child_proposed, Some(&here), out)?);
                    }
                    sizes
                };

                let combined = policy.combine(&child_sizes, style);
                tracing::trace!(
                    node = %id,
                    kind = %kind,
                    children = children.len(),
                    width = combined.width,
                    height = combined.height,
                    "resolved container"
                );
                combined
            }
        };
        let size = node.sizing.settle(proposed, content);

        out.push((id, size));
        Ok(size)
    }

    // Each child subtree is sized by exactly one worker into its own buffer; buffers are
    // merged in child order after the join.
    fn resolve_children_parallel(
        &self,
        children: &[NodeId],
        proposed: Size,
        here: &Ancestors<'_>,
        out: &mut Vec<(NodeId, Size)>,
    ) -> LayoutResult<Vec<Size>> {
        let results = children
            .par_iter()
            .map(|&child| {
                let mut local = Vec::new();
                let size = self.resolve_node(child, proposed, Some(here), &mut local)?;
                Ok::<_, LayoutError>((size, local))
            })
            .collect::<LayoutResult<Vec<_>>>()?;

        let mut sizes = Vec::with_capacity(results.len());
        for (size, local) in results {
            out.extend(local);
            sizes.push(size);
        }
        Ok(sizes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
