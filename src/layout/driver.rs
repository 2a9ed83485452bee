use serde::ser::{Serialize, Serializer};

use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::LayoutResult;
use crate::layout::map::{PositionMap, SizeMap};
use crate::layout::policy::PolicyRegistry;
use crate::layout::resolve::{LeafSizing, check_proposal, resolve_sizes};
use crate::tree::model::{LayoutTree, NodeId};

/// Options for a layout pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Leaf response to the proposed size.
    pub leaf_sizing: LeafSizing,
    /// Size sibling subtrees on the rayon pool.
    pub parallel: bool,
    /// Containers with fewer children than this are sized sequentially even in parallel mode.
    pub parallel_min_children: usize,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            leaf_sizing: LeafSizing::Intrinsic,
            parallel: false,
            parallel_min_children: 8,
        }
    }
}

/// Final size and absolute position of one node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NodeGeometry {
    /// Resolved size.
    pub size: Size,
    /// Absolute top-left corner.
    pub position: Point,
}

impl NodeGeometry {
    /// Node bounds.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// Geometry of every node reached by a layout pass, keyed by [`NodeId`].
///
/// Serializes as a map from node id to `{size, position}`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    sizes: SizeMap,
    positions: PositionMap,
}

impl Geometry {
    pub(crate) fn new(sizes: SizeMap, positions: PositionMap) -> Self {
        Self { sizes, positions }
    }

    /// Resolved size of `id`.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.sizes.get(id)
    }

    /// Absolute position of `id`.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(id)
    }

    /// Size and position of `id`.
    pub fn get(&self, id: NodeId) -> Option<NodeGeometry> {
        Some(NodeGeometry {
            size: self.size(id)?,
            position: self.position(id)?,
        })
    }

    /// Bounds of `id`.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|g| g.rect())
    }

    /// `(id, geometry)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeGeometry)> + '_ {
        self.positions.iter().filter_map(|(id, position)| {
            self.sizes
                .get(id)
                .map(|size| (id, NodeGeometry { size, position }))
        })
    }

    /// Number of laid out nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Layout driver: a policy registry plus options.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    registry: PolicyRegistry,
    opts: LayoutOpts,
}

impl LayoutEngine {
    /// Engine with an explicit registry and options.
    pub fn new(registry: PolicyRegistry, opts: LayoutOpts) -> Self {
        Self { registry, opts }
    }

    /// Engine with the built-in policies and `opts`.
    pub fn with_opts(opts: LayoutOpts) -> Self {
        Self::new(PolicyRegistry::default(), opts)
    }

    /// Policy registry.
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Mutable policy registry, e.g. to register custom container kinds.
    pub fn registry_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.registry
    }

    /// Layout options.
    pub fn opts(&self) -> &LayoutOpts {
        &self.opts
    }

    /// Lay out the whole tree: sizes from `proposed`, then positions from `(0, 0)`.
    #[tracing::instrument(skip(self, tree), fields(nodes = tree.len()))]
    pub fn layout(&self, tree: &LayoutTree, proposed: Size) -> LayoutResult<Geometry> {
        self.layout_subtree(tree, tree.root(), proposed)
    }

    /// Lay out the subtree rooted at `node` as if it were the root.
    #[tracing::instrument(skip(self, tree))]
    pub fn layout_subtree(
        &self,
        tree: &LayoutTree,
        node: NodeId,
        proposed: Size,
    ) -> LayoutResult<Geometry> {
        check_proposal(proposed)?;
        let sized = resolve_sizes(tree, &self.registry, node, proposed, &self.opts)?;
        let geometry = sized.place(Point::ORIGIN)?;
        tracing::debug!(nodes = geometry.len(), "layout complete");
        Ok(geometry)
    }
}

/// Lay out `tree` with the built-in container policies and default options.
pub fn layout(tree: &LayoutTree, proposed: Size) -> LayoutResult<Geometry> {
    LayoutEngine::default().layout(tree, proposed)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/driver.rs"]
mod tests;
