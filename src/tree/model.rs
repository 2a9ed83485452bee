use std::borrow::Cow;
use std::fmt;

use crate::foundation::core::{Align, Axis, Edges, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::math::is_valid_extent;

/// Index of a node inside a [`LayoutTree`] arena.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena slot of this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key selecting a container's size-combination and placement policy.
///
/// Kinds are open: any string may be used as long as a policy is registered for it in the
/// [`PolicyRegistry`](crate::PolicyRegistry) handed to the layout pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ContainerKind(Cow<'static, str>);

impl ContainerKind {
    /// Children stacked top to bottom.
    pub const VSTACK: ContainerKind = ContainerKind(Cow::Borrowed("vstack"));
    /// Children stacked left to right.
    pub const HSTACK: ContainerKind = ContainerKind(Cow::Borrowed("hstack"));
    /// Children layered on top of each other at the container origin.
    pub const OVERLAY: ContainerKind = ContainerKind(Cow::Borrowed("overlay"));

    /// Kind with a caller-chosen name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-container spacing and alignment knobs read by container policies.
///
/// The default (no gap, no padding, start alignment and arrangement) leaves stacking
/// untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerStyle {
    /// Space inserted between consecutive children along the stacking axis.
    #[serde(default)]
    pub gap: f64,
    /// Inner padding around the children.
    #[serde(default)]
    pub padding: Edges,
    /// Alignment of children on the axis the container does not stack along.
    #[serde(default)]
    pub align: Align,
    /// Position of the stacked run inside a container larger than its content, along the
    /// stacking axis.
    #[serde(default)]
    pub arrange: Align,
}

impl ContainerStyle {
    /// Describe the first gap or padding value that is negative or not finite.
    pub(crate) fn check(&self) -> Result<(), String> {
        let fields = [
            ("gap", self.gap),
            ("left padding", self.padding.left),
            ("right padding", self.padding.right),
            ("top padding", self.padding.top),
            ("bottom padding", self.padding.bottom),
        ];
        match fields.iter().find(|(_, v)| !is_valid_extent(*v)) {
            Some((field, v)) => Err(format!("{field} must be finite and non-negative, got {v}")),
            None => Ok(()),
        }
    }
}

/// A length either in layout units or relative to the proposed extent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Len {
    /// Absolute layout units.
    Px(f64),
    /// Fraction of the extent proposed by the parent.
    Frac(f64),
}

impl Len {
    /// Length in layout units for a parent proposal of `proposed`.
    pub fn resolve(self, proposed: f64) -> f64 {
        match self {
            Len::Px(v) => v,
            Len::Frac(f) => proposed * f,
        }
    }

    fn is_valid(self) -> bool {
        match self {
            Len::Px(v) | Len::Frac(v) => is_valid_extent(v),
        }
    }
}

/// How a node picks its own extent along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    /// Hug the content: intrinsic size for leaves, combined child size for containers.
    #[default]
    Fit,
    /// Hug the content, but never shrink below the given length.
    FitAtLeast(Len),
    /// Exactly the given length; children are proposed that length instead of the parent's.
    Fixed(Len),
    /// Take the whole extent the parent proposes.
    Fill,
}

impl SizeMode {
    /// Extent this node offers its content, given the parent's proposal.
    pub fn available(self, proposed: f64) -> f64 {
        match self {
            SizeMode::Fixed(len) => len.resolve(proposed),
            SizeMode::Fit | SizeMode::FitAtLeast(_) | SizeMode::Fill => proposed,
        }
    }

    /// Final extent from the parent's proposal and the resolved content extent.
    pub fn settle(self, proposed: f64, content: f64) -> f64 {
        match self {
            SizeMode::Fit => content,
            SizeMode::FitAtLeast(min) => content.max(min.resolve(proposed)),
            SizeMode::Fixed(len) => len.resolve(proposed),
            SizeMode::Fill => proposed,
        }
    }

    fn length(self) -> Option<Len> {
        match self {
            SizeMode::FitAtLeast(len) | SizeMode::Fixed(len) => Some(len),
            SizeMode::Fit | SizeMode::Fill => None,
        }
    }
}

/// Per-axis [`SizeMode`] of a node. Defaults to fitting the content on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sizing {
    /// Horizontal mode.
    #[serde(default)]
    pub width: SizeMode,
    /// Vertical mode.
    #[serde(default)]
    pub height: SizeMode,
}

impl Sizing {
    /// Same mode on both axes.
    pub fn both(mode: SizeMode) -> Self {
        Self {
            width: mode,
            height: mode,
        }
    }

    /// Fixed size in layout units.
    pub fn fixed(size: Size) -> Self {
        Self {
            width: SizeMode::Fixed(Len::Px(size.width)),
            height: SizeMode::Fixed(Len::Px(size.height)),
        }
    }

    /// Mode along `axis`.
    pub fn along(&self, axis: Axis) -> SizeMode {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Size offered to the content for a parent proposal of `proposed`.
    pub fn available(&self, proposed: Size) -> Size {
        Size::new(
            self.width.available(proposed.width),
            self.height.available(proposed.height),
        )
    }

    /// Final size from the parent's proposal and the resolved content size.
    pub fn settle(&self, proposed: Size, content: Size) -> Size {
        Size::new(
            self.width.settle(proposed.width, content.width),
            self.height.settle(proposed.height, content.height),
        )
    }

    /// Describe the first length that is negative or not finite.
    pub(crate) fn check(&self) -> Result<(), String> {
        for (axis, mode) in [("width", self.width), ("height", self.height)] {
            if let Some(len) = mode.length().filter(|len| !len.is_valid()) {
                return Err(format!(
                    "{axis} length must be finite and non-negative, got {len:?}"
                ));
            }
        }
        Ok(())
    }
}

/// Leaf or container payload of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Content that reports its own natural size.
    Leaf {
        /// Intrinsic size of the content.
        content: Size,
    },
    /// Node whose size and child placement come from a container policy.
    Container {
        /// Policy key.
        kind: ContainerKind,
        /// Spacing and alignment.
        style: ContainerStyle,
        /// Children in placement order.
        children: Vec<NodeId>,
    },
}

/// One element of a [`LayoutTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Optional debug/lookup name.
    pub name: Option<String>,
    /// How the node picks its own size from the proposal and its content.
    pub sizing: Sizing,
    /// Leaf or container payload.
    pub kind: NodeKind,
}

impl Node {
    /// `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Children in placement order; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Container { children, .. } => children,
        }
    }
}

/// Arena-backed node tree with a designated root.
///
/// Layout never mutates the tree; results are produced as maps keyed by [`NodeId`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

impl LayoutTree {
    /// Tree root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots (reachable or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node, failing with [`LayoutError::MalformedTree`] for dangling ids.
    pub fn node(&self, id: NodeId) -> LayoutResult<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| LayoutError::malformed(format!("node {id} is not in the tree")))
    }

    /// First node carrying `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name.as_deref() == Some(name))
            .map(|i| NodeId(i as u32))
    }

    /// Check that the nodes reachable from the root form a strict hierarchy.
    ///
    /// Dangling child ids and children with more than one parent are
    /// [`LayoutError::MalformedTree`]; a child that is its own ancestor is
    /// [`LayoutError::CycleDetected`].
    pub fn validate(&self) -> LayoutResult<()> {
        self.walk().map(|_| ())
    }

    /// Nodes reachable from the root, in pre-order (parent before children, children in
    /// placement order). Fails like [`LayoutTree::validate`].
    pub fn walk(&self) -> LayoutResult<Vec<NodeId>> {
        self.node(self.root)?;

        let mut state = vec![Visit::New; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 0)];
        state[self.root.index()] = Visit::OnPath;
        order.push(self.root);

        while let Some(top) = stack.last_mut() {
            let (id, next) = *top;
            let children = self.nodes[id.index()].children();
            let Some(&child) = children.get(next) else {
                state[id.index()] = Visit::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;

            let slot = state.get(child.index()).copied().ok_or_else(|| {
                LayoutError::malformed(format!("node {id} references missing child {child}"))
            })?;
            match slot {
                Visit::OnPath => return Err(LayoutError::CycleDetected(child)),
                Visit::Done => {
                    return Err(LayoutError::malformed(format!(
                        "node {child} has more than one parent"
                    )));
                }
                Visit::New => {
                    state[child.index()] = Visit::OnPath;
                    order.push(child);
                    stack.push((child, 0));
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/model.rs"]
mod tests;
