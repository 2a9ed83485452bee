use crate::foundation::core::Size;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::tree::model::{
    ContainerKind, ContainerStyle, LayoutTree, Node, NodeId, NodeKind, Sizing,
};

/// Incremental builder for [`LayoutTree`].
///
/// Children are referenced by the ids returned from earlier calls, so trees are naturally
/// built bottom-up. [`TreeBuilder::push_child`] appends to an existing container and does not
/// check the result for cycles; [`LayoutTree::validate`] and the layout pass do.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: Option<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name,
            sizing: Sizing::default(),
            kind,
        });
        id
    }

    /// Add a leaf with intrinsic `content` size.
    pub fn leaf(&mut self, content: Size) -> NodeId {
        self.push(None, NodeKind::Leaf { content })
    }

    /// Add a named leaf.
    pub fn named_leaf(&mut self, name: impl Into<String>, content: Size) -> NodeId {
        self.push(Some(name.into()), NodeKind::Leaf { content })
    }

    /// Add a container of `kind` with default style.
    pub fn container(&mut self, kind: ContainerKind, children: Vec<NodeId>) -> NodeId {
        self.styled_container(kind, ContainerStyle::default(), children)
    }

    /// Add a container with an explicit style.
    pub fn styled_container(
        &mut self,
        kind: ContainerKind,
        style: ContainerStyle,
        children: Vec<NodeId>,
    ) -> NodeId {
        self.push(
            None,
            NodeKind::Container {
                kind,
                style,
                children,
            },
        )
    }

    /// Vertical stack with default style.
    pub fn vstack(&mut self, children: Vec<NodeId>) -> NodeId {
        self.container(ContainerKind::VSTACK, children)
    }

    /// Horizontal stack with default style.
    pub fn hstack(&mut self, children: Vec<NodeId>) -> NodeId {
        self.container(ContainerKind::HSTACK, children)
    }

    /// Attach a name to an existing node.
    pub fn name(&mut self, id: NodeId, name: impl Into<String>) -> LayoutResult<()> {
        let node = self.node_mut(id)?;
        node.name = Some(name.into());
        Ok(())
    }

    /// Set how `id` sizes itself; nodes fit their content until this is called.
    pub fn sizing(&mut self, id: NodeId, sizing: Sizing) -> LayoutResult<()> {
        self.node_mut(id)?.sizing = sizing;
        Ok(())
    }

    /// Append `child` to the children of container `parent`.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        match &mut self.node_mut(parent)?.kind {
            NodeKind::Container { children, .. } => {
                children.push(child);
                Ok(())
            }
            NodeKind::Leaf { .. } => Err(LayoutError::malformed(format!(
                "cannot add child {child} to leaf {parent}"
            ))),
        }
    }

    /// Finish the tree with `root` as its root.
    pub fn build(self, root: NodeId) -> LayoutResult<LayoutTree> {
        if root.index() >= self.nodes.len() {
            return Err(LayoutError::malformed(format!(
                "root {root} is not in the tree"
            )));
        }
        Ok(LayoutTree {
            nodes: self.nodes,
            root,
        })
    }

    fn node_mut(&mut self, id: NodeId) -> LayoutResult<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| LayoutError::malformed(format!("node {id} is not in the tree")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/builder.rs"]
mod tests;
