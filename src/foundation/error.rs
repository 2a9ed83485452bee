use crate::tree::model::NodeId;

/// Convenience result type used across stackweave.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Error taxonomy for tree loading and layout.
///
/// Every variant is fail-fast: no layout phase substitutes a default after an error, and a
/// failed layout never yields geometry.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// The proposed root size was negative or non-finite.
    #[error("invalid proposed size: {0}")]
    InvalidProposedSize(String),

    /// A node violates the tree shape (dangling child, shared child, unknown container kind,
    /// leaf/container ambiguity at the JSON boundary).
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// A node was reached again while it was still on the traversal path.
    #[error("cycle detected at node {0}")]
    CycleDetected(NodeId),

    /// Position assignment reached a node that has no resolved size.
    #[error("unresolved size for node {0}")]
    UnresolvedSize(NodeId),

    /// Errors when serializing or deserializing trees and geometry.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::InvalidProposedSize`] value.
    pub fn invalid_proposal(msg: impl Into<String>) -> Self {
        Self::InvalidProposedSize(msg.into())
    }

    /// Build a [`LayoutError::MalformedTree`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTree(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
