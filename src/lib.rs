//! stackweave is a two-pass measure/place layout engine for trees of visual nodes.
//!
//! A [`LayoutTree`] holds leaves (content with an intrinsic size) and containers (ordered
//! children plus a [`ContainerKind`] selecting how child sizes combine and how children are
//! placed). Layout runs in two passes that never interleave:
//!
//! 1. **Size**: `LayoutTree + proposed Size -> SizedTree` bottom-up ([`resolve_sizes`])
//! 2. **Place**: `SizedTree + origin -> Geometry` top-down ([`SizedTree::place`],
//!    [`assign_positions`])
//!
//! [`layout`] and [`LayoutEngine::layout`] run both passes from the root with origin `(0, 0)`.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Trees are read-only**: results are maps keyed by [`NodeId`], never written into nodes.
//! - **Fail fast**: a failed pass returns an error and no geometry.
//! - **Deterministic**: the optional parallel size pass produces exactly the sequential result.
//! - **Strict hierarchy**: a node reached twice fails the pass instead of being laid out twice.
//!
//! Nodes fit their content by default. A per-node [`Sizing`] can instead pin an axis to a
//! fixed or fractional length, fill the proposal, or fit with a minimum; stacks then place
//! their run of children inside the extra space according to [`ContainerStyle::arrange`].
//!
//! Both passes recurse once per tree level. Trees thousands of levels deep need a thread
//! (and, in parallel mode, rayon worker) stack sized for that depth.
//!
//! # Example
//!
//! ```
//! use stackweave::{Size, TreeBuilder, layout};
//!
//! let mut b = TreeBuilder::new();
//! let a = b.leaf(Size::new(30.0, 10.0));
//! let c = b.leaf(Size::new(40.0, 15.0));
//! let root = b.vstack(vec![a, c]);
//! let tree = b.build(root)?;
//!
//! let geometry = layout(&tree, Size::new(500.0, 500.0))?;
//! assert_eq!(geometry.size(root), Some(Size::new(40.0, 25.0)));
//! assert_eq!(geometry.position(c).map(|p| p.y), Some(10.0));
//! # Ok::<(), stackweave::LayoutError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod tree;

pub use foundation::core::{Align, Axis, Edges, Point, Rect, Size, Vec2};
pub use foundation::error::{LayoutError, LayoutResult};
pub use foundation::math::{max_extent, max_size, stack_extent, sum_extent};
pub use layout::driver::{Geometry, LayoutEngine, LayoutOpts, NodeGeometry, layout};
pub use layout::map::{NodeMap, PositionMap, SizeMap};
pub use layout::place::assign_positions;
pub use layout::policy::{
    ContainerFrame, ContainerPolicy, OverlayPolicy, Placement, PolicyRegistry, StackPolicy,
};
pub use layout::resolve::{LeafSizing, SizedTree, resolve_sizes};
pub use tree::builder::TreeBuilder;
pub use tree::model::{
    ContainerKind, ContainerStyle, LayoutTree, Len, Node, NodeId, NodeKind, SizeMode, Sizing,
};
