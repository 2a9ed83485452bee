use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Axis, Point, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::math::{grow, max_size, shrink, stack_extent};
use crate::tree::model::{ContainerKind, ContainerStyle};

/// Geometry of a sized container while its children are being placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerFrame {
    /// Absolute top-left corner of the container.
    pub origin: Point,
    /// Resolved size of the container.
    pub size: Size,
    /// Container style.
    pub style: ContainerStyle,
}

impl ContainerFrame {
    /// Top-left corner of the padded content box.
    pub fn inner_origin(&self) -> Point {
        self.origin + self.style.padding.inset()
    }

    /// Size of the padded content box.
    pub fn inner_size(&self) -> Size {
        shrink(self.size, self.style.padding.total())
    }
}

/// Result of placing one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Absolute origin handed to the child.
    pub origin: Point,
    /// Cursor the next sibling starts from.
    pub next_cursor: Point,
}

/// Size-combination and placement rules for one container kind.
///
/// The size pass calls [`child_proposal`](ContainerPolicy::child_proposal) once per container
/// and [`combine`](ContainerPolicy::combine) once all children are sized. The position pass
/// calls [`start_cursor`](ContainerPolicy::start_cursor) and then
/// [`place`](ContainerPolicy::place) once per child, in child order, feeding each returned
/// `next_cursor` into the next call.
pub trait ContainerPolicy: Send + Sync + fmt::Debug {
    /// Size proposed to every child given the container's own proposal.
    fn child_proposal(
        &self,
        proposed: Size,
        style: &ContainerStyle,
        _child_count: usize,
    ) -> Size {
        shrink(proposed, style.padding.total())
    }

    /// Container size from its children's resolved sizes, in child order.
    fn combine(&self, child_sizes: &[Size], style: &ContainerStyle) -> Size;

    /// Cursor for the first child, given the resolved sizes of all children in order.
    fn start_cursor(&self, frame: &ContainerFrame, _child_sizes: &[Size]) -> Point {
        frame.inner_origin()
    }

    /// Place one child at `cursor`.
    fn place(&self, frame: &ContainerFrame, cursor: Point, child: Size) -> Placement;
}

/// Stack along one axis: sizes add up on the main axis and take the max on the cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackPolicy {
    axis: Axis,
}

impl StackPolicy {
    /// Stack along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Top-to-bottom stack.
    pub fn vertical() -> Self {
        Self::new(Axis::Y)
    }

    /// Left-to-right stack.
    pub fn horizontal() -> Self {
        Self::new(Axis::X)
    }

    /// Stacking axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn total_gap(style: &ContainerStyle, child_count: usize) -> f64 {
        style.gap * (child_count.saturating_sub(1) as f64)
    }
}

impl ContainerPolicy for StackPolicy {
    fn child_proposal(&self, proposed: Size, style: &ContainerStyle, child_count: usize) -> Size {
        let gaps = self.axis.size(Self::total_gap(style, child_count), 0.0);
        shrink(proposed, grow(style.padding.total(), gaps))
    }

    fn combine(&self, child_sizes: &[Size], style: &ContainerStyle) -> Size {
        let content = stack_extent(child_sizes, self.axis);
        let gaps = self.axis.size(Self::total_gap(style, child_sizes.len()), 0.0);
        grow(grow(content, gaps), style.padding.total())
    }

    // The run of children plus gaps is offset inside the inner box by `arrange`.
    fn start_cursor(&self, frame: &ContainerFrame, child_sizes: &[Size]) -> Point {
        let run = self.axis.extent(stack_extent(child_sizes, self.axis))
            + Self::total_gap(&frame.style, child_sizes.len());
        let avail = self.axis.extent(frame.inner_size());
        self.axis
            .advance(frame.inner_origin(), frame.style.arrange.offset(avail, run))
    }

    fn place(&self, frame: &ContainerFrame, cursor: Point, child: Size) -> Placement {
        let cross = self.axis.other();
        let inner_cross = cross.extent(frame.inner_size());
        let cross_at = cross.coord(frame.inner_origin())
            + frame.style.align.offset(inner_cross, cross.extent(child));
        Placement {
            origin: cross.with_coord(cursor, cross_at),
            next_cursor: self
                .axis
                .advance(cursor, self.axis.extent(child) + frame.style.gap),
        }
    }
}

/// Children layered at the container origin; the container is as large as its largest child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayPolicy;

impl ContainerPolicy for OverlayPolicy {
    fn combine(&self, child_sizes: &[Size], style: &ContainerStyle) -> Size {
        grow(max_size(child_sizes), style.padding.total())
    }

    fn place(&self, frame: &ContainerFrame, cursor: Point, child: Size) -> Placement {
        let inner = frame.inner_size();
        let base = frame.inner_origin();
        let align = frame.style.align;
        Placement {
            origin: Point::new(
                base.x + align.offset(inner.width, child.width),
                base.y + align.offset(inner.height, child.height),
            ),
            next_cursor: cursor,
        }
    }
}

/// Container policies keyed by [`ContainerKind`].
///
/// [`PolicyRegistry::default`] knows `vstack`, `hstack` and `overlay`.
#[derive(Clone, Debug)]
pub struct PolicyRegistry {
    policies: BTreeMap<ContainerKind, Arc<dyn ContainerPolicy>>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register(ContainerKind::VSTACK, StackPolicy::vertical())
            .register(ContainerKind::HSTACK, StackPolicy::horizontal())
            .register(ContainerKind::OVERLAY, OverlayPolicy);
        reg
    }
}

impl PolicyRegistry {
    /// Registry without any policy.
    pub fn empty() -> Self {
        Self {
            policies: BTreeMap::new(),
        }
    }

    /// Add or replace the policy for `kind`.
    pub fn register(
        &mut self,
        kind: ContainerKind,
        policy: impl ContainerPolicy + 'static,
    ) -> &mut Self {
        self.policies.insert(kind, Arc::new(policy));
        self
    }

    /// `true` when `kind` has a policy.
    pub fn contains(&self, kind: &ContainerKind) -> bool {
        self.policies.contains_key(kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &ContainerKind> {
        self.policies.keys()
    }

    /// Policy for `kind`, or [`LayoutError::MalformedTree`] when it is unknown.
    pub fn get(&self, kind: &ContainerKind) -> LayoutResult<&dyn ContainerPolicy> {
        self.policies
            .get(kind)
            .map(|p| &**p)
            .ok_or_else(|| LayoutError::malformed(format!("unknown container kind '{kind}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/policy.rs"]
mod tests;
