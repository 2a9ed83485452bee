pub use kurbo::{Point, Rect, Size, Vec2};

/// One of the two layout axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis (width, `x`).
    X,
    /// Vertical axis (height, `y`).
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Extent of `size` along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Coordinate of `p` along this axis.
    pub fn coord(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    /// Build a size from an extent along this axis and one along the other axis.
    pub fn size(self, main: f64, cross: f64) -> Size {
        match self {
            Axis::X => Size::new(main, cross),
            Axis::Y => Size::new(cross, main),
        }
    }

    /// Move `p` by `delta` along this axis.
    pub fn advance(self, p: Point, delta: f64) -> Point {
        match self {
            Axis::X => Point::new(p.x + delta, p.y),
            Axis::Y => Point::new(p.x, p.y + delta),
        }
    }

    /// Replace the coordinate of `p` along this axis.
    pub fn with_coord(self, p: Point, v: f64) -> Point {
        match self {
            Axis::X => Point::new(v, p.y),
            Axis::Y => Point::new(p.x, v),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
/// Padding edges in layout units.
pub struct Edges {
    /// Left padding.
    #[serde(default)]
    pub left: f64,
    /// Right padding.
    #[serde(default)]
    pub right: f64,
    /// Top padding.
    #[serde(default)]
    pub top: f64,
    /// Bottom padding.
    #[serde(default)]
    pub bottom: f64,
}

impl Edges {
    /// Same padding on every edge.
    pub fn all(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    /// `left + right`.
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    /// Total padding consumed along `axis`.
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.horizontal(),
            Axis::Y => self.vertical(),
        }
    }

    /// Padding at the start of `axis` (left or top).
    pub fn leading(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Padding as a size, `(horizontal, vertical)`.
    pub fn total(self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }

    /// Top-left inset as a vector.
    pub fn inset(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Alignment of a child inside the space its container offers along one axis.
pub enum Align {
    /// Align to start (left / top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right / bottom).
    End,
}

impl Align {
    /// Offset of `content` inside `container`; content larger than the container sticks to
    /// the start.
    pub fn offset(self, container: f64, content: f64) -> f64 {
        let rem = (container - content).max(0.0);
        match self {
            Align::Start => 0.0,
            Align::Center => rem * 0.5,
            Align::End => rem,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
