use crate::foundation::core::{Axis, Size};

/// Largest extent along `axis`, `0.0` for no sizes.
pub fn max_extent(sizes: &[Size], axis: Axis) -> f64 {
    sizes.iter().map(|s| axis.extent(*s)).fold(0.0, f64::max)
}

/// Sum of extents along `axis`.
pub fn sum_extent(sizes: &[Size], axis: Axis) -> f64 {
    sizes.iter().map(|s| axis.extent(*s)).sum::<f64>()
}

/// Extent of `sizes` stacked along `main`: summed on `main`, max on the cross axis.
pub fn stack_extent(sizes: &[Size], main: Axis) -> Size {
    main.size(sum_extent(sizes, main), max_extent(sizes, main.other()))
}

/// Per-axis max over `sizes`.
pub fn max_size(sizes: &[Size]) -> Size {
    Size::new(max_extent(sizes, Axis::X), max_extent(sizes, Axis::Y))
}

/// `size - by`, saturating each axis at zero.
pub fn shrink(size: Size, by: Size) -> Size {
    Size::new(
        (size.width - by.width).max(0.0),
        (size.height - by.height).max(0.0),
    )
}

/// Per-axis sum of two sizes.
pub fn grow(size: Size, by: Size) -> Size {
    Size::new(size.width + by.width, size.height + by.height)
}

/// `true` for a finite, non-negative length.
pub fn is_valid_extent(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// `true` when both dimensions are finite and non-negative.
pub fn is_valid_proposal(size: Size) -> bool {
    is_valid_extent(size.width) && is_valid_extent(size.height)
}

/// Per-axis min, used when a leaf is clamped to its proposal.
pub fn clamp_to(size: Size, limit: Size) -> Size {
    Size::new(size.width.min(limit.width), size.height.min(limit.height))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
