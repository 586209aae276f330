#![forbid(unsafe_code)]

//! Geometric primitives and the container-relative coordinate system.
//!
//! All values are CSS pixels as `f64`. Rectangles come from the host's
//! bounding-box reads and are viewport-relative (origin at the top-left of the
//! viewport). Host reads may produce `NaN` or negative sizes for elements that
//! are not displayed; every constructor that ingests host data has a
//! `sanitized` form that maps those to zero.

/// Replace non-finite values with `0.0`.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// A point or a delta between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self + other`.
    #[inline]
    #[must_use]
    pub fn offset_by(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise `self - origin`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    /// Copy with non-finite components replaced by zero.
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Point {
        Point::new(finite_or_zero(self.x), finite_or_zero(self.y))
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Copy with non-finite or negative extents replaced by zero.
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Size {
        Size::new(
            finite_or_zero(self.width).max(0.0),
            finite_or_zero(self.height).max(0.0),
        )
    }
}

/// A rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether every component is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Copy with non-finite coordinates and non-finite or negative extents
    /// replaced by zero.
    #[must_use]
    pub fn sanitized(self) -> Rect {
        Rect::from_origin_size(self.origin().sanitized(), self.size().sanitized())
    }
}

/// Per-edge widths, used for container borders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Same width on every edge.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new insets with specific values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Top-left offset (left, top).
    #[inline]
    pub const fn leading(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[must_use]
    pub fn sanitized(self) -> Insets {
        Insets::new(
            finite_or_zero(self.top).max(0.0),
            finite_or_zero(self.right).max(0.0),
            finite_or_zero(self.bottom).max(0.0),
            finite_or_zero(self.left).max(0.0),
        )
    }
}

/// Convert a viewport rectangle into the container's content coordinate
/// system.
///
/// `content_origin` is the viewport position of the container's content box
/// (its bounding origin plus border) and `scroll` its current scroll offset.
/// The result is what `left`/`top` must be set to for an absolutely
/// positioned child to render exactly where `element` currently renders.
#[inline]
pub fn to_content_relative(element: Rect, content_origin: Point, scroll: Point) -> Point {
    element.origin().delta_from(content_origin).offset_by(scroll)
}

/// Clamp one axis of a position to `[0, max(0, extent - size)]`.
///
/// A non-finite candidate clamps to `0`.
#[inline]
pub fn clamp_axis(candidate: f64, extent: f64, size: f64) -> f64 {
    let upper = (finite_or_zero(extent) - finite_or_zero(size)).max(0.0);
    finite_or_zero(candidate).clamp(0.0, upper)
}

#[cfg(test)]
mod tests {
    use super::{Insets, Point, Rect, Size, clamp_axis, finite_or_zero, to_content_relative};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.5, 7.5)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn sanitized_rect_maps_garbage_to_zero() {
        let rect = Rect::new(f64::NAN, 4.0, -3.0, f64::INFINITY).sanitized();
        assert_eq!(rect, Rect::new(0.0, 4.0, 0.0, 0.0));
        assert!(rect.is_empty());
        assert!(rect.is_finite());
        assert!(!Rect::new(0.0, f64::NAN, 1.0, 1.0).is_finite());
    }

    #[test]
    fn sanitized_insets_reject_negative_borders() {
        let insets = Insets::new(-1.0, f64::NAN, 2.0, 3.0).sanitized();
        assert_eq!(insets, Insets::new(0.0, 0.0, 2.0, 3.0));
        assert_eq!(insets.leading(), Point::new(3.0, 0.0));
    }

    #[test]
    fn content_relative_matches_bounding_box_formula() {
        // item viewport left 150, container viewport left 100, scroll 40
        let item = Rect::new(150.0, 80.0, 30.0, 30.0);
        let rel = to_content_relative(item, Point::new(100.0, 60.0), Point::new(40.0, 0.0));
        assert_eq!(rel, Point::new(90.0, 20.0));
    }

    #[test]
    fn content_relative_accounts_for_border_offset() {
        let container = Rect::new(100.0, 60.0, 400.0, 200.0);
        let border = Insets::all(2.0);
        let origin = container.origin().offset_by(border.leading());
        let rel = to_content_relative(
            Rect::new(152.0, 82.0, 10.0, 10.0),
            origin,
            Point::ZERO,
        );
        assert_eq!(rel, Point::new(50.0, 20.0));
    }

    #[test]
    fn clamp_axis_bounds() {
        assert_eq!(clamp_axis(-5.0, 300.0, 50.0), 0.0);
        assert_eq!(clamp_axis(120.0, 300.0, 50.0), 120.0);
        assert_eq!(clamp_axis(400.0, 300.0, 50.0), 250.0);
    }

    #[test]
    fn clamp_axis_item_larger_than_extent_pins_to_zero() {
        assert_eq!(clamp_axis(30.0, 40.0, 100.0), 0.0);
    }

    #[test]
    fn clamp_axis_non_finite_candidate_is_zero() {
        assert_eq!(clamp_axis(f64::NAN, 300.0, 50.0), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn size_and_point_helpers() {
        assert_eq!(Size::new(-1.0, 2.0).sanitized(), Size::new(0.0, 2.0));
        assert_eq!(
            Point::new(5.0, 7.0).delta_from(Point::new(2.0, 10.0)),
            Point::new(3.0, -3.0)
        );
    }
}
