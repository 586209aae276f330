#![forbid(unsafe_code)]

//! Container geometry snapshot and the layout read seam.

use crate::geometry::{Insets, Point, Rect, Size};

/// Which extent item positions are clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampBounds {
    /// The visible content box (`clientWidth` / `clientHeight`).
    Viewport,
    /// The full scrollable content (`scrollWidth` / `scrollHeight`), so items
    /// stay reachable after panning.
    #[default]
    ScrollContent,
}

/// One frame's worth of container geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerMetrics {
    /// Viewport-relative bounding box (border box).
    pub rect: Rect,
    /// Border widths (`clientLeft` / `clientTop` on the leading edges).
    pub border: Insets,
    /// Current scroll offset (`scrollLeft` / `scrollTop`).
    pub scroll: Point,
    /// Visible content box size (`clientWidth` / `clientHeight`).
    pub client_size: Size,
    /// Scrollable content size (`scrollWidth` / `scrollHeight`).
    pub scroll_size: Size,
}

impl ContainerMetrics {
    /// Borderless, unscrolled container whose content exactly fits `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            border: Insets::default(),
            scroll: Point::ZERO,
            client_size: rect.size(),
            scroll_size: rect.size(),
        }
    }

    /// Viewport position of the content box origin.
    #[inline]
    pub fn content_origin(&self) -> Point {
        self.rect.origin().offset_by(self.border.leading())
    }

    /// Extent that item positions are clamped against.
    pub fn clamp_extent(&self, bounds: ClampBounds) -> Size {
        match bounds {
            ClampBounds::Viewport => self.client_size,
            // Scroll size never reports less than the client size in browsers,
            // but host snapshots may be synthesized.
            ClampBounds::ScrollContent => Size::new(
                self.scroll_size.width.max(self.client_size.width),
                self.scroll_size.height.max(self.client_size.height),
            ),
        }
    }

    /// Copy with every host-provided value sanitized.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let scroll = self.scroll.sanitized();
        Self {
            rect: self.rect.sanitized(),
            border: self.border.sanitized(),
            scroll: Point::new(scroll.x.max(0.0), scroll.y.max(0.0)),
            client_size: self.client_size.sanitized(),
            scroll_size: self.scroll_size.sanitized(),
        }
    }
}

/// Geometry reads the coordinator performs while routing and tracking.
///
/// Implemented by the DOM adapter over live elements and by tests over
/// scripted values. Implementations may return raw host values; the
/// coordinator sanitizes everything it reads.
pub trait LayoutProbe<I> {
    /// Current container geometry.
    fn container(&self) -> ContainerMetrics;

    /// Current viewport-relative bounding box of `item`.
    fn item_rect(&self, item: &I) -> Rect;
}

#[cfg(test)]
mod tests {
    use super::{ClampBounds, ContainerMetrics};
    use crate::geometry::{Insets, Point, Rect, Size};

    #[test]
    fn content_origin_includes_border() {
        let metrics = ContainerMetrics {
            border: Insets::new(3.0, 0.0, 0.0, 5.0),
            ..ContainerMetrics::from_rect(Rect::new(10.0, 20.0, 300.0, 100.0))
        };
        assert_eq!(metrics.content_origin(), Point::new(15.0, 23.0));
    }

    #[test]
    fn clamp_extent_selects_requested_bounds() {
        let metrics = ContainerMetrics {
            client_size: Size::new(300.0, 100.0),
            scroll_size: Size::new(900.0, 100.0),
            ..ContainerMetrics::default()
        };
        assert_eq!(
            metrics.clamp_extent(ClampBounds::Viewport),
            Size::new(300.0, 100.0)
        );
        assert_eq!(
            metrics.clamp_extent(ClampBounds::ScrollContent),
            Size::new(900.0, 100.0)
        );
    }

    #[test]
    fn scroll_content_extent_never_smaller_than_viewport() {
        let metrics = ContainerMetrics {
            client_size: Size::new(300.0, 100.0),
            scroll_size: Size::new(0.0, 0.0),
            ..ContainerMetrics::default()
        };
        assert_eq!(
            metrics.clamp_extent(ClampBounds::ScrollContent),
            Size::new(300.0, 100.0)
        );
    }

    #[test]
    fn sanitized_clears_negative_scroll() {
        let metrics = ContainerMetrics {
            scroll: Point::new(-4.0, f64::NAN),
            ..ContainerMetrics::default()
        }
        .sanitized();
        assert_eq!(metrics.scroll, Point::ZERO);
    }
}
