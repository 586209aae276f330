#![forbid(unsafe_code)]

//! Free positioning of one item inside the container.
//!
//! Idle → Dragging → Idle, per item. Container-wide exclusivity comes from
//! the arbiter, not from this module.
//!
//! On start the item is pinned where it currently renders: its bounding box
//! is converted into content coordinates with
//! [`to_content_relative`](crate::geometry::to_content_relative), which works
//! the same whether the item is still in layout flow or already absolute.
//! Moves then apply the pointer delta (client coordinates) plus any container
//! scroll drift since the start, clamped per axis to
//! `[0, max(0, extent - item_size)]`.

use crate::geometry::{Point, Rect, Size, clamp_axis, to_content_relative};
use crate::layout::{ClampBounds, ContainerMetrics};
use crate::pointer::{PointerChannel, PointerInput};

/// Per-session state of an item drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDragState<I> {
    /// Dragged item.
    pub item: I,
    /// Channel that owns the session.
    pub channel: PointerChannel,
    /// Client position of the pointer-down.
    pub pointer_origin: Point,
    /// Content-relative position the item was pinned at.
    pub origin: Point,
    /// Container scroll at pointer-down.
    pub baseline_scroll: Point,
    /// Item size at pointer-down.
    pub item_size: Size,
    /// Last position applied to the item.
    pub position: Point,
}

/// Absolute placement applied to an item when its drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub position: Point,
    pub z_index: i32,
}

/// Item drag math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDragController {
    bounds: ClampBounds,
    front_z_index: i32,
}

impl ItemDragController {
    #[must_use]
    pub const fn new(bounds: ClampBounds, front_z_index: i32) -> Self {
        Self {
            bounds,
            front_z_index,
        }
    }

    #[must_use]
    pub const fn bounds(&self) -> ClampBounds {
        self.bounds
    }

    /// Capture the session state and compute where to pin the item.
    ///
    /// The pin position is not clamped: the item must land exactly where it
    /// renders now, even if it currently overhangs the container edge. An
    /// unreadable bounding box (hidden element) pins at the content origin.
    pub fn begin<I>(
        &self,
        item: I,
        input: &PointerInput,
        container: &ContainerMetrics,
        item_rect: Rect,
    ) -> (ItemDragState<I>, Pin) {
        let origin = if item_rect.is_finite() {
            to_content_relative(item_rect, container.content_origin(), container.scroll)
        } else {
            Point::ZERO
        };
        let state = ItemDragState {
            item,
            channel: input.channel,
            pointer_origin: input.client.sanitized(),
            origin,
            baseline_scroll: container.scroll,
            item_size: item_rect.size().sanitized(),
            position: origin,
        };
        let pin = Pin {
            position: origin,
            z_index: self.front_z_index,
        };
        (state, pin)
    }

    /// Compute and record the clamped position for a move to `input`.
    pub fn update<I>(
        &self,
        state: &mut ItemDragState<I>,
        input: &PointerInput,
        container: &ContainerMetrics,
    ) -> Point {
        let delta = input.client.sanitized().delta_from(state.pointer_origin);
        let scroll_drift = container.scroll.delta_from(state.baseline_scroll);
        let candidate = state.origin.offset_by(delta).offset_by(scroll_drift);
        let extent = container.clamp_extent(self.bounds);
        let position = Point::new(
            clamp_axis(candidate.x, extent.width, state.item_size.width),
            clamp_axis(candidate.y, extent.height, state.item_size.height),
        );
        state.position = position;
        position
    }
}
