#![forbid(unsafe_code)]

//! Container grab-to-scroll.
//!
//! Idle → Panning → Idle. The coordinator owns the session slot; this module
//! only holds the per-session baseline and the scroll math.
//!
//! Dragging the hand left moves the content left, which means the scroll
//! offset grows: `scroll = max(0, baseline - (pointer - origin))`. The upper
//! bound is left to the platform, which caps scroll at content minus viewport.

use crate::config::PanAxes;
use crate::geometry::{Point, finite_or_zero};
use crate::layout::ContainerMetrics;
use crate::pointer::{PointerChannel, PointerInput};

/// Baseline captured when a pan starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    /// Channel that owns the session.
    pub channel: PointerChannel,
    /// Page position of the pointer-down.
    pub pointer_origin: Point,
    /// Container scroll offset at pointer-down.
    pub baseline_scroll: Point,
    /// Last scroll offset requested from the host.
    pub last_scroll: Point,
}

/// Scroll request for the host. `None` axes are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollRequest {
    pub left: Option<f64>,
    pub top: Option<f64>,
}

/// Pan math, parameterized by the axes it scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanController {
    axes: PanAxes,
}

impl PanController {
    #[must_use]
    pub const fn new(axes: PanAxes) -> Self {
        Self { axes }
    }

    #[must_use]
    pub const fn axes(&self) -> PanAxes {
        self.axes
    }

    /// Capture the session baseline.
    #[must_use]
    pub fn begin(&self, input: &PointerInput, container: &ContainerMetrics) -> PanState {
        PanState {
            channel: input.channel,
            pointer_origin: input.page.sanitized(),
            baseline_scroll: container.scroll,
            last_scroll: container.scroll,
        }
    }

    /// Compute the scroll request for a move to `input` and record it.
    pub fn update(&self, state: &mut PanState, input: &PointerInput) -> ScrollRequest {
        let delta = input.page.sanitized().delta_from(state.pointer_origin);
        let mut request = ScrollRequest::default();
        if self.axes.contains(PanAxes::HORIZONTAL) {
            let left = scroll_axis(state.baseline_scroll.x, delta.x);
            state.last_scroll.x = left;
            request.left = Some(left);
        }
        if self.axes.contains(PanAxes::VERTICAL) {
            let top = scroll_axis(state.baseline_scroll.y, delta.y);
            state.last_scroll.y = top;
            request.top = Some(top);
        }
        request
    }
}

#[inline]
fn scroll_axis(baseline: f64, delta: f64) -> f64 {
    finite_or_zero(baseline - delta).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{PanController, ScrollRequest};
    use crate::config::PanAxes;
    use crate::geometry::{Point, Rect};
    use crate::layout::ContainerMetrics;
    use crate::pointer::PointerInput;

    fn container(scroll_x: f64) -> ContainerMetrics {
        ContainerMetrics {
            scroll: Point::new(scroll_x, 0.0),
            ..ContainerMetrics::from_rect(Rect::new(0.0, 0.0, 300.0, 100.0))
        }
    }

    #[test]
    fn moving_left_increases_scroll() {
        let pan = PanController::default();
        let mut state = pan.begin(&PointerInput::mouse(100.0, 10.0), &container(0.0));
        let request = pan.update(&mut state, &PointerInput::mouse(60.0, 10.0));
        assert_eq!(
            request,
            ScrollRequest {
                left: Some(40.0),
                top: None
            }
        );
        assert_eq!(state.last_scroll.x, 40.0);
    }

    #[test]
    fn moving_right_past_start_clamps_at_zero() {
        let pan = PanController::default();
        let mut state = pan.begin(&PointerInput::mouse(100.0, 10.0), &container(30.0));
        let request = pan.update(&mut state, &PointerInput::mouse(200.0, 10.0));
        assert_eq!(request.left, Some(0.0));
    }

    #[test]
    fn update_is_relative_to_baseline_not_last_move() {
        let pan = PanController::default();
        let mut state = pan.begin(&PointerInput::mouse(100.0, 10.0), &container(50.0));
        pan.update(&mut state, &PointerInput::mouse(90.0, 10.0));
        let request = pan.update(&mut state, &PointerInput::mouse(80.0, 10.0));
        assert_eq!(request.left, Some(70.0));
    }

    #[test]
    fn vertical_axis_only_when_enabled() {
        let pan = PanController::new(PanAxes::HORIZONTAL | PanAxes::VERTICAL);
        let mut state = pan.begin(
            &PointerInput::mouse(100.0, 100.0),
            &ContainerMetrics {
                scroll: Point::new(0.0, 10.0),
                ..ContainerMetrics::default()
            },
        );
        let request = pan.update(&mut state, &PointerInput::mouse(100.0, 80.0));
        assert_eq!(request.left, Some(0.0));
        assert_eq!(request.top, Some(30.0));

        let pan = PanController::new(PanAxes::VERTICAL);
        let mut state = pan.begin(&PointerInput::mouse(0.0, 0.0), &ContainerMetrics::default());
        let request = pan.update(&mut state, &PointerInput::mouse(-50.0, -5.0));
        assert_eq!(request.left, None);
        assert_eq!(request.top, Some(5.0));
    }

    #[test]
    fn pan_uses_page_coordinates() {
        let pan = PanController::default();
        let down = PointerInput::mouse(100.0, 10.0).with_page(100.0, 510.0);
        let mut state = pan.begin(&down, &container(0.0));
        let moved = PointerInput::mouse(0.0, 0.0).with_page(75.0, 510.0);
        assert_eq!(pan.update(&mut state, &moved).left, Some(25.0));
    }
}
