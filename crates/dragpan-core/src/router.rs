#![forbid(unsafe_code)]

//! Pointer-down routing: container pan or item drag.

use crate::arbiter::SessionArbiter;

/// Classification of one node on the path from the event target upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole<I> {
    /// The attached container.
    Container,
    /// A draggable item.
    Item(I),
    /// Anything else (item descendants, wrappers).
    Other,
}

/// Where a pointer-down landed, relative to the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<I> {
    /// The container itself or a non-item descendant.
    Background,
    /// Inside the given item (nearest enclosing one).
    Item(I),
    /// Not inside the container at all.
    Outside,
}

/// Resolve a target from its ancestry, target first.
///
/// The first item met before the container wins, so a pointer-down on any
/// descendant of an item resolves to that item, and nested items resolve to
/// the innermost one. Items only count when the walk reaches the container.
pub fn resolve_target<I>(ancestry: impl IntoIterator<Item = NodeRole<I>>) -> RouteTarget<I> {
    let mut nearest_item = None;
    for role in ancestry {
        match role {
            NodeRole::Item(item) => {
                if nearest_item.is_none() {
                    nearest_item = Some(item);
                }
            }
            NodeRole::Container => {
                return nearest_item.map_or(RouteTarget::Background, RouteTarget::Item);
            }
            NodeRole::Other => {}
        }
    }
    RouteTarget::Outside
}

/// Why a pointer input was not acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// An item drag holds the container.
    ItemDragActive,
    /// A pan holds the container.
    SessionInProgress,
    /// The pressed button does not start gestures.
    ButtonNotAllowed,
    /// The target is not inside the container.
    TargetOutsideContainer,
    /// Pan is disabled in configuration.
    PanDisabled,
    /// Item dragging is disabled in configuration.
    ItemDragDisabled,
    /// Move/release/cancel without an active session.
    NoActiveSession,
    /// The sample came from another pointer than the session's.
    PointerMismatch,
}

impl IgnoredReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItemDragActive => "item_drag_active",
            Self::SessionInProgress => "session_in_progress",
            Self::ButtonNotAllowed => "button_not_allowed",
            Self::TargetOutsideContainer => "target_outside_container",
            Self::PanDisabled => "pan_disabled",
            Self::ItemDragDisabled => "item_drag_disabled",
            Self::NoActiveSession => "no_active_session",
            Self::PointerMismatch => "pointer_mismatch",
        }
    }
}

/// Routing verdict for one pointer-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision<I> {
    Pan,
    ItemDrag(I),
    Ignore(IgnoredReason),
}

/// Stateless router; the enable switches come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureRouter {
    pan_enabled: bool,
    item_drag_enabled: bool,
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl GestureRouter {
    #[must_use]
    pub const fn new(pan_enabled: bool, item_drag_enabled: bool) -> Self {
        Self {
            pan_enabled,
            item_drag_enabled,
        }
    }

    /// Decide what a pointer-down on `target` starts.
    ///
    /// The item-drag flag is checked first: a second input channel pressing
    /// the background mid-drag must never start a pan.
    pub fn route<I>(&self, arbiter: &SessionArbiter, target: RouteTarget<I>) -> RouteDecision<I> {
        if arbiter.is_item_drag_active() {
            return RouteDecision::Ignore(IgnoredReason::ItemDragActive);
        }
        if !arbiter.is_idle() {
            return RouteDecision::Ignore(IgnoredReason::SessionInProgress);
        }
        match target {
            RouteTarget::Background if self.pan_enabled => RouteDecision::Pan,
            RouteTarget::Background => RouteDecision::Ignore(IgnoredReason::PanDisabled),
            RouteTarget::Item(item) if self.item_drag_enabled => RouteDecision::ItemDrag(item),
            RouteTarget::Item(_) => RouteDecision::Ignore(IgnoredReason::ItemDragDisabled),
            RouteTarget::Outside => RouteDecision::Ignore(IgnoredReason::TargetOutsideContainer),
        }
    }
}
