#![forbid(unsafe_code)]

//! Session arbitration between container panning and item dragging.
//!
//! The arbiter is the single slot that decides which gesture, if any, owns
//! the container. Both controllers go through [`SessionArbiter::try_acquire`]
//! and [`SessionArbiter::release`]; nothing else reads or writes the
//! "item drag active" state.
//!
//! # Invariants
//!
//! 1. At most one gesture holds the slot at any instant.
//! 2. `is_item_drag_active()` is true exactly while an item drag holds it.
//! 3. `release()` on an idle arbiter is a no-op.

/// Gesture kinds that can own the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Container grab-to-scroll.
    Pan,
    /// Free positioning of one item.
    ItemDrag,
}

impl GestureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::ItemDrag => "item_drag",
        }
    }
}

/// Single-slot gesture lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArbiter {
    held: Option<GestureKind>,
}

impl SessionArbiter {
    #[must_use]
    pub const fn new() -> Self {
        Self { held: None }
    }

    /// Take the slot for `kind`. Returns `false` (and changes nothing) when
    /// any gesture already holds it.
    pub fn try_acquire(&mut self, kind: GestureKind) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(kind);
        true
    }

    /// Free the slot, returning the kind that held it.
    pub fn release(&mut self) -> Option<GestureKind> {
        self.held.take()
    }

    /// Kind currently holding the slot.
    #[must_use]
    pub const fn held(&self) -> Option<GestureKind> {
        self.held
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.held.is_none()
    }

    /// The shared "an item is being dragged" flag.
    #[must_use]
    pub const fn is_item_drag_active(&self) -> bool {
        matches!(self.held, Some(GestureKind::ItemDrag))
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureKind, SessionArbiter};

    #[test]
    fn acquire_is_exclusive() {
        let mut arbiter = SessionArbiter::new();
        assert!(arbiter.try_acquire(GestureKind::ItemDrag));
        assert!(!arbiter.try_acquire(GestureKind::Pan));
        assert!(!arbiter.try_acquire(GestureKind::ItemDrag));
        assert_eq!(arbiter.held(), Some(GestureKind::ItemDrag));
        assert!(arbiter.is_item_drag_active());
    }

    #[test]
    fn pan_does_not_raise_item_flag() {
        let mut arbiter = SessionArbiter::new();
        assert!(arbiter.try_acquire(GestureKind::Pan));
        assert!(!arbiter.is_item_drag_active());
        assert!(!arbiter.is_idle());
    }

    #[test]
    fn release_twice_is_noop() {
        let mut arbiter = SessionArbiter::new();
        assert!(arbiter.try_acquire(GestureKind::ItemDrag));
        assert_eq!(arbiter.release(), Some(GestureKind::ItemDrag));
        assert_eq!(arbiter.release(), None);
        assert!(arbiter.is_idle());
        assert!(!arbiter.is_item_drag_active());
        assert!(arbiter.try_acquire(GestureKind::Pan));
    }
}
