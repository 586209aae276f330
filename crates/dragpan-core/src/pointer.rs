#![forbid(unsafe_code)]

//! Canonical pointer input.
//!
//! Mouse, touch and pen input are normalized into [`PointerInput`] values by
//! the host adapter. Only the primary pointer of a touch sequence is ever
//! forwarded; secondary touch points are dropped at the adapter.
//!
//! # Design Notes
//!
//! - `page` coordinates drive container panning, `client` coordinates drive
//!   item dragging. Both are carried on every sample so the core never has to
//!   know the document scroll position.
//! - A [`PointerChannel`] identifies one input stream. A session only
//!   observes samples from the channel that started it.

use crate::geometry::Point;

/// Device class that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
    Pen,
}

impl PointerSource {
    /// Map a DOM `PointerEvent.pointerType` string.
    ///
    /// Unknown values are treated as mouse input.
    #[must_use]
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }

    /// DOM `pointerType` spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Pen => "pen",
        }
    }
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, touch contact, pen tip.
    Primary,
    /// Middle mouse button.
    Auxiliary,
    /// Right mouse button, pen barrel.
    Secondary,
    /// Back, forward and anything beyond.
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom_button(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            // -1 means "no button changed" (moves); treat as primary so
            // synthesized samples still route.
            n if n < 0 => Self::Primary,
            n => Self::Other(n as u16),
        }
    }
}

/// One input stream: a device class plus the host's pointer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerChannel {
    pub source: PointerSource,
    pub pointer_id: i32,
}

impl PointerChannel {
    #[must_use]
    pub const fn new(source: PointerSource, pointer_id: i32) -> Self {
        Self { source, pointer_id }
    }

    /// The mouse channel most hosts report (`pointerId == 1`).
    #[must_use]
    pub const fn mouse() -> Self {
        Self::new(PointerSource::Mouse, 1)
    }
}

/// One pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub channel: PointerChannel,
    pub button: PointerButton,
    /// Document-relative position (`pageX` / `pageY`).
    pub page: Point,
    /// Viewport-relative position (`clientX` / `clientY`).
    pub client: Point,
}

impl PointerInput {
    /// Primary-button sample whose page and client positions coincide
    /// (an unscrolled document).
    #[must_use]
    pub const fn at(channel: PointerChannel, x: f64, y: f64) -> Self {
        Self {
            channel,
            button: PointerButton::Primary,
            page: Point::new(x, y),
            client: Point::new(x, y),
        }
    }

    /// Primary mouse sample at `(x, y)`.
    #[must_use]
    pub const fn mouse(x: f64, y: f64) -> Self {
        Self::at(PointerChannel::mouse(), x, y)
    }

    /// Primary touch sample at `(x, y)` for touch point `pointer_id`.
    #[must_use]
    pub const fn touch(pointer_id: i32, x: f64, y: f64) -> Self {
        Self::at(PointerChannel::new(PointerSource::Touch, pointer_id), x, y)
    }

    /// Copy with a different button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Copy with a different page position.
    #[must_use]
    pub const fn with_page(mut self, x: f64, y: f64) -> Self {
        self.page = Point::new(x, y);
        self
    }

    /// Pointer id shortcut.
    #[inline]
    pub const fn pointer_id(&self) -> i32 {
        self.channel.pointer_id
    }
}
