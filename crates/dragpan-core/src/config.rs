#![forbid(unsafe_code)]

//! Gesture configuration.

use bitflags::bitflags;

use crate::layout::ClampBounds;
use crate::pointer::PointerButton;

/// Stacking order applied to an item while it is being dragged.
pub const DEFAULT_FRONT_Z_INDEX: i32 = 1000;

bitflags! {
    /// Axes a container pan scrolls.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PanAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

impl Default for PanAxes {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

/// Thresholds and switches for the gesture coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Button required to start any gesture.
    pub activation_button: PointerButton,
    /// Axes scrolled by a container pan (default: horizontal only).
    pub pan_axes: PanAxes,
    /// Extent item positions are clamped against.
    pub clamp_bounds: ClampBounds,
    /// `z-index` of an item while dragged.
    pub front_z_index: i32,
    /// Whether background presses start a pan.
    pub pan_enabled: bool,
    /// Whether item presses start an item drag.
    pub item_drag_enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
            pan_axes: PanAxes::default(),
            clamp_bounds: ClampBounds::default(),
            front_z_index: DEFAULT_FRONT_Z_INDEX,
            pan_enabled: true,
            item_drag_enabled: true,
        }
    }
}

impl GestureConfig {
    /// Check the configuration for combinations that can never do anything.
    pub fn validate(&self) -> Result<(), GestureConfigError> {
        if !self.pan_enabled && !self.item_drag_enabled {
            return Err(GestureConfigError::NothingEnabled);
        }
        if self.pan_enabled && self.pan_axes.is_empty() {
            return Err(GestureConfigError::NoPanAxes);
        }
        if self.front_z_index < 0 {
            return Err(GestureConfigError::NegativeFrontZIndex(self.front_z_index));
        }
        Ok(())
    }
}

/// Invalid [`GestureConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureConfigError {
    /// Both pan and item drag are disabled.
    NothingEnabled,
    /// Pan is enabled without any axis to scroll.
    NoPanAxes,
    /// The front sentinel would put dragged items behind their siblings.
    NegativeFrontZIndex(i32),
}

impl core::fmt::Display for GestureConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NothingEnabled => write!(f, "both pan and item drag are disabled"),
            Self::NoPanAxes => write!(f, "pan is enabled but no pan axis is set"),
            Self::NegativeFrontZIndex(z) => write!(f, "front z-index must not be negative: {z}"),
        }
    }
}

impl std::error::Error for GestureConfigError {}
