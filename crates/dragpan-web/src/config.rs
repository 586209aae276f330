#![forbid(unsafe_code)]

//! Binding options supplied by the host page.
//!
//! The host passes a plain options object to `DragPan.attach`. It is
//! serialized to JSON on the JS side of the boundary and parsed here with
//! `serde`, field names in camelCase. Every field is optional.

use dragpan_core::{ClampBounds, DEFAULT_FRONT_Z_INDEX, GestureConfig, GestureConfigError, PanAxes};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTAINER_SELECTOR: &str = ".items";
pub const DEFAULT_ITEM_SELECTOR: &str = ".item";
pub const DEFAULT_ACTIVE_CLASS: &str = "active";
pub const DEFAULT_NO_SELECT_CLASS: &str = "no-select";
/// Window property mirroring the item-drag flag for other scripts.
pub const DEFAULT_GLOBAL_FLAG: &str = "__draggingItem";

/// Clamp extent as spelled in the options object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClampBoundsOption {
    Viewport,
    #[default]
    ScrollContent,
}

impl From<ClampBoundsOption> for ClampBounds {
    fn from(option: ClampBoundsOption) -> Self {
        match option {
            ClampBoundsOption::Viewport => Self::Viewport,
            ClampBoundsOption::ScrollContent => Self::ScrollContent,
        }
    }
}

impl From<ClampBounds> for ClampBoundsOption {
    fn from(bounds: ClampBounds) -> Self {
        match bounds {
            ClampBounds::Viewport => Self::Viewport,
            ClampBounds::ScrollContent => Self::ScrollContent,
        }
    }
}

/// Options for one attached container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BindingConfig {
    pub container_selector: String,
    pub item_selector: String,
    pub active_class: String,
    pub no_select_class: String,
    /// Inject the `<style>` element carrying the two classes.
    pub inject_styles: bool,
    /// Window property to mirror the drag flag into; `null` disables it.
    pub global_flag: Option<String>,
    /// Also pan the vertical axis.
    pub pan_vertical: bool,
    pub clamp_bounds: ClampBoundsOption,
    pub front_z_index: i32,
    pub pan_enabled: bool,
    pub item_drag_enabled: bool,
    /// Keep a JSONL gesture trace that the host can drain.
    pub record_trace: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_owned(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_owned(),
            active_class: DEFAULT_ACTIVE_CLASS.to_owned(),
            no_select_class: DEFAULT_NO_SELECT_CLASS.to_owned(),
            inject_styles: true,
            global_flag: Some(DEFAULT_GLOBAL_FLAG.to_owned()),
            pan_vertical: false,
            clamp_bounds: ClampBoundsOption::default(),
            front_z_index: DEFAULT_FRONT_Z_INDEX,
            pan_enabled: true,
            item_drag_enabled: true,
            record_trace: false,
        }
    }
}

impl BindingConfig {
    /// Parse and validate an options object serialized as JSON.
    ///
    /// `undefined`/`null` on the JS side arrive as an empty string or
    /// `"null"` and mean "all defaults".
    pub fn from_json(json: &str) -> Result<Self, BindingError> {
        let trimmed = json.trim();
        let config = if trimmed.is_empty() || trimmed == "null" {
            Self::default()
        } else {
            serde_json::from_str(trimmed).map_err(|err| BindingError::Options(err.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BindingError> {
        if self.container_selector.trim().is_empty() {
            return Err(BindingError::EmptySelector("containerSelector"));
        }
        if self.item_selector.trim().is_empty() {
            return Err(BindingError::EmptySelector("itemSelector"));
        }
        check_class_name("activeClass", &self.active_class)?;
        check_class_name("noSelectClass", &self.no_select_class)?;
        if let Some(flag) = &self.global_flag
            && flag.trim().is_empty()
        {
            return Err(BindingError::EmptyGlobalFlag);
        }
        self.gesture_config().validate()?;
        Ok(())
    }

    /// Core configuration derived from these options.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        let mut pan_axes = PanAxes::HORIZONTAL;
        if self.pan_vertical {
            pan_axes |= PanAxes::VERTICAL;
        }
        GestureConfig {
            pan_axes,
            clamp_bounds: self.clamp_bounds.into(),
            front_z_index: self.front_z_index,
            pan_enabled: self.pan_enabled,
            item_drag_enabled: self.item_drag_enabled,
            ..GestureConfig::default()
        }
    }
}

fn check_class_name(field: &'static str, value: &str) -> Result<(), BindingError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(BindingError::InvalidClassName {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

/// Invalid binding options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A selector option is empty.
    EmptySelector(&'static str),
    /// A class option is empty or contains whitespace.
    InvalidClassName { field: &'static str, value: String },
    /// `globalFlag` is an empty string (use `null` to disable it).
    EmptyGlobalFlag,
    /// The options object could not be parsed.
    Options(String),
    /// The derived gesture configuration is invalid.
    Gesture(GestureConfigError),
}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptySelector(field) => write!(f, "{field} must not be empty"),
            Self::InvalidClassName { field, value } => {
                write!(f, "{field} is not a valid class name: {value:?}")
            }
            Self::EmptyGlobalFlag => {
                write!(f, "globalFlag must not be empty (use null to disable)")
            }
            Self::Options(msg) => write!(f, "invalid options: {msg}"),
            Self::Gesture(err) => write!(f, "invalid gesture configuration: {err}"),
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gesture(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GestureConfigError> for BindingError {
    fn from(err: GestureConfigError) -> Self {
        Self::Gesture(err)
    }
}
