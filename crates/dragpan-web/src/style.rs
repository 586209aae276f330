#![forbid(unsafe_code)]

//! Host command rendering and the injected stylesheet.
//!
//! [`render_command`] lowers one [`HostCommand`] to the concrete DOM
//! mutations it implies, using the class names and flag name from
//! [`BindingConfig`]. The wasm adapter applies [`DomOp`]s verbatim, so the
//! mapping is testable without a browser.

use dragpan_core::HostCommand;

use crate::config::BindingConfig;

/// Element whose class list a [`DomOp`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTarget {
    Container,
    /// `document.body`.
    Body,
}

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp<I> {
    PreventDefault,
    AddClass(ClassTarget, String),
    RemoveClass(ClassTarget, String),
    ScrollContainer { left: Option<f64>, top: Option<f64> },
    SetItemStyle {
        item: I,
        property: &'static str,
        value: String,
    },
    RemoveItemStyle { item: I, property: &'static str },
    /// Assign `window[name] = value`.
    SetWindowFlag { name: String, value: bool },
}

/// Format a CSS pixel length.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Whole-pixel offset for `scrollLeft` / `scrollTop`, which the DOM binding
/// takes as an integer. Out-of-range values saturate and NaN maps to zero.
pub fn scroll_offset(value: f64) -> i32 {
    value.round() as i32
}

/// Lower a host command to DOM mutations.
pub fn render_command<I: Clone>(command: &HostCommand<I>, config: &BindingConfig) -> Vec<DomOp<I>> {
    match command {
        HostCommand::PreventDefault => vec![DomOp::PreventDefault],
        HostCommand::SetPanActive(active) => vec![toggle_class(
            ClassTarget::Container,
            &config.active_class,
            *active,
        )],
        HostCommand::SetSelectionSuppressed(on) => {
            vec![toggle_class(ClassTarget::Body, &config.no_select_class, *on)]
        }
        HostCommand::ScrollTo { left, top } => vec![DomOp::ScrollContainer {
            left: *left,
            top: *top,
        }],
        HostCommand::PinItem {
            item,
            left,
            top,
            z_index,
        } => {
            let set = |property: &'static str, value: String| DomOp::SetItemStyle {
                item: item.clone(),
                property,
                value,
            };
            vec![
                set("position", "absolute".to_owned()),
                set("left", px(*left)),
                set("top", px(*top)),
                set("transform", "none".to_owned()),
                set("z-index", z_index.to_string()),
                set("touch-action", "none".to_owned()),
            ]
        }
        HostCommand::MoveItem { item, left, top } => vec![
            DomOp::SetItemStyle {
                item: item.clone(),
                property: "left",
                value: px(*left),
            },
            DomOp::SetItemStyle {
                item: item.clone(),
                property: "top",
                value: px(*top),
            },
        ],
        HostCommand::UnpinItem { item } => ["z-index", "touch-action"]
            .into_iter()
            .map(|property| DomOp::RemoveItemStyle {
                item: item.clone(),
                property,
            })
            .collect(),
        HostCommand::SetDragFlag(value) => config
            .global_flag
            .iter()
            .map(|name| DomOp::SetWindowFlag {
                name: name.clone(),
                value: *value,
            })
            .collect(),
    }
}

fn toggle_class<I>(target: ClassTarget, class: &str, on: bool) -> DomOp<I> {
    if on {
        DomOp::AddClass(target, class.to_owned())
    } else {
        DomOp::RemoveClass(target, class.to_owned())
    }
}

/// Stylesheet injected at attach time.
///
/// `touch-action` on the container keeps vertical page scrolling native
/// while handing horizontal touch motion to the pan; items opt out entirely
/// so a touch on an item always reaches the item drag.
pub fn stylesheet(config: &BindingConfig) -> String {
    let container = &config.container_selector;
    let item = &config.item_selector;
    let active = &config.active_class;
    let no_select = &config.no_select_class;
    let container_touch = if config.pan_vertical { "none" } else { "pan-y" };
    format!(
        "{container} {{ cursor: grab; touch-action: {container_touch}; }}\n\
         {container}.{active} {{ cursor: grabbing; }}\n\
         {container} {item} {{ touch-action: none; }}\n\
         .{no_select}, .{no_select} * {{ user-select: none; -webkit-user-select: none; }}\n"
    )
}
