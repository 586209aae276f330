#![forbid(unsafe_code)]

//! `dragpan-core` is the platform-independent half of dragpan: grab-to-scroll
//! panning of a horizontally overflowing container plus free dragging of the
//! items inside it.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment pushes normalized pointer
//!   input and answers geometry reads through [`LayoutProbe`]; the core
//!   answers with [`HostCommand`]s to apply.
//! - **One session slot**: [`SessionArbiter`] guarantees that panning and
//!   item dragging never run at the same time, across mouse, touch and pen.
//! - **Deterministic**: no clocks, no DOM, no globals. Every transition is
//!   reproducible from the input sequence alone.
//!
//! The browser binding lives in `dragpan-web`.

pub mod arbiter;
pub mod config;
pub mod coordinator;
pub mod geometry;
pub mod item_drag;
pub mod layout;
pub mod pan;
pub mod pointer;
pub mod router;

pub use arbiter::{GestureKind, SessionArbiter};
pub use config::{DEFAULT_FRONT_Z_INDEX, GestureConfig, GestureConfigError, PanAxes};
pub use coordinator::{
    ActiveSession, EndReason, GestureCoordinator, GestureDispatch, GestureLogEntry,
    GestureOutcome, GesturePhase, HostCommand,
};
pub use geometry::{Insets, Point, Rect, Size, clamp_axis, to_content_relative};
pub use item_drag::{ItemDragController, ItemDragState, Pin};
pub use layout::{ClampBounds, ContainerMetrics, LayoutProbe};
pub use pan::{PanController, PanState, ScrollRequest};
pub use pointer::{PointerButton, PointerChannel, PointerInput, PointerSource};
pub use router::{
    GestureRouter, IgnoredReason, NodeRole, RouteDecision, RouteTarget, resolve_target,
};
