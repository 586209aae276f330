#![forbid(unsafe_code)]

//! `dragpan-web` binds the dragpan gesture core to a browser page.
//!
//! Design goals:
//! - **Thin adapter**: every gesture rule lives in `dragpan-core`; this crate
//!   only normalizes DOM events, answers layout reads and applies commands.
//! - **Native-testable**: options parsing, command rendering and trace
//!   replay compile and run off-browser. Only [`DragPan`] needs `wasm32`.
//! - **Reversible**: `detach()` removes every listener and injected node.

pub mod config;
pub mod style;
pub mod trace;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{BindingConfig, BindingError, ClampBoundsOption};
pub use style::{ClassTarget, DomOp, render_command, scroll_offset, stylesheet};
pub use trace::{
    GestureRecorder, GestureTrace, ReplayMismatch, ReplayResult, SCHEMA_VERSION, SessionStart,
    TraceError, TraceItem, TraceRecord, TraceResume, outcome_label, replay,
};

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomItem, DragPan};
