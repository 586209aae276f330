#![forbid(unsafe_code)]

//! dragpan public facade crate.
//!
//! Re-exports the gesture core and, with the default `web` feature, the
//! browser binding, and offers a prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dragpan_core::{
    ActiveSession, ClampBounds, ContainerMetrics, EndReason, GestureConfig, GestureConfigError,
    GestureCoordinator, GestureDispatch, GestureKind, GestureLogEntry, GestureOutcome,
    GesturePhase, HostCommand, IgnoredReason, Insets, LayoutProbe, NodeRole, PanAxes, Point,
    PointerButton, PointerChannel, PointerInput, PointerSource, Rect, RouteTarget, SessionArbiter,
    Size, resolve_target, to_content_relative,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use dragpan_web::{
    BindingConfig, BindingError, DomOp, GestureRecorder, GestureTrace, ReplayResult, TraceError,
    render_command, replay,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dragpan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid gesture configuration.
    Config(GestureConfigError),
    /// Invalid binding options.
    #[cfg(feature = "web")]
    Binding(BindingError),
    /// Unreadable or divergent gesture trace.
    #[cfg(feature = "web")]
    Trace(TraceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Binding(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Trace(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Binding(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Trace(err) => Some(err),
        }
    }
}

impl From<GestureConfigError> for Error {
    fn from(err: GestureConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "web")]
impl From<BindingError> for Error {
    fn from(err: BindingError) -> Self {
        Self::Binding(err)
    }
}

#[cfg(feature = "web")]
impl From<TraceError> for Error {
    fn from(err: TraceError) -> Self {
        Self::Trace(err)
    }
}

/// Standard result type for dragpan APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a coordinator, mapping configuration errors into [`Error`].
pub fn coordinator<I>(config: GestureConfig) -> Result<GestureCoordinator<I>>
where
    I: Clone + PartialEq + fmt::Debug,
{
    Ok(GestureCoordinator::new(config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, GestureConfig, GestureCoordinator, GestureDispatch, HostCommand, LayoutProbe,
        PointerInput, Result, RouteTarget,
    };

    #[cfg(feature = "web")]
    pub use crate::BindingConfig;

    pub use crate::core;
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use dragpan_core as core;
#[cfg(feature = "web")]
pub use dragpan_web as web;
