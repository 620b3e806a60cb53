#![forbid(unsafe_code)]

//! dashgrid public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude. Most applications only need:
//!
//! ```
//! use dashgrid::prelude::*;
//!
//! fn build() -> dashgrid::Result<Dashboard> {
//!     let config = GridConfig::from_json_str(r#"{ "columns": 8 }"#)?;
//!     let mut board = Dashboard::new(config)?;
//!     board.add_widget(WidgetSpec::new("clock", 2, 2));
//!     board.load_state(r#"{ "widgets": [{ "id": "notes", "x": 0, "y": 0, "w": 4, "h": 3 }] }"#)?;
//!     Ok(board)
//! }
//!
//! let board = build().unwrap();
//! assert_eq!(board.widgets().len(), 1);
//! ```

use std::fmt;

// --- Core re-exports ------------------------------------------------------

pub use dashgrid_core::{
    AutoScrollConfig, BreakpointChange, BreakpointConfig, ConfigError, GridConfig, GridEvent,
    GridMetrics, GridPosition, GridRect, GridSize, LayoutState, LoadError, PersistedLayout,
    PixelPoint, PixelRect, Placed, Widget, WidgetId,
};

// --- Layout re-exports ----------------------------------------------------

pub use dashgrid_layout::{
    Breakpoints, adapt_layout, can_place_widget, check_collision, compact_layout,
    find_first_available_position, move_widget, resize_widget, resolve_collisions,
};

// --- Runtime re-exports ---------------------------------------------------

#[cfg(feature = "runtime")]
pub use dashgrid_runtime::{
    BreakpointManager, Dashboard, DragEngine, InteractionController, InteractionOutcome,
    LayoutHost, ResizeEngine, ResizeHandle, ScrollContainer, WidgetPatch, WidgetSpec,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dashgrid apps.
#[derive(Debug)]
pub enum Error {
    /// A persisted layout was rejected.
    Load(LoadError),
    /// A grid configuration was rejected.
    Config(ConfigError),
    /// Serializing a layout failed.
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(err) => write!(f, "load failed: {err}"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Serialize(err) => write!(f, "serialization failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Standard result type for dashgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BreakpointConfig, Breakpoints, Error, GridConfig, GridEvent, GridRect, LayoutState,
        PixelPoint, Result, Widget, WidgetId,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{
        BreakpointManager, Dashboard, InteractionController, LayoutHost, ResizeHandle,
        WidgetPatch, WidgetSpec,
    };

    pub use crate::{core, layout};
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use dashgrid_core as core;
pub use dashgrid_core::logging;
pub use dashgrid_layout as layout;
#[cfg(feature = "runtime")]
pub use dashgrid_runtime as runtime;
