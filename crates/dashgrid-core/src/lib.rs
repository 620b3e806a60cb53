#![forbid(unsafe_code)]

//! Core: the dashboard data model.
//!
//! # Role in dashgrid
//! `dashgrid-core` holds the types every other crate speaks: grid geometry,
//! widgets, the canonical [`LayoutState`], typed [`GridConfig`], breakpoint
//! records and the [`GridEvent`] notifications. It performs no placement and
//! owns no interaction state.
//!
//! # Primary responsibilities
//! - **Geometry**: [`GridRect`], [`GridMetrics`] for pixel/grid conversion.
//! - **Widget**: identity, size clamps, movement and resize flags.
//! - **LayoutState**: the orchestrator-owned snapshot and its persisted JSON form.
//! - **Errors**: [`LoadError`] and [`ConfigError`] for the hard failure modes.

pub mod breakpoint;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod state;
pub mod widget;

pub use breakpoint::{BreakpointChange, BreakpointConfig};
pub use config::{AutoScrollConfig, GridConfig};
pub use error::{ConfigError, LoadError};
pub use event::GridEvent;
pub use geometry::{
    GridMetrics, GridPosition, GridRect, GridSize, PixelPoint, PixelRect, Placed,
};
pub use state::{LayoutState, PersistedLayout};
pub use widget::{Widget, WidgetId};
