#![forbid(unsafe_code)]

//! Runtime: interaction sessions and the reference dashboard host.
//!
//! # Role in dashgrid
//! `dashgrid-runtime` turns pointer input into layout commits. It sits on
//! top of the pure placement functions in `dashgrid-layout` and talks to the
//! owner of the canonical state through the [`LayoutHost`] trait.
//!
//! # Key Components
//!
//! - [`DragEngine`] / [`ResizeEngine`] - one-session state machines
//! - [`InteractionController`] - keeps drag and resize mutually exclusive
//! - [`BreakpointManager`] - debounced viewport breakpoint switching
//! - [`Dashboard`] - in-memory [`LayoutHost`] with widget CRUD and persistence
//! - [`Debouncer`] / [`IntervalTimer`] - caller-clocked timers
//!
//! Everything is single-threaded. Timers are polled with an explicit
//! `web_time::Instant`, so the host's event loop owns all scheduling.

pub mod autoscroll;
pub mod breakpoint;
pub mod dashboard;
pub mod drag;
pub mod host;
pub mod interaction;
pub mod resize;
pub mod timer;

pub use autoscroll::{AutoScroller, ScrollDirection};
pub use breakpoint::BreakpointManager;
pub use dashboard::{Dashboard, WidgetPatch, WidgetSpec};
pub use drag::{DragEngine, DragOutcome, DragProposal, DragSession, DragState};
pub use host::{LayoutHost, ScrollContainer};
pub use interaction::{ActiveInteraction, InteractionController, InteractionOutcome};
pub use resize::{
    ParseHandleError, ResizeEngine, ResizeHandle, ResizeOutcome, ResizeProposal, ResizeSession,
    ResizeState, resize_geometry,
};
pub use timer::{Debouncer, IntervalTimer};
