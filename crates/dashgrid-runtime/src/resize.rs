#![forbid(unsafe_code)]

//! Handle-based resize session machine.
//!
//! A session is opened on one of eight [`ResizeHandle`]s. East and south
//! handles move the far edge; west and north handles move the origin while
//! the far edge stays pinned. Corner handles combine both axes.
//!
//! # Invariants
//!
//! 1. Proposed spans stay inside the widget's `[min, max]` bounds, with the
//!    maximum width defaulting to the column count.
//! 2. Proposed rectangles satisfy `x >= 0`, `y >= 0` and `x + w <= columns`.
//! 3. `end` writes canonical state at most once, and not at all when the
//!    proposal equals the starting rectangle.
//!
//! # Failure Modes
//!
//! - A widget removed mid-session ends with `resized: false`.

use std::fmt;
use std::str::FromStr;

use dashgrid_core::{AutoScrollConfig, GridEvent, GridRect, PixelPoint, Widget, WidgetId};
use dashgrid_layout::{colliding_widgets, resolve_collisions};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::autoscroll::AutoScroller;
use crate::drag::to_cell;
use crate::host::{LayoutHost, commit_widgets};

/// Compass direction of the grabbed resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    /// `Some(true)` for the east edge, `Some(false)` for the west edge.
    #[must_use]
    pub const fn horizontal_edge(self) -> Option<bool> {
        match self {
            Self::East | Self::NorthEast | Self::SouthEast => Some(true),
            Self::West | Self::NorthWest | Self::SouthWest => Some(false),
            Self::North | Self::South => None,
        }
    }

    /// `Some(true)` for the south edge, `Some(false)` for the north edge.
    #[must_use]
    pub const fn vertical_edge(self) -> Option<bool> {
        match self {
            Self::South | Self::SouthEast | Self::SouthWest => Some(true),
            Self::North | Self::NorthEast | Self::NorthWest => Some(false),
            Self::East | Self::West => None,
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHandleError(String);

impl fmt::Display for ParseHandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resize handle `{}`", self.0)
    }
}

impl std::error::Error for ParseHandleError {}

impl FromStr for ResizeHandle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseHandleError(s.to_owned()))
    }
}

/// Rectangle produced by dragging `handle` by `(dcols, drows)` grid units.
///
/// Spans are clamped to the widget's bounds first. West and north handles
/// then keep the far edge pinned (shrinking the span if the origin would go
/// negative); east handles shrink the span if it would overflow the grid.
#[must_use]
pub fn resize_geometry(
    start: GridRect,
    handle: ResizeHandle,
    dcols: i64,
    drows: i64,
    widget: &Widget,
    columns: u32,
) -> GridRect {
    let columns = columns.max(1);
    let (min_w, max_w) = widget.width_bounds(columns);
    let columns = i64::from(columns);
    let (min_h, max_h) = widget.height_bounds();
    let (min_w, max_w) = (i64::from(min_w), i64::from(max_w));
    let (min_h, max_h) = (i64::from(min_h), i64::from(max_h));
    let (sx, sy) = (i64::from(start.x), i64::from(start.y));
    let (sw, sh) = (i64::from(start.w), i64::from(start.h));

    let (x, w) = match handle.horizontal_edge() {
        Some(true) => {
            let x = sx.min(columns - 1);
            let w = (sw + dcols).clamp(min_w, max_w).min(columns - x).max(1);
            (x, w)
        }
        Some(false) => {
            let far = (sx + sw).min(columns);
            let w = (sw - dcols).clamp(min_w, max_w).min(far).max(1);
            (far - w, w)
        }
        None => (sx, sw),
    };
    let (y, h) = match handle.vertical_edge() {
        Some(true) => (sy, (sh + drows).clamp(min_h, max_h)),
        Some(false) => {
            let far = sy + sh;
            let h = (sh - drows).clamp(min_h, max_h).min(far).max(1);
            (far - h, h)
        }
        None => (sy, sh),
    };

    GridRect::new(to_cell(x), to_cell(y), to_cell(w), to_cell(h))
}

/// Data held for the lifetime of one resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeSession {
    /// Widget as it was when the resize started.
    pub widget: Widget,
    pub handle: ResizeHandle,
    pub pointer_origin: PixelPoint,
    pub start: GridRect,
    pub proposed: GridRect,
    pub colliding: Vec<WidgetId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeProposal {
    pub rect: GridRect,
    pub colliding: Vec<WidgetId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub resized: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResizeEngine {
    state: ResizeState,
    autoscroll: AutoScroller,
}

impl ResizeEngine {
    #[must_use]
    pub fn new(autoscroll: AutoScrollConfig) -> Self {
        Self {
            state: ResizeState::Idle,
            autoscroll: AutoScroller::new(autoscroll),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ResizeState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&ResizeSession> {
        match &self.state {
            ResizeState::Resizing(session) => Some(session),
            ResizeState::Idle => None,
        }
    }

    #[must_use]
    pub const fn autoscroller(&self) -> &AutoScroller {
        &self.autoscroll
    }

    pub fn can_start<H: LayoutHost + ?Sized>(&self, host: &H, id: &str) -> bool {
        host.state().widget(id).is_some_and(Widget::can_resize)
    }

    pub fn start<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> bool {
        if self.is_active() {
            tracing::debug!(widget = id, "resize start ignored: session already open");
            return false;
        }
        let Some(widget) = host.state().widget(id).filter(|w| w.can_resize()).cloned() else {
            tracing::debug!(widget = id, %handle, "resize start refused");
            return false;
        };
        let start = widget.rect();
        tracing::debug!(
            widget = id,
            %handle,
            x = start.x,
            y = start.y,
            w = start.w,
            h = start.h,
            "resize start"
        );
        host.emit(GridEvent::ResizeStart {
            widget: widget.clone(),
            x: start.x,
            y: start.y,
            w: start.w,
            h: start.h,
        });
        self.state = ResizeState::Resizing(ResizeSession {
            widget,
            handle,
            pointer_origin: pointer,
            start,
            proposed: start,
            colliding: Vec::new(),
        });
        true
    }

    pub fn update<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        pointer: PixelPoint,
        now: Instant,
    ) -> Option<ResizeProposal> {
        let ResizeState::Resizing(session) = &mut self.state else {
            return None;
        };
        let state = host.state();
        let metrics = host.metrics();
        let id = session.widget.id.as_str();
        let live = state.widget(id).unwrap_or(&session.widget);

        let dcols = metrics.columns_for_delta(pointer.x - session.pointer_origin.x);
        let drows = metrics.rows_for_delta(pointer.y - session.pointer_origin.y);
        let rect = resize_geometry(session.start, session.handle, dcols, drows, live, state.columns);
        let colliding: Vec<WidgetId> = colliding_widgets(&rect, &state.widgets, Some(id))
            .into_iter()
            .map(|w| w.id.clone())
            .collect();
        let widget = live.clone();

        session.proposed = rect;
        session.colliding.clone_from(&colliding);

        tracing::trace!(
            widget = widget.id.as_str(),
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            "resize move"
        );
        host.emit(GridEvent::ResizeMove {
            widget,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        });
        let container = host.scroll_container();
        self.autoscroll.update(pointer.y, container, now);

        Some(ResizeProposal { rect, colliding })
    }

    /// Close the session, committing the proposed rectangle if it changed.
    ///
    /// The rectangle was clamped during `update`, so it is written as-is and
    /// only collision resolution runs on top of it. A widget that became
    /// locked or `noResize` during the session is left untouched.
    pub fn end<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> Option<ResizeOutcome> {
        let ResizeState::Resizing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.autoscroll.stop();
        let id = session.widget.id.clone();
        let rect = session.proposed;

        let committed = if rect == session.start {
            None
        } else {
            let widgets = &host.state().widgets;
            widgets
                .iter()
                .find(|w| w.id == id)
                .filter(|current| current.can_resize())
                .map(|current| {
                    let mut resized = current.clone();
                    resized.set_rect(rect);
                    resolve_collisions(&resized, widgets)
                })
        };
        let resized = committed.is_some();
        if let Some(widgets) = committed {
            commit_widgets(host, widgets);
        }

        let widget = host
            .state()
            .widget(id.as_str())
            .cloned()
            .unwrap_or(session.widget);
        tracing::debug!(
            widget = id.as_str(),
            handle = %session.handle,
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            resized,
            "resize end"
        );
        host.emit(GridEvent::ResizeEnd {
            widget,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            resized,
        });
        Some(ResizeOutcome {
            id,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            resized,
        })
    }

    pub fn cancel<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let ResizeState::Resizing(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        self.autoscroll.stop();
        tracing::debug!(widget = session.widget.id.as_str(), "resize cancel");
        host.emit(GridEvent::ResizeCancel {
            widget: session.widget,
        });
        true
    }

    pub fn tick<H: LayoutHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        let dy = self.autoscroll.tick(now);
        if dy != 0.0 {
            host.scroll_by(dy);
        }
        dy
    }
}
