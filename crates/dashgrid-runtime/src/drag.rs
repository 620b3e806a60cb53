#![forbid(unsafe_code)]

//! Drag-to-move session machine.
//!
//! ```text
//! Idle -> Dragging -> Idle   (end commits or reports no move; cancel discards)
//! ```
//!
//! # Usage
//!
//! The host forwards pointer-down on a widget to [`DragEngine::start`],
//! pointer moves to [`DragEngine::update`], pointer-up to [`DragEngine::end`]
//! and Escape to [`DragEngine::cancel`]. While a session is open the host
//! also calls [`DragEngine::tick`] from its frame loop to drive auto-scroll.
//!
//! # Invariants
//!
//! 1. `update` never writes canonical state; only `end` does, at most once.
//! 2. Proposed `x` is always within `[0, columns - w]` and `y >= 0`.
//! 3. Collision feedback is computed against the live state at update time.
//! 4. `end` with a proposal equal to the start position performs no write.

use dashgrid_core::{
    AutoScrollConfig, GridEvent, GridPosition, PixelPoint, PixelRect, Widget, WidgetId,
};
use dashgrid_layout::{colliding_widgets, move_widget};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::autoscroll::AutoScroller;
use crate::host::{LayoutHost, commit_widgets};

/// Data held for the lifetime of one drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Widget as it was when the drag started.
    pub widget: Widget,
    /// Pointer position at pointer-down.
    pub pointer_origin: PixelPoint,
    /// Pointer position relative to the widget's pixel origin.
    pub grab_offset: PixelPoint,
    pub start: GridPosition,
    pub proposed: GridPosition,
    /// Widgets the current proposal overlaps.
    pub colliding: Vec<WidgetId>,
}

impl DragSession {
    #[must_use]
    pub fn id(&self) -> &WidgetId {
        &self.widget.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Live feedback for one pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragProposal {
    pub position: GridPosition,
    /// Where the dragged visual's top-left corner should be drawn.
    pub ghost_origin: PixelPoint,
    pub colliding: Vec<WidgetId>,
}

/// Result of ending a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    pub id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub moved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    state: DragState,
    autoscroll: AutoScroller,
}

impl DragEngine {
    #[must_use]
    pub fn new(autoscroll: AutoScrollConfig) -> Self {
        Self {
            state: DragState::Idle,
            autoscroll: AutoScroller::new(autoscroll),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    #[must_use]
    pub const fn autoscroller(&self) -> &AutoScroller {
        &self.autoscroll
    }

    /// Whether `id` exists and may be moved.
    pub fn can_start<H: LayoutHost + ?Sized>(&self, host: &H, id: &str) -> bool {
        host.state().widget(id).is_some_and(Widget::can_move)
    }

    /// Open a session for `id` grabbed at `pointer`.
    ///
    /// `origin` is the widget's on-screen rectangle; only its top-left corner
    /// is used, to remember where inside the widget the user grabbed it.
    /// Refuses (returning `false`, emitting nothing) for missing, locked or
    /// `noMove` widgets and while a session is already open.
    pub fn start<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        pointer: PixelPoint,
        origin: PixelRect,
    ) -> bool {
        if self.is_active() {
            tracing::debug!(widget = id, "drag start ignored: session already open");
            return false;
        }
        let Some(widget) = host.state().widget(id).filter(|w| w.can_move()).cloned() else {
            tracing::debug!(widget = id, "drag start refused");
            return false;
        };
        let start = GridPosition::new(widget.x, widget.y);
        tracing::debug!(widget = id, x = start.x, y = start.y, "drag start");
        host.emit(GridEvent::DragStart {
            widget: widget.clone(),
            x: start.x,
            y: start.y,
        });
        self.state = DragState::Dragging(DragSession {
            widget,
            pointer_origin: pointer,
            grab_offset: PixelPoint::new(pointer.x - origin.left, pointer.y - origin.top),
            start,
            proposed: start,
            colliding: Vec::new(),
        });
        true
    }

    /// Propose a new grid position for the pointer at `pointer`.
    ///
    /// Returns `None` while idle.
    pub fn update<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        pointer: PixelPoint,
        now: Instant,
    ) -> Option<DragProposal> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let state = host.state();
        let metrics = host.metrics();
        let live = state.widget(session.id().as_str()).unwrap_or(&session.widget);

        let dx = metrics.columns_for_delta(pointer.x - session.pointer_origin.x);
        let dy = metrics.rows_for_delta(pointer.y - session.pointer_origin.y);
        let max_x = i64::from(state.columns.saturating_sub(live.w));
        let x = (i64::from(session.start.x) + dx).clamp(0, max_x);
        let y = (i64::from(session.start.y) + dy).max(0);
        let proposed = GridPosition::new(to_cell(x), to_cell(y));

        let rect = live.rect().with_origin(proposed.x, proposed.y);
        let colliding: Vec<WidgetId> =
            colliding_widgets(&rect, &state.widgets, Some(session.id().as_str()))
                .into_iter()
                .map(|w| w.id.clone())
                .collect();
        let widget = live.clone();

        session.proposed = proposed;
        session.colliding.clone_from(&colliding);
        let ghost_origin = PixelPoint::new(
            pointer.x - session.grab_offset.x,
            pointer.y - session.grab_offset.y,
        );

        tracing::trace!(
            widget = widget.id.as_str(),
            x = proposed.x,
            y = proposed.y,
            colliding = colliding.len(),
            "drag move"
        );
        host.emit(GridEvent::DragMove {
            widget,
            x: proposed.x,
            y: proposed.y,
        });
        let container = host.scroll_container();
        self.autoscroll.update(pointer.y, container, now);

        Some(DragProposal {
            position: proposed,
            ghost_origin,
            colliding,
        })
    }

    /// Close the session, committing the proposal if it differs from the
    /// start position. Returns `None` while idle.
    pub fn end<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> Option<DragOutcome> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.autoscroll.stop();
        let id = session.widget.id.clone();
        let target = session.proposed;

        let committed = if target == session.start {
            None
        } else {
            let state = host.state();
            move_widget(
                id.as_str(),
                f64::from(target.x),
                f64::from(target.y),
                &state.widgets,
                state.columns,
            )
        };
        let moved = committed.is_some();
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
            x = target.x,
            y = target.y,
            moved,
            "drag end"
        );
        host.emit(GridEvent::DragEnd {
            widget,
            x: target.x,
            y: target.y,
            moved,
        });
        Some(DragOutcome {
            id,
            x: target.x,
            y: target.y,
            moved,
        })
    }

    /// Discard the session without writing. Returns `false` while idle.
    pub fn cancel<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        self.autoscroll.stop();
        tracing::debug!(widget = session.id().as_str(), "drag cancel");
        host.emit(GridEvent::DragCancel {
            widget: session.widget,
        });
        true
    }

    /// Drive auto-scroll. Returns the pixels scrolled.
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

pub(crate) fn to_cell(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
