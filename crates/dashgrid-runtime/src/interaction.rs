#![forbid(unsafe_code)]

//! Routes pointer input to whichever engine owns the active session.
//!
//! Drag and resize are mutually exclusive: a new session of either kind is
//! refused while any session is open.

use dashgrid_core::{AutoScrollConfig, PixelPoint, PixelRect};
use web_time::Instant;

use crate::drag::{DragEngine, DragOutcome};
use crate::host::LayoutHost;
use crate::resize::{ResizeEngine, ResizeHandle, ResizeOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    Drag(DragOutcome),
    Resize(ResizeOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveInteraction {
    Drag,
    Resize,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: DragEngine,
    resize: ResizeEngine,
}

impl InteractionController {
    #[must_use]
    pub fn new(autoscroll: AutoScrollConfig) -> Self {
        Self {
            drag: DragEngine::new(autoscroll),
            resize: ResizeEngine::new(autoscroll),
        }
    }

    #[must_use]
    pub const fn drag(&self) -> &DragEngine {
        &self.drag
    }

    #[must_use]
    pub const fn resize(&self) -> &ResizeEngine {
        &self.resize
    }

    #[must_use]
    pub const fn active(&self) -> Option<ActiveInteraction> {
        if self.drag.is_active() {
            Some(ActiveInteraction::Drag)
        } else if self.resize.is_active() {
            Some(ActiveInteraction::Resize)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active().is_some()
    }

    pub fn begin_drag<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        pointer: PixelPoint,
        origin: PixelRect,
    ) -> bool {
        !self.is_active() && self.drag.start(host, id, pointer, origin)
    }

    pub fn begin_resize<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> bool {
        !self.is_active() && self.resize.start(host, id, handle, pointer)
    }

    /// Forward a pointer move. Returns `false` when no session is open.
    pub fn pointer_move<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        pointer: PixelPoint,
        now: Instant,
    ) -> bool {
        match self.active() {
            Some(ActiveInteraction::Drag) => self.drag.update(host, pointer, now).is_some(),
            Some(ActiveInteraction::Resize) => self.resize.update(host, pointer, now).is_some(),
            None => false,
        }
    }

    pub fn pointer_up<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> Option<InteractionOutcome> {
        match self.active()? {
            ActiveInteraction::Drag => self.drag.end(host).map(InteractionOutcome::Drag),
            ActiveInteraction::Resize => self.resize.end(host).map(InteractionOutcome::Resize),
        }
    }

    /// Cancel the open session, if any.
    pub fn escape<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.active() {
            Some(ActiveInteraction::Drag) => self.drag.cancel(host),
            Some(ActiveInteraction::Resize) => self.resize.cancel(host),
            None => false,
        }
    }

    pub fn tick<H: LayoutHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> f64 {
        match self.active() {
            Some(ActiveInteraction::Drag) => self.drag.tick(host, now),
            Some(ActiveInteraction::Resize) => self.resize.tick(host, now),
            None => 0.0,
        }
    }
}
