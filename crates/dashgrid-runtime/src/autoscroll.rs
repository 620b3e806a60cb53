#![forbid(unsafe_code)]

//! Edge auto-scroll shared by the drag and resize engines.

use dashgrid_core::AutoScrollConfig;
use web_time::Instant;

use crate::host::ScrollContainer;
use crate::timer::IntervalTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Which edge zone, if any, `pointer_y` sits in.
///
/// A pointer in both zones (container shorter than twice the threshold)
/// scrolls toward the nearer edge.
#[must_use]
pub fn edge_direction(
    pointer_y: f64,
    container: ScrollContainer,
    threshold: f64,
) -> Option<ScrollDirection> {
    let to_top = pointer_y - container.top;
    let to_bottom = container.bottom() - pointer_y;
    let near_top = to_top < threshold;
    let near_bottom = to_bottom < threshold;
    match (near_top, near_bottom) {
        (true, true) if to_bottom < to_top => Some(ScrollDirection::Down),
        (true, _) => Some(ScrollDirection::Up),
        (false, true) => Some(ScrollDirection::Down),
        (false, false) => None,
    }
}

/// Repeating scroll nudge armed while the pointer sits near an edge.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    direction: Option<ScrollDirection>,
    timer: IntervalTimer,
}

impl AutoScroller {
    #[must_use]
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            timer: IntervalTimer::new(config.interval()),
            config,
            direction: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    #[must_use]
    pub const fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Re-evaluate the edge zones for a new pointer position.
    pub fn update(
        &mut self,
        pointer_y: f64,
        container: Option<ScrollContainer>,
        now: Instant,
    ) -> Option<ScrollDirection> {
        let direction =
            container.and_then(|c| edge_direction(pointer_y, c, self.config.threshold));
        match direction {
            Some(d) => {
                if self.direction != Some(d) {
                    tracing::trace!(direction = ?d, "auto-scroll armed");
                }
                self.direction = Some(d);
                self.timer.start(now);
            }
            None => self.stop(),
        }
        direction
    }

    pub fn stop(&mut self) {
        self.direction = None;
        self.timer.stop();
    }

    /// Pixels to scroll for the ticks elapsed since the last call.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let Some(direction) = self.direction else {
            return 0.0;
        };
        let distance = f64::from(self.timer.poll(now)) * self.config.step;
        match direction {
            ScrollDirection::Up => -distance,
            ScrollDirection::Down => distance,
        }
    }
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(AutoScrollConfig::default())
    }
}
