#![forbid(unsafe_code)]

//! The contract between interaction engines and whoever owns the layout.
//!
//! Engines never hold the canonical [`LayoutState`]. Every call borrows a
//! [`LayoutHost`], reads a fresh snapshot through [`LayoutHost::state`] and
//! writes at most one new state through [`LayoutHost::set_state`] when a
//! session commits.

use dashgrid_core::{BreakpointChange, GridEvent, GridMetrics, LayoutState, Widget};
use dashgrid_layout::count_changed;

/// Vertical extent of the scrollable region, in the same pixel space as the
/// pointer coordinates handed to the engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollContainer {
    pub top: f64,
    pub height: f64,
}

impl ScrollContainer {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Owner of the canonical layout state.
pub trait LayoutHost {
    /// Current canonical state.
    fn state(&self) -> &LayoutState;

    /// Replace the canonical state. Hosts may normalize it (e.g. compact).
    fn set_state(&mut self, state: LayoutState);

    /// Notification sink.
    fn emit(&mut self, event: GridEvent);

    /// Width of the grid container in pixels.
    fn container_width(&self) -> f64;

    /// Pixel metrics for the current state and container.
    fn metrics(&self) -> GridMetrics {
        let state = self.state();
        GridMetrics::for_container(
            self.container_width(),
            state.columns,
            state.row_height,
            state.margin,
        )
    }

    fn scroll_container(&self) -> Option<ScrollContainer> {
        None
    }

    fn scroll_by(&mut self, _dy: f64) {}

    /// Called after the breakpoint manager switches breakpoints, before the
    /// `breakpoint:change` event is emitted.
    fn breakpoint_changed(&mut self, _change: &BreakpointChange) {}
}

/// Write `next` into the host and emit `layout:change` if the commit
/// altered more than one widget. Returns the number of changed widgets.
pub(crate) fn commit_state<H: LayoutHost + ?Sized>(host: &mut H, next: LayoutState) -> usize {
    let before = host.state().widgets.clone();
    host.set_state(next);
    let changed = count_changed(&before, &host.state().widgets);
    tracing::debug!(changed, "layout committed");
    if changed > 1 {
        let snapshot = host.state().clone();
        host.emit(GridEvent::LayoutChange(snapshot));
    }
    changed
}

/// [`commit_state`] keeping the host's grid dimensions.
pub(crate) fn commit_widgets<H: LayoutHost + ?Sized>(host: &mut H, widgets: Vec<Widget>) -> usize {
    let next = host.state().clone().with_widgets(widgets);
    commit_state(host, next)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Minimal host that records everything it is told.
    #[derive(Debug)]
    pub struct RecordingHost {
        pub state: LayoutState,
        pub events: Vec<GridEvent>,
        pub width: f64,
        pub writes: usize,
        pub container: Option<ScrollContainer>,
        pub scrolled: f64,
        pub changes: Vec<BreakpointChange>,
    }

    impl RecordingHost {
        pub fn new(columns: u32, widgets: Vec<Widget>) -> Self {
            Self {
                // 1210px, 12 columns, 10px margin: 100px column unit, 70px row unit.
                state: LayoutState::new(columns, 60.0, 10.0).with_widgets(widgets),
                events: Vec::new(),
                width: 1210.0,
                writes: 0,
                container: None,
                scrolled: 0.0,
                changes: Vec::new(),
            }
        }

        pub fn names(&self) -> Vec<&'static str> {
            self.events.iter().map(GridEvent::name).collect()
        }

        pub fn widget(&self, id: &str) -> &Widget {
            self.state.widget(id).expect("widget present")
        }
    }

    impl LayoutHost for RecordingHost {
        fn state(&self) -> &LayoutState {
            &self.state
        }

        fn set_state(&mut self, state: LayoutState) {
            self.writes += 1;
            self.state = state;
        }

        fn emit(&mut self, event: GridEvent) {
            self.events.push(event);
        }

        fn container_width(&self) -> f64 {
            self.width
        }

        fn scroll_container(&self) -> Option<ScrollContainer> {
            self.container
        }

        fn scroll_by(&mut self, dy: f64) {
            self.scrolled += dy;
        }

        fn breakpoint_changed(&mut self, change: &BreakpointChange) {
            self.changes.push(change.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn default_metrics_follow_state() {
        let host = RecordingHost::new(12, Vec::new());
        let m = host.metrics();
        assert_eq!(m.column_unit(), 100.0);
        assert_eq!(m.row_unit(), 70.0);
    }

    #[test]
    fn single_change_commit_is_quiet() {
        let mut host = RecordingHost::new(12, vec![Widget::new("a", 0, 0, 2, 2)]);
        let changed = commit_widgets(&mut host, vec![Widget::new("a", 4, 0, 2, 2)]);
        assert_eq!(changed, 1);
        assert_eq!(host.writes, 1);
        assert!(host.events.is_empty());
    }

    #[test]
    fn multi_change_commit_emits_layout_change() {
        let mut host = RecordingHost::new(
            12,
            vec![Widget::new("a", 0, 0, 2, 2), Widget::new("b", 0, 2, 2, 2)],
        );
        commit_widgets(
            &mut host,
            vec![Widget::new("a", 0, 2, 2, 2), Widget::new("b", 0, 4, 2, 2)],
        );
        assert_eq!(host.names(), ["layout:change"]);
    }
}
