#![forbid(unsafe_code)]

//! Viewport breakpoint tracking.
//!
//! [`BreakpointManager`] remembers which breakpoint is active, snapshots the
//! live layout into the outgoing breakpoint on every switch, and debounces
//! viewport resize notifications so a burst of resizes causes at most one
//! switch evaluation.
//!
//! The manager only decides. Swapping columns, row height and widget
//! geometry is the host's job in [`LayoutHost::breakpoint_changed`].
//!
//! # Usage
//!
//! ```
//! use dashgrid_core::GridConfig;
//! use dashgrid_layout::Breakpoints;
//! use dashgrid_runtime::{BreakpointManager, Dashboard, LayoutHost};
//! use web_time::{Duration, Instant};
//!
//! let config = GridConfig::default();
//! let mut board = Dashboard::new(config.clone()).unwrap();
//! let mut manager = BreakpointManager::from_config(&config, Breakpoints::standard());
//! manager.check(&mut board, 800.0);
//! assert_eq!(manager.current(), Some("md"));
//!
//! manager.listen();
//! // On every window resize:
//! let t0 = Instant::now();
//! manager.on_viewport_resize(1300.0, t0);
//! // On every frame:
//! assert!(manager.poll(&mut board, t0 + Duration::from_millis(200)));
//! assert_eq!(board.state().columns, 12);
//! ```

use dashgrid_core::{BreakpointChange, BreakpointConfig, GridConfig, GridEvent, Widget};
use dashgrid_layout::Breakpoints;
use web_time::{Duration, Instant};

use crate::host::LayoutHost;
use crate::timer::Debouncer;

#[derive(Debug, Clone)]
pub struct BreakpointManager {
    breakpoints: Breakpoints,
    current: Option<String>,
    debouncer: Debouncer,
    listening: bool,
    pending_width: Option<f64>,
}

impl BreakpointManager {
    #[must_use]
    pub fn new(breakpoints: Breakpoints, debounce: Duration) -> Self {
        Self {
            breakpoints,
            current: None,
            debouncer: Debouncer::new(debounce),
            listening: false,
            pending_width: None,
        }
    }

    /// Manager debounced by the config's `breakpoint_debounce_ms`.
    #[must_use]
    pub fn from_config(config: &GridConfig, breakpoints: Breakpoints) -> Self {
        Self::new(breakpoints, config.breakpoint_debounce())
    }

    #[must_use]
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Name of the active breakpoint, if any switch has happened.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Breakpoint matching `viewport_width`, without switching.
    #[must_use]
    pub fn current_breakpoint(&self, viewport_width: f64) -> Option<&str> {
        self.breakpoints.matching(viewport_width)
    }

    /// Replace the breakpoint set. The active name is kept even if the new
    /// set no longer contains it; the next check switches away from it.
    pub fn update_breakpoints(&mut self, breakpoints: Breakpoints) {
        tracing::debug!(count = breakpoints.len(), "breakpoints updated");
        self.breakpoints = breakpoints;
    }

    /// Insert or replace one breakpoint.
    pub fn set_breakpoint(&mut self, name: impl Into<String>, config: BreakpointConfig) {
        self.breakpoints.insert(name, config);
    }

    #[must_use]
    pub fn get_layout_for_breakpoint(&self, name: &str) -> Option<&[Widget]> {
        self.breakpoints.get(name)?.saved_layout.as_deref()
    }

    /// Store a copy of `layout` for `name`. Returns `false` for unknown names.
    pub fn save_layout_for_breakpoint(&mut self, name: &str, layout: &[Widget]) -> bool {
        match self.breakpoints.get_mut(name) {
            Some(config) => {
                config.saved_layout = Some(layout.to_vec());
                true
            }
            None => false,
        }
    }

    /// Activate `name`.
    ///
    /// Returns `false` without side effects for an unknown name, or for the
    /// already-active one unless `force` is set. Otherwise the host's live
    /// widgets are saved into the outgoing breakpoint, the host is notified
    /// and `breakpoint:change` is emitted.
    pub fn switch_to<H: LayoutHost + ?Sized>(&mut self, host: &mut H, name: &str, force: bool) -> bool {
        if self.breakpoints.get(name).is_none() {
            tracing::debug!(breakpoint = name, "unknown breakpoint");
            return false;
        }
        if !force && self.current.as_deref() == Some(name) {
            return false;
        }

        let old_name = self.current.clone();
        if let Some(previous) = old_name.as_deref() {
            let snapshot = host.state().widgets.clone();
            self.save_layout_for_breakpoint(previous, &snapshot);
        }
        let Some(config) = self.breakpoints.get(name).cloned() else {
            return false;
        };
        self.current = Some(name.to_owned());

        tracing::info!(
            breakpoint = name,
            previous = old_name.as_deref().unwrap_or("none"),
            columns = config.columns,
            restored = config.saved_layout.is_some(),
            "breakpoint switch"
        );
        let change = BreakpointChange {
            name: name.to_owned(),
            config,
            old_name,
        };
        host.breakpoint_changed(&change);
        host.emit(GridEvent::BreakpointChange(change));
        true
    }

    /// Match `viewport_width` and switch if the match differs from the
    /// active breakpoint.
    pub fn check<H: LayoutHost + ?Sized>(&mut self, host: &mut H, viewport_width: f64) -> bool {
        match self.breakpoints.matching(viewport_width).map(str::to_owned) {
            Some(name) => self.switch_to(host, &name, false),
            None => {
                tracing::trace!(viewport_width, "no breakpoint matches");
                false
            }
        }
    }

    pub fn listen(&mut self) {
        self.listening = true;
    }

    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    /// Record a viewport resize. Ignored unless listening.
    pub fn on_viewport_resize(&mut self, viewport_width: f64, now: Instant) {
        if !self.listening {
            return;
        }
        self.pending_width = Some(viewport_width);
        self.debouncer.trigger(now);
    }

    /// Run the debounced check once the quiet period has elapsed.
    pub fn poll<H: LayoutHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        match self.pending_width.take() {
            Some(width) => self.check(host, width),
            None => false,
        }
    }

    /// Stop listening and drop any pending check. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.listening = false;
        self.debouncer.cancel();
        self.pending_width = None;
    }
}
