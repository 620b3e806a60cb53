#![forbid(unsafe_code)]

//! Breakpoint sets and layout adaptation across column counts.
//!
//! [`Breakpoints`] keeps named [`BreakpointConfig`]s sorted by their minimum
//! width and answers "which breakpoint is active at this viewport width" with
//! a mobile-first scan.
//!
//! # Usage
//!
//! ```
//! use dashgrid_core::BreakpointConfig;
//! use dashgrid_layout::Breakpoints;
//!
//! let bps = Breakpoints::new([
//!     ("lg", BreakpointConfig::new(992, 12)),
//!     ("sm", BreakpointConfig::new(576, 4)),
//!     ("md", BreakpointConfig::new(768, 8)),
//! ]);
//!
//! assert_eq!(bps.matching(800.0), Some("md"));
//! assert_eq!(bps.matching(1000.0), Some("lg"));
//! assert_eq!(bps.matching(400.0), None);
//! ```
//!
//! # Invariants
//!
//! 1. Entries are always sorted ascending by `width`; ties keep insertion order.
//! 2. `matching()` returns the widest breakpoint whose width fits the viewport.
//! 3. A viewport narrower than every breakpoint matches nothing; there is no
//!    silent fallback to the smallest entry.
//!
//! # Failure Modes
//!
//! - [`adapt_layout`] is best effort: when clamping creates new overlaps it
//!   compacts once, and compaction only moves widgets up, so overlaps can
//!   survive. Overlaps already present in the input never trigger it.

use dashgrid_core::{BreakpointConfig, Widget};

use crate::engine::{check_collision, compact_in_order};

/// Named breakpoints sorted ascending by minimum width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Breakpoints {
    entries: Vec<(String, BreakpointConfig)>,
}

impl Breakpoints {
    #[must_use]
    pub fn new<N: Into<String>>(entries: impl IntoIterator<Item = (N, BreakpointConfig)>) -> Self {
        let mut bps = Self {
            entries: entries
                .into_iter()
                .map(|(name, config)| (name.into(), config))
                .collect(),
        };
        bps.sort();
        bps
    }

    /// `xs 0/4`, `sm 576/6`, `md 768/8`, `lg 992/12`, `xl 1200/12`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([
            ("xs", BreakpointConfig::new(0, 4)),
            ("sm", BreakpointConfig::new(576, 6)),
            ("md", BreakpointConfig::new(768, 8)),
            ("lg", BreakpointConfig::new(992, 12)),
            ("xl", BreakpointConfig::new(1200, 12)),
        ])
    }

    fn sort(&mut self) {
        self.entries.sort_by_key(|(_, config)| config.width);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending width order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BreakpointConfig)> {
        self.entries.iter().map(|(name, config)| (name.as_str(), config))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BreakpointConfig> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BreakpointConfig> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    /// Insert or replace a breakpoint, keeping the set sorted.
    pub fn insert(&mut self, name: impl Into<String>, config: BreakpointConfig) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = config,
            None => self.entries.push((name, config)),
        }
        self.sort();
    }

    pub fn remove(&mut self, name: &str) -> Option<BreakpointConfig> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Name of the breakpoint active at `viewport_width`, mobile-first.
    #[must_use]
    pub fn matching(&self, viewport_width: f64) -> Option<&str> {
        let mut matched = None;
        for (name, config) in &self.entries {
            if f64::from(config.width) > viewport_width {
                break;
            }
            matched = Some(name.as_str());
        }
        matched
    }
}

/// Fit a layout into `columns` columns when no saved layout exists.
///
/// Every widget's width is clamped into `[1, columns]` and its `x` into
/// `[0, columns - w]`. Only if that introduced an overlapping pair the input
/// did not already have is the whole set compacted once. The input order is
/// kept.
pub fn adapt_layout(widgets: &[Widget], columns: u32) -> Vec<Widget> {
    let columns = columns.max(1);
    let clamped: Vec<Widget> = widgets
        .iter()
        .cloned()
        .map(|mut widget| {
            widget.w = widget.w.clamp(1, columns);
            widget.x = widget.x.min(columns - widget.w);
            widget
        })
        .collect();

    if clamping_added_overlap(widgets, &clamped) {
        tracing::debug!(columns, "clamped layout overlaps; compacting");
        compact_in_order(&clamped)
    } else {
        clamped
    }
}

/// Whether some pair collides after clamping but did not before.
fn clamping_added_overlap(before: &[Widget], after: &[Widget]) -> bool {
    (0..after.len()).any(|i| {
        (i + 1..after.len()).any(|j| {
            check_collision(&after[i], &after[j]) && !check_collision(&before[i], &before[j])
        })
    })
}
