#![forbid(unsafe_code)]

//! Widgets: identified rectangles with size clamps and interaction flags.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{GridRect, Placed};

/// Opaque widget key. Compared by value, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A rectangle on the grid with optional size clamps and movement flags.
///
/// Serialized in the persisted-layout shape (`minW`, `noMove`, ...), with
/// unset clamps and false flags omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    /// Immovable and unresizable.
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_move: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_resize: bool,
}

impl Widget {
    /// Create an unconstrained widget.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            locked: false,
            no_move: false,
            no_resize: false,
        }
    }

    #[must_use]
    pub fn with_min_size(mut self, min_w: Option<u32>, min_h: Option<u32>) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_w: Option<u32>, max_h: Option<u32>) -> Self {
        self.max_w = max_w;
        self.max_h = max_h;
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn no_move(mut self, no_move: bool) -> Self {
        self.no_move = no_move;
        self
    }

    #[must_use]
    pub fn no_resize(mut self, no_resize: bool) -> Self {
        self.no_resize = no_resize;
        self
    }

    /// Whether drag/move operations may change this widget's position.
    #[must_use]
    pub const fn can_move(&self) -> bool {
        !self.locked && !self.no_move
    }

    /// Whether resize operations may change this widget's span.
    #[must_use]
    pub const fn can_resize(&self) -> bool {
        !self.locked && !self.no_resize
    }

    /// Width bounds `[minW ?? 1, maxW ?? columns]`.
    ///
    /// The upper bound never drops below the lower one, so a widget whose
    /// minimum exceeds the grid keeps its minimum.
    #[must_use]
    pub fn width_bounds(&self, columns: u32) -> (u32, u32) {
        let lo = self.min_w.unwrap_or(1).max(1);
        let hi = self.max_w.unwrap_or(columns).max(lo);
        (lo, hi)
    }

    /// Height bounds `[minH ?? 1, maxH ?? u32::MAX]`.
    #[must_use]
    pub fn height_bounds(&self) -> (u32, u32) {
        let lo = self.min_h.unwrap_or(1).max(1);
        let hi = self.max_h.unwrap_or(u32::MAX).max(lo);
        (lo, hi)
    }

    /// Clamp a requested width into this widget's bounds.
    #[must_use]
    pub fn clamp_width(&self, w: i64, columns: u32) -> u32 {
        let (lo, hi) = self.width_bounds(columns);
        clamp_span(w, lo, hi)
    }

    /// Clamp a requested height into this widget's bounds.
    #[must_use]
    pub fn clamp_height(&self, h: i64) -> u32 {
        let (lo, hi) = self.height_bounds();
        clamp_span(h, lo, hi)
    }

    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Copy `rect` into this widget's geometry.
    pub fn set_rect(&mut self, rect: GridRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }
}

impl Placed for Widget {
    #[inline]
    fn grid_rect(&self) -> GridRect {
        self.rect()
    }
}

fn clamp_span(value: i64, lo: u32, hi: u32) -> u32 {
    value.clamp(i64::from(lo), i64::from(hi)) as u32
}
