#![forbid(unsafe_code)]

//! Grid and pixel geometry.
//!
//! Grid coordinates are whole cells with the origin at the top-left corner.
//! Pixel quantities are `f64` and only appear at the pointer boundary, where
//! [`GridMetrics`] converts between the two spaces.

use serde::{Deserialize, Serialize};

/// Positional subset of a widget: origin and span in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column (inclusive).
    pub x: u32,
    /// Top row (inclusive).
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl GridRect {
    /// Create a new grid rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Whether two rectangles overlap. Shared edges do not count.
    #[inline]
    pub const fn intersects(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same rectangle moved to a new origin.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }
}

/// Anything that occupies a rectangle on the grid.
///
/// Implemented by [`GridRect`] itself and by [`Widget`](crate::Widget), so the
/// placement functions accept either.
pub trait Placed {
    fn grid_rect(&self) -> GridRect;
}

impl Placed for GridRect {
    #[inline]
    fn grid_rect(&self) -> GridRect {
        *self
    }
}

impl<T: Placed + ?Sized> Placed for &T {
    #[inline]
    fn grid_rect(&self) -> GridRect {
        (**self).grid_rect()
    }
}

/// A grid cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A span in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

impl GridSize {
    #[inline]
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// A pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pixel dimensions of one grid cell and the gutter around it.
///
/// Cells are laid out with a `margin` gutter on every side, so column `c`
/// starts at `margin + c * (column_width + margin)` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub column_width: f64,
    pub row_height: f64,
    pub margin: f64,
}

impl GridMetrics {
    /// Derive metrics for a container of `container_width` pixels.
    ///
    /// The column width is floored at zero when the margins alone exceed the
    /// container.
    #[must_use]
    pub fn for_container(container_width: f64, columns: u32, row_height: f64, margin: f64) -> Self {
        let columns = f64::from(columns.max(1));
        let column_width = ((container_width - margin * (columns + 1.0)) / columns).max(0.0);
        Self {
            column_width,
            row_height,
            margin,
        }
    }

    /// Pixels covered by one horizontal grid unit (cell plus gutter).
    #[inline]
    pub fn column_unit(&self) -> f64 {
        self.column_width + self.margin
    }

    /// Pixels covered by one vertical grid unit (row plus gutter).
    #[inline]
    pub fn row_unit(&self) -> f64 {
        self.row_height + self.margin
    }

    /// Convert a pixel delta to a whole number of columns, rounding to nearest.
    pub fn columns_for_delta(&self, dx: f64) -> i64 {
        units_for_delta(dx, self.column_unit())
    }

    /// Convert a pixel delta to a whole number of rows, rounding to nearest.
    pub fn rows_for_delta(&self, dy: f64) -> i64 {
        units_for_delta(dy, self.row_unit())
    }

    /// Pixel rectangle covered by a grid rectangle.
    #[must_use]
    pub fn pixel_rect(&self, rect: GridRect) -> PixelRect {
        let w = f64::from(rect.w);
        let h = f64::from(rect.h);
        PixelRect {
            left: self.margin + f64::from(rect.x) * self.column_unit(),
            top: self.margin + f64::from(rect.y) * self.row_unit(),
            width: w * self.column_width + (w - 1.0).max(0.0) * self.margin,
            height: h * self.row_height + (h - 1.0).max(0.0) * self.margin,
        }
    }
}

fn units_for_delta(delta: f64, unit: f64) -> i64 {
    if unit <= f64::EPSILON || !delta.is_finite() {
        return 0;
    }
    (delta / unit).round() as i64
}
