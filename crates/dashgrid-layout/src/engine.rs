#![forbid(unsafe_code)]

//! Grid placement engine: collision tests, auto-placement, compaction and
//! collision resolution.
//!
//! Every function here is pure. Inputs are borrowed slices and outputs are
//! freshly built collections, so an interaction session can always be
//! abandoned without having touched the canonical layout.
//!
//! # Invariants
//!
//! 1. Rectangles that only share an edge never collide.
//! 2. [`find_first_available_position`] scans rows top-to-bottom and columns
//!    left-to-right; the first free slot wins.
//! 3. [`compact_layout`] is idempotent.
//! 4. Locked and `noMove` widgets are never moved by [`compact_layout`] or
//!    [`resolve_collisions`]; they only act as obstacles.
//!
//! # Failure Modes
//!
//! - Widget wider than the grid: placed at `x = 0` below everything else.
//! - [`resolve_collisions`] gives up after [`RESOLVE_PASS_LIMIT`] passes and
//!   returns the partially resolved layout (logged at `warn`).

use dashgrid_core::{GridPosition, GridRect, GridSize, Placed, Widget, WidgetId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Upper bound on full push-down passes in [`resolve_collisions`].
pub const RESOLVE_PASS_LIMIT: usize = 100;

/// Rows scanned below the current bottom edge when searching for a slot.
pub const PLACEMENT_SCAN_EXTRA_ROWS: u32 = 10;

/// Axis-aligned overlap test with exclusive edges.
#[inline]
pub fn check_collision(a: &impl Placed, b: &impl Placed) -> bool {
    a.grid_rect().intersects(&b.grid_rect())
}

/// Widgets overlapping `rect`, skipping `exclude` (usually the widget itself).
pub fn colliding_widgets<'a>(
    rect: &impl Placed,
    widgets: &'a [Widget],
    exclude: Option<&str>,
) -> Vec<&'a Widget> {
    let rect = rect.grid_rect();
    widgets
        .iter()
        .filter(|w| Some(w.id.as_str()) != exclude)
        .filter(|w| rect.intersects(&w.rect()))
        .collect()
}

/// Whether any two widgets in the collection overlap.
pub fn has_collisions(widgets: &[Widget]) -> bool {
    widgets.iter().enumerate().any(|(i, a)| {
        widgets[i + 1..]
            .iter()
            .any(|b| check_collision(a, b))
    })
}

/// Horizontal bounds check. Coordinates are unsigned and the grid has no
/// bottom, so only the right edge can be out of range.
#[inline]
pub fn is_within_bounds(rect: &impl Placed, columns: u32) -> bool {
    rect.grid_rect().right() <= columns
}

/// Round to the nearest cell, flooring negative and non-finite input at 0.
pub fn snap_to_grid(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Copy of `widgets` in reading order: by row, then by column.
pub fn sort_widgets(widgets: &[Widget]) -> Vec<Widget> {
    let mut sorted = widgets.to_vec();
    sorted.sort_by_key(|w| (w.y, w.x));
    sorted
}

/// Lowest occupied row boundary, `max(y + h)`, or 0 for an empty grid.
pub fn bottom_y<T: Placed>(widgets: &[T]) -> u32 {
    widgets
        .iter()
        .map(|w| w.grid_rect().bottom())
        .max()
        .unwrap_or(0)
}

/// First free slot for a rectangle of `size`, in row-major order.
///
/// A widget wider than the grid has no legal slot; it is placed at the left
/// edge just below the current content instead.
pub fn find_first_available_position(
    size: GridSize,
    widgets: &[Widget],
    columns: u32,
) -> GridPosition {
    let bottom = bottom_y(widgets);
    if size.w > columns {
        return GridPosition::new(0, bottom);
    }
    let last_row = bottom.saturating_add(PLACEMENT_SCAN_EXTRA_ROWS);
    for y in 0..last_row {
        for x in 0..=columns - size.w {
            let candidate = GridRect::new(x, y, size.w, size.h);
            if !widgets.iter().any(|w| check_collision(&candidate, w)) {
                return GridPosition::new(x, y);
            }
        }
    }
    GridPosition::new(0, bottom)
}

/// Float every movable widget upward as far as it can go.
///
/// Widgets are visited in reading order and each one only checks against the
/// widgets already settled before it (plus every pinned widget), so earlier
/// widgets claim vertical space first. The result is in reading order of the
/// settled positions, so compacting twice changes nothing.
pub fn compact_layout(widgets: &[Widget]) -> Vec<Widget> {
    let pinned: Vec<&Widget> = widgets.iter().filter(|w| !w.can_move()).collect();
    let mut settled: Vec<Widget> = Vec::with_capacity(widgets.len());

    for mut widget in sort_widgets(widgets) {
        if widget.can_move() {
            while widget.y > 0 {
                let candidate = widget.rect().with_origin(widget.x, widget.y - 1);
                let blocked = settled.iter().any(|s| check_collision(&candidate, s))
                    || pinned
                        .iter()
                        .any(|p| p.id != widget.id && check_collision(&candidate, *p));
                if blocked {
                    break;
                }
                widget.y -= 1;
            }
        }
        settled.push(widget);
    }
    sort_widgets(&settled)
}

/// [`compact_layout`] with the widgets left in their input order.
pub fn compact_in_order(widgets: &[Widget]) -> Vec<Widget> {
    let settled: FxHashMap<WidgetId, u32> = compact_layout(widgets)
        .into_iter()
        .map(|w| (w.id, w.y))
        .collect();
    widgets
        .iter()
        .map(|w| {
            let mut w = w.clone();
            if let Some(&y) = settled.get(&w.id) {
                w.y = y;
            }
            w
        })
        .collect()
}

/// Outcome of a collision resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    pub widgets: Vec<Widget>,
    /// Full passes executed, including the final quiet one.
    pub passes: usize,
    /// False when [`RESOLVE_PASS_LIMIT`] was hit before a quiet pass.
    pub converged: bool,
}

/// Apply `moved` and push overlapping widgets down until nothing changes.
///
/// `moved` replaces the widget with the same id (or is appended if absent).
/// Each pass visits widgets in collection order and sets a colliding
/// widget's `y` to the deepest bottom edge among its current colliders, if
/// that is an increase. Pinned widgets never move. The moved widget keeps its
/// requested position unless it lands on a pinned widget, in which case it
/// is pushed below that widget.
pub fn resolve_collisions(moved: &Widget, widgets: &[Widget]) -> Vec<Widget> {
    resolve_collisions_report(moved, widgets).widgets
}

/// [`resolve_collisions`] with pass accounting.
pub fn resolve_collisions_report(moved: &Widget, widgets: &[Widget]) -> ResolveReport {
    let mut out = widgets.to_vec();
    match out.iter().position(|w| w.id == moved.id) {
        Some(index) => out[index] = moved.clone(),
        None => out.push(moved.clone()),
    }

    let mut passes = 0;
    let mut converged = false;
    while passes < RESOLVE_PASS_LIMIT {
        passes += 1;
        let mut changed = false;
        for i in 0..out.len() {
            let target = &out[i];
            if !target.can_move() {
                continue;
            }
            let is_moved = target.id == moved.id;
            let rect = target.rect();
            let push_to = out
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && (!is_moved || !other.can_move()))
                .filter(|(_, other)| rect.intersects(&other.rect()))
                .map(|(_, other)| other.rect().bottom())
                .max();
            if let Some(new_y) = push_to
                && new_y > out[i].y
            {
                out[i].y = new_y;
                changed = true;
            }
        }
        if !changed {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            widget = %moved.id,
            passes,
            "collision resolution hit the pass limit; layout may still overlap"
        );
    }

    ResolveReport {
        widgets: out,
        passes,
        converged,
    }
}

/// Move a widget to `(x, y)` and resolve the collisions it causes.
///
/// Returns `None` if the widget is missing, locked, or `noMove`. The target
/// is snapped to whole cells and clamped into `[0, columns - w]` horizontally.
pub fn move_widget(
    id: &str,
    x: f64,
    y: f64,
    widgets: &[Widget],
    columns: u32,
) -> Option<Vec<Widget>> {
    let current = widgets.iter().find(|w| w.id.as_str() == id)?;
    if !current.can_move() {
        return None;
    }
    let max_x = columns.saturating_sub(current.w);
    let mut candidate = current.clone();
    candidate.x = snap_to_grid(x).min(max_x);
    candidate.y = snap_to_grid(y);
    Some(resolve_collisions(&candidate, widgets))
}

/// Resize a widget to `(w, h)` and resolve the collisions it causes.
///
/// Returns `None` if the widget is missing, locked, or `noResize`. The span is
/// clamped to the widget's min/max (max width defaults to `columns`) and `x`
/// is pulled left if the new width would overflow the grid.
pub fn resize_widget(
    id: &str,
    w: u32,
    h: u32,
    widgets: &[Widget],
    columns: u32,
) -> Option<Vec<Widget>> {
    let current = widgets.iter().find(|widget| widget.id.as_str() == id)?;
    if !current.can_resize() {
        return None;
    }
    let mut candidate = current.clone();
    candidate.w = current.clamp_width(i64::from(w), columns);
    candidate.h = current.clamp_height(i64::from(h));
    if candidate.x.saturating_add(candidate.w) > columns {
        candidate.x = columns.saturating_sub(candidate.w);
    }
    Some(resolve_collisions(&candidate, widgets))
}

/// Whether `rect` is in bounds and free, ignoring the widget `exclude`.
pub fn can_place_widget(
    rect: &impl Placed,
    widgets: &[Widget],
    columns: u32,
    exclude: Option<&str>,
) -> bool {
    is_within_bounds(rect, columns) && colliding_widgets(rect, widgets, exclude).is_empty()
}

/// Number of widgets whose geometry differs between two collections,
/// counting additions and removals.
pub fn count_changed(before: &[Widget], after: &[Widget]) -> usize {
    let old: FxHashMap<&WidgetId, GridRect> =
        before.iter().map(|w| (&w.id, w.rect())).collect();
    let mut changed = after
        .iter()
        .filter(|w| old.get(&w.id) != Some(&w.rect()))
        .count();
    let kept: FxHashSet<&WidgetId> = after.iter().map(|w| &w.id).collect();
    changed += before.iter().filter(|w| !kept.contains(&w.id)).count();
    changed
}
