#![forbid(unsafe_code)]

//! Layout: pure placement algorithms for grid dashboards.
//!
//! # Role in dashgrid
//! `dashgrid-layout` is the leaf of the stack. The [`engine`] module answers
//! geometric questions about a widget collection (does it collide, where is
//! the first free slot, what does the layout look like after a move) and the
//! [`responsive`] module picks breakpoints and refits layouts to a new column
//! count. Nothing here holds state between calls; the interaction machines in
//! `dashgrid-runtime` drive these functions.

pub mod engine;
pub mod responsive;

pub use engine::{
    PLACEMENT_SCAN_EXTRA_ROWS, RESOLVE_PASS_LIMIT, ResolveReport, bottom_y, can_place_widget,
    check_collision, colliding_widgets, compact_in_order, compact_layout, count_changed,
    find_first_available_position, has_collisions, is_within_bounds, move_widget, resize_widget,
    resolve_collisions, resolve_collisions_report, snap_to_grid, sort_widgets,
};
pub use responsive::{Breakpoints, adapt_layout};
