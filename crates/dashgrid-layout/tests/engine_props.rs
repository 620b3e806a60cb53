//! Property tests for the grid placement engine.
//!
//! Random widget sets are generated on a 12-column grid and the engine's
//! contracts are checked after every operation: collision symmetry, exclusive
//! edges, compaction idempotence, pinned widgets staying put, and clamping.

use dashgrid_core::{GridRect, GridSize, Widget};
use dashgrid_layout::{
    can_place_widget, check_collision, compact_layout, find_first_available_position,
    has_collisions, is_within_bounds, move_widget, resize_widget, resolve_collisions,
    resolve_collisions_report,
};
use proptest::prelude::*;

const COLUMNS: u32 = 12;

fn rect_strategy() -> impl Strategy<Value = GridRect> {
    (0u32..20, 0u32..20, 1u32..8, 1u32..8).prop_map(|(x, y, w, h)| GridRect::new(x, y, w, h))
}

#[derive(Debug, Clone, Copy)]
enum Pin {
    Free,
    Locked,
    NoMove,
}

fn widgets_strategy(max: usize) -> impl Strategy<Value = Vec<Widget>> {
    prop::collection::vec(
        (
            0u32..COLUMNS,
            0u32..12,
            1u32..=5,
            1u32..=4,
            prop_oneof![
                6 => Just(Pin::Free),
                1 => Just(Pin::Locked),
                1 => Just(Pin::NoMove),
            ],
        ),
        0..max,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h, pin))| {
                let x = x.min(COLUMNS - w);
                let widget = Widget::new(format!("w{i}"), x, y, w, h);
                match pin {
                    Pin::Free => widget,
                    Pin::Locked => widget.locked(true),
                    Pin::NoMove => widget.no_move(true),
                }
            })
            .collect()
    })
}

fn by_id<'a>(widgets: &'a [Widget], id: &str) -> &'a Widget {
    widgets
        .iter()
        .find(|w| w.id.as_str() == id)
        .expect("widget kept")
}

proptest! {
    #[test]
    fn collision_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(check_collision(&a, &b), check_collision(&b, &a));
    }

    #[test]
    fn edge_neighbours_never_collide(a in rect_strategy(), dy in 0u32..10, w in 1u32..6, h in 1u32..6) {
        let right = GridRect::new(a.right(), a.y.saturating_sub(dy), w, h);
        let below = GridRect::new(a.x, a.bottom(), w, h);
        prop_assert!(!check_collision(&a, &right));
        prop_assert!(!check_collision(&a, &below));
    }

    #[test]
    fn compaction_is_idempotent(widgets in widgets_strategy(10)) {
        let once = compact_layout(&widgets);
        let twice = compact_layout(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn compaction_never_lowers_or_moves_pinned(widgets in widgets_strategy(10)) {
        let compacted = compact_layout(&widgets);
        prop_assert_eq!(compacted.len(), widgets.len());
        for original in &widgets {
            let after = by_id(&compacted, original.id.as_str());
            prop_assert!(after.y <= original.y);
            prop_assert_eq!(after.x, original.x);
            if !original.can_move() {
                prop_assert_eq!(after.y, original.y);
            }
        }
    }

    #[test]
    fn resolution_never_moves_pinned(
        widgets in widgets_strategy(10),
        x in 0u32..COLUMNS,
        y in 0u32..10,
    ) {
        prop_assume!(!widgets.is_empty());
        let mut moved = widgets[0].clone();
        moved.x = x.min(COLUMNS - moved.w);
        moved.y = y;
        let out = resolve_collisions(&moved, &widgets);
        let pinned = widgets.iter().skip(1).filter(|w| !w.can_move());
        for original in pinned {
            let after = by_id(&out, original.id.as_str());
            prop_assert_eq!(after.y, original.y);
        }
    }

    #[test]
    fn converged_resolution_of_free_widgets_is_clear(
        widgets in widgets_strategy(8),
        x in 0u32..COLUMNS,
        y in 0u32..10,
    ) {
        let free: Vec<Widget> = widgets.into_iter().map(|w| w.locked(false).no_move(false)).collect();
        prop_assume!(!free.is_empty());
        let mut moved = free[0].clone();
        moved.x = x.min(COLUMNS - moved.w);
        moved.y = y;
        let report = resolve_collisions_report(&moved, &free);
        if report.converged {
            prop_assert!(!has_collisions(&report.widgets));
        }
    }

    #[test]
    fn move_clamps_x(widgets in widgets_strategy(6), x in -20.0f64..40.0, y in -5.0f64..20.0) {
        prop_assume!(!widgets.is_empty());
        let target = &widgets[0];
        match move_widget(target.id.as_str(), x, y, &widgets, COLUMNS) {
            Some(out) => {
                prop_assert!(target.can_move());
                let after = by_id(&out, target.id.as_str());
                prop_assert!(after.x <= COLUMNS - after.w);
                prop_assert!(is_within_bounds(after, COLUMNS));
            }
            None => prop_assert!(!target.can_move()),
        }
    }

    #[test]
    fn resize_clamps_into_grid(widgets in widgets_strategy(6), w in 0u32..30, h in 0u32..10) {
        prop_assume!(!widgets.is_empty());
        let target = &widgets[0];
        match resize_widget(target.id.as_str(), w, h, &widgets, COLUMNS) {
            Some(out) => {
                let after = by_id(&out, target.id.as_str());
                prop_assert!(after.w >= 1 && after.w <= COLUMNS);
                prop_assert!(after.h >= 1);
                prop_assert!(after.x <= COLUMNS - after.w);
            }
            None => prop_assert!(!target.can_resize()),
        }
    }

    #[test]
    fn first_available_slot_is_free(widgets in widgets_strategy(10), w in 1u32..=COLUMNS, h in 1u32..5) {
        let pos = find_first_available_position(GridSize::new(w, h), &widgets, COLUMNS);
        let rect = GridRect::new(pos.x, pos.y, w, h);
        prop_assert!(can_place_widget(&rect, &widgets, COLUMNS, None));
    }
}
