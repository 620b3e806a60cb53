//! Property tests for pointer-driven geometry.

use dashgrid_core::{GridConfig, GridRect, PixelPoint, Widget};
use dashgrid_layout::is_within_bounds;
use dashgrid_runtime::{Dashboard, DragEngine, LayoutHost, ResizeHandle, WidgetSpec, resize_geometry};
use proptest::prelude::*;
use web_time::Instant;

const COLUMNS: u32 = 12;

fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn widget_strategy() -> impl Strategy<Value = Widget> {
    (
        0u32..COLUMNS,
        0u32..20,
        1u32..=6,
        1u32..=6,
        prop::option::of(1u32..=4),
        prop::option::of(4u32..=10),
    )
        .prop_map(|(x, y, w, h, min, max)| {
            let w = w.clamp(min.unwrap_or(1), max.unwrap_or(COLUMNS));
            let h = h.clamp(min.unwrap_or(1), max.unwrap_or(u32::MAX));
            Widget::new("t", x.min(COLUMNS - w), y, w, h)
                .with_min_size(min, min)
                .with_max_size(max, max)
        })
}

proptest! {
    #[test]
    fn resize_stays_in_grid_and_bounds(
        widget in widget_strategy(),
        handle in handle_strategy(),
        dcols in -30i64..30,
        drows in -30i64..30,
    ) {
        let start = widget.rect();
        let rect = resize_geometry(start, handle, dcols, drows, &widget, COLUMNS);
        let (min_w, max_w) = widget.width_bounds(COLUMNS);
        let (min_h, max_h) = widget.height_bounds();

        prop_assert!(is_within_bounds(&rect, COLUMNS));
        prop_assert!(rect.w >= 1 && rect.h >= 1);
        prop_assert!(rect.w <= max_w && rect.h <= max_h);
        prop_assert!(rect.w >= min_w.min(COLUMNS - rect.x));
        prop_assert!(rect.h >= min_h);

        match handle.horizontal_edge() {
            Some(false) => prop_assert_eq!(rect.right(), start.right()),
            Some(true) => prop_assert_eq!(rect.x, start.x),
            None => prop_assert_eq!((rect.x, rect.w), (start.x, start.w)),
        }
        match handle.vertical_edge() {
            Some(false) => prop_assert_eq!(rect.bottom(), start.bottom()),
            Some(true) => prop_assert_eq!(rect.y, start.y),
            None => prop_assert_eq!((rect.y, rect.h), (start.y, start.h)),
        }
    }

    #[test]
    fn zero_delta_resize_is_identity(widget in widget_strategy(), handle in handle_strategy()) {
        let start = widget.rect();
        prop_assert_eq!(resize_geometry(start, handle, 0, 0, &widget, COLUMNS), start);
    }

    #[test]
    fn drag_proposals_are_clamped(
        w in 1u32..=COLUMNS,
        dx in -3000.0f64..3000.0,
        dy in -3000.0f64..3000.0,
    ) {
        let mut board = Dashboard::new(GridConfig::default().with_float_mode(true))
            .unwrap()
            .with_container_width(1210.0);
        board.add_widget(WidgetSpec::new("t", w, 2).at(0, 3));
        let rect = board.metrics().pixel_rect(board.widget("t").unwrap().rect());
        let pointer = PixelPoint::new(rect.left + 5.0, rect.top + 5.0);

        let mut drag = DragEngine::default();
        prop_assert!(drag.start(&mut board, "t", pointer, rect));
        let moved = PixelPoint::new(pointer.x + dx, pointer.y + dy);
        let proposal = drag.update(&mut board, moved, Instant::now()).unwrap();
        let proposed = GridRect::new(proposal.position.x, proposal.position.y, w, 2);
        prop_assert!(is_within_bounds(&proposed, COLUMNS));

        let before = board.state().clone();
        prop_assert!(drag.cancel(&mut board));
        prop_assert_eq!(board.state(), &before);
    }
}
