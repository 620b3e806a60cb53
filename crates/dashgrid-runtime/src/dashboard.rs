#![forbid(unsafe_code)]

//! In-memory dashboard: the reference [`LayoutHost`].
//!
//! [`Dashboard`] owns the canonical [`LayoutState`], the [`GridConfig`] it was
//! built from and an event log. It does not render. A UI layer reads
//! [`Dashboard::widgets`] after every call and drains
//! [`Dashboard::drain_events`] to drive its own listeners.
//!
//! # Usage
//!
//! ```
//! use dashgrid_core::GridConfig;
//! use dashgrid_runtime::{Dashboard, WidgetSpec};
//!
//! let mut board = Dashboard::new(GridConfig::default()).unwrap();
//! board.add_widget(WidgetSpec::new("a", 6, 3)).unwrap();
//! board.add_widget(WidgetSpec::new("b", 6, 3).at(0, 0)).unwrap();
//!
//! let a = board.widget("a").unwrap();
//! assert_eq!((a.x, a.y), (0, 3));
//! ```
//!
//! # Invariants
//!
//! 1. Widget ids are unique.
//! 2. With `float_mode` off every committed layout is compacted, and the
//!    widget list keeps insertion order.
//! 3. A failed [`Dashboard::load_state`] leaves the live layout untouched.
//! 4. The event log is unbounded. It only shrinks through
//!    [`Dashboard::drain_events`], so a host that never drains it keeps every
//!    event for the dashboard's lifetime.

use dashgrid_core::{
    BreakpointChange, ConfigError, GridConfig, GridEvent, GridPosition, GridRect, GridSize,
    LayoutState, LoadError, PersistedLayout, Placed, Widget, WidgetId,
};
use dashgrid_layout::{
    adapt_layout, bottom_y, can_place_widget, compact_in_order, find_first_available_position,
    move_widget, resize_widget, resolve_collisions,
};
use rustc_hash::FxHashMap;

use crate::host::{LayoutHost, ScrollContainer, commit_state, commit_widgets};

/// Default container width before the host reports a real one.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 1200.0;

/// A widget to add, with an optional requested position.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub widget: Widget,
    /// `None` asks for automatic placement.
    pub position: Option<GridPosition>,
}

impl WidgetSpec {
    /// An unpositioned widget of `w x h` cells.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, w: u32, h: u32) -> Self {
        Self {
            widget: Widget::new(id, 0, 0, w, h),
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.position = Some(GridPosition::new(x, y));
        self
    }

    #[must_use]
    pub fn with_min_size(mut self, min_w: Option<u32>, min_h: Option<u32>) -> Self {
        self.widget = self.widget.with_min_size(min_w, min_h);
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_w: Option<u32>, max_h: Option<u32>) -> Self {
        self.widget = self.widget.with_max_size(max_w, max_h);
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.widget = self.widget.locked(locked);
        self
    }

    #[must_use]
    pub fn no_move(mut self, no_move: bool) -> Self {
        self.widget = self.widget.no_move(no_move);
        self
    }

    #[must_use]
    pub fn no_resize(mut self, no_resize: bool) -> Self {
        self.widget = self.widget.no_resize(no_resize);
        self
    }
}

/// A fully specified widget is added at its own position.
impl From<Widget> for WidgetSpec {
    fn from(widget: Widget) -> Self {
        let position = Some(GridPosition::new(widget.x, widget.y));
        Self { widget, position }
    }
}

/// Changes to a widget's clamps and flags. Unset fields are left alone.
///
/// Geometry goes through [`Dashboard::move_widget`] and
/// [`Dashboard::resize_widget`]; a patch only re-clamps the current span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetPatch {
    pub min_w: Option<Option<u32>>,
    pub min_h: Option<Option<u32>>,
    pub max_w: Option<Option<u32>>,
    pub max_h: Option<Option<u32>>,
    pub locked: Option<bool>,
    pub no_move: Option<bool>,
    pub no_resize: Option<bool>,
}

impl WidgetPatch {
    #[must_use]
    pub fn min_size(mut self, min_w: Option<u32>, min_h: Option<u32>) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    #[must_use]
    pub fn max_size(mut self, max_w: Option<u32>, max_h: Option<u32>) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    #[must_use]
    pub fn no_move(mut self, no_move: bool) -> Self {
        self.no_move = Some(no_move);
        self
    }

    #[must_use]
    pub fn no_resize(mut self, no_resize: bool) -> Self {
        self.no_resize = Some(no_resize);
        self
    }

    fn apply(&self, widget: &mut Widget) {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        set(&mut widget.min_w, self.min_w);
        set(&mut widget.min_h, self.min_h);
        set(&mut widget.max_w, self.max_w);
        set(&mut widget.max_h, self.max_h);
        set(&mut widget.locked, self.locked);
        set(&mut widget.no_move, self.no_move);
        set(&mut widget.no_resize, self.no_resize);
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    config: GridConfig,
    state: LayoutState,
    container_width: f64,
    scroll_container: Option<ScrollContainer>,
    scroll_top: f64,
    events: Vec<GridEvent>,
}

impl Dashboard {
    /// Build an empty dashboard. Fails if `config` does not validate.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: LayoutState::from_config(&config),
            config,
            container_width: DEFAULT_CONTAINER_WIDTH,
            scroll_container: None,
            scroll_top: 0.0,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width.max(0.0);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.state.widgets
    }

    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.state.widget(id)
    }

    #[must_use]
    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width.max(0.0);
    }

    pub fn set_scroll_container(&mut self, container: Option<ScrollContainer>) {
        self.scroll_container = container;
    }

    /// Accumulated auto-scroll offset in pixels.
    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Add a widget. Returns `None` if the id is already taken.
    ///
    /// Spans are clamped to the widget's bounds. A requested position is
    /// clamped into the grid and wins over whatever it lands on; an
    /// unpositioned widget goes to the first free slot, or below everything
    /// when `auto_position` is off.
    pub fn add_widget(&mut self, spec: WidgetSpec) -> Option<WidgetId> {
        let WidgetSpec {
            mut widget,
            position,
        } = spec;
        if self.state.contains(widget.id.as_str()) {
            tracing::debug!(widget = %widget.id, "duplicate widget id");
            return None;
        }
        let columns = self.state.columns;
        widget.w = widget.clamp_width(i64::from(widget.w), columns);
        widget.h = widget.clamp_height(i64::from(widget.h));

        let widgets = match position {
            Some(requested) => {
                widget.x = requested.x.min(columns.saturating_sub(widget.w));
                widget.y = requested.y;
                resolve_collisions(&widget, &self.state.widgets)
            }
            None => {
                let slot = if self.config.auto_position {
                    find_first_available_position(
                        GridSize::new(widget.w, widget.h),
                        &self.state.widgets,
                        columns,
                    )
                } else {
                    GridPosition::new(0, bottom_y(&self.state.widgets))
                };
                widget.x = slot.x;
                widget.y = slot.y;
                let mut widgets = self.state.widgets.clone();
                widgets.push(widget.clone());
                widgets
            }
        };

        let id = widget.id.clone();
        commit_widgets(self, widgets);
        let added = self.state.widget(id.as_str()).cloned().unwrap_or(widget);
        tracing::debug!(widget = %id, x = added.x, y = added.y, w = added.w, h = added.h, "widget added");
        self.emit(GridEvent::WidgetAdd { widget: added });
        Some(id)
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        let Some(index) = self.state.widgets.iter().position(|w| w.id.as_str() == id) else {
            return false;
        };
        let mut widgets = self.state.widgets.clone();
        let removed = widgets.remove(index);
        commit_widgets(self, widgets);
        tracing::debug!(widget = id, "widget removed");
        self.emit(GridEvent::WidgetRemove { id: removed.id });
        true
    }

    /// Apply `patch` to widget `id`, re-clamping its span to the new bounds.
    pub fn update_widget(&mut self, id: &str, patch: &WidgetPatch) -> bool {
        let Some(current) = self.state.widget(id) else {
            return false;
        };
        let columns = self.state.columns;
        let mut updated = current.clone();
        patch.apply(&mut updated);
        updated.w = updated.clamp_width(i64::from(updated.w), columns);
        updated.h = updated.clamp_height(i64::from(updated.h));
        updated.x = updated.x.min(columns.saturating_sub(updated.w));

        let widgets = if updated.rect() == current.rect() {
            self.state
                .widgets
                .iter()
                .map(|w| if w.id == updated.id { updated.clone() } else { w.clone() })
                .collect()
        } else {
            resolve_collisions(&updated, &self.state.widgets)
        };
        commit_widgets(self, widgets);
        let widget = self.state.widget(id).cloned().unwrap_or(updated);
        self.emit(GridEvent::WidgetUpdate { widget });
        true
    }

    /// Move widget `id` to `(x, y)`. `false` for missing or pinned widgets.
    pub fn move_widget(&mut self, id: &str, x: u32, y: u32) -> bool {
        let moved = move_widget(
            id,
            f64::from(x),
            f64::from(y),
            &self.state.widgets,
            self.state.columns,
        );
        match moved {
            Some(widgets) => {
                commit_widgets(self, widgets);
                true
            }
            None => false,
        }
    }

    /// Resize widget `id` to `w x h`. `false` for missing or `noResize` widgets.
    pub fn resize_widget(&mut self, id: &str, w: u32, h: u32) -> bool {
        match resize_widget(id, w, h, &self.state.widgets, self.state.columns) {
            Some(widgets) => {
                commit_widgets(self, widgets);
                true
            }
            None => false,
        }
    }

    /// Float every movable widget up. Returns whether anything moved.
    pub fn compact(&mut self) -> bool {
        let widgets = compact_in_order(&self.state.widgets);
        commit_widgets(self, widgets) > 0
    }

    /// Whether `rect` is a legal free slot, also honouring `max_rows`.
    #[must_use]
    pub fn can_place(&self, rect: &impl Placed, exclude: Option<&str>) -> bool {
        let fits_rows = self
            .config
            .max_rows
            .is_none_or(|max| rect.grid_rect().bottom() <= max);
        fits_rows && can_place_widget(rect, &self.state.widgets, self.state.columns, exclude)
    }

    /// Change the column count, adapting the current layout to it.
    pub fn set_columns(&mut self, columns: u32) -> bool {
        if columns == 0 || columns == self.state.columns {
            return false;
        }
        let mut next = self.state.clone();
        next.columns = columns;
        next.widgets = adapt_layout(&next.widgets, columns);
        tracing::debug!(columns, "columns changed");
        commit_state(self, next);
        true
    }

    /// Serialize the live layout to its persisted JSON form.
    pub fn save_state(&self) -> Result<String, serde_json::Error> {
        self.state.to_json()
    }

    /// Replace the live layout with a persisted one.
    ///
    /// The payload is fully validated first; on error nothing changes.
    /// Widgets that overflow the loaded column count are clamped into it.
    pub fn load_state(&mut self, json: &str) -> Result<(), LoadError> {
        let persisted = PersistedLayout::parse(json)?;
        let mut next = self.state.merge_persisted(persisted);
        next.widgets = adapt_layout(&next.widgets, next.columns);
        tracing::info!(widgets = next.widgets.len(), columns = next.columns, "layout loaded");
        self.set_state(next);
        let snapshot = self.state.clone();
        self.emit(GridEvent::LayoutChange(snapshot));
        Ok(())
    }
}

/// Saved geometry for every widget the snapshot knows about; widgets added
/// since the snapshot keep their current geometry.
fn restore_saved(current: &[Widget], saved: &[Widget]) -> Vec<Widget> {
    let saved: FxHashMap<&WidgetId, GridRect> = saved.iter().map(|w| (&w.id, w.rect())).collect();
    current
        .iter()
        .map(|w| {
            let mut w = w.clone();
            if let Some(&rect) = saved.get(&w.id) {
                w.set_rect(rect);
            }
            w
        })
        .collect()
}

impl LayoutHost for Dashboard {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn set_state(&mut self, mut state: LayoutState) {
        if !self.config.float_mode {
            state.widgets = compact_in_order(&state.widgets);
        }
        self.state = state;
    }

    fn emit(&mut self, event: GridEvent) {
        tracing::trace!(event = event.name(), "emit");
        self.events.push(event);
    }

    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn scroll_container(&self) -> Option<ScrollContainer> {
        self.scroll_container
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scroll_top = (self.scroll_top + dy).max(0.0);
    }

    fn breakpoint_changed(&mut self, change: &BreakpointChange) {
        let mut next = self.state.clone();
        let old_columns = next.columns;
        next.columns = change.config.columns.max(1);
        if let Some(row_height) = change.config.row_height {
            next.row_height = row_height;
        }
        let widgets = std::mem::take(&mut next.widgets);
        next.widgets = match &change.config.saved_layout {
            Some(saved) => adapt_layout(&restore_saved(&widgets, saved), next.columns),
            None if next.columns != old_columns => adapt_layout(&widgets, next.columns),
            None => widgets,
        };
        commit_state(self, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashgrid_core::BreakpointConfig;
    use dashgrid_layout::has_collisions;

    fn board() -> Dashboard {
        Dashboard::new(GridConfig::default()).unwrap()
    }

    fn floating() -> Dashboard {
        Dashboard::new(GridConfig::default().with_float_mode(true)).unwrap()
    }

    fn pos(board: &Dashboard, id: &str) -> (u32, u32) {
        let w = board.widget(id).unwrap();
        (w.x, w.y)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Dashboard::new(GridConfig::default().with_columns(0)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroColumns));
    }

    #[test]
    fn overlapping_add_pushes_existing_down() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 6, 3).at(0, 0));
        board.add_widget(WidgetSpec::new("b", 6, 3).at(0, 0));
        assert_eq!(pos(&board, "b"), (0, 0));
        assert_eq!(pos(&board, "a"), (0, 3));
        assert!(!has_collisions(board.widgets()));
        let ids: Vec<_> = board.widgets().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn auto_placement_fills_rows() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 4, 3));
        board.add_widget(WidgetSpec::new("b", 4, 3));
        board.add_widget(WidgetSpec::new("c", 4, 3));
        board.add_widget(WidgetSpec::new("d", 4, 3));
        assert_eq!(pos(&board, "b"), (4, 0));
        assert_eq!(pos(&board, "c"), (8, 0));
        assert_eq!(pos(&board, "d"), (0, 3));
    }

    #[test]
    fn manual_placement_appends_at_bottom() {
        let mut board = Dashboard::new(
            GridConfig::default()
                .with_auto_position(false)
                .with_float_mode(true),
        )
        .unwrap();
        board.add_widget(WidgetSpec::new("a", 2, 2));
        board.add_widget(WidgetSpec::new("b", 2, 2));
        assert_eq!(pos(&board, "b"), (0, 2));
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut board = board();
        assert!(board.add_widget(WidgetSpec::new("a", 1, 1)).is_some());
        assert!(board.add_widget(WidgetSpec::new("a", 1, 1)).is_none());
        assert_eq!(board.widgets().len(), 1);
    }

    #[test]
    fn requested_position_is_clamped() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 20, 1).at(5, 0));
        assert_eq!(board.widget("a").unwrap().rect(), GridRect::new(0, 0, 12, 1));
    }

    #[test]
    fn events_for_add_remove_update() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 2, 2));
        assert!(board.update_widget("a", &WidgetPatch::default().locked(true)));
        assert!(board.widget("a").unwrap().locked);
        assert!(board.remove_widget("a"));
        assert!(!board.remove_widget("a"));
        assert!(!board.update_widget("a", &WidgetPatch::default()));
        let names: Vec<_> = board.events().iter().map(GridEvent::name).collect();
        assert_eq!(names, ["widget:add", "widget:update", "widget:remove"]);
        assert_eq!(board.drain_events().len(), 3);
        assert!(board.events().is_empty());
    }

    #[test]
    fn patch_reclamps_span() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 8, 2).at(4, 0));
        board.add_widget(WidgetSpec::new("b", 2, 2).at(0, 2));
        board.update_widget("a", &WidgetPatch::default().max_size(Some(4), None));
        assert_eq!(board.widget("a").unwrap().rect(), GridRect::new(4, 0, 4, 2));

        board.update_widget("b", &WidgetPatch::default().min_size(Some(6), Some(3)));
        assert_eq!(board.widget("b").unwrap().rect(), GridRect::new(0, 2, 6, 3));
    }

    #[test]
    fn float_mode_off_compacts_commits() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 4, 2).at(0, 5));
        assert_eq!(pos(&board, "a"), (0, 0));
        assert!(board.move_widget("a", 2, 8));
        assert_eq!(pos(&board, "a"), (2, 0));
    }

    #[test]
    fn float_mode_keeps_gaps_until_compact() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 4, 2).at(0, 5));
        assert_eq!(pos(&board, "a"), (0, 5));
        assert!(board.compact());
        assert_eq!(pos(&board, "a"), (0, 0));
        assert!(!board.compact());
    }

    #[test]
    fn move_and_resize_guards() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("pin", 2, 2).at(0, 0).locked(true));
        board.add_widget(WidgetSpec::new("a", 2, 2).at(4, 0).no_resize(true));
        assert!(!board.move_widget("pin", 4, 4));
        assert!(!board.resize_widget("a", 3, 3));
        assert!(!board.move_widget("ghost", 0, 0));
        assert!(board.move_widget("a", 40, 1));
        assert_eq!(pos(&board, "a"), (10, 1));
        assert!(!board.resize_widget("pin", 4, 4));
    }

    #[test]
    fn multi_widget_commit_emits_layout_change() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 4, 2).at(0, 0));
        board.add_widget(WidgetSpec::new("b", 4, 2).at(4, 0));
        board.drain_events();
        board.move_widget("a", 4, 0);
        let names: Vec<_> = board.events().iter().map(GridEvent::name).collect();
        assert_eq!(names, ["layout:change"]);
        board.drain_events();
        board.move_widget("a", 4, 6);
        assert!(board.events().is_empty());
    }

    #[test]
    fn can_place_honours_max_rows() {
        let mut board = Dashboard::new(GridConfig::default().with_max_rows(Some(4))).unwrap();
        board.add_widget(WidgetSpec::new("a", 4, 2));
        assert!(board.can_place(&GridRect::new(4, 0, 4, 4), None));
        assert!(!board.can_place(&GridRect::new(4, 1, 4, 4), None));
        assert!(!board.can_place(&GridRect::new(0, 0, 4, 2), None));
        assert!(board.can_place(&GridRect::new(0, 0, 4, 2), Some("a")));
        assert!(!board.can_place(&GridRect::new(10, 0, 4, 1), None));
    }

    #[test]
    fn set_columns_adapts() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 4, 2).at(8, 0));
        assert!(board.set_columns(6));
        assert_eq!(board.state().columns, 6);
        assert_eq!(pos(&board, "a"), (2, 0));
        assert!(!board.set_columns(6));
        assert!(!board.set_columns(0));
    }

    #[test]
    fn save_load_round_trip() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 4, 2).at(2, 3).with_min_size(Some(2), None));
        let json = board.save_state().unwrap();

        let mut other = floating();
        other.load_state(&json).unwrap();
        assert_eq!(other.widgets(), board.widgets());
        assert_eq!(other.events().last().map(GridEvent::name), Some("layout:change"));
    }

    #[test]
    fn failed_load_leaves_layout() {
        let mut board = board();
        board.add_widget(WidgetSpec::new("a", 4, 2));
        let before = board.state().clone();
        board.drain_events();
        assert!(matches!(board.load_state("[1, 2]"), Err(LoadError::NotAnObject)));
        assert!(matches!(board.load_state("{\"columns\": 4}"), Err(LoadError::MissingWidgets)));
        assert!(matches!(board.load_state("{"), Err(LoadError::InvalidJson(_))));
        assert_eq!(board.state(), &before);
        assert!(board.events().is_empty());
    }

    #[test]
    fn breakpoint_change_adapts_then_restores() {
        let mut board = floating();
        board.add_widget(WidgetSpec::new("a", 6, 2).at(6, 0));

        let narrow = BreakpointChange {
            name: "sm".into(),
            config: BreakpointConfig::new(576, 4).with_row_height(40.0),
            old_name: Some("lg".into()),
        };
        board.breakpoint_changed(&narrow);
        assert_eq!(board.state().columns, 4);
        assert_eq!(board.state().row_height, 40.0);
        assert_eq!(board.widget("a").unwrap().rect(), GridRect::new(0, 0, 4, 2));

        let wide = BreakpointChange {
            name: "lg".into(),
            config: BreakpointConfig::new(992, 12)
                .with_saved_layout(vec![Widget::new("a", 6, 0, 6, 2)]),
            old_name: Some("sm".into()),
        };
        board.breakpoint_changed(&wide);
        assert_eq!(board.widget("a").unwrap().rect(), GridRect::new(6, 0, 6, 2));
    }

    #[test]
    fn auto_scroll_offset_never_negative() {
        let mut board = board();
        board.scroll_by(30.0);
        board.scroll_by(-100.0);
        assert_eq!(board.scroll_top(), 0.0);
    }
}
