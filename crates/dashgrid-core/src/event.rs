#![forbid(unsafe_code)]

//! Notifications emitted to the orchestrator's event sink.
//!
//! Move and resize payloads carry *proposed* geometry; only `*:end` events
//! with `moved`/`resized` set reflect a commit.

use serde::{Deserialize, Serialize};

use crate::breakpoint::BreakpointChange;
use crate::state::LayoutState;
use crate::widget::{Widget, WidgetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    DragStart {
        widget: Widget,
        x: u32,
        y: u32,
    },
    DragMove {
        widget: Widget,
        x: u32,
        y: u32,
    },
    DragEnd {
        widget: Widget,
        x: u32,
        y: u32,
        moved: bool,
    },
    DragCancel {
        widget: Widget,
    },
    ResizeStart {
        widget: Widget,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    },
    ResizeMove {
        widget: Widget,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    },
    ResizeEnd {
        widget: Widget,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        resized: bool,
    },
    ResizeCancel {
        widget: Widget,
    },
    BreakpointChange(BreakpointChange),
    LayoutChange(LayoutState),
    WidgetAdd {
        widget: Widget,
    },
    WidgetRemove {
        id: WidgetId,
    },
    WidgetUpdate {
        widget: Widget,
    },
}

impl GridEvent {
    /// Wire name of the event (`"drag:start"`, `"layout:change"`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "drag:start",
            Self::DragMove { .. } => "drag:move",
            Self::DragEnd { .. } => "drag:end",
            Self::DragCancel { .. } => "drag:cancel",
            Self::ResizeStart { .. } => "resize:start",
            Self::ResizeMove { .. } => "resize:move",
            Self::ResizeEnd { .. } => "resize:end",
            Self::ResizeCancel { .. } => "resize:cancel",
            Self::BreakpointChange(_) => "breakpoint:change",
            Self::LayoutChange(_) => "layout:change",
            Self::WidgetAdd { .. } => "widget:add",
            Self::WidgetRemove { .. } => "widget:remove",
            Self::WidgetUpdate { .. } => "widget:update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        let w = Widget::new("a", 0, 0, 1, 1);
        assert_eq!(
            GridEvent::DragMove {
                widget: w.clone(),
                x: 1,
                y: 2
            }
            .name(),
            "drag:move"
        );
        assert_eq!(
            GridEvent::ResizeCancel { widget: w }.name(),
            "resize:cancel"
        );
        assert_eq!(
            GridEvent::WidgetRemove { id: "a".into() }.name(),
            "widget:remove"
        );
    }
}
