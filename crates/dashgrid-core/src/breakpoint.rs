#![forbid(unsafe_code)]

//! Breakpoint configuration records.

use serde::{Deserialize, Serialize};

use crate::widget::Widget;

/// A viewport-width threshold with the grid shape it activates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    /// Minimum viewport width (pixels) that activates this breakpoint.
    pub width: u32,
    pub columns: u32,
    /// Row height override; the current row height is kept when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_height: Option<f64>,
    /// Layout captured when this breakpoint was last switched away from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_layout: Option<Vec<Widget>>,
}

impl BreakpointConfig {
    #[must_use]
    pub fn new(width: u32, columns: u32) -> Self {
        Self {
            width,
            columns: columns.max(1),
            row_height: None,
            saved_layout: None,
        }
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = Some(row_height);
        self
    }

    #[must_use]
    pub fn with_saved_layout(mut self, layout: Vec<Widget>) -> Self {
        self.saved_layout = Some(layout);
        self
    }
}

/// The decision produced by a breakpoint switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointChange {
    pub name: String,
    pub config: BreakpointConfig,
    pub old_name: Option<String>,
}
