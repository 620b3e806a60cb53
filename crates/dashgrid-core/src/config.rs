#![forbid(unsafe_code)]

//! Typed grid configuration.
//!
//! [`GridConfig`] is the full option record for a dashboard. Every field has
//! a default, so a JSON document only needs the fields it overrides:
//!
//! ```
//! use dashgrid_core::GridConfig;
//!
//! let config = GridConfig::from_json_str(r#"{ "columns": 6, "floatMode": true }"#).unwrap();
//! assert_eq!(config.columns, 6);
//! assert!(config.float_mode);
//! assert_eq!(config.row_height, 60.0);
//! ```

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_COLUMNS: u32 = 12;
pub const DEFAULT_ROW_HEIGHT: f64 = 60.0;
pub const DEFAULT_MARGIN: f64 = 10.0;
pub const DEFAULT_BREAKPOINT_DEBOUNCE_MS: u64 = 150;

/// Edge-scrolling behaviour while a drag or resize session is open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoScrollConfig {
    /// Distance from the container edge (pixels) that arms scrolling.
    pub threshold: f64,
    /// Pixels scrolled per tick.
    pub step: f64,
    /// Tick period in milliseconds.
    pub interval_ms: u64,
}

impl AutoScrollConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            step: 10.0,
            interval_ms: 16,
        }
    }
}

/// Dashboard options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Column count (at least one).
    pub columns: u32,
    /// Pixel height of one row.
    pub row_height: f64,
    /// Pixel gutter between cells.
    pub margin: f64,
    /// When false, every committed layout is compacted upward.
    pub float_mode: bool,
    /// Place widgets added without a position in the first free slot.
    pub auto_position: bool,
    /// Renderer hint; the layout engine never reads it.
    pub animate: bool,
    /// Optional cap on `y + h` for placement queries.
    pub max_rows: Option<u32>,
    pub breakpoint_debounce_ms: u64,
    pub auto_scroll: AutoScrollConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            row_height: DEFAULT_ROW_HEIGHT,
            margin: DEFAULT_MARGIN,
            float_mode: false,
            auto_position: true,
            animate: true,
            max_rows: None,
            breakpoint_debounce_ms: DEFAULT_BREAKPOINT_DEBOUNCE_MS,
            auto_scroll: AutoScrollConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        if self.auto_scroll.interval_ms == 0 {
            return Err(ConfigError::ZeroScrollInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_float_mode(mut self, float_mode: bool) -> Self {
        self.float_mode = float_mode;
        self
    }

    #[must_use]
    pub fn with_auto_position(mut self, auto_position: bool) -> Self {
        self.auto_position = auto_position;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: Option<u32>) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    #[must_use]
    pub fn with_breakpoint_debounce_ms(mut self, breakpoint_debounce_ms: u64) -> Self {
        self.breakpoint_debounce_ms = breakpoint_debounce_ms;
        self
    }

    /// Debounce window for viewport resize evaluation.
    #[must_use]
    pub fn breakpoint_debounce(&self) -> Duration {
        Duration::from_millis(self.breakpoint_debounce_ms)
    }
}
