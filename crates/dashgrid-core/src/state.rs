#![forbid(unsafe_code)]

//! Canonical layout state and its persisted JSON form.
//!
//! The persisted shape is `{ columns, rowHeight, margin, widgets: [...] }`.
//! Payloads go through [`PersistedLayout::parse`], which rejects anything that
//! is not an object with a `widgets` array before a single field is merged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GridConfig;
use crate::error::LoadError;
use crate::widget::{Widget, WidgetId};

/// The canonical dashboard state owned by the orchestrator.
///
/// `widgets` is kept in insertion order, not display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    pub columns: u32,
    pub row_height: f64,
    pub margin: f64,
    pub widgets: Vec<Widget>,
}

impl LayoutState {
    #[must_use]
    pub fn new(columns: u32, row_height: f64, margin: f64) -> Self {
        Self {
            columns: columns.max(1),
            row_height,
            margin,
            widgets: Vec::new(),
        }
    }

    /// Empty state using the grid dimensions of `config`.
    #[must_use]
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.columns, config.row_height, config.margin)
    }

    #[must_use]
    pub fn with_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.widgets = widgets;
        self
    }

    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id.as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.widget(id).is_some()
    }

    /// Serialize to the persisted JSON shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Copy of this state with a validated persisted payload merged in.
    ///
    /// Grid dimensions present in the payload replace the current ones; the
    /// widget list is always replaced.
    #[must_use]
    pub fn merge_persisted(&self, persisted: PersistedLayout) -> Self {
        Self {
            columns: persisted.columns.unwrap_or(self.columns),
            row_height: persisted.row_height.unwrap_or(self.row_height),
            margin: persisted.margin.unwrap_or(self.margin),
            widgets: persisted.widgets,
        }
    }
}

/// A persisted layout payload that passed validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLayout {
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub row_height: Option<f64>,
    #[serde(default)]
    pub margin: Option<f64>,
    pub widgets: Vec<Widget>,
}

impl PersistedLayout {
    /// Parse and validate a persisted layout document.
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Some(object) = value.as_object() else {
            return Err(LoadError::NotAnObject);
        };
        if !object.get("widgets").is_some_and(Value::is_array) {
            return Err(LoadError::MissingWidgets);
        }
        let layout: Self = serde_json::from_value(value)?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.columns == Some(0) {
            return Err(invalid("columns", "must be at least 1"));
        }
        if let Some(row_height) = self.row_height
            && !(row_height.is_finite() && row_height > 0.0)
        {
            return Err(invalid("rowHeight", "must be a positive number"));
        }
        if let Some(margin) = self.margin
            && !(margin.is_finite() && margin >= 0.0)
        {
            return Err(invalid("margin", "must be a non-negative number"));
        }
        let mut seen: Vec<&WidgetId> = Vec::with_capacity(self.widgets.len());
        for widget in &self.widgets {
            if widget.w == 0 || widget.h == 0 {
                return Err(invalid(
                    "widgets",
                    &format!("widget `{}` has a zero span", widget.id),
                ));
            }
            if seen.contains(&&widget.id) {
                return Err(invalid(
                    "widgets",
                    &format!("duplicate widget id `{}`", widget.id),
                ));
            }
            seen.push(&widget.id);
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> LoadError {
    LoadError::InvalidField {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}
