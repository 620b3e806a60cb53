#![forbid(unsafe_code)]

//! Error types for the few hard failure modes: malformed persisted layouts
//! and invalid configuration. Expected negative outcomes (unknown widget,
//! locked widget, unchanged geometry) are `Option`/`bool` returns instead.

use std::fmt;

/// A persisted layout payload was rejected before it touched live state.
#[derive(Debug)]
pub enum LoadError {
    /// The payload is not valid JSON or does not match the widget schema.
    InvalidJson(serde_json::Error),
    /// The payload parsed, but its top level is not an object.
    NotAnObject,
    /// The payload has no `widgets` array.
    MissingWidgets,
    /// A field holds a value the layout model cannot represent.
    InvalidField { field: String, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "layout payload is not valid JSON: {err}"),
            Self::NotAnObject => write!(f, "layout payload must be a JSON object"),
            Self::MissingWidgets => write!(f, "layout payload has no `widgets` array"),
            Self::InvalidField { field, reason } => {
                write!(f, "layout field `{field}` is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidJson(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err)
    }
}

/// Grid configuration could not be parsed or violates a basic constraint.
#[derive(Debug)]
pub enum ConfigError {
    ZeroColumns,
    InvalidRowHeight(f64),
    InvalidMargin(f64),
    ZeroScrollInterval,
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => write!(f, "grid must have at least one column"),
            Self::InvalidRowHeight(value) => {
                write!(f, "row height must be a positive number (got {value})")
            }
            Self::InvalidMargin(value) => {
                write!(f, "margin must be a non-negative number (got {value})")
            }
            Self::ZeroScrollInterval => {
                write!(f, "auto-scroll interval must be greater than zero")
            }
            Self::Parse(err) => write!(f, "invalid grid configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Parse(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
