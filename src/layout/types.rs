use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the widget grid. The origin is the top-left corner;
/// `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A widget extent in grid cells. Both axes are at least 1 for any widget
/// that is actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub x: u32,
    pub y: u32,
}

impl GridSize {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// The area available to the placement resolver. `max_rows == 0` means the
/// grid grows downwards without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub columns: u32,
    pub max_rows: u32,
}

impl GridDimensions {
    pub fn bounded(columns: u32, max_rows: u32) -> Self {
        Self { columns, max_rows }
    }

    pub fn unbounded(columns: u32) -> Self {
        Self {
            columns,
            max_rows: 0,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.max_rows > 0
    }
}

/// Per-workspace grid configuration, persisted as part of the workspace
/// record. Field names match the stored JSON of the pre-workspace layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    pub full_page: bool,
    pub columns: u32,
    pub spacing: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            full_page: false,
            columns: 15,
            spacing: 15,
        }
    }
}

impl GridSettings {
    /// Returns a copy with `columns` raised to the minimum of 1. Stored
    /// settings may predate validation.
    pub fn sanitized(self) -> Self {
        Self {
            columns: self.columns.max(1),
            ..self
        }
    }
}
