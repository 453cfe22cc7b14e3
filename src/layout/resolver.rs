//! Grid placement resolver.
//!
//! Assigns positions to widgets that lack one, without moving widgets that
//! are already placed. The scan is deterministic: candidate origins are
//! visited row-major (top to bottom, left to right), and the first origin
//! whose rectangle fits inside the grid and covers no occupied cell wins.
//! Rerunning the resolver on a fully positioned list is a no-op.

use std::collections::HashSet;

use log::{debug, warn};

use super::types::{GridDimensions, GridPoint, GridSize};
use crate::widgets::Widget;

pub struct PlacementResolver {
    dimensions: GridDimensions,
    occupied: HashSet<(u32, u32)>,
}

impl PlacementResolver {
    pub fn new(dimensions: GridDimensions) -> Self {
        let dimensions = GridDimensions {
            columns: dimensions.columns.max(1),
            max_rows: dimensions.max_rows,
        };
        Self {
            dimensions,
            occupied: HashSet::new(),
        }
    }

    /// Assigns a position to every widget that lacks one, in input order.
    /// Input order is the priority order for claiming space. Returns whether
    /// any widget was newly positioned.
    pub fn resolve_all(&mut self, widgets: &mut [Widget]) -> bool {
        for widget in widgets.iter() {
            if let Some(position) = widget.position {
                self.mark(position, widget.size);
            }
        }

        let mut repositioned = false;
        for widget in widgets.iter_mut().filter(|w| w.position.is_none()) {
            if widget.size.x > self.dimensions.columns {
                warn!(
                    "Widget {} ('{}') is wider than the grid ({} > {} columns); clamping",
                    widget.id, widget.kind, widget.size.x, self.dimensions.columns
                );
                widget.size.x = self.dimensions.columns;
            }

            let row_bound = self.dimensions.is_bounded().then_some(self.dimensions.max_rows);
            let origin = match self.find_origin(widget.size, row_bound) {
                Some(origin) => Some(origin),
                None if row_bound.is_some() => {
                    // Overflow pass: the bounded region is full, so place the
                    // widget below it rather than leave it unpositioned.
                    debug!(
                        "No room for widget {} within {} rows; overflowing below the grid",
                        widget.id, self.dimensions.max_rows
                    );
                    self.find_origin(widget.size, None)
                }
                None => None,
            };

            if let Some(origin) = origin {
                debug!("Placed widget {} ({}) at {}", widget.id, widget.size, origin);
                widget.position = Some(origin);
                self.mark(origin, widget.size);
                repositioned = true;
            }
        }
        repositioned
    }

    /// First origin, in row-major order, whose rectangle fits. With no row
    /// bound the scan ends one row past the lowest occupied cell, where a
    /// fully free row is guaranteed to exist.
    fn find_origin(&self, size: GridSize, row_bound: Option<u32>) -> Option<GridPoint> {
        let max_x = self.dimensions.columns.checked_sub(size.x)?;
        let max_y = match row_bound {
            Some(rows) => rows.checked_sub(size.y)?,
            None => self.first_free_row(),
        };

        for y in 0..=max_y {
            for x in 0..=max_x {
                let origin = GridPoint::new(x, y);
                if self.fits(origin, size) {
                    return Some(origin);
                }
            }
        }
        None
    }

    fn first_free_row(&self) -> u32 {
        self.occupied
            .iter()
            .map(|&(_, y)| y + 1)
            .max()
            .unwrap_or(0)
    }

    fn fits(&self, origin: GridPoint, size: GridSize) -> bool {
        for y in origin.y..origin.y + size.y {
            for x in origin.x..origin.x + size.x {
                if self.occupied.contains(&(x, y)) {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, origin: GridPoint, size: GridSize) {
        for y in origin.y..origin.y + size.y {
            for x in origin.x..origin.x + size.x {
                self.occupied.insert((x, y));
            }
        }
    }
}
