//! Grid geometry and the placement resolver.

pub mod resolver;
pub mod types;

pub use resolver::PlacementResolver;
pub use types::{GridDimensions, GridPoint, GridSettings, GridSize};
