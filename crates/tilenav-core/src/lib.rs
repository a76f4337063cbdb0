//! **tilenav-core**: tile-grid geometry and tile sources.
//!
//! This crate provides the types shared by the *tilenav* crates: integer
//! tile coordinates and ranges, world-space positions, and the
//! [`TileSource`] trait through which a tilemap describes its bounds,
//! obstacles and world/tile conversion.

pub mod geom;
pub mod layer;
pub mod source;

pub use geom::{Point, Range, RangeIter, WorldPos};
pub use layer::{Cell, MapParseError, TileLayer};
pub use source::{ObstacleSet, TileSource};
