//! The tile-source collaborator: grid bounds, walkability and world/tile
//! coordinate conversion.

use std::collections::HashSet;

use crate::geom::{Point, Range, WorldPos};

/// Something that can describe a tile grid to the navigation layer.
///
/// Implementors supply the grid size, which tiles are blocked, and how world
/// positions map onto tiles. The navigation graph queries a source once, when
/// it is built.
pub trait TileSource {
    /// Grid size as a `Point` (x = width, y = height).
    fn size(&self) -> Point;

    /// Whether the in-bounds tile `p` is marked non-walkable.
    fn is_blocked(&self, p: Point) -> bool;

    /// Size of one tile in world units.
    fn cell_size(&self) -> WorldPos;

    /// Tile bounds `[0, width) × [0, height)`.
    fn bounds(&self) -> Range {
        let s = self.size();
        Range::with_size(s.x, s.y)
    }

    /// Whether `p` is in bounds and not blocked.
    fn is_walkable(&self, p: Point) -> bool {
        self.bounds().contains(p) && !self.is_blocked(p)
    }

    /// Tile containing the world position `pos` (floor division by the cell
    /// size). The result may lie outside the bounds.
    ///
    /// Returns `None` when the division is not finite: a NaN or infinite
    /// position, or a zero cell size.
    fn world_to_tile(&self, pos: WorldPos) -> Option<Point> {
        let cs = self.cell_size();
        let tile = WorldPos::new((pos.x / cs.x).floor(), (pos.y / cs.y).floor());
        if !tile.is_finite() {
            return None;
        }
        Some(Point::new(tile.x as i32, tile.y as i32))
    }

    /// World position of the top-left corner of tile `p`.
    fn tile_to_world(&self, p: Point) -> WorldPos {
        let cs = self.cell_size();
        WorldPos::new(p.x as f32 * cs.x, p.y as f32 * cs.y)
    }
}

impl<T: TileSource + ?Sized> TileSource for &T {
    fn size(&self) -> Point {
        (**self).size()
    }

    fn is_blocked(&self, p: Point) -> bool {
        (**self).is_blocked(p)
    }

    fn cell_size(&self) -> WorldPos {
        (**self).cell_size()
    }

    fn world_to_tile(&self, pos: WorldPos) -> Option<Point> {
        (**self).world_to_tile(pos)
    }

    fn tile_to_world(&self, p: Point) -> WorldPos {
        (**self).tile_to_world(p)
    }
}

/// A grid described by its dimensions and an explicit set of blocked tiles.
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    size: Point,
    blocked: HashSet<Point>,
    cell_size: WorldPos,
}

impl ObstacleSet {
    /// Create a `width × height` grid with no obstacles and unit cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Point::new(width, height),
            blocked: HashSet::new(),
            cell_size: WorldPos::new(1.0, 1.0),
        }
    }

    /// Replace the world size of one tile. Both components must be positive
    /// and finite; navigators reject any other size when configured.
    pub fn with_cell_size(mut self, cell_size: WorldPos) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Add obstacles from an iterator of coordinates.
    pub fn with_blocked<I, P>(mut self, tiles: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        self.blocked.extend(tiles.into_iter().map(Into::into));
        self
    }

    /// Mark a single tile as blocked. Returns `false` if it already was.
    pub fn block(&mut self, p: Point) -> bool {
        self.blocked.insert(p)
    }

    /// The set of blocked coordinates. Entries may lie out of bounds; those
    /// have no effect.
    pub fn blocked(&self) -> &HashSet<Point> {
        &self.blocked
    }
}

impl TileSource for ObstacleSet {
    fn size(&self) -> Point {
        self.size
    }

    fn is_blocked(&self, p: Point) -> bool {
        self.blocked.contains(&p)
    }

    fn cell_size(&self) -> WorldPos {
        self.cell_size
    }
}
