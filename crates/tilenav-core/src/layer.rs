//! A cell-value tile layer, the shape of a typical engine tilemap.
//!
//! Every tile holds a [`Cell`] value; one value is designated as the wall and
//! all tiles carrying it are non-walkable.

use std::fmt;

use crate::geom::{Point, Range, WorldPos};
use crate::source::TileSource;

/// A tile value, wrapping an `i32`.
///
/// Values are user-defined terrain ids; the layer's wall value marks the
/// non-walkable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    /// Wall cell used by [`TileLayer::parse`] and as the default wall value.
    pub const WALL: Cell = Cell(0);
    /// Floor cell used by [`TileLayer::parse`].
    pub const FLOOR: Cell = Cell(1);

    /// Create a new cell with the given value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// A `width × height` grid of [`Cell`] values with a world-space cell size.
#[derive(Debug, Clone)]
pub struct TileLayer {
    cells: Vec<Cell>,
    bounds: Range,
    wall: Cell,
    cell_size: WorldPos,
}

impl TileLayer {
    /// Create a layer filled with [`Cell::FLOOR`], unit cells, and
    /// [`Cell::WALL`] as the wall value. Negative dimensions yield an empty
    /// layer.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width.max(0), height.max(0));
        Self {
            cells: vec![Cell::FLOOR; bounds.len()],
            bounds,
            wall: Cell::WALL,
            cell_size: WorldPos::new(1.0, 1.0),
        }
    }

    /// Parse a layer from ASCII art: `#` is a wall, `.` or a space is floor.
    ///
    /// All lines must have the same width.
    pub fn parse(s: &str) -> Result<Self, MapParseError> {
        let lines: Vec<&str> = s.lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(MapParseError::Empty);
        }
        let mut layer = Self::new(width as i32, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(MapParseError::InconsistentSize {
                    line: y,
                    expected: width,
                    found: line.chars().count(),
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let cell = match ch {
                    '#' => Cell::WALL,
                    '.' | ' ' => Cell::FLOOR,
                    _ => return Err(MapParseError::InvalidRune { ch, pos }),
                };
                layer.set(pos, cell);
            }
        }
        Ok(layer)
    }

    /// Replace the wall value.
    pub fn with_wall(mut self, wall: Cell) -> Self {
        self.wall = wall;
        self
    }

    /// Replace the world size of one tile. Both components must be positive
    /// and finite; navigators reject any other size when configured.
    pub fn with_cell_size(mut self, cell_size: WorldPos) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// The cell value that marks non-walkable tiles.
    pub fn wall(&self) -> Cell {
        self.wall
    }

    /// Width of the layer.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the layer.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if !self.bounds.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// Fill the layer using a function that takes each point.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> Cell) {
        for p in self.bounds.iter() {
            let idx = self.index(p);
            self.cells[idx] = f(p);
        }
    }

    /// All tiles carrying the wall value, in row-major order.
    pub fn blocked_tiles(&self) -> Vec<Point> {
        self.bounds
            .iter()
            .filter(|&p| self.cells[self.index(p)] == self.wall)
            .collect()
    }
}

impl TileSource for TileLayer {
    fn size(&self) -> Point {
        self.bounds.size()
    }

    fn is_blocked(&self, p: Point) -> bool {
        self.at(p) == Some(self.wall)
    }

    fn cell_size(&self) -> WorldPos {
        self.cell_size
    }
}

impl fmt::Display for TileLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let p = Point::new(x, y);
                let ch = if self.is_blocked(p) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`TileLayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    /// The input has no tiles.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.` or space was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for MapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tile map: no tiles"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "tile map: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "tile map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapParseError {}
