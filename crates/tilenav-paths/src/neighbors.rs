use tilenav_core::Point;

use crate::config::Adjacency;

/// Cached neighbor computation helper.
///
/// Enumerates cardinal (4-way) or all (8-way) neighbors of a grid point,
/// filtered by a predicate, in a fixed order so graph construction is
/// reproducible.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return 4-directional (cardinal) neighbors of `p` in up, right, down,
    /// left order, keeping only those for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Return 8-directional neighbors of `p` in row-major order of the
    /// surrounding 3×3 block, keeping only those for which `keep` returns
    /// `true`.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = p.shift(dx, dy);
                if keep(n) {
                    self.buf.push(n);
                }
            }
        }
        &self.buf
    }

    /// Dispatch to [`cardinal`](Self::cardinal) or [`all`](Self::all).
    pub fn of(
        &mut self,
        adjacency: Adjacency,
        p: Point,
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        match adjacency {
            Adjacency::Cardinal => self.cardinal(p, keep),
            Adjacency::Diagonal => self.all(p, keep),
        }
    }
}
