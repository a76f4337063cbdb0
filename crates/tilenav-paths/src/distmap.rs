use tilenav_core::Point;

use crate::graph::{NavGraph, TileId};

/// A position with an associated cost, returned from distance-map queries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<T> {
    pub pos: Point,
    pub cost: T,
}

/// Per-tile distances from a set of sources, as produced by
/// [`NavGraph::hop_map`] and [`NavGraph::cost_map`].
#[derive(Debug, Clone)]
pub struct DistanceMap<T> {
    pub(crate) values: Vec<Option<T>>,
    pub(crate) reached: Vec<PathNode<T>>,
    width: i32,
}

impl<T: Copy> DistanceMap<T> {
    pub(crate) fn new(graph: &NavGraph) -> Self {
        Self {
            values: vec![None; graph.len()],
            reached: Vec::new(),
            width: graph.width(),
        }
    }

    /// Distance of `id`, or `None` if it was not reached.
    pub fn get(&self, id: TileId) -> Option<T> {
        self.values.get(id.index()).copied().flatten()
    }

    /// Distance of the tile at `p`, or `None` if it is out of bounds or was
    /// not reached.
    pub fn at(&self, p: Point) -> Option<T> {
        if p.x < 0 || p.y < 0 || p.x >= self.width {
            return None;
        }
        self.values
            .get(p.y as usize * self.width as usize + p.x as usize)
            .copied()
            .flatten()
    }

    /// Reached tiles in the order they were settled.
    pub fn reached(&self) -> &[PathNode<T>] {
        &self.reached
    }
}
