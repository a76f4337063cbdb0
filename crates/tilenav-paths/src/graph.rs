//! Navigation graph over the walkable tiles of a grid.
//!
//! Every walkable tile is a node keyed by its [`TileId`]; edges join
//! grid-adjacent walkable tiles. The graph is built once per map and is
//! read-only afterwards, so it can be shared between concurrent searches.

use std::collections::HashSet;
use std::f64::consts::SQRT_2;
use std::fmt;

use tilenav_core::{Point, Range, TileSource};

use crate::astar::AstarSearch;
use crate::config::{Adjacency, NavConfig};
use crate::error::NavError;
use crate::neighbors::Neighbors;

/// Weight of a cardinal edge.
pub const CARDINAL_WEIGHT: f64 = 1.0;
/// Weight of a diagonal edge.
pub const DIAGONAL_WEIGHT: f64 = SQRT_2;

/// Node key: `y * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub usize);

impl TileId {
    /// The id as a flat index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: TileId,
    pub weight: f64,
}

/// Weighted undirected adjacency graph of walkable tiles.
///
/// Both directions of every edge are stored, so `neighbors(a)` contains `b`
/// exactly when `neighbors(b)` contains `a`.
#[derive(Debug, Clone)]
pub struct NavGraph {
    bounds: Range,
    config: NavConfig,
    registered: Vec<bool>,
    adjacency: Vec<Vec<Edge>>,
    node_count: usize,
    edge_count: usize,
}

impl NavGraph {
    /// Build a graph for a `width × height` grid where the tiles in
    /// `non_walkable` are blocked.
    pub fn build(
        width: i32,
        height: i32,
        non_walkable: &HashSet<Point>,
        config: NavConfig,
    ) -> Result<Self, NavError> {
        Self::build_with(width, height, |p| non_walkable.contains(&p), config)
    }

    /// Build a graph from a tile source, querying its obstacles once.
    pub fn from_source<S: TileSource + ?Sized>(
        source: &S,
        config: NavConfig,
    ) -> Result<Self, NavError> {
        let size = source.size();
        Self::build_with(size.x, size.y, |p| source.is_blocked(p), config)
    }

    fn build_with(
        width: i32,
        height: i32,
        blocked: impl Fn(Point) -> bool,
        config: NavConfig,
    ) -> Result<Self, NavError> {
        if width < 0 || height < 0 {
            return Err(NavError::InvalidDimensions { width, height });
        }
        config.validate()?;

        let bounds = Range::with_size(width, height);
        let len = bounds.len();
        let w = width as usize;
        let id = |p: Point| p.y as usize * w + p.x as usize;

        // Register nodes in row-major order.
        let mut registered = vec![false; len];
        let mut node_count = 0;
        for p in bounds.iter() {
            if !blocked(p) {
                registered[id(p)] = true;
                node_count += 1;
            }
        }

        let walkable = |p: Point| bounds.contains(p) && registered[id(p)];
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); len];
        let mut nb = Neighbors::new();
        let mut directed = 0;
        for p in bounds.iter() {
            if !registered[id(p)] {
                continue;
            }
            let keep = |n: Point| {
                if !walkable(n) {
                    return false;
                }
                // Diagonal steps need both flanking tiles unless corners may be cut.
                config.corner_cutting
                    || !p.is_diagonal_to(n)
                    || (walkable(Point::new(n.x, p.y)) && walkable(Point::new(p.x, n.y)))
            };
            let edges = &mut adjacency[id(p)];
            for &n in nb.of(config.adjacency, p, keep) {
                let weight = if p.is_diagonal_to(n) {
                    DIAGONAL_WEIGHT
                } else {
                    CARDINAL_WEIGHT
                };
                edges.push(Edge {
                    to: TileId(id(n)),
                    weight,
                });
            }
            directed += edges.len();
        }

        let graph = Self {
            bounds,
            config,
            registered,
            adjacency,
            node_count,
            edge_count: directed / 2,
        };
        log::debug!(
            "built nav graph {}x{}: {} nodes, {} edges ({:?}, corner cutting: {})",
            width,
            height,
            graph.node_count,
            graph.edge_count,
            config.adjacency,
            config.corner_cutting
        );
        Ok(graph)
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Tile bounds of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Configuration the graph was built with.
    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Adjacency the graph was built with.
    #[inline]
    pub fn adjacency(&self) -> Adjacency {
        self.config.adjacency
    }

    /// Number of slots in the id space (`width * height`).
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.registered.len()
    }

    /// Id of an in-bounds tile, registered or not.
    #[inline]
    pub fn tile_id(&self, p: Point) -> Option<TileId> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(TileId(p.y as usize * self.width() as usize + p.x as usize))
    }

    /// Tile coordinate of an id.
    #[inline]
    pub fn point(&self, id: TileId) -> Point {
        let w = self.width().max(1) as usize;
        Point::new((id.0 % w) as i32, (id.0 / w) as i32)
    }

    /// Whether `id` is a registered node.
    #[inline]
    pub fn contains(&self, id: TileId) -> bool {
        self.registered.get(id.0).copied().unwrap_or(false)
    }

    /// Id of `p` if it is a registered (walkable, in-bounds) node.
    #[inline]
    pub fn node(&self, p: Point) -> Option<TileId> {
        self.tile_id(p).filter(|&id| self.contains(id))
    }

    /// Whether `p` is in bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.node(p).is_some()
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Outgoing edges of `id`; empty for unregistered ids.
    pub fn neighbors(&self, id: TileId) -> &[Edge] {
        self.adjacency.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Weight of the edge between `a` and `b`, if any.
    pub fn edge_weight(&self, a: TileId, b: TileId) -> Option<f64> {
        self.neighbors(a).iter().find(|e| e.to == b).map(|e| e.weight)
    }

    /// Registered node ids in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = TileId> + '_ {
        self.registered
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(i, _)| TileId(i))
    }

    /// Shortest path between two tiles with a fresh search.
    ///
    /// Returns `None` if either endpoint is not walkable, an empty vector if
    /// the goal is unreachable.
    pub fn find_path(&self, from: Point, to: Point) -> Option<Vec<Point>> {
        AstarSearch::new().find_point_path(self, from, to)
    }

    /// Sum of the edge weights along `path`, or `None` if two consecutive
    /// tiles are not connected.
    pub fn path_cost(&self, path: &[Point]) -> Option<f64> {
        let mut cost = 0.0;
        for w in path.windows(2) {
            let a = self.node(w[0])?;
            let b = self.node(w[1])?;
            cost += self.edge_weight(a, b)?;
        }
        Some(cost)
    }
}
