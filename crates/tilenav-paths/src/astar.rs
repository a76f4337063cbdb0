use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tilenav_core::Point;

use crate::graph::{NavGraph, TileId};

// ---------------------------------------------------------------------------
// Internal node for priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Heap entry ordered by `f`, then by push order.
///
/// `f` is compared at a resolution of 1e-9, so sums of 1 and √2 that differ
/// only by rounding error count as ties and fall back to push order.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl NodeRef {
    const F_SCALE: f64 = 1e9;

    // Monotone in f, so the heap order stays total.
    fn f_key(&self) -> i64 {
        (self.f * Self::F_SCALE).round() as i64
    }
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest f first, and the
        // earliest pushed entry among equal f.
        other
            .f_key()
            .cmp(&self.f_key())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// AstarSearch
// ---------------------------------------------------------------------------

/// Reusable A* search state.
///
/// Owns the per-node scratch arrays and the open list so that repeated
/// queries against the same graph do not allocate after warm-up. The graph
/// itself is only borrowed, so one graph can serve several searches.
#[derive(Default)]
pub struct AstarSearch {
    nodes: Vec<Node>,
    generation: u32,
    open: BinaryHeap<NodeRef>,
    expanded: usize,
}

impl AstarSearch {
    /// Create an empty search; scratch space grows on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes expanded (moved to the closed set) by the last search.
    pub fn last_expanded(&self) -> usize {
        self.expanded
    }

    /// Compute the shortest path from `start` to `goal`.
    ///
    /// Returns the ids from `start` to `goal` inclusive, `[start]` when they
    /// are equal, and an empty vector when the goal is unreachable or either
    /// id is not a node of `graph`.
    pub fn find_path(&mut self, graph: &NavGraph, start: TileId, goal: TileId) -> Vec<TileId> {
        self.expanded = 0;
        if !graph.contains(start) || !graph.contains(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }

        if self.nodes.len() < graph.len() {
            self.nodes.resize(graph.len(), Node::default());
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        let cur_gen = self.generation;

        let heuristic = graph.config().heuristic();
        let goal_point = graph.point(goal);
        let start_idx = start.index();
        let goal_idx = goal.index();

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0.0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        self.open.clear();
        let mut seq: u64 = 0;
        self.open.push(NodeRef {
            idx: start_idx,
            f: heuristic.estimate(graph.point(start), goal_point),
            seq,
        });

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            self.expanded += 1;
            let current_g = self.nodes[ci].g;

            for edge in graph.neighbors(TileId(ci)) {
                let ni = edge.to.index();
                let tentative_g = current_g + edge.weight;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                seq += 1;
                self.open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + heuristic.estimate(graph.point(edge.to), goal_point),
                    seq,
                });
            }
        };

        if !found {
            return Vec::new();
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(TileId(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Tile-coordinate variant of [`find_path`](Self::find_path).
    ///
    /// Returns `None` if either endpoint is out of bounds or not walkable.
    pub fn find_point_path(
        &mut self,
        graph: &NavGraph,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start = graph.node(from)?;
        let goal = graph.node(to)?;
        let ids = self.find_path(graph, start, goal);
        Some(ids.into_iter().map(|id| graph.point(id)).collect())
    }
}
