use std::collections::VecDeque;

use crate::distmap::{DistanceMap, PathNode};
use crate::graph::{NavGraph, TileId};

impl NavGraph {
    /// Compute a multi-source breadth-first hop-count map.
    ///
    /// Every edge counts as one hop regardless of its weight. Sources that
    /// are not nodes of the graph are ignored.
    pub fn hop_map(&self, sources: &[TileId]) -> DistanceMap<u32> {
        let mut map = DistanceMap::new(self);
        let mut queue: VecDeque<TileId> = VecDeque::new();

        for &src in sources {
            if !self.contains(src) || map.values[src.index()].is_some() {
                continue;
            }
            map.values[src.index()] = Some(0);
            map.reached.push(PathNode {
                pos: self.point(src),
                cost: 0,
            });
            queue.push_back(src);
        }

        while let Some(ci) = queue.pop_front() {
            let Some(current) = map.values[ci.index()] else {
                continue;
            };
            for edge in self.neighbors(ci) {
                let ni = edge.to.index();
                if map.values[ni].is_some() {
                    continue;
                }
                map.values[ni] = Some(current + 1);
                map.reached.push(PathNode {
                    pos: self.point(edge.to),
                    cost: current + 1,
                });
                queue.push_back(edge.to);
            }
        }

        map
    }
}
