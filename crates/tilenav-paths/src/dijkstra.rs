use std::collections::BinaryHeap;

use crate::astar::NodeRef;
use crate::distmap::{DistanceMap, PathNode};
use crate::graph::{NavGraph, TileId};

impl NavGraph {
    /// Compute a multi-source Dijkstra cost map over the edge weights.
    ///
    /// Every source starts at cost 0. Expansion stops when the cumulative
    /// cost exceeds `max_cost`; pass `f64::INFINITY` for no limit.
    pub fn cost_map(&self, sources: &[TileId], max_cost: f64) -> DistanceMap<f64> {
        let mut map = DistanceMap::new(self);
        let mut settled = vec![false; self.len()];
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq = 0;

        for &src in sources {
            if !self.contains(src) || map.values[src.index()].is_some() {
                continue;
            }
            map.values[src.index()] = Some(0.0);
            open.push(NodeRef {
                idx: src.index(),
                f: 0.0,
                seq,
            });
            seq += 1;
        }

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if settled[ci] {
                continue;
            }
            settled[ci] = true;
            let current_g = current.f;
            map.reached.push(PathNode {
                pos: self.point(TileId(ci)),
                cost: current_g,
            });

            for edge in self.neighbors(TileId(ci)) {
                let ni = edge.to.index();
                if settled[ni] {
                    continue;
                }
                let tentative = current_g + edge.weight;
                if tentative > max_cost {
                    continue;
                }
                if map.values[ni].is_some_and(|g| tentative >= g) {
                    continue;
                }
                map.values[ni] = Some(tentative);
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    seq,
                });
                seq += 1;
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::f64::consts::SQRT_2;

    use tilenav_core::Point;

    use crate::config::NavConfig;
    use crate::graph::NavGraph;

    #[test]
    fn costs_on_open_diagonal_grid() {
        let g = NavGraph::build(4, 4, &HashSet::new(), NavConfig::diagonal()).unwrap();
        let map = g.cost_map(&[g.node(Point::new(0, 0)).unwrap()], f64::INFINITY);
        for p in g.bounds() {
            let expect = crate::octile(Point::ZERO, p);
            let got = map.at(p).unwrap();
            assert!((got - expect).abs() < 1e-9, "{p}: {got} vs {expect}");
        }
        assert_eq!(map.reached().len(), 16);
        // Settled in non-decreasing cost order.
        for w in map.reached().windows(2) {
            assert!(w[0].cost <= w[1].cost);
        }
    }

    #[test]
    fn max_cost_limits_expansion() {
        let g = NavGraph::build(5, 1, &HashSet::new(), NavConfig::cardinal()).unwrap();
        let map = g.cost_map(&[g.node(Point::new(0, 0)).unwrap()], 2.0);
        assert_eq!(map.at(Point::new(2, 0)), Some(2.0));
        assert_eq!(map.at(Point::new(3, 0)), None);
        assert_eq!(map.reached().len(), 3);
    }

    #[test]
    fn diagonal_shortcut_is_cheaper() {
        let g = NavGraph::build(2, 2, &HashSet::new(), NavConfig::diagonal()).unwrap();
        let map = g.cost_map(&[g.node(Point::new(0, 0)).unwrap()], f64::INFINITY);
        assert_eq!(map.at(Point::new(1, 1)), Some(SQRT_2));
    }
}
