//! Shortest paths on tile grids.
//!
//! This crate turns a tile grid into a navigation graph and answers
//! shortest-path queries over it:
//!
//! - **Graph building** from a [`TileSource`](tilenav_core::TileSource) or a
//!   set of blocked tiles ([`NavGraph::from_source`], [`NavGraph::build`]),
//!   with 4-way or 8-way adjacency
//! - **A\*** shortest-path search with stable FIFO tie-breaking
//!   ([`AstarSearch::find_path`])
//! - **BFS** hop-count maps ([`NavGraph::hop_map`])
//! - **Dijkstra** weighted cost maps ([`NavGraph::cost_map`])
//! - A query layer that validates endpoints, stores the current path and
//!   converts to and from world space ([`Navigator`])
//!
//! The graph is read-only after it is built. Searches keep their scratch
//! space in [`AstarSearch`], so one graph can back several searches.
//!
//! # Edge weights
//!
//! | Step | Weight |
//! |---|---|
//! | cardinal | [`CARDINAL_WEIGHT`] (1) |
//! | diagonal | [`DIAGONAL_WEIGHT`] (√2) |

mod astar;
mod bfs;
mod config;
mod cursor;
mod dijkstra;
mod distance;
mod distmap;
mod error;
mod graph;
mod navigator;
mod neighbors;

pub use astar::AstarSearch;
pub use config::{Adjacency, Heuristic, NavConfig};
pub use cursor::PathCursor;
pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use distmap::{DistanceMap, PathNode};
pub use error::{NavError, QueryError};
pub use graph::{CARDINAL_WEIGHT, DIAGONAL_WEIGHT, Edge, NavGraph, TileId};
pub use navigator::Navigator;
pub use neighbors::Neighbors;
