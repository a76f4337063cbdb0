//! Error types for graph construction and path queries.

use std::fmt;

use tilenav_core::{Point, WorldPos};

use crate::config::{Adjacency, Heuristic};

/// Fatal configuration errors, reported when a graph is built.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// Grid width or height is negative.
    InvalidDimensions { width: i32, height: i32 },
    /// A cell size component is zero, negative, NaN or infinite.
    InvalidCellSize { cell_size: WorldPos },
    /// The heuristic can overestimate under the configured adjacency.
    InadmissibleHeuristic {
        heuristic: Heuristic,
        adjacency: Adjacency,
    },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::InvalidCellSize { cell_size } => {
                write!(f, "invalid cell size {cell_size}, both sides must be positive and finite")
            }
            Self::InadmissibleHeuristic {
                heuristic,
                adjacency,
            } => write!(
                f,
                "heuristic {heuristic} is not admissible with {adjacency:?} adjacency"
            ),
        }
    }
}

impl std::error::Error for NavError {}

/// Why a path query was rejected before search.
///
/// An unreachable goal is not an error: it yields an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// No tile source has been configured yet.
    Unconfigured,
    /// The tile is out of bounds or non-walkable.
    InvalidTile(Point),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => write!(
                f,
                "navigator has no tile source, call configure() before requesting paths"
            ),
            Self::InvalidTile(p) => write!(f, "tile {p} is out of bounds or not walkable"),
        }
    }
}

impl std::error::Error for QueryError {}
