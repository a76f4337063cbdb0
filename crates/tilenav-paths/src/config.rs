//! Navigation configuration: adjacency, corner cutting and heuristic choice.

use std::fmt;

use tilenav_core::Point;

use crate::distance;
use crate::error::NavError;

/// Which neighbours of a tile are connected in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// 4-way: up, right, down, left. Every edge weighs 1.
    Cardinal,
    /// 8-way: cardinal edges weigh 1, diagonal edges √2.
    #[default]
    Diagonal,
}

impl Adjacency {
    /// Whether diagonal edges are built.
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::Diagonal)
    }

    /// Heuristic used when none is configured explicitly.
    pub fn default_heuristic(self) -> Heuristic {
        match self {
            Self::Cardinal => Heuristic::Manhattan,
            Self::Diagonal => Heuristic::Euclidean,
        }
    }
}

/// A* remaining-cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Octile,
    Chebyshev,
    /// Always 0: A* degrades to Dijkstra.
    Zero,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Manhattan => f64::from(distance::manhattan(from, to)),
            Self::Euclidean => distance::euclidean(from, to),
            Self::Octile => distance::octile(from, to),
            Self::Chebyshev => f64::from(distance::chebyshev(from, to)),
            Self::Zero => 0.0,
        }
    }

    /// Whether the estimate never exceeds the true cost under `adjacency`.
    ///
    /// Manhattan overestimates a √2 diagonal step, every other heuristic is
    /// bounded by the octile distance.
    pub fn is_admissible(self, adjacency: Adjacency) -> bool {
        !(self == Self::Manhattan && adjacency.is_diagonal())
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Octile => "octile",
            Self::Chebyshev => "chebyshev",
            Self::Zero => "zero",
        };
        f.write_str(name)
    }
}

/// Configuration for building a [`NavGraph`](crate::NavGraph) and searching it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub adjacency: Adjacency,
    /// Allow a diagonal edge even when one or both flanking cardinal tiles are
    /// blocked. Ignored for cardinal adjacency.
    pub corner_cutting: bool,
    /// Explicit heuristic; `None` picks [`Adjacency::default_heuristic`].
    pub heuristic: Option<Heuristic>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            adjacency: Adjacency::Diagonal,
            corner_cutting: true,
            heuristic: None,
        }
    }
}

impl NavConfig {
    /// 4-way movement with the Manhattan heuristic.
    pub fn cardinal() -> Self {
        Self::default().with_adjacency(Adjacency::Cardinal)
    }

    /// 8-way movement with permissive corner cutting.
    pub fn diagonal() -> Self {
        Self::default()
    }

    /// Replace the adjacency.
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Enable or disable diagonal corner cutting.
    pub fn with_corner_cutting(mut self, corner_cutting: bool) -> Self {
        self.corner_cutting = corner_cutting;
        self
    }

    /// Use an explicit heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    /// The heuristic searches will use.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
            .unwrap_or_else(|| self.adjacency.default_heuristic())
    }

    /// Reject combinations that would break path optimality.
    pub fn validate(&self) -> Result<(), NavError> {
        let heuristic = self.heuristic();
        if !heuristic.is_admissible(self.adjacency) {
            return Err(NavError::InadmissibleHeuristic {
                heuristic,
                adjacency: self.adjacency,
            });
        }
        Ok(())
    }
}
