//! Query layer: endpoint validation, the stored current path, and world-space
//! conversion through the configured tile source.

use tilenav_core::{Point, TileSource, WorldPos};

use crate::astar::AstarSearch;
use crate::config::NavConfig;
use crate::error::{NavError, QueryError};
use crate::graph::NavGraph;

struct Loaded<S> {
    source: S,
    graph: NavGraph,
    half_tile: WorldPos,
}

/// Path requests against a tile source whose graph is built once per map.
///
/// Rejected requests leave the stored start, end and path untouched and
/// report `false`. A request that passes validation always overwrites the
/// stored path, with an empty path when the goal is unreachable.
///
/// ```
/// use tilenav_core::{Point, TileLayer};
/// use tilenav_paths::{NavConfig, Navigator};
///
/// let map = TileLayer::parse("...\n.#.\n...").unwrap();
/// let mut nav = Navigator::new();
/// nav.configure(map, NavConfig::cardinal()).unwrap();
/// assert!(nav.try_set_end(Point::new(2, 2)));
/// assert!(nav.try_set_start(Point::new(0, 0)));
/// assert_eq!(nav.current_path().len(), 5);
/// assert!(!nav.try_set_start(Point::new(1, 1)));
/// ```
pub struct Navigator<S> {
    loaded: Option<Loaded<S>>,
    search: AstarSearch,
    start: Option<Point>,
    end: Option<Point>,
    path: Vec<Point>,
    version: u64,
}

impl<S> Default for Navigator<S> {
    fn default() -> Self {
        Self {
            loaded: None,
            search: AstarSearch::new(),
            start: None,
            end: None,
            path: Vec::new(),
            version: 0,
        }
    }
}

impl<S: TileSource> Navigator<S> {
    /// Create an unconfigured navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator and configure it in one step.
    pub fn with_source(source: S, config: NavConfig) -> Result<Self, NavError> {
        let mut nav = Self::new();
        nav.configure(source, config)?;
        Ok(nav)
    }

    /// Build the navigation graph for `source`.
    ///
    /// Replaces any previous graph wholesale and clears the start, end and
    /// stored path. The source's cell size must be positive and finite. On
    /// error the navigator keeps its previous state.
    pub fn configure(&mut self, source: S, config: NavConfig) -> Result<(), NavError> {
        let cell_size = source.cell_size();
        if !(cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0) {
            log::error!("navigator not configured: cell size {cell_size} is unusable");
            return Err(NavError::InvalidCellSize { cell_size });
        }
        let graph = NavGraph::from_source(&source, config)?;
        let half_tile = cell_size / 2.0;
        self.loaded = Some(Loaded {
            source,
            graph,
            half_tile,
        });
        self.start = None;
        self.end = None;
        self.path.clear();
        self.version += 1;
        log::debug!("navigator configured (graph version {})", self.version);
        Ok(())
    }

    /// Whether a tile source has been configured.
    pub fn is_configured(&self) -> bool {
        self.loaded.is_some()
    }

    /// Number of graph builds so far; bumps on every successful
    /// [`configure`](Self::configure).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The navigation graph, once configured.
    pub fn graph(&self) -> Option<&NavGraph> {
        self.loaded.as_ref().map(|l| &l.graph)
    }

    /// The configured tile source.
    pub fn source(&self) -> Option<&S> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// Half the size of a tile, to add to a tile's world position to get its
    /// centre. Zero before configuration.
    pub fn half_tile_offset(&self) -> WorldPos {
        self.loaded.as_ref().map_or(WorldPos::ZERO, |l| l.half_tile)
    }

    /// Current start tile.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current end tile.
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The last computed path, from start to end inclusive. Empty if no path
    /// exists or none has been computed.
    pub fn current_path(&self) -> &[Point] {
        &self.path
    }

    fn validate(&self, p: Point) -> Result<&Loaded<S>, QueryError> {
        let loaded = self.loaded.as_ref().ok_or(QueryError::Unconfigured)?;
        if !loaded.graph.is_walkable(p) {
            return Err(QueryError::InvalidTile(p));
        }
        Ok(loaded)
    }

    fn report(err: QueryError) {
        match err {
            QueryError::Unconfigured => log::error!("{err}"),
            QueryError::InvalidTile(_) => log::trace!("rejected: {err}"),
        }
    }

    /// Set the start tile. If an end tile is set, the path is recomputed.
    ///
    /// Returns `false` and changes nothing if `p` is out of bounds or
    /// non-walkable, or if the navigator is unconfigured.
    pub fn try_set_start(&mut self, p: Point) -> bool {
        if let Err(err) = self.validate(p) {
            Self::report(err);
            return false;
        }
        self.start = Some(p);
        if let Some(end) = self.end {
            self.recompute(p, end);
        }
        true
    }

    /// Set the end tile.
    ///
    /// Returns `false` and changes nothing if `p` is out of bounds or
    /// non-walkable, or if the navigator is unconfigured.
    pub fn try_set_end(&mut self, p: Point) -> bool {
        if let Err(err) = self.validate(p) {
            Self::report(err);
            return false;
        }
        self.end = Some(p);
        true
    }

    /// Compute and store the path between two tiles, returning it by value.
    ///
    /// On success the start and end tiles are updated as well. An unreachable
    /// end is `Ok` with an empty path.
    pub fn query(&mut self, start: Point, end: Point) -> Result<Vec<Point>, QueryError> {
        self.validate(start)?;
        self.validate(end)?;
        self.start = Some(start);
        self.end = Some(end);
        self.recompute(start, end);
        Ok(self.path.clone())
    }

    /// Compute and store the path between two world positions.
    ///
    /// Both positions are converted to tiles through the tile source. Returns
    /// `true` iff both tiles are valid and a search ran; the stored path may
    /// then be empty when the end is unreachable. NaN or infinite positions
    /// are rejected.
    pub fn try_compute_path(&mut self, start: WorldPos, end: WorldPos) -> bool {
        let Some(loaded) = self.loaded.as_ref() else {
            Self::report(QueryError::Unconfigured);
            return false;
        };
        let (Some(start_tile), Some(end_tile)) = (
            loaded.source.world_to_tile(start),
            loaded.source.world_to_tile(end),
        ) else {
            log::warn!("path request {start} -> {end} rejected: position is not finite");
            return false;
        };
        match self.query(start_tile, end_tile) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("path request {start} -> {end} rejected: {err}");
                false
            }
        }
    }

    fn recompute(&mut self, start: Point, end: Point) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };
        self.path = self
            .search
            .find_point_path(&loaded.graph, start, end)
            .unwrap_or_default();
        log::debug!(
            "path {start} -> {end}: {} tiles, {} nodes expanded",
            self.path.len(),
            self.search.last_expanded()
        );
    }

    /// World-space centre of tile `p`.
    pub fn tile_center(&self, p: Point) -> Option<WorldPos> {
        let loaded = self.loaded.as_ref()?;
        Some(loaded.source.tile_to_world(p) + loaded.half_tile)
    }

    /// The current path as world-space tile centres.
    pub fn waypoints(&self) -> Vec<WorldPos> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        self.path
            .iter()
            .map(|&p| loaded.source.tile_to_world(p) + loaded.half_tile)
            .collect()
    }

    /// Whether `to` can be reached from `from`. Invalid tiles are unreachable.
    pub fn is_reachable(&self, from: Point, to: Point) -> bool {
        let Some(graph) = self.graph() else {
            return false;
        };
        let (Some(a), Some(b)) = (graph.node(from), graph.node(to)) else {
            return false;
        };
        graph.hop_map(&[a]).get(b).is_some()
    }
}

#[cfg(test)]
mod tests {
    use tilenav_core::{ObstacleSet, TileLayer};

    use super::*;
    use crate::config::Adjacency;

    fn nav(map: &str, config: NavConfig) -> Navigator<TileLayer> {
        let layer = TileLayer::parse(map)
            .unwrap()
            .with_cell_size(WorldPos::new(32.0, 32.0));
        Navigator::with_source(layer, config).unwrap()
    }

    #[test]
    fn unconfigured_rejects_everything() {
        let mut nav: Navigator<ObstacleSet> = Navigator::new();
        assert!(!nav.is_configured());
        assert!(!nav.try_set_start(Point::new(0, 0)));
        assert!(!nav.try_set_end(Point::new(0, 0)));
        assert!(!nav.try_compute_path(WorldPos::ZERO, WorldPos::ZERO));
        assert_eq!(
            nav.query(Point::ZERO, Point::ZERO),
            Err(QueryError::Unconfigured)
        );
        assert_eq!(nav.half_tile_offset(), WorldPos::ZERO);
        assert!(nav.current_path().is_empty());
        assert!(nav.waypoints().is_empty());
        assert_eq!(nav.version(), 0);

        assert!(
            nav.configure(ObstacleSet::new(2, 2), NavConfig::cardinal())
                .is_ok()
        );
        assert!(nav.try_set_start(Point::new(0, 0)));
    }

    #[test]
    fn set_start_on_obstacle_is_rejected() {
        let mut nav = nav(".#.\n...", NavConfig::cardinal());
        assert!(nav.try_set_start(Point::new(0, 0)));
        assert!(!nav.try_set_start(Point::new(1, 0)));
        assert_eq!(nav.start(), Some(Point::new(0, 0)));
        assert!(!nav.try_set_start(Point::new(-1, 0)));
        assert!(!nav.try_set_start(Point::new(3, 0)));
        assert_eq!(nav.start(), Some(Point::new(0, 0)));
        assert!(!nav.try_set_end(Point::new(1, 0)));
        assert_eq!(nav.end(), None);
    }

    #[test]
    fn setting_start_recomputes_when_end_is_set() {
        let mut nav = nav("...\n...\n...", NavConfig::cardinal());
        assert!(nav.try_set_start(Point::new(0, 0)));
        assert!(nav.current_path().is_empty());
        assert!(nav.try_set_end(Point::new(2, 2)));
        // Setting the end alone does not search.
        assert!(nav.current_path().is_empty());
        assert!(nav.try_set_start(Point::new(0, 0)));
        assert_eq!(nav.current_path().len(), 5);
        assert!(nav.try_set_start(Point::new(2, 1)));
        assert_eq!(
            nav.current_path(),
            &[Point::new(2, 1), Point::new(2, 2)]
        );
        assert!(nav.try_set_start(Point::new(2, 2)));
        assert_eq!(nav.current_path(), &[Point::new(2, 2)]);
    }

    #[test]
    fn world_positions_map_to_tiles() {
        let mut nav = nav("...\n...\n...", NavConfig::diagonal());
        assert_eq!(nav.half_tile_offset(), WorldPos::new(16.0, 16.0));
        assert!(nav.try_compute_path(WorldPos::new(5.0, 5.0), WorldPos::new(90.0, 70.0)));
        assert_eq!(nav.start(), Some(Point::new(0, 0)));
        assert_eq!(nav.end(), Some(Point::new(2, 2)));
        assert_eq!(
            nav.current_path(),
            &[Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]
        );
        assert_eq!(
            nav.waypoints(),
            vec![
                WorldPos::new(16.0, 16.0),
                WorldPos::new(48.0, 48.0),
                WorldPos::new(80.0, 80.0)
            ]
        );
        assert_eq!(nav.tile_center(Point::new(1, 0)), Some(WorldPos::new(48.0, 16.0)));
    }

    #[test]
    fn rejected_request_keeps_previous_path() {
        let mut nav = nav("....\n.##.\n....", NavConfig::cardinal());
        assert!(nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(100.0, 1.0)));
        let before = nav.current_path().to_vec();
        assert_eq!(before.len(), 4);

        // End inside a wall.
        assert!(!nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(40.0, 40.0)));
        // End outside the map.
        assert!(!nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(500.0, 1.0)));
        assert_eq!(nav.current_path(), before.as_slice());
        assert_eq!(nav.end(), Some(Point::new(3, 0)));
    }

    #[test]
    fn non_finite_request_keeps_previous_path() {
        let mut nav = nav("....\n.##.\n....", NavConfig::cardinal());
        assert!(nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(100.0, 1.0)));
        let before = nav.current_path().to_vec();

        // A NaN would otherwise saturate to tile (0, 0), which is walkable.
        assert!(!nav.try_compute_path(WorldPos::new(f32::NAN, 1.0), WorldPos::new(100.0, 1.0)));
        assert!(!nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(f32::NAN, f32::NAN)));
        assert!(!nav.try_compute_path(WorldPos::new(f32::INFINITY, 1.0), WorldPos::new(1.0, 1.0)));
        assert!(!nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(1.0, f32::NEG_INFINITY)));
        assert_eq!(nav.current_path(), before.as_slice());
        assert_eq!(nav.start(), Some(Point::new(0, 0)));
        assert_eq!(nav.end(), Some(Point::new(3, 0)));
    }

    #[test]
    fn unusable_cell_size_is_rejected() {
        let mut nav = nav("....\n.##.\n....", NavConfig::cardinal());
        assert!(nav.query(Point::new(0, 0), Point::new(3, 0)).is_ok());
        let before = nav.current_path().to_vec();

        for cell_size in [
            WorldPos::ZERO,
            WorldPos::new(32.0, 0.0),
            WorldPos::new(-32.0, 32.0),
            WorldPos::new(f32::NAN, 32.0),
            WorldPos::new(32.0, f32::INFINITY),
        ] {
            let layer = TileLayer::parse("...").unwrap().with_cell_size(cell_size);
            assert!(matches!(
                nav.configure(layer, NavConfig::cardinal()),
                Err(NavError::InvalidCellSize { .. })
            ));
        }
        assert_eq!(nav.version(), 1);
        assert_eq!(nav.source().map(|s| s.width()), Some(4));
        assert_eq!(nav.half_tile_offset(), WorldPos::new(16.0, 16.0));
        assert_eq!(nav.current_path(), before.as_slice());

        let zero = ObstacleSet::new(3, 3).with_cell_size(WorldPos::ZERO);
        assert!(Navigator::with_source(zero, NavConfig::cardinal()).is_err());
    }

    #[test]
    fn unreachable_overwrites_with_empty_path() {
        let mut nav = nav("..#..\n..#..", NavConfig::diagonal());
        assert_eq!(nav.query(Point::new(0, 0), Point::new(1, 1)).unwrap().len(), 2);
        assert!(!nav.current_path().is_empty());
        assert!(nav.try_compute_path(WorldPos::new(1.0, 1.0), WorldPos::new(150.0, 1.0)));
        assert!(nav.current_path().is_empty());
        assert!(!nav.is_reachable(Point::new(0, 0), Point::new(4, 0)));
        assert!(nav.is_reachable(Point::new(0, 0), Point::new(1, 1)));
        assert!(!nav.is_reachable(Point::new(0, 0), Point::new(2, 0)));
    }

    #[test]
    fn query_returns_path_by_value() {
        let mut nav = nav("...", NavConfig::cardinal());
        let path = nav.query(Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(path, nav.current_path());
        assert_eq!(
            nav.query(Point::new(0, 0), Point::new(5, 0)),
            Err(QueryError::InvalidTile(Point::new(5, 0)))
        );
        assert_eq!(nav.current_path(), path.as_slice());
    }

    #[test]
    fn reconfigure_replaces_graph() {
        let mut nav = nav("...", NavConfig::cardinal());
        assert!(nav.query(Point::new(0, 0), Point::new(2, 0)).is_ok());
        assert_eq!(nav.version(), 1);

        let layer = TileLayer::parse(".#.").unwrap();
        nav.configure(layer, NavConfig::diagonal()).unwrap();
        assert_eq!(nav.version(), 2);
        assert_eq!(nav.start(), None);
        assert_eq!(nav.end(), None);
        assert!(nav.current_path().is_empty());
        assert_eq!(nav.graph().map(|g| g.adjacency()), Some(Adjacency::Diagonal));
        assert!(!nav.try_set_start(Point::new(1, 0)));

        // A failing rebuild keeps the current graph.
        let bad = NavConfig::diagonal().with_heuristic(crate::Heuristic::Manhattan);
        assert!(nav.configure(TileLayer::parse("..").unwrap(), bad).is_err());
        assert_eq!(nav.version(), 2);
        assert_eq!(nav.source().map(|s| s.width()), Some(3));
    }

    #[test]
    fn works_with_borrowed_source() {
        let layer = TileLayer::parse("..\n..").unwrap();
        let mut nav = Navigator::with_source(&layer, NavConfig::diagonal()).unwrap();
        assert_eq!(nav.query(Point::new(0, 0), Point::new(1, 1)).unwrap().len(), 2);
        assert_eq!(nav.half_tile_offset(), WorldPos::new(0.5, 0.5));
    }
}
