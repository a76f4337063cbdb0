use tilenav_core::WorldPos;

/// Walks a path one node at a time.
///
/// Index 0 of a path is the tile the walker stands on, so the cursor starts
/// at index 1. Reset it whenever a new path is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCursor {
    target: usize,
}

impl Default for PathCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCursor {
    pub fn new() -> Self {
        Self { target: 1 }
    }

    /// Point the cursor at the first step of a fresh path.
    pub fn reset(&mut self) {
        self.target = 1;
    }

    /// Index of the current target node.
    pub fn index(&self) -> usize {
        self.target
    }

    /// The node being walked toward, or `None` once the path is done.
    pub fn target<T: Copy>(&self, path: &[T]) -> Option<T> {
        path.get(self.target).copied()
    }

    pub fn advance(&mut self) {
        self.target += 1;
    }

    /// Whether every node of `path` has been reached.
    pub fn is_finished<T>(&self, path: &[T]) -> bool {
        self.target >= path.len()
    }

    /// Move `pos` toward the current waypoint by at most `step`, advancing to
    /// the next waypoint on arrival. Returns the new position.
    pub fn follow(&mut self, pos: WorldPos, waypoints: &[WorldPos], step: f32) -> WorldPos {
        let Some(target) = self.target(waypoints) else {
            return pos;
        };
        let next = pos.move_toward(target, step);
        if next == target {
            self.advance();
        }
        next
    }
}
