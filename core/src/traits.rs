use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::placement::LogicalNode;

pub type MarkerId = u64;

/// A point in whatever space the animator draws in (No GUI types here!)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Position, t: f32) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

/// Visualizes hops. Its answers decide whether a hop happens at all, but its
/// timing never feeds into the computed latency.
pub trait Animator {
    /// `None` when the node is not shown under the current scenario.
    fn resolve_position(&self, node: LogicalNode) -> Option<Position>;

    /// Starts a marker travelling `from -> to`. The engine reports its
    /// arrival after `duration_us` of virtual time.
    fn move_marker(
        &mut self,
        from: Position,
        to: Position,
        started_us: u64,
        duration_us: u64,
    ) -> Result<MarkerId>;

    fn marker_arrived(&mut self, marker: MarkerId);

    /// Drops every marker, called when a run aborts.
    fn clear_markers(&mut self) {}
}

/// Key/value persistence of last-used options, keyed by option name.
pub trait SelectionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
