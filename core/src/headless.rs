//! Collaborators for running without a front end: an animator that places
//! every node on a grid and an in-memory option store.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::placement::{LogicalNode, Role};
use crate::traits::{Animator, MarkerId, Position, SelectionStore};

#[derive(Default, Debug)]
pub struct HeadlessAnimator {
    visible: Option<HashSet<LogicalNode>>,
    hidden: HashSet<LogicalNode>,
    fail_on_launch: Option<usize>,
    next_marker: MarkerId,
    in_flight: HashSet<MarkerId>,
    pub launched: usize,
    pub arrived: usize,
    pub peak_in_flight: usize,
}

impl HeadlessAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves only `nodes`, like a front end that draws just the active
    /// topology.
    pub fn showing(nodes: impl IntoIterator<Item = LogicalNode>) -> Self {
        Self {
            visible: Some(nodes.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn hide(mut self, node: LogicalNode) -> Self {
        self.hidden.insert(node);
        self
    }

    /// Makes the launch with this zero-based index fail.
    pub fn failing_on_launch(mut self, index: usize) -> Self {
        self.fail_on_launch = Some(index);
        self
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

fn grid_position(node: LogicalNode) -> Position {
    let column = node.region as u8 as f32;
    let row = match node.role {
        Role::Client => 0.0,
        Role::SqlGateway => 1.0,
        Role::ControlLeader => 2.0,
        Role::Storage => 3.0,
    };
    Position::new(column * 100.0, row * 50.0)
}

impl Animator for HeadlessAnimator {
    fn resolve_position(&self, node: LogicalNode) -> Option<Position> {
        if self.hidden.contains(&node) {
            return None;
        }
        if let Some(visible) = &self.visible {
            if !visible.contains(&node) {
                return None;
            }
        }
        Some(grid_position(node))
    }

    fn move_marker(
        &mut self,
        _from: Position,
        _to: Position,
        _started_us: u64,
        _duration_us: u64,
    ) -> Result<MarkerId> {
        if self.fail_on_launch == Some(self.launched) {
            return Err(Error::Animator(format!(
                "marker {} could not be drawn",
                self.launched
            )));
        }
        self.launched += 1;
        self.next_marker += 1;
        self.in_flight.insert(self.next_marker);
        self.peak_in_flight = self.peak_in_flight.max(self.in_flight.len());
        Ok(self.next_marker)
    }

    fn marker_arrived(&mut self, marker: MarkerId) {
        if self.in_flight.remove(&marker) {
            self.arrived += 1;
        }
    }

    fn clear_markers(&mut self) {
        self.in_flight.clear();
    }
}

/// Option store kept in memory. A read-only store rejects every write.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            read_only: false,
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SelectionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Store(format!("cannot write {}", key)));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
