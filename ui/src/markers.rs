//! Node layout and marker flights for the canvas. Positions live in a unit
//! square; the canvas maps them onto whatever rect it has.

use qviz_core::{Animator, Error, LogicalNode, MarkerId, Position, Region, Result, Role, RolePlacement};
use std::collections::{BTreeMap, HashMap};

const MAX_MARKERS: usize = 64;

#[derive(Clone, Copy, Debug)]
pub struct Flight {
    pub from: Position,
    pub to: Position,
    pub started_us: u64,
    pub duration_us: u64,
}

impl Flight {
    pub fn position_at(&self, now_us: u64) -> Position {
        let elapsed = now_us.saturating_sub(self.started_us) as f32;
        self.from.lerp(self.to, elapsed / self.duration_us.max(1) as f32)
    }
}

#[derive(Default)]
pub struct MarkerBoard {
    nodes: HashMap<LogicalNode, Position>,
    flights: BTreeMap<MarkerId, Flight>,
    next_id: MarkerId,
}

pub fn slot(node: LogicalNode) -> Position {
    let column = match node.region {
        Region::A => 0.0,
        Region::B => 1.0,
        Region::C => 2.0,
    };
    let row = match node.role {
        Role::Client => 0.0,
        Role::SqlGateway => 1.0,
        Role::ControlLeader => 2.0,
        Role::Storage => 3.0,
    };
    Position::new((column + 0.5) / 3.0, 0.14 + row * 0.24)
}

impl MarkerBoard {
    /// Shows exactly the nodes the placement needs. Anything else stops
    /// resolving, so hops towards it are skipped.
    pub fn layout(&mut self, placement: &RolePlacement) {
        self.nodes = placement
            .active_nodes()
            .into_iter()
            .map(|node| (node, slot(node)))
            .collect();
    }

    pub fn nodes(&self) -> impl Iterator<Item = (LogicalNode, Position)> + '_ {
        self.nodes.iter().map(|(node, pos)| (*node, *pos))
    }

    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }
}

impl Animator for MarkerBoard {
    fn resolve_position(&self, node: LogicalNode) -> Option<Position> {
        self.nodes.get(&node).copied()
    }

    fn move_marker(&mut self, from: Position, to: Position, started_us: u64, duration_us: u64) -> Result<MarkerId> {
        if self.flights.len() >= MAX_MARKERS {
            return Err(Error::Animator(format!(
                "{} markers already on the board",
                self.flights.len()
            )));
        }
        self.next_id += 1;
        self.flights.insert(
            self.next_id,
            Flight {
                from,
                to,
                started_us,
                duration_us,
            },
        );
        Ok(self.next_id)
    }

    fn marker_arrived(&mut self, marker: MarkerId) {
        self.flights.remove(&marker);
    }

    fn clear_markers(&mut self) {
        self.flights.clear();
    }
}
