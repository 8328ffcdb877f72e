//! Scenario scripts.
//!
//! A script is a pure description of a run: a list of steps over hops whose
//! latencies are fixed when the script is built. The primitives here (single
//! hop, quorum round trip, scatter-gather, detached tail) decide which hop of
//! a concurrent wavefront carries the wavefront's cost; the engine only adds
//! what the hops say.

use serde::{Deserialize, Serialize};

use crate::network::{Region, Topology};
use crate::placement::LogicalNode;

/// A directed message between two logical nodes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Hop {
    pub from: LogicalNode,
    pub to: LogicalNode,
    pub latency_us: u64,
    /// Carries the cost of its wavefront. Siblings launched alongside it
    /// are animated but not counted.
    pub counted: bool,
    /// Part of a detached continuation, never counted toward the client total.
    pub background: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Animation pacing delay.
    Pause(u64),
    /// Hops launched together and joined before the next step.
    Hops(Vec<Hop>),
    /// Background task started at this point and joined at the end of the run.
    Detach(Script),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accounting {
    Critical,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    ClientVisible,
    IncludingBackground,
}

impl Script {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub(crate) fn prepend(&mut self, step: Step) {
        self.steps.insert(0, step);
    }

    /// Every hop, background ones included, in launch order.
    pub fn hops(&self) -> Vec<Hop> {
        let mut out = Vec::new();
        for step in &self.steps {
            match step {
                Step::Pause(_) => {}
                Step::Hops(hops) => out.extend(hops.iter().copied()),
                Step::Detach(tail) => out.extend(tail.hops()),
            }
        }
        out
    }

    /// Latency the script accumulates when every endpoint resolves.
    pub fn projected_latency_us(&self, topology: &Topology, projection: Projection) -> u64 {
        self.hops()
            .iter()
            .filter(|hop| hop.counted)
            .filter(|hop| projection == Projection::IncludingBackground || !hop.background)
            .filter(|hop| topology.is_network_significant(hop.latency_us))
            .map(|hop| hop.latency_us)
            .sum()
    }
}

pub struct ScriptBuilder<'a> {
    topology: &'a Topology,
    steps: Vec<Step>,
    background: bool,
}

impl<'a> ScriptBuilder<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        Self {
            topology,
            steps: Vec::new(),
            background: false,
        }
    }

    pub fn build(self) -> Script {
        Script { steps: self.steps }
    }

    pub fn pause(&mut self, delay_us: u64) -> &mut Self {
        self.steps.push(Step::Pause(delay_us));
        self
    }

    pub fn hop(&mut self, from: LogicalNode, to: LogicalNode) -> &mut Self {
        let latency_us = self.topology.latency(from.region, to.region);
        let background = self.background;
        self.wavefront(vec![(from, to, latency_us)], background)
    }

    pub fn round_trip(&mut self, from: LogicalNode, to: LogicalNode) -> &mut Self {
        self.hop(from, to).hop(to, from)
    }

    /// Leader replicates to both followers concurrently and waits for both
    /// acknowledgements. Each direction costs one wavefront.
    pub fn quorum_round_trip(
        &mut self,
        leader: LogicalNode,
        follower1: LogicalNode,
        follower2: LogicalNode,
        accounting: Accounting,
    ) -> &mut Self {
        let background = self.background || accounting == Accounting::Background;
        let followers = [follower1, follower2];
        let outbound: Vec<_> = followers
            .iter()
            .map(|f| (leader, *f, self.topology.latency(leader.region, f.region)))
            .collect();
        let inbound: Vec<_> = followers
            .iter()
            .map(|f| (*f, leader, self.topology.latency(f.region, leader.region)))
            .collect();
        self.wavefront(outbound, background)
            .wavefront(inbound, background)
    }

    /// Shorthand for a quorum round trip of the storage leader in `leader`
    /// with the storage nodes of the two other regions.
    pub fn replicate(&mut self, leader: Region, accounting: Accounting) -> &mut Self {
        let [f1, f2] = leader.followers();
        self.quorum_round_trip(
            LogicalNode::storage(leader),
            LogicalNode::storage(f1),
            LogicalNode::storage(f2),
            accounting,
        )
    }

    /// Fan out to every target and back, gated by the slowest target as
    /// seen from `coordinator`.
    pub fn scatter_gather(
        &mut self,
        source: LogicalNode,
        targets: &[LogicalNode],
        coordinator: Region,
    ) -> &mut Self {
        let legs: Vec<_> = targets
            .iter()
            .map(|t| (*t, self.topology.latency(coordinator, t.region)))
            .collect();
        let outbound: Vec<_> = legs.iter().map(|(t, lat)| (source, *t, *lat)).collect();
        let inbound: Vec<_> = legs.iter().map(|(t, lat)| (*t, source, *lat)).collect();
        let background = self.background;
        self.wavefront(outbound, background)
            .wavefront(inbound, background)
    }

    /// Continuation launched now and joined only when the run ends. Nothing
    /// inside it counts toward the client total.
    pub fn detach(&mut self, build: impl FnOnce(&mut ScriptBuilder<'a>)) -> &mut Self {
        let mut tail = ScriptBuilder {
            topology: self.topology,
            steps: Vec::new(),
            background: true,
        };
        build(&mut tail);
        self.steps.push(Step::Detach(tail.build()));
        self
    }

    /// One concurrent wavefront. The first leg carries the maximum latency
    /// of the set, every other leg is a shadow.
    fn wavefront(
        &mut self,
        legs: Vec<(LogicalNode, LogicalNode, u64)>,
        background: bool,
    ) -> &mut Self {
        let Some(slowest) = legs.iter().map(|(_, _, lat)| *lat).max() else {
            return self;
        };
        let hops = legs
            .into_iter()
            .enumerate()
            .map(|(i, (from, to, latency_us))| Hop {
                from,
                to,
                latency_us: if i == 0 { slowest } else { latency_us },
                counted: i == 0,
                background,
            })
            .collect();
        self.steps.push(Step::Hops(hops));
        self
    }
}
