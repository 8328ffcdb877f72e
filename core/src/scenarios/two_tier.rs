//! SQL gateways over a replicated KV layer. Every transactional request asks
//! the control leader (timestamp oracle) for a timestamp first.

use crate::network::Topology;
use crate::placement::{LogicalNode, RolePlacement};
use crate::script::{Accounting, Script, ScriptBuilder};

pub fn point_read(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let gateway = p.coordinator();
    let leader = LogicalNode::storage(p.primary_data_leader());

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, gateway)
        .round_trip(gateway, leader)
        .hop(gateway, client);
    s.build()
}

pub fn point_write(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let gateway = p.coordinator();
    let oracle = LogicalNode::control_leader(p.control_leader);
    let region = p.primary_data_leader();
    let leader = LogicalNode::storage(region);

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, gateway)
        .round_trip(gateway, oracle)
        .hop(gateway, leader)
        .replicate(region, Accounting::Critical)
        .hop(leader, gateway)
        .hop(gateway, client);
    s.build()
}

pub fn range_read(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let gateway = p.coordinator();
    let oracle = LogicalNode::control_leader(p.control_leader);
    let targets: Vec<_> = p.data_leaders.iter().copied().map(LogicalNode::storage).collect();

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, gateway)
        .round_trip(gateway, oracle)
        .scatter_gather(gateway, &targets, p.client)
        .hop(gateway, client);
    s.build()
}

/// Percolator: the client is acknowledged once the primary lock is
/// replicated. Committing the primary happens in the background.
pub fn range_write(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let gateway = p.coordinator();
    let oracle = LogicalNode::control_leader(p.control_leader);
    let region = p.primary_data_leader();
    let primary = LogicalNode::storage(region);

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, gateway)
        .round_trip(gateway, oracle)
        // prewrite
        .hop(gateway, primary)
        .replicate(region, Accounting::Critical)
        .hop(primary, gateway)
        .detach(move |commit| {
            commit
                .hop(gateway, primary)
                .replicate(region, Accounting::Background);
        })
        .hop(gateway, client);
    s.build()
}
