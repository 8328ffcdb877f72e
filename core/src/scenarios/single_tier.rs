//! Tablet servers acting as both coordinator and storage. There is no
//! timestamp round trip on the request path.

use crate::network::Topology;
use crate::placement::{LogicalNode, RolePlacement};
use crate::script::{Accounting, Script, ScriptBuilder};

pub fn point_read(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let local = p.coordinator();
    let leader = LogicalNode::storage(p.primary_data_leader());

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, local)
        .round_trip(local, leader)
        .hop(local, client);
    s.build()
}

pub fn point_write(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let local = p.coordinator();
    let region = p.primary_data_leader();
    let leader = LogicalNode::storage(region);

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, local)
        .hop(local, leader)
        .replicate(region, Accounting::Critical)
        .hop(leader, local)
        .hop(local, client);
    s.build()
}

pub fn range_read(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let local = p.coordinator();
    let targets: Vec<_> = p.data_leaders.iter().copied().map(LogicalNode::storage).collect();

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, local)
        .scatter_gather(local, &targets, p.client)
        .hop(local, client);
    s.build()
}

/// Status record, provisional records and the commit of the status record
/// are all replicated before the client is acknowledged. Applying the
/// provisional records runs in the background.
pub fn range_write(p: &RolePlacement, topology: &Topology) -> Script {
    let client = LogicalNode::client(p.client);
    let local = p.coordinator();
    let status_region = p.transaction_leader.unwrap_or(p.client);
    let status = LogicalNode::storage(status_region);
    let data_region = p.primary_data_leader();
    let data = LogicalNode::storage(data_region);

    let mut s = ScriptBuilder::new(topology);
    s.hop(client, local)
        // status record
        .hop(local, status)
        .replicate(status_region, Accounting::Critical)
        .hop(status, local)
        // provisional records
        .hop(local, data)
        .replicate(data_region, Accounting::Critical)
        .hop(data, local)
        // commit
        .hop(local, status)
        .replicate(status_region, Accounting::Critical)
        .detach(move |apply| {
            apply
                .hop(status, data)
                .replicate(data_region, Accounting::Background);
        })
        .hop(status, local)
        .hop(local, client);
    s.build()
}
