use crate::common::{two_tier, TestHarness};
use qviz_core::*;

fn critical_quorum(p: &RolePlacement, topology: &Topology) -> Script {
    let mut s = ScriptBuilder::new(topology);
    s.replicate(p.primary_data_leader(), Accounting::Critical);
    s.build()
}

fn detached_quorum(p: &RolePlacement, topology: &Topology) -> Script {
    let region = p.primary_data_leader();
    let mut s = ScriptBuilder::new(topology);
    s.detach(move |tail| {
        tail.replicate(region, Accounting::Background);
    });
    s.build()
}

fn catalog_with(build: ScenarioFn) -> Catalog {
    Catalog::default().with(ScenarioInfo {
        key: ScenarioKey::new(DatabaseFamily::TwoTier, Operation::PointWrite),
        title: "Quorum",
        description: "A single replication round",
        build,
    })
}

#[test]
fn test_critical_quorum_counts_two_cross_region_hops() {
    let mut h = TestHarness::new().with_catalog(catalog_with(critical_quorum));
    let inter = h.inter();
    for leader in Region::ALL {
        let sel = two_tier(Operation::PointWrite).with_data_leader(leader);
        let result = h.run(&sel);
        assert_eq!(result.client_latency_us, 2 * inter);
        assert_eq!(result.hops.len(), 4);
        let accumulated = result
            .hops
            .iter()
            .filter(|r| matches!(r.outcome, HopOutcome::Accumulated { .. }))
            .count();
        assert_eq!(accumulated, 2);
    }
}

#[test]
fn test_both_followers_fly_concurrently() {
    let mut h = TestHarness::new().with_catalog(catalog_with(critical_quorum));
    h.run(&two_tier(Operation::PointWrite).with_data_leader(Region::B));
    assert_eq!(h.animator.peak_in_flight, 2);
    assert_eq!(h.animator.launched, 4);
    assert_eq!(h.animator.arrived, 4);
}

#[test]
fn test_background_quorum_adds_nothing() {
    let mut h = TestHarness::new().with_catalog(catalog_with(detached_quorum));
    let result = h.run(&two_tier(Operation::PointWrite).with_data_leader(Region::C));
    assert!(result.is_completed());
    assert_eq!(result.client_latency_us, 0);
    assert_eq!(h.animator.launched, 4);
    assert!(result.hops.iter().all(|r| r.outcome == HopOutcome::Suppressed));
    let responded = result.responded_us.unwrap();
    assert!(result.finished_us > responded);
}
