use crate::common::{single_tier, two_tier, TestHarness};
use qviz_core::*;

fn write_a_b_c() -> Selection {
    two_tier(Operation::PointWrite)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C)
}

#[test]
fn test_hidden_control_leader_skips_timestamp_round_trip() {
    let animator = HeadlessAnimator::new().hide(LogicalNode::control_leader(Region::B));
    let mut h = TestHarness::new().with_animator(animator);
    let result = h.run(&write_a_b_c());
    assert!(result.is_completed());
    assert_eq!(result.client_latency_us, 60_000);
    let skipped: Vec<_> = result
        .hops
        .iter()
        .filter(|r| r.outcome == HopOutcome::Skipped)
        .collect();
    assert_eq!(skipped.len(), 2);
    assert!(skipped.iter().all(|r| r.finished_us == Some(r.started_us)));
}

#[test]
fn test_hidden_follower_keeps_total() {
    for follower in [Region::A, Region::B] {
        let animator = HeadlessAnimator::new().hide(LogicalNode::storage(follower));
        let mut h = TestHarness::new().with_animator(animator);
        let result = h.run(&write_a_b_c());
        assert_eq!(result.client_latency_us, 90_000, "storage {} hidden", follower);
        assert_eq!(
            result
                .hops
                .iter()
                .filter(|r| r.outcome == HopOutcome::Skipped)
                .count(),
            2
        );
    }
}

#[test]
fn test_quorum_cost_moves_to_visible_leg() {
    let animator = HeadlessAnimator::new().hide(LogicalNode::storage(Region::A));
    let mut h = TestHarness::new().with_animator(animator);
    let result = h.run(&write_a_b_c());
    let to_b = result
        .hops
        .iter()
        .find(|r| r.hop.from == LogicalNode::storage(Region::C) && r.hop.to == LogicalNode::storage(Region::B))
        .unwrap();
    assert!(to_b.hop.counted);
    assert!(matches!(to_b.outcome, HopOutcome::Accumulated { .. }));
    assert_eq!(to_b.hop.latency_us, h.inter());
}

#[test]
fn test_active_nodes_resolve_every_hop() {
    for key in ScenarioKey::all() {
        let sel = Selection::new(key.family, key.operation)
            .with_client(Region::C)
            .with_control_leader(Region::A)
            .with_data_leader(Region::B)
            .with_transaction_leader(Region::A)
            .with_range_leaders([Region::A, Region::B]);
        let nodes = RolePlacement::resolve(&sel).active_nodes();
        let mut h = TestHarness::new().with_animator(HeadlessAnimator::showing(nodes));
        let result = h.run(&sel);
        assert!(
            result.hops.iter().all(|r| r.outcome != HopOutcome::Skipped),
            "{} skipped a hop",
            key
        );
    }
}

#[test]
fn test_nothing_resolves() {
    let mut h = TestHarness::new().with_animator(HeadlessAnimator::showing(Vec::new()));
    let result = h.run(&single_tier(Operation::PointWrite).with_data_leader(Region::B));
    assert!(result.is_completed());
    assert_eq!(result.client_latency_us, 0);
    assert_eq!(h.animator.launched, 0);
}
