use crate::common::{single_tier, two_tier, TestHarness};
use qviz_core::*;

fn percolator() -> Selection {
    two_tier(Operation::RangeWrite)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C)
}

#[test]
fn test_readout_freezes_at_client_response() {
    let mut h = TestHarness::new();
    let sel = percolator();
    let readout = h.run_until_response(&sel);
    assert_eq!(readout.client_latency_us, Some(90_000));
    // the commit is still replicating
    assert!(h.engine.is_running());

    let result = h.finish();
    assert_eq!(result.client_latency_us, 90_000);
    assert_eq!(h.engine.readout().client_latency_us, Some(90_000));
    assert!(result.finished_us > result.responded_us.unwrap());
}

#[test]
fn test_background_work_is_animated_but_not_counted() {
    let mut h = TestHarness::new();
    let sel = percolator();
    let including = h
        .engine
        .projected_latency_us(&sel, Projection::IncludingBackground)
        .unwrap();
    let result = h.run(&sel);
    assert!(result.client_latency_us < including);
    assert_eq!(including - result.client_latency_us, 45_000);

    let background: Vec<_> = result.hops.iter().filter(|r| r.hop.background).collect();
    assert_eq!(background.len(), 5);
    assert!(background.iter().all(|r| r.outcome == HopOutcome::Suppressed));
}

#[test]
fn test_distributed_commit_applies_after_response() {
    let mut h = TestHarness::new();
    let sel = single_tier(Operation::RangeWrite)
        .with_transaction_leader(Region::B)
        .with_data_leader(Region::C);
    let readout = h.run_until_response(&sel);
    assert_eq!(readout.client_latency_us, Some(180_000));
    let result = h.finish();
    assert!(result.is_completed());
    assert_eq!(result.client_latency_us, 180_000);
    assert!(result
        .hops
        .iter()
        .filter(|r| r.hop.background)
        .all(|r| r.finished_us.is_some()));
}
