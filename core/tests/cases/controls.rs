use crate::common::{single_tier, two_tier, TestHarness};
use qviz_core::*;

#[test]
fn test_unsupported_scenario_leaves_state_untouched() {
    let catalog = Catalog::default().without(DatabaseFamily::SingleTier, Operation::RangeWrite);
    let mut h = TestHarness::new().with_catalog(catalog);
    let previous = h.run(&two_tier(Operation::PointRead).with_data_leader(Region::B));
    let readout = h.engine.readout();
    let trace_len = h.engine.trace().len();

    let err = h.engine.start_run(&single_tier(Operation::RangeWrite));
    assert_eq!(
        err,
        Err(Error::Unsupported {
            family: DatabaseFamily::SingleTier,
            operation: Operation::RangeWrite,
        })
    );
    assert!(h.engine.controls_enabled());
    assert_eq!(h.engine.readout(), readout);
    assert_eq!(h.engine.trace().len(), trace_len);
    assert_eq!(h.engine.last_result(), Some(&previous));
}

#[test]
fn test_animator_failure_aborts_run() {
    // launch 3 is the hop from the gateway to the data leader
    let animator = HeadlessAnimator::new().failing_on_launch(3);
    let mut h = TestHarness::new().with_animator(animator);
    let sel = two_tier(Operation::PointWrite)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C);
    let result = h.run(&sel);
    assert!(matches!(result.outcome, RunOutcome::Failed { .. }));
    assert_eq!(result.client_latency_us, 30_000);
    assert!(h.engine.controls_enabled());
    assert_eq!(h.animator.in_flight(), 0);
    assert!(result
        .hops
        .iter()
        .all(|r| r.outcome != HopOutcome::InFlight));
}

#[test]
fn test_controls_locked_while_running() {
    let mut h = TestHarness::new();
    let sel = two_tier(Operation::PointWrite).with_data_leader(Region::B);
    h.engine.start_run(&sel).unwrap();
    assert!(!h.engine.controls_enabled());
    assert_eq!(h.engine.start_run(&sel), Err(Error::RunInProgress));
    assert!(!h.engine.on_selection_changed(&sel));
    assert_eq!(
        h.engine.set_config(EngineConfig::default()),
        Err(Error::RunInProgress)
    );
    let result = h.finish();
    assert!(result.is_completed());
    assert!(h.engine.controls_enabled());
}

#[test]
fn test_selection_change_clears_readout() {
    let mut h = TestHarness::new();
    let sel = single_tier(Operation::PointWrite).with_data_leader(Region::C);
    h.run(&sel);
    assert!(h.engine.readout().client_latency_us.is_some());
    assert!(!h.engine.trace().is_empty());

    assert!(h.engine.on_selection_changed(&sel.clone().with_speed(9)));
    assert_eq!(h.engine.readout(), Readout::default());
    assert!(h.engine.trace().is_empty());
}

#[test]
fn test_speed_changes_pacing_not_latency() {
    let sel = two_tier(Operation::PointWrite).with_data_leader(Region::C);
    let mut slow = TestHarness::new();
    let mut fast = TestHarness::new();
    let slow_result = slow.run(&sel.clone().with_speed(1));
    let fast_result = fast.run(&sel.with_speed(10));
    assert_eq!(slow_result.client_latency_us, fast_result.client_latency_us);
    assert!(slow_result.finished_us > fast_result.finished_us);
}
