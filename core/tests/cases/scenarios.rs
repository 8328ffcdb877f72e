use crate::common::{single_tier, two_tier, TestHarness};
use qviz_core::*;

fn spread(sel: Selection) -> Selection {
    sel.with_client(Region::A)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C)
        .with_transaction_leader(Region::B)
        .with_range_leaders([Region::B, Region::C])
}

#[test]
fn test_spread_placement_latencies() {
    let expected = [
        (two_tier(Operation::PointRead), 30_000),
        (two_tier(Operation::PointWrite), 90_000),
        (two_tier(Operation::RangeRead), 60_000),
        (two_tier(Operation::RangeWrite), 90_000),
        (single_tier(Operation::PointRead), 30_000),
        (single_tier(Operation::PointWrite), 60_000),
        (single_tier(Operation::RangeRead), 30_000),
        (single_tier(Operation::RangeWrite), 180_000),
    ];
    let mut h = TestHarness::new();
    for (sel, latency) in expected {
        let sel = spread(sel);
        assert_eq!(h.latency(&sel), latency, "{}/{}", sel.family, sel.operation);
    }
}

#[test]
fn test_readout_matches_projection() {
    let mut h = TestHarness::new();
    for key in ScenarioKey::all() {
        let sel = spread(Selection::new(key.family, key.operation));
        let projected = h
            .engine
            .projected_latency_us(&sel, Projection::ClientVisible)
            .unwrap();
        assert_eq!(h.latency(&sel), projected, "{}", key);
    }
}

#[test]
fn test_counting_local_hops() {
    let mut h = TestHarness::with_topology(TopologyConfig::counting_local_hops());
    let inter = h.inter();
    let intra = h.intra();

    let remote = two_tier(Operation::PointRead).with_data_leader(Region::B);
    assert_eq!(h.latency(&remote), 2 * intra + 2 * inter);

    let local = two_tier(Operation::PointRead);
    assert_eq!(h.latency(&local), 4 * intra);
}

#[test]
fn test_colocated_two_tier_read_is_free() {
    let mut h = TestHarness::new();
    for region in Region::ALL {
        let sel = two_tier(Operation::PointRead)
            .with_client(region)
            .with_data_leader(region);
        assert_eq!(h.latency(&sel), 0);
    }
}

#[test]
fn test_result_names_the_scenario_and_placement() {
    let mut h = TestHarness::new();
    let sel = spread(single_tier(Operation::RangeWrite));
    let result = h.run(&sel);
    assert_eq!(result.key, ScenarioKey::new(DatabaseFamily::SingleTier, Operation::RangeWrite));
    assert_eq!(result.placement.transaction_leader, Some(Region::B));
    assert_eq!(result.placement.data_leaders, vec![Region::C]);
    let json = result.to_json().unwrap();
    assert!(json.contains("\"status\": \"completed\""));
}
