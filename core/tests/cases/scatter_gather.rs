use crate::common::{single_tier, two_tier, TestHarness};
use qviz_core::*;

#[test]
fn test_range_read_is_gated_by_slowest_leader() {
    let mut h = TestHarness::new();
    let inter = h.inter();
    let cases = [
        (vec![Region::A], 0),
        (vec![Region::B], 2 * inter),
        (vec![Region::A, Region::B], 2 * inter),
        (vec![Region::A, Region::B, Region::C], 2 * inter),
    ];
    for (leaders, scatter) in cases {
        let sel = two_tier(Operation::RangeRead)
            .with_control_leader(Region::B)
            .with_range_leaders(leaders.iter().copied());
        // timestamp round trip to B, then the fan-out
        assert_eq!(h.latency(&sel), 2 * inter + scatter, "leaders {:?}", leaders);
    }
}

#[test]
fn test_fan_out_launches_one_marker_per_leader() {
    for size in 1..=3 {
        let mut h = TestHarness::new();
        let sel = single_tier(Operation::RangeRead).with_range_leaders(Region::ALL.into_iter().take(size));
        h.run(&sel);
        assert_eq!(h.animator.peak_in_flight, size);
    }
}

#[test]
fn test_empty_leader_set_reads_from_data_leader() {
    let mut h = TestHarness::new();
    let inter = h.inter();
    let sel = single_tier(Operation::RangeRead)
        .with_data_leader(Region::C)
        .with_range_leaders(Vec::new());
    assert_eq!(h.latency(&sel), 2 * inter);
}
