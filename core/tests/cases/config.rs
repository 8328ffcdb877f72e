use crate::common::{two_tier, TestHarness};
use qviz_core::*;

#[test]
fn test_out_of_range_pacing_never_reaches_the_engine() {
    let json = r#"{ "animation": { "pace": 18446744073709551615 } }"#;
    assert!(matches!(EngineConfig::from_json(json), Err(Error::Config(_))));

    let mut engine = Engine::default();
    let mut config = EngineConfig::default();
    config.animation.min_duration_us = u64::MAX;
    assert!(matches!(engine.set_config(config), Err(Error::Config(_))));
    assert_eq!(engine.config(), &EngineConfig::default());
}

#[test]
fn test_slowest_accepted_config_completes() {
    let config = EngineConfig::from_json(
        r#"{
            "topology": { "round_trip_us": 10000000 },
            "animation": { "pace": 1000, "min_duration_us": 10000000, "warmup_us": 10000000 }
        }"#,
    )
    .unwrap();
    let mut h = TestHarness::with_config(config);
    let sel = two_tier(Operation::PointWrite)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C)
        .with_speed(1);
    // timestamp round trip, hop to the leader, quorum, hop back
    assert_eq!(h.latency(&sel), 6 * 5_000_000);
}

#[test]
fn test_clock_near_its_limit_saturates() {
    let mut h = TestHarness::new();
    h.engine.time = u64::MAX - 1_000;
    let sel = two_tier(Operation::RangeWrite)
        .with_control_leader(Region::B)
        .with_data_leader(Region::C);
    let result = h.run(&sel);
    assert!(result.is_completed());
    assert_eq!(result.client_latency_us, 90_000);
    assert_eq!(result.finished_us, u64::MAX);
}
