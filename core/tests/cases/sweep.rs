use qviz_core::*;

#[test]
fn test_point_read_sweep() {
    let mut sweep = PlacementSweep::new(EngineConfig::default()).unwrap();
    let key = ScenarioKey::new(DatabaseFamily::TwoTier, Operation::PointRead);
    let summary = sweep.run(key).unwrap();
    assert_eq!(summary.samples, 27);
    assert_eq!(summary.min_us, 0);
    assert_eq!(summary.max_us, 30_000);
    assert!((29_000..=31_000).contains(&summary.median_us));
}

#[test]
fn test_distributed_commit_sweep_bounds() {
    let mut sweep = PlacementSweep::new(EngineConfig::default()).unwrap();
    let key = ScenarioKey::new(DatabaseFamily::SingleTier, Operation::RangeWrite);
    let summary = sweep.run(key).unwrap();
    assert_eq!(summary.samples, 81);
    assert_eq!(summary.min_us, 90_000);
    assert_eq!(summary.max_us, 180_000);
    assert!(summary.mean_us > 90_000.0 && summary.mean_us < 180_000.0);
}

#[test]
fn test_sweep_covers_catalog() {
    let mut sweep = PlacementSweep::new(EngineConfig::default()).unwrap();
    let summaries = sweep.run_all().unwrap();
    assert_eq!(summaries.len(), ScenarioKey::all().len());
    for s in summaries {
        assert!(s.min_us <= s.median_us && s.median_us <= s.max_us + s.max_us / 100);
    }
}

#[test]
fn test_sweep_respects_restricted_catalog() {
    let catalog = Catalog::default().without(DatabaseFamily::TwoTier, Operation::RangeWrite);
    let mut sweep = PlacementSweep::new(EngineConfig::default())
        .unwrap()
        .with_catalog(catalog);
    let summaries = sweep.run_all().unwrap();
    assert_eq!(summaries.len(), ScenarioKey::all().len() - 1);
    let missing = ScenarioKey::new(DatabaseFamily::TwoTier, Operation::RangeWrite);
    assert!(summaries.iter().all(|s| s.key != missing));
}
