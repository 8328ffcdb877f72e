use qviz_core::placement::keys;
use qviz_core::*;

#[test]
fn test_empty_store_loads_defaults() {
    assert_eq!(Selection::load(&MemoryStore::default()), Selection::default());
}

#[test]
fn test_saved_selection_loads_back() {
    let sel = Selection::new(DatabaseFamily::SingleTier, Operation::RangeRead)
        .with_client(Region::C)
        .with_range_leaders([Region::A, Region::C])
        .with_speed(8);
    let mut store = MemoryStore::default();
    sel.save(&mut store);
    assert_eq!(store.len(), keys::ALL.len());
    assert_eq!(store.get(keys::RANGE_LEADERS).as_deref(), Some("a,c"));
    assert_eq!(Selection::load(&store), sel);
}

#[test]
fn test_read_only_store_is_not_fatal() {
    let mut store = MemoryStore::read_only();
    Selection::default().save(&mut store);
    assert!(store.is_empty());
}

#[test]
fn test_legacy_values_are_accepted() {
    let store = MemoryStore::from_pairs([
        (keys::FAMILY, "yugabyte"),
        (keys::OPERATION, "2pc-write"),
        (keys::CLIENT_REGION, "region-b"),
        (keys::SPEED, "42"),
    ]);
    let sel = Selection::load(&store);
    assert_eq!(sel.family, DatabaseFamily::SingleTier);
    assert_eq!(sel.operation, Operation::RangeWrite);
    assert_eq!(sel.client_region, Region::B);
    assert_eq!(sel.speed, placement::MAX_SPEED);
}
