use qviz_core::{Region, Topology, TopologyConfig};

#[test]
fn test_latency_depends_only_on_region_equality() {
    let topo = Topology::default();
    for from in Region::ALL {
        for to in Region::ALL {
            let lat = topo.latency(from, to);
            assert_eq!(lat, topo.latency(to, from));
            if from == to {
                assert_eq!(lat, qviz_core::INTRA_REGION_US);
            } else {
                assert_eq!(lat, qviz_core::DEFAULT_ROUND_TRIP_US / 2);
            }
        }
    }
}

#[test]
fn test_default_threshold_separates_local_from_cross_region() {
    let topo = Topology::default();
    assert!(!topo.is_network_significant(topo.latency(Region::B, Region::B)));
    assert!(topo.is_network_significant(topo.latency(Region::B, Region::C)));
}

#[test]
fn test_counting_local_hops_makes_every_hop_significant() {
    let topo = Topology::new(TopologyConfig::counting_local_hops());
    for from in Region::ALL {
        for to in Region::ALL {
            assert!(topo.is_network_significant(topo.latency(from, to)));
        }
    }
}

#[test]
fn test_custom_round_trip() {
    let topo = Topology::new(TopologyConfig {
        round_trip_us: 80_000,
        ..Default::default()
    });
    assert_eq!(topo.latency(Region::A, Region::C), 40_000);
}
