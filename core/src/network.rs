use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A placement unit. Traffic inside a region is treated as nearly free,
/// traffic between regions pays the configured one-way latency.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    A,
    B,
    C,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::A, Region::B, Region::C];

    /// The two regions that host followers when `self` hosts the leader.
    /// Always distinct from each other and from `self`, in region order.
    pub fn followers(self) -> [Region; 2] {
        match self {
            Region::A => [Region::B, Region::C],
            Region::B => [Region::A, Region::C],
            Region::C => [Region::A, Region::B],
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Region::A => "a",
            Region::B => "b",
            Region::C => "c",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region-{}", self.token())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().trim_start_matches("region-") {
            "a" => Ok(Region::A),
            "b" => Ok(Region::B),
            "c" => Ok(Region::C),
            _ => Err(Error::Parse {
                what: "region",
                value: s.to_string(),
            }),
        }
    }
}

/// Ten seconds between regions is already far outside any real deployment.
const MAX_ROUND_TRIP_US: u64 = 10_000_000;

#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
#[serde(default)]
pub struct TopologyConfig {
    /// Round trip between two distinct regions.
    pub round_trip_us: u64,
    /// One-way delay between two nodes of the same region.
    pub intra_region_us: u64,
    /// Hops shorter than this are animated but never added to the total.
    pub significance_threshold_us: u64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            round_trip_us: crate::DEFAULT_ROUND_TRIP_US,
            intra_region_us: crate::INTRA_REGION_US,
            significance_threshold_us: crate::NETWORK_SIGNIFICANCE_US,
        }
    }
}

impl TopologyConfig {
    /// A model where local hops count toward the total as well.
    pub fn counting_local_hops() -> Self {
        let mut cfg = Self::default();
        cfg.significance_threshold_us = cfg.intra_region_us;
        cfg
    }

    pub fn counts_local_hops(&self) -> bool {
        self.significance_threshold_us <= self.intra_region_us
    }

    pub fn set_counting_local_hops(&mut self, on: bool) {
        self.significance_threshold_us = if on {
            self.intra_region_us
        } else {
            crate::NETWORK_SIGNIFICANCE_US.max(self.intra_region_us.saturating_add(1))
        };
    }

    /// Changes the local delay. While local hops are counted the threshold
    /// follows it, so they keep counting.
    pub fn set_intra_region_us(&mut self, intra_region_us: u64) {
        let counting = self.counts_local_hops();
        self.intra_region_us = intra_region_us;
        if counting {
            self.significance_threshold_us = intra_region_us;
        }
    }

    pub fn one_way_us(&self) -> u64 {
        self.round_trip_us / 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.round_trip_us > MAX_ROUND_TRIP_US {
            return Err(Error::Config(format!(
                "round trip of {}us exceeds {}us",
                self.round_trip_us, MAX_ROUND_TRIP_US
            )));
        }
        if self.one_way_us() == 0 {
            return Err(Error::Config(format!(
                "round trip of {}us leaves no one-way latency",
                self.round_trip_us
            )));
        }
        if self.intra_region_us >= self.one_way_us() {
            return Err(Error::Config(format!(
                "intra-region latency {}us must stay below the one-way latency {}us",
                self.intra_region_us,
                self.one_way_us()
            )));
        }
        Ok(())
    }
}

/// Pure latency lookup between regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Topology {
    config: TopologyConfig,
}

impl Topology {
    pub fn new(config: TopologyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn latency(&self, from: Region, to: Region) -> u64 {
        if from == to {
            self.config.intra_region_us
        } else {
            self.config.one_way_us()
        }
    }

    pub fn is_network_significant(&self, latency_us: u64) -> bool {
        latency_us >= self.config.significance_threshold_us
    }
}
