use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::headless::HeadlessAnimator;
use crate::network::Region;
use crate::placement::{Operation, Selection, MAX_SPEED};
use crate::scenarios::{Catalog, ScenarioKey};

/// Client latency distribution of one scenario over every role placement.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct SweepSummary {
    pub key: ScenarioKey,
    pub samples: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub mean_us: f64,
    pub median_us: u64,
}

/// Every selection that places the roles of `key` differently.
pub fn placements(key: ScenarioKey) -> Vec<Selection> {
    let mut out = Vec::new();
    for client in Region::ALL {
        for control in Region::ALL {
            let base = Selection::new(key.family, key.operation)
                .with_client(client)
                .with_control_leader(control)
                .with_speed(MAX_SPEED);
            if key.operation == Operation::RangeRead {
                for mask in 1u8..(1 << Region::ALL.len()) {
                    let leaders = Region::ALL
                        .into_iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, r)| r);
                    out.push(base.clone().with_range_leaders(leaders));
                }
                continue;
            }
            for data in Region::ALL {
                let sel = base.clone().with_data_leader(data);
                if sel.uses_transaction_leader() {
                    for txn in Region::ALL {
                        out.push(sel.clone().with_transaction_leader(txn));
                    }
                } else {
                    out.push(sel);
                }
            }
        }
    }
    out
}

/// Runs every placement of a scenario headlessly and summarizes the client
/// latencies.
pub struct PlacementSweep {
    engine: Engine,
}

impl PlacementSweep {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            engine: Engine::new(config)?,
        })
    }

    /// Sweeps only what `catalog` supports.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.engine = self.engine.with_catalog(catalog);
        self
    }

    pub fn run(&mut self, key: ScenarioKey) -> Result<SweepSummary> {
        let mut histogram =
            Histogram::<u64>::new(3).map_err(|e| Error::Histogram(e.to_string()))?;
        let mut min_us = u64::MAX;
        let mut max_us = 0;
        for selection in placements(key) {
            let result = self
                .engine
                .run_to_completion(&selection, &mut HeadlessAnimator::new())?;
            let latency = result.client_latency_us;
            histogram
                .record(latency)
                .map_err(|e| Error::Histogram(e.to_string()))?;
            min_us = min_us.min(latency);
            max_us = max_us.max(latency);
        }
        if histogram.is_empty() {
            min_us = 0;
        }
        Ok(SweepSummary {
            key,
            samples: histogram.len(),
            min_us,
            max_us,
            mean_us: histogram.mean(),
            median_us: histogram.value_at_quantile(0.5),
        })
    }

    /// Sweeps every scenario the engine's catalog knows.
    pub fn run_all(&mut self) -> Result<Vec<SweepSummary>> {
        let keys: Vec<ScenarioKey> = self
            .engine
            .catalog()
            .entries()
            .iter()
            .map(|e| e.key)
            .collect();
        keys.into_iter().map(|key| self.run(key)).collect()
    }
}
