use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::TopologyConfig;
use crate::placement::{MAX_SPEED, MIN_SPEED};

const MAX_PACE: u64 = 1_000;
const MAX_ANIMATION_US: u64 = 10_000_000;

/// Pacing of the markers. Only affects how long a run takes to watch.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animation microseconds per latency microsecond at speed `MAX_SPEED`.
    pub pace: u64,
    pub min_duration_us: u64,
    /// Pause between clearing the board and the first hop.
    pub warmup_us: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            pace: 10,
            min_duration_us: 40_000,
            warmup_us: 100_000,
        }
    }
}

impl AnimationConfig {
    /// Higher speed means a shorter marker flight, never below the floor.
    pub fn duration_us(&self, latency_us: u64, speed: u8) -> u64 {
        let slowdown = u64::from(MAX_SPEED + 1 - speed.clamp(MIN_SPEED, MAX_SPEED));
        latency_us
            .saturating_mul(self.pace)
            .saturating_mul(slowdown)
            .max(self.min_duration_us.max(1))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub topology: TopologyConfig,
    pub animation: AnimationConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        let animation = &self.animation;
        if animation.pace == 0 || animation.pace > MAX_PACE {
            return Err(Error::Config(format!(
                "animation pace {} must be within 1..={}",
                animation.pace, MAX_PACE
            )));
        }
        if animation.min_duration_us > MAX_ANIMATION_US || animation.warmup_us > MAX_ANIMATION_US {
            return Err(Error::Config(format!(
                "minimum flight and warm-up must not exceed {}us",
                MAX_ANIMATION_US
            )));
        }
        Ok(())
    }
}
