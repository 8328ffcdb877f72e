pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod headless;
pub mod network;
pub mod placement;
pub mod scenarios;
pub mod script;
pub mod traits;

pub use analytics::{placements, PlacementSweep, SweepSummary};
pub use config::{AnimationConfig, EngineConfig};
pub use engine::{Engine, HopOutcome, HopRecord, Readout, RunOutcome, RunResult};
pub use error::{Error, Result};
pub use headless::{HeadlessAnimator, MemoryStore};
pub use network::{Region, Topology, TopologyConfig};
pub use placement::{DatabaseFamily, LogicalNode, Operation, Role, RolePlacement, Selection};
pub use scenarios::{Catalog, ScenarioFn, ScenarioInfo, ScenarioKey};
pub use script::{Accounting, Hop, Projection, Script, ScriptBuilder, Step};
pub use traits::{Animator, MarkerId, Position, SelectionStore};

/// Default latency constants (in Microseconds)
pub const DEFAULT_ROUND_TRIP_US: u64 = 30_000; // 30ms between regions
pub const INTRA_REGION_US: u64 = 1_000; // 1ms
pub const NETWORK_SIGNIFICANCE_US: u64 = 2_000; // 2ms
