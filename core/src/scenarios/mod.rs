//! Scenario registry. Each (family, operation) pair maps to a procedure that
//! composes the script primitives for a resolved role placement.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::network::Topology;
use crate::placement::{DatabaseFamily, Operation, RolePlacement, Selection};
use crate::script::Script;

pub mod single_tier;
pub mod two_tier;

pub type ScenarioFn = fn(&RolePlacement, &Topology) -> Script;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenarioKey {
    pub family: DatabaseFamily,
    pub operation: Operation,
}

impl ScenarioKey {
    pub fn new(family: DatabaseFamily, operation: Operation) -> Self {
        Self { family, operation }
    }

    pub fn all() -> Vec<ScenarioKey> {
        DatabaseFamily::ALL
            .into_iter()
            .flat_map(|f| Operation::ALL.into_iter().map(move |op| ScenarioKey::new(f, op)))
            .collect()
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.operation)
    }
}

#[derive(Clone, Copy)]
pub struct ScenarioInfo {
    pub key: ScenarioKey,
    pub title: &'static str,
    pub description: &'static str,
    pub build: ScenarioFn,
}

impl fmt::Debug for ScenarioInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioInfo")
            .field("key", &self.key)
            .field("title", &self.title)
            .finish()
    }
}

macro_rules! register_scenarios {
    ($(($family:ident, $op:ident) => $build:path, $title:literal, $desc:literal),* $(,)?) => {
        pub fn builtin_scenarios() -> Vec<ScenarioInfo> {
            vec![
                $(
                    ScenarioInfo {
                        key: ScenarioKey::new(DatabaseFamily::$family, Operation::$op),
                        title: $title,
                        description: $desc,
                        build: $build,
                    }
                ),*
            ]
        }
    };
}

register_scenarios!(
    (TwoTier, PointRead) => two_tier::point_read,
        "Point read", "Gateway reads the key straight from its leader",
    (TwoTier, PointWrite) => two_tier::point_write,
        "1PC write", "Timestamp from the control leader, then one Raft commit",
    (TwoTier, RangeRead) => two_tier::range_read,
        "Range read", "Timestamp, then scatter-gather across region leaders",
    (TwoTier, RangeWrite) => two_tier::range_write,
        "Percolator 2PC", "Prewrite is replicated before the ack, commit runs async",
    (SingleTier, PointRead) => single_tier::point_read,
        "Point read", "Local tablet server forwards to the tablet leader",
    (SingleTier, PointWrite) => single_tier::point_write,
        "Single-row write", "Tablet leader commits through Raft",
    (SingleTier, RangeRead) => single_tier::range_read,
        "Range read", "Scatter-gather across tablet leaders",
    (SingleTier, RangeWrite) => single_tier::range_write,
        "Distributed 2PC", "Status tablet commit, provisional records applied async",
);

/// The scenarios an engine is able to run.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<ScenarioInfo>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: builtin_scenarios(),
        }
    }
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, info: ScenarioInfo) -> Self {
        self.entries.retain(|e| e.key != info.key);
        self.entries.push(info);
        self
    }

    pub fn without(mut self, family: DatabaseFamily, operation: Operation) -> Self {
        let key = ScenarioKey::new(family, operation);
        self.entries.retain(|e| e.key != key);
        self
    }

    pub fn entries(&self) -> &[ScenarioInfo] {
        &self.entries
    }

    pub fn lookup(&self, family: DatabaseFamily, operation: Operation) -> Option<&ScenarioInfo> {
        self.entries
            .iter()
            .find(|e| e.key.family == family && e.key.operation == operation)
    }

    /// Resolves the placement and builds the script for `selection`.
    pub fn script_for(&self, selection: &Selection, topology: &Topology) -> Result<(ScenarioKey, Script)> {
        let info = self
            .lookup(selection.family, selection.operation)
            .ok_or(Error::Unsupported {
                family: selection.family,
                operation: selection.operation,
            })?;
        let placement = RolePlacement::resolve(selection);
        Ok((info.key, (info.build)(&placement, topology)))
    }
}
