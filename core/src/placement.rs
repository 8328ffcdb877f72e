use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::network::Region;
use crate::traits::SelectionStore;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DatabaseFamily {
    /// Stateless SQL gateways over a Raft-replicated KV layer, with a
    /// timestamp oracle as control plane (TiDB style).
    TwoTier,
    /// Tablet servers that coordinate and store, with transaction status
    /// tablets for distributed commits (YugabyteDB style).
    SingleTier,
}

impl DatabaseFamily {
    pub const ALL: [DatabaseFamily; 2] = [DatabaseFamily::TwoTier, DatabaseFamily::SingleTier];

    pub fn token(self) -> &'static str {
        match self {
            DatabaseFamily::TwoTier => "two-tier",
            DatabaseFamily::SingleTier => "single-tier",
        }
    }
}

impl fmt::Display for DatabaseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DatabaseFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-tier" | "tidb" => Ok(DatabaseFamily::TwoTier),
            "single-tier" | "yugabyte" => Ok(DatabaseFamily::SingleTier),
            _ => Err(Error::Parse {
                what: "database family",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    PointRead,
    PointWrite,
    RangeRead,
    RangeWrite,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::PointRead,
        Operation::PointWrite,
        Operation::RangeRead,
        Operation::RangeWrite,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Operation::PointRead => "point-read",
            Operation::PointWrite => "point-write",
            Operation::RangeRead => "range-read",
            Operation::RangeWrite => "range-write",
        }
    }

    pub fn is_range(self) -> bool {
        matches!(self, Operation::RangeRead | Operation::RangeWrite)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point-read" => Ok(Operation::PointRead),
            "point-write" | "1pc-write" => Ok(Operation::PointWrite),
            "range-read" => Ok(Operation::RangeRead),
            "range-write" | "2pc-write" => Ok(Operation::RangeWrite),
            _ => Err(Error::Parse {
                what: "operation",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Client,
    SqlGateway,
    ControlLeader,
    Storage,
}

/// A role pinned to a region, e.g. the storage node of region b.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalNode {
    pub role: Role,
    pub region: Region,
}

impl LogicalNode {
    pub fn new(role: Role, region: Region) -> Self {
        Self { role, region }
    }

    pub fn client(region: Region) -> Self {
        Self::new(Role::Client, region)
    }

    pub fn gateway(region: Region) -> Self {
        Self::new(Role::SqlGateway, region)
    }

    pub fn control_leader(region: Region) -> Self {
        Self::new(Role::ControlLeader, region)
    }

    pub fn storage(region: Region) -> Self {
        Self::new(Role::Storage, region)
    }
}

impl fmt::Display for LogicalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            Role::Client => "client",
            Role::SqlGateway => "sql",
            Role::ControlLeader => "control",
            Role::Storage => "storage",
        };
        write!(f, "{}-{}", role, self.region.token())
    }
}

/// Everything the operator picked for one run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Selection {
    pub family: DatabaseFamily,
    pub operation: Operation,
    pub client_region: Region,
    pub control_leader: Region,
    /// Primary data leader, used by point operations and range writes.
    pub data_leader: Region,
    /// Leaders a range read fans out to. Empty falls back to `data_leader`.
    pub range_leaders: BTreeSet<Region>,
    /// Status tablet leader for single-tier distributed commits.
    pub transaction_leader: Region,
    pub speed: u8,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            family: DatabaseFamily::TwoTier,
            operation: Operation::PointRead,
            client_region: Region::A,
            control_leader: Region::A,
            data_leader: Region::A,
            range_leaders: BTreeSet::new(),
            transaction_leader: Region::A,
            speed: 5,
        }
    }
}

pub mod keys {
    pub const FAMILY: &str = "qviz.family";
    pub const OPERATION: &str = "qviz.operation";
    pub const CLIENT_REGION: &str = "qviz.client_region";
    pub const CONTROL_LEADER: &str = "qviz.control_leader";
    pub const DATA_LEADER: &str = "qviz.data_leader";
    pub const RANGE_LEADERS: &str = "qviz.range_leaders";
    pub const TRANSACTION_LEADER: &str = "qviz.transaction_leader";
    pub const SPEED: &str = "qviz.speed";

    pub const ALL: [&str; 8] = [
        FAMILY,
        OPERATION,
        CLIENT_REGION,
        CONTROL_LEADER,
        DATA_LEADER,
        RANGE_LEADERS,
        TRANSACTION_LEADER,
        SPEED,
    ];
}

fn parse_region_set(value: &str) -> Result<BTreeSet<Region>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Region::from_str)
        .collect()
}

fn parse_speed(value: &str) -> Result<u8> {
    value.trim().parse::<u8>().map_err(|_| Error::Parse {
        what: "speed",
        value: value.to_string(),
    })
}

impl Selection {
    pub fn new(family: DatabaseFamily, operation: Operation) -> Self {
        Self {
            family,
            operation,
            ..Default::default()
        }
    }

    pub fn with_client(mut self, region: Region) -> Self {
        self.client_region = region;
        self
    }

    pub fn with_control_leader(mut self, region: Region) -> Self {
        self.control_leader = region;
        self
    }

    pub fn with_data_leader(mut self, region: Region) -> Self {
        self.data_leader = region;
        self
    }

    pub fn with_range_leaders(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.range_leaders = regions.into_iter().collect();
        self
    }

    pub fn with_transaction_leader(mut self, region: Region) -> Self {
        self.transaction_leader = region;
        self
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    pub fn clamped_speed(&self) -> u8 {
        self.speed.clamp(MIN_SPEED, MAX_SPEED)
    }

    /// Whether the transaction coordinator region means anything for this
    /// selection. Front ends hide the control otherwise.
    pub fn uses_transaction_leader(&self) -> bool {
        self.family == DatabaseFamily::SingleTier && self.operation == Operation::RangeWrite
    }

    pub fn uses_range_leaders(&self) -> bool {
        self.operation == Operation::RangeRead
    }

    /// Reads every known option, keeping defaults for absent or unparseable
    /// values.
    pub fn load(store: &dyn SelectionStore) -> Self {
        let mut sel = Self::default();
        for key in keys::ALL {
            let Some(value) = store.get(key) else { continue };
            if let Err(err) = sel.apply(key, &value) {
                log::warn!("ignoring stored option {}: {}", key, err);
            }
        }
        sel
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            keys::FAMILY => self.family = value.parse()?,
            keys::OPERATION => self.operation = value.parse()?,
            keys::CLIENT_REGION => self.client_region = value.parse()?,
            keys::CONTROL_LEADER => self.control_leader = value.parse()?,
            keys::DATA_LEADER => self.data_leader = value.parse()?,
            keys::RANGE_LEADERS => self.range_leaders = parse_region_set(value)?,
            keys::TRANSACTION_LEADER => self.transaction_leader = value.parse()?,
            keys::SPEED => self.speed = parse_speed(value)?.clamp(MIN_SPEED, MAX_SPEED),
            _ => {}
        }
        Ok(())
    }

    /// Writes every option. Failures are logged and otherwise ignored.
    pub fn save(&self, store: &mut dyn SelectionStore) {
        let range_leaders = self
            .range_leaders
            .iter()
            .map(|r| r.token())
            .collect::<Vec<_>>()
            .join(",");
        let speed = self.speed.to_string();
        let entries = [
            (keys::FAMILY, self.family.token()),
            (keys::OPERATION, self.operation.token()),
            (keys::CLIENT_REGION, self.client_region.token()),
            (keys::CONTROL_LEADER, self.control_leader.token()),
            (keys::DATA_LEADER, self.data_leader.token()),
            (keys::RANGE_LEADERS, range_leaders.as_str()),
            (keys::TRANSACTION_LEADER, self.transaction_leader.token()),
            (keys::SPEED, speed.as_str()),
        ];
        for (key, value) in entries {
            if let Err(err) = store.set(key, value) {
                log::warn!("failed to persist option {}: {}", key, err);
            }
        }
    }
}

/// Roles resolved from a [`Selection`] at the start of a run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RolePlacement {
    pub family: DatabaseFamily,
    pub client: Region,
    pub control_leader: Region,
    /// Never empty. A single entry for point operations and range writes.
    pub data_leaders: Vec<Region>,
    pub transaction_leader: Option<Region>,
}

impl RolePlacement {
    pub fn resolve(selection: &Selection) -> Self {
        let data_leaders = if selection.uses_range_leaders() {
            if selection.range_leaders.is_empty() {
                log::warn!(
                    "no range leaders selected, falling back to {}",
                    selection.data_leader
                );
                vec![selection.data_leader]
            } else {
                selection.range_leaders.iter().copied().collect()
            }
        } else {
            vec![selection.data_leader]
        };
        let transaction_leader = selection
            .uses_transaction_leader()
            .then_some(selection.transaction_leader);
        Self {
            family: selection.family,
            client: selection.client_region,
            control_leader: selection.control_leader,
            data_leaders,
            transaction_leader,
        }
    }

    pub fn primary_data_leader(&self) -> Region {
        self.data_leaders.first().copied().unwrap_or(Region::ALL[0])
    }

    /// The node that receives the client request inside its own region.
    pub fn coordinator(&self) -> LogicalNode {
        match self.family {
            DatabaseFamily::TwoTier => LogicalNode::gateway(self.client),
            DatabaseFamily::SingleTier => LogicalNode::storage(self.client),
        }
    }

    /// Nodes a front end shows for this placement, and therefore the only
    /// ones it is expected to resolve.
    pub fn active_nodes(&self) -> Vec<LogicalNode> {
        let mut nodes = vec![LogicalNode::client(self.client)];
        if self.family == DatabaseFamily::TwoTier {
            nodes.push(LogicalNode::gateway(self.client));
        }
        nodes.push(LogicalNode::control_leader(self.control_leader));
        nodes.extend(Region::ALL.into_iter().map(LogicalNode::storage));
        nodes
    }

    pub fn is_data_leader(&self, node: LogicalNode) -> bool {
        node.role == Role::Storage && self.data_leaders.contains(&node.region)
    }
}
