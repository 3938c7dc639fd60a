//! Resource vocabulary and static per-kind metadata.
//!
//! Every harvestable node and every ledger entry is keyed by a
//! [`ResourceKind`]. Metadata is a fixed compile-time table; content
//! packs are out of scope for the economy core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hard ceiling applied to every ledger stack regardless of metadata.
pub const LEDGER_STACK_CAP: u32 = 100;

/// Kinds of resources tracked by the economy.
///
/// The first four are harvestable from world nodes; the rest are rare
/// variants that only appear through bonus harvest rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Felled from wood nodes.
    Wood,
    /// Mined from stone outcrops.
    Stone,
    /// Pulled from fiber thickets.
    Fiber,
    /// Chipped from crystal formations.
    Crystal,
    /// Rare drop from wood nodes.
    Resin,
    /// Rare drop from stone outcrops.
    Flint,
    /// Rare drop from fiber thickets.
    Silkweed,
    /// Rare drop from crystal formations.
    PrismShard,
}

/// Error returned when parsing an unknown resource key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind: {0}")]
pub struct ParseKindError(pub String);

impl ResourceKind {
    /// Kinds that spawn as world nodes, in spawn-pass order.
    pub const HARVESTABLE: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Fiber,
        ResourceKind::Crystal,
    ];

    /// Canonical string key used in wire payloads and node ids.
    pub fn as_key(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Fiber => "fiber",
            ResourceKind::Crystal => "crystal",
            ResourceKind::Resin => "resin",
            ResourceKind::Flint => "flint",
            ResourceKind::Silkweed => "silkweed",
            ResourceKind::PrismShard => "prism_shard",
        }
    }

    /// Static metadata for this kind.
    pub fn metadata(self) -> &'static ResourceMetadata {
        match self {
            ResourceKind::Wood => &WOOD,
            ResourceKind::Stone => &STONE,
            ResourceKind::Fiber => &FIBER,
            ResourceKind::Crystal => &CRYSTAL,
            ResourceKind::Resin => &RESIN,
            ResourceKind::Flint => &FLINT,
            ResourceKind::Silkweed => &SILKWEED,
            ResourceKind::PrismShard => &PRISM_SHARD,
        }
    }

    /// Per-kind ledger cap: `min(stack_size, LEDGER_STACK_CAP)`.
    pub fn stack_cap(self) -> u32 {
        self.metadata().stack_size.min(LEDGER_STACK_CAP)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wood" => Ok(ResourceKind::Wood),
            "stone" => Ok(ResourceKind::Stone),
            "fiber" => Ok(ResourceKind::Fiber),
            "crystal" => Ok(ResourceKind::Crystal),
            "resin" => Ok(ResourceKind::Resin),
            "flint" => Ok(ResourceKind::Flint),
            "silkweed" => Ok(ResourceKind::Silkweed),
            "prism_shard" => Ok(ResourceKind::PrismShard),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// Static properties shared by all nodes and ledger entries of a kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMetadata {
    /// Human-readable name shown by the client.
    pub display_name: &'static str,
    /// Icon key resolved by the presentation layer.
    pub icon: &'static str,
    /// Maximum units a single ledger stack holds before the hard cap.
    pub stack_size: u32,
    /// Starting health of a freshly spawned node.
    pub node_health: u32,
    /// Units awarded by a hit dealing exactly `node_health` damage.
    pub base_yield: u32,
    /// Nodes placed by the world-init spawn pass.
    pub spawn_count: usize,
    /// Rare variant appended by bonus harvest rolls, if any.
    pub rare_drop: Option<ResourceKind>,
}

const WOOD: ResourceMetadata = ResourceMetadata {
    display_name: "Wood",
    icon: "icon_wood",
    stack_size: 100,
    node_health: 100,
    base_yield: 10,
    spawn_count: 6,
    rare_drop: Some(ResourceKind::Resin),
};

const STONE: ResourceMetadata = ResourceMetadata {
    display_name: "Stone",
    icon: "icon_stone",
    stack_size: 100,
    node_health: 150,
    base_yield: 8,
    spawn_count: 4,
    rare_drop: Some(ResourceKind::Flint),
};

const FIBER: ResourceMetadata = ResourceMetadata {
    display_name: "Fiber",
    icon: "icon_fiber",
    stack_size: 150,
    node_health: 60,
    base_yield: 12,
    spawn_count: 5,
    rare_drop: Some(ResourceKind::Silkweed),
};

const CRYSTAL: ResourceMetadata = ResourceMetadata {
    display_name: "Crystal",
    icon: "icon_crystal",
    stack_size: 50,
    node_health: 200,
    base_yield: 5,
    spawn_count: 3,
    rare_drop: Some(ResourceKind::PrismShard),
};

const RESIN: ResourceMetadata = ResourceMetadata {
    display_name: "Resin",
    icon: "icon_resin",
    stack_size: 25,
    node_health: 0,
    base_yield: 0,
    spawn_count: 0,
    rare_drop: None,
};

const FLINT: ResourceMetadata = ResourceMetadata {
    display_name: "Flint",
    icon: "icon_flint",
    stack_size: 25,
    node_health: 0,
    base_yield: 0,
    spawn_count: 0,
    rare_drop: None,
};

const SILKWEED: ResourceMetadata = ResourceMetadata {
    display_name: "Silkweed",
    icon: "icon_silkweed",
    stack_size: 25,
    node_health: 0,
    base_yield: 0,
    spawn_count: 0,
    rare_drop: None,
};

const PRISM_SHARD: ResourceMetadata = ResourceMetadata {
    display_name: "Prism Shard",
    icon: "icon_prism_shard",
    stack_size: 25,
    node_health: 0,
    base_yield: 0,
    spawn_count: 0,
    rare_drop: None,
};
