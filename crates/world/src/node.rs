//! Harvestable world nodes and their lifecycle.
//!
//! Nodes are created once by the world-init spawn pass and never
//! deleted afterwards; destruction only flips them dead and schedules
//! a respawn that the per-tick sweep applies.

use crate::placement::{find_spawn_position, PlacementConfig, TerrainProbe};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wildroot_core::{ResourceKind, SimTick, WorldPos};

/// Shortest respawn delay after destruction (60 s at 20 TPS).
pub const RESPAWN_MIN_TICKS: u64 = 1200;

/// Longest respawn delay after destruction (120 s at 20 TPS).
pub const RESPAWN_MAX_TICKS: u64 = 2400;

/// One harvestable world object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Unique identifier in `{kind}_node_{counter}` format.
    pub id: String,
    /// Resource awarded when harvested.
    pub kind: ResourceKind,
    /// Current health. Zero only while dead.
    pub health: u32,
    /// Health restored on respawn.
    pub max_health: u32,
    /// World position, fixed once placed.
    pub position: WorldPos,
    /// Units awarded per full-health hit.
    pub base_yield: u32,
    /// Yield scale reserved for rarity variants. 1.0 for normal nodes.
    pub quality_multiplier: f32,
    /// False while awaiting respawn.
    pub is_alive: bool,
    /// Respawn deadline. `SimTick::ZERO` when not scheduled.
    pub respawn_at: SimTick,
}

/// Lightweight targeting descriptor handed to combat collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTarget {
    /// Node identifier.
    pub id: String,
    /// Resource kind of the node.
    pub kind: ResourceKind,
    /// Node position.
    pub position: WorldPos,
}

/// Result of applying damage to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// No node with the given id exists.
    NotFound,
    /// The node is dead and awaiting respawn; nothing happened.
    AlreadyDead,
    /// Health was reduced; the node survives with this much left.
    Damaged {
        /// Health remaining after the hit.
        remaining: u32,
    },
    /// Health reached zero; the node died and a respawn was scheduled.
    Destroyed,
}

/// Owns every harvestable node in the world.
///
/// The sole writer of node state. Other components read through
/// [`NodeManager::node`] and [`NodeManager::alive_nodes`] and mutate
/// only via the damage/respawn operations.
pub struct NodeManager {
    nodes: BTreeMap<String, ResourceNode>,
    next_counter: u64,
    placement: PlacementConfig,
}

impl NodeManager {
    /// Create an empty manager with the given placement tunables.
    pub fn new(placement: PlacementConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_counter: 1,
            placement,
        }
    }

    /// World-init spawn pass: place the configured count of nodes for
    /// each harvestable kind.
    ///
    /// Placement failures are skipped silently (they only reduce the
    /// pass count); the return value is the number actually placed.
    pub fn spawn_initial(&mut self, rng: &mut impl Rng, terrain: &dyn TerrainProbe) -> usize {
        let mut spawned = 0;
        for kind in ResourceKind::HARVESTABLE {
            let count = kind.metadata().spawn_count;
            for _ in 0..count {
                if self.create_node(kind, rng, terrain).is_some() {
                    spawned += 1;
                }
            }
        }
        tracing::info!(spawned, "Initial resource node pass complete");
        spawned
    }

    /// Create and place a single node of `kind`.
    ///
    /// Returns `None` when no position could be found (only possible
    /// with an empty anchor list); callers simply skip the spawn.
    pub fn create_node(
        &mut self,
        kind: ResourceKind,
        rng: &mut impl Rng,
        terrain: &dyn TerrainProbe,
    ) -> Option<&ResourceNode> {
        let occupied: Vec<WorldPos> = self
            .nodes
            .values()
            .filter(|node| node.is_alive)
            .map(|node| node.position)
            .collect();

        let spot = find_spawn_position(&self.placement, rng, terrain, &occupied)?;

        let meta = kind.metadata();
        let id = format!("{}_node_{}", kind.as_key(), self.next_counter);
        self.next_counter += 1;

        tracing::debug!(
            id = %id,
            kind = %kind,
            x = spot.position.x,
            z = spot.position.z,
            fell_back = spot.fell_back,
            "Placed resource node"
        );

        let node = ResourceNode {
            id: id.clone(),
            kind,
            health: meta.node_health,
            max_health: meta.node_health,
            position: spot.position,
            base_yield: meta.base_yield,
            quality_multiplier: 1.0,
            is_alive: true,
            respawn_at: SimTick::ZERO,
        };
        self.nodes.insert(id.clone(), node);
        self.nodes.get(&id)
    }

    /// Apply `amount` damage to a node, destroying it at zero health.
    ///
    /// Destruction schedules a respawn uniformly drawn from the
    /// configured window after `now`.
    pub fn damage(
        &mut self,
        node_id: &str,
        amount: u32,
        now: SimTick,
        rng: &mut impl Rng,
    ) -> DamageOutcome {
        let node = match self.nodes.get_mut(node_id) {
            Some(node) => node,
            None => return DamageOutcome::NotFound,
        };
        if !node.is_alive {
            return DamageOutcome::AlreadyDead;
        }

        node.health = node.health.saturating_sub(amount);
        if node.health > 0 {
            return DamageOutcome::Damaged {
                remaining: node.health,
            };
        }

        node.is_alive = false;
        node.respawn_at = now.advance(rng.gen_range(RESPAWN_MIN_TICKS..=RESPAWN_MAX_TICKS));
        tracing::debug!(
            id = %node.id,
            respawn_at = node.respawn_at.0,
            "Resource node destroyed"
        );
        DamageOutcome::Destroyed
    }

    /// Restore a node to full health immediately.
    ///
    /// Returns false when the id is unknown. Also the admin
    /// force-respawn path; respawning an alive node just refills it.
    pub fn respawn(&mut self, node_id: &str) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.health = node.max_health;
                node.is_alive = true;
                node.respawn_at = SimTick::ZERO;
                true
            }
            None => false,
        }
    }

    /// Admin path: respawn every node regardless of schedule.
    pub fn respawn_all(&mut self) -> usize {
        let mut restored = 0;
        for node in self.nodes.values_mut() {
            if !node.is_alive {
                restored += 1;
            }
            node.health = node.max_health;
            node.is_alive = true;
            node.respawn_at = SimTick::ZERO;
        }
        tracing::info!(restored, "Respawned all resource nodes");
        restored
    }

    /// Per-tick sweep: respawn dead nodes whose deadline has elapsed.
    ///
    /// Returns the number of nodes respawned this tick.
    pub fn update(&mut self, now: SimTick) -> usize {
        let mut respawned = 0;
        for node in self.nodes.values_mut() {
            if node.is_alive || node.respawn_at == SimTick::ZERO || node.respawn_at > now {
                continue;
            }
            node.health = node.max_health;
            node.is_alive = true;
            node.respawn_at = SimTick::ZERO;
            respawned += 1;
            tracing::debug!(id = %node.id, "Resource node respawned");
        }
        respawned
    }

    /// Read access to a single node.
    pub fn node(&self, node_id: &str) -> Option<&ResourceNode> {
        self.nodes.get(node_id)
    }

    /// Targeting descriptors for every alive node.
    pub fn alive_nodes(&self) -> Vec<NodeTarget> {
        self.nodes
            .values()
            .filter(|node| node.is_alive)
            .map(|node| NodeTarget {
                id: node.id.clone(),
                kind: node.kind,
                position: node.position,
            })
            .collect()
    }

    /// Nearest alive node within `range` of `position`, if any.
    pub fn nearest_alive_in_range(&self, position: WorldPos, range: f64) -> Option<NodeTarget> {
        let range_sq = range * range;
        self.nodes
            .values()
            .filter(|node| node.is_alive)
            .map(|node| (node, node.position.distance_sq(&position)))
            .filter(|(_, dist_sq)| *dist_sq <= range_sq)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(node, _)| NodeTarget {
                id: node.id.clone(),
                kind: node.kind,
                position: node.position,
            })
    }

    /// Total number of nodes ever created.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }
}
