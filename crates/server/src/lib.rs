#![warn(missing_docs)]
//! Authoritative simulation host: owns the economy managers and routes
//! inbound events into them, one at a time, on a single tick loop.

pub mod events;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wildroot_core::{PlayerId, SimTick, WorldPos};
use wildroot_player::{ClientSync, InventoryTransaction, PlayerResourcesManager, TransactionEngine};
use wildroot_world::{
    CombatStatProvider, HarvestingEngine, NodeManager, PlacementConfig, TerrainProbe, ToolProvider,
};

pub use events::{EventOutcome, InboundEvent};

/// Server construction options.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Seed for all server-side randomness.
    pub world_seed: u64,
    /// Maximum distance an attack reaches a node from.
    pub attack_range: f64,
    /// Node placement tunables.
    pub placement: PlacementConfig,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            world_seed: 0,
            attack_range: 6.0,
            placement: PlacementConfig::default(),
        }
    }
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick that just ran.
    pub tick: SimTick,
    /// Nodes the respawn sweep restored.
    pub nodes_respawned: usize,
}

/// The authoritative economy host.
///
/// All mutations are serialized through `tick` and `handle`; there is
/// no concurrent writer, so transaction atomicity rests on the
/// snapshot/rollback inside the transaction engine alone.
pub struct Server {
    nodes: NodeManager,
    players: PlayerResourcesManager,
    harvest: HarvestingEngine,
    transactions: TransactionEngine,
    current_tick: SimTick,
    rng: StdRng,
    attack_range: f64,
}

impl Server {
    /// Server with no client transport and neutral tool/stat providers.
    pub fn new(options: ServerOptions, terrain: &dyn TerrainProbe) -> Self {
        Self::with_collaborators(options, terrain, None, None, None)
    }

    /// Server with explicit collaborators; `None` falls back to the
    /// neutral default for each seam.
    pub fn with_collaborators(
        options: ServerOptions,
        terrain: &dyn TerrainProbe,
        sync: Option<Box<dyn ClientSync>>,
        tools: Option<Box<dyn ToolProvider>>,
        stats: Option<Box<dyn CombatStatProvider>>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(options.world_seed);
        let mut nodes = NodeManager::new(options.placement);
        nodes.spawn_initial(&mut rng, terrain);

        let players = match sync {
            Some(sync) => PlayerResourcesManager::with_sync(sync),
            None => PlayerResourcesManager::new(),
        };
        let harvest = match (tools, stats) {
            (Some(tools), Some(stats)) => HarvestingEngine::with_providers(tools, stats),
            (Some(tools), None) => {
                HarvestingEngine::with_providers(tools, Box::new(wildroot_world::NeutralStats))
            }
            (None, Some(stats)) => {
                HarvestingEngine::with_providers(Box::new(wildroot_world::NeutralTools), stats)
            }
            (None, None) => HarvestingEngine::new(),
        };

        Self {
            nodes,
            players,
            harvest,
            transactions: TransactionEngine::new(),
            current_tick: SimTick::ZERO,
            rng,
            attack_range: options.attack_range,
        }
    }

    /// Advance one deterministic tick: run the node respawn sweep.
    pub fn tick(&mut self) -> TickSummary {
        self.current_tick = self.current_tick.advance(1);
        let nodes_respawned = self.nodes.update(self.current_tick);
        TickSummary {
            tick: self.current_tick,
            nodes_respawned,
        }
    }

    /// Process one inbound event.
    pub fn handle(&mut self, event: InboundEvent) -> EventOutcome {
        let now = self.current_tick;
        match event {
            InboundEvent::PlayerJoined { player } => {
                self.players.initialize_player(player, now);
                EventOutcome::Ignored
            }
            InboundEvent::PlayerLeft { player } => {
                self.players.remove_player(&player);
                EventOutcome::Ignored
            }
            InboundEvent::Attack {
                actor,
                raw_damage,
                tool,
                position,
            } => self.handle_attack(actor, raw_damage, tool.as_deref(), position),
            InboundEvent::MoveItemToHotbar {
                player,
                item_id,
                amount,
                target_slot,
            } => {
                let tx = InventoryTransaction::move_to_hotbar(item_id, amount, target_slot);
                self.apply_transaction(&player, &tx)
            }
            InboundEvent::MoveHotbarSlot { player, from, to } => {
                let tx = InventoryTransaction::move_hotbar_slot(from, to);
                self.apply_transaction(&player, &tx)
            }
            InboundEvent::UseHotbarSlot { player, slot } => {
                if self.players.use_hotbar_slot(&player, slot, now) {
                    EventOutcome::SlotUsed
                } else {
                    EventOutcome::Ignored
                }
            }
            InboundEvent::GiveResource {
                player,
                kind,
                amount,
            } => match self.players.give_resource(&player, kind, amount, now) {
                Some(outcome) => EventOutcome::Credited(outcome),
                None => EventOutcome::Ignored,
            },
            InboundEvent::RespawnAllNodes => {
                EventOutcome::NodesRespawned(self.nodes.respawn_all())
            }
            InboundEvent::ForceRespawnNode { node_id } => {
                if self.nodes.respawn(&node_id) {
                    EventOutcome::NodesRespawned(1)
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    fn handle_attack(
        &mut self,
        actor: PlayerId,
        raw_damage: u32,
        tool: Option<&str>,
        position: WorldPos,
    ) -> EventOutcome {
        let target = match self.nodes.nearest_alive_in_range(position, self.attack_range) {
            Some(target) => target,
            None => {
                tracing::debug!(actor = %actor, "Attack found no node in range");
                return EventOutcome::AttackMissed;
            }
        };

        let now = self.current_tick;
        let Server {
            nodes,
            players,
            harvest,
            rng,
            ..
        } = self;

        let report = harvest.strike(
            nodes,
            rng,
            now,
            &target.id,
            raw_damage,
            &actor,
            tool,
            |kind, amount| {
                players.give_resource(&actor, kind, amount, now);
            },
        );

        EventOutcome::AttackHit {
            node_id: target.id,
            effective_damage: report.effective_damage,
            destroyed: report.destroyed,
        }
    }

    /// Current simulation tick.
    pub fn current_tick(&self) -> SimTick {
        self.current_tick
    }

    /// Read access to the node store.
    pub fn nodes(&self) -> &NodeManager {
        &self.nodes
    }

    /// Read access to the player registry.
    pub fn players(&self) -> &PlayerResourcesManager {
        &self.players
    }

    fn apply_transaction(&mut self, player: &PlayerId, tx: &InventoryTransaction) -> EventOutcome {
        match self
            .transactions
            .apply(&mut self.players, player, tx, self.current_tick)
        {
            Ok(receipt) => EventOutcome::TransactionCommitted {
                placed_slot: receipt.placed_slot,
            },
            Err(err) => EventOutcome::TransactionRejected(err),
        }
    }
}
