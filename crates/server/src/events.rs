//! Inbound event contract delivered by the networking collaborator.

use wildroot_core::{PlayerId, ResourceKind, WorldPos};
use wildroot_player::{CreditOutcome, TransactionError};

/// Discrete requests processed one at a time in arrival order.
///
/// The last three variants are the admin/operational surface; they
/// bypass normal flow and exist for tooling only.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A player session opened.
    PlayerJoined {
        /// Joining player.
        player: PlayerId,
    },
    /// A player session closed.
    PlayerLeft {
        /// Leaving player.
        player: PlayerId,
    },
    /// An attack was performed near a position.
    Attack {
        /// Attacking player.
        actor: PlayerId,
        /// Raw damage before multipliers.
        raw_damage: u32,
        /// Equipped tool key, if any.
        tool: Option<String>,
        /// Where the attack landed.
        position: WorldPos,
    },
    /// UI request: move a ledger resource into the hotbar.
    MoveItemToHotbar {
        /// Requesting player.
        player: PlayerId,
        /// Ledger resource key.
        item_id: String,
        /// Units to move.
        amount: u32,
        /// Explicit slot, or `None` for first empty.
        target_slot: Option<usize>,
    },
    /// UI request: swap two hotbar slots.
    MoveHotbarSlot {
        /// Requesting player.
        player: PlayerId,
        /// Slot moved from.
        from: usize,
        /// Slot moved to.
        to: usize,
    },
    /// UI request: activate a hotbar slot.
    UseHotbarSlot {
        /// Requesting player.
        player: PlayerId,
        /// Slot to activate.
        slot: usize,
    },
    /// Admin: credit a resource directly.
    GiveResource {
        /// Receiving player.
        player: PlayerId,
        /// Resource to credit.
        kind: ResourceKind,
        /// Units requested.
        amount: u32,
    },
    /// Admin: respawn every node immediately.
    RespawnAllNodes,
    /// Admin: respawn one node immediately.
    ForceRespawnNode {
        /// Node to respawn.
        node_id: String,
    },
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Attack found no alive node in range.
    AttackMissed,
    /// Attack connected with a node.
    AttackHit {
        /// Struck node.
        node_id: String,
        /// Damage applied after multipliers.
        effective_damage: u32,
        /// True when the strike destroyed the node.
        destroyed: bool,
    },
    /// A transaction committed.
    TransactionCommitted {
        /// Slot that received an item, when one did.
        placed_slot: Option<usize>,
    },
    /// A transaction was rejected; the ledger is unchanged.
    TransactionRejected(TransactionError),
    /// A hotbar slot was activated.
    SlotUsed,
    /// A ledger credit was applied (possibly truncated).
    Credited(CreditOutcome),
    /// Count of nodes an admin respawn restored.
    NodesRespawned(usize),
    /// The event referenced an unknown player, slot, or node.
    Ignored,
}
