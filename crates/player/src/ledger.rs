//! Per-player resource ledger and hotbar store.
//!
//! The single authoritative copy of every connected player's economy
//! state. All mutations funnel through [`PlayerResourcesManager`]; the
//! transaction engine in this crate is the only other writer, and only
//! inside a transaction boundary.

use crate::sync::{ClientSync, NullSync, PlayerSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wildroot_core::{HotbarItem, ItemKind, PlayerId, ResourceKind, SimTick, HOTBAR_SIZE};

/// Quantities seeded into every fresh ledger on join.
pub const STARTER_KIT: [(ResourceKind, u32); 3] = [
    (ResourceKind::Wood, 10),
    (ResourceKind::Stone, 5),
    (ResourceKind::Fiber, 5),
];

/// One player's economy state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub(crate) resources: HashMap<ResourceKind, u32>,
    pub(crate) hotbar: [Option<HotbarItem>; HOTBAR_SIZE],
    pub(crate) last_updated: SimTick,
    pub(crate) level: u32,
    pub(crate) experience: u32,
}

impl PlayerLedger {
    fn starter(now: SimTick) -> Self {
        Self {
            resources: STARTER_KIT.into_iter().collect(),
            hotbar: std::array::from_fn(|_| None),
            last_updated: now,
            level: 1,
            experience: 0,
        }
    }

    /// Ledger quantities by resource kind. Absent key means zero.
    pub fn resources(&self) -> &HashMap<ResourceKind, u32> {
        &self.resources
    }

    /// Quantity held of one kind.
    pub fn amount(&self, kind: ResourceKind) -> u32 {
        self.resources.get(&kind).copied().unwrap_or(0)
    }

    /// The hotbar slot array.
    pub fn hotbar(&self) -> &[Option<HotbarItem>; HOTBAR_SIZE] {
        &self.hotbar
    }

    /// Tick of the last committed mutation.
    pub fn last_updated(&self) -> SimTick {
        self.last_updated
    }

    /// Ledger units plus resource units embedded in hotbar stacks.
    ///
    /// This is the quantity conserved by item movement: only harvest
    /// credits and explicit consumption change it.
    pub fn total_units(&self) -> u64 {
        let ledger: u64 = self.resources.values().map(|&n| n as u64).sum();
        let hotbar: u64 = self
            .hotbar
            .iter()
            .flatten()
            .filter(|item| item.kind == ItemKind::Resource)
            .map(|item| item.amount as u64)
            .sum();
        ledger + hotbar
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            resources: self.resources.clone(),
            hotbar: self.hotbar.clone(),
            level: self.level,
            experience: self.experience,
            last_updated: self.last_updated,
        }
    }
}

/// Outcome of crediting a ledger, reporting the cap truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditOutcome {
    /// Units the caller asked for.
    pub requested: u32,
    /// Units actually applied after the stack cap.
    pub credited: u32,
    /// Ledger quantity after the credit.
    pub total: u32,
}

/// Registry of connected players' ledgers, keyed by session id.
///
/// Players are created on join and destroyed on leave; nothing here is
/// persisted, an external save collaborator snapshots ledgers if it
/// wants durability.
pub struct PlayerResourcesManager {
    players: HashMap<PlayerId, PlayerLedger>,
    sync: Box<dyn ClientSync>,
}

impl PlayerResourcesManager {
    /// Manager with no client transport wired.
    pub fn new() -> Self {
        Self::with_sync(Box::new(NullSync))
    }

    /// Manager pushing state changes through `sync`.
    pub fn with_sync(sync: Box<dyn ClientSync>) -> Self {
        Self {
            players: HashMap::new(),
            sync,
        }
    }

    /// Join hook: seed a fresh ledger with starter quantities and an
    /// empty hotbar, then push the initial sync.
    ///
    /// Re-joining with an existing ledger keeps it untouched.
    pub fn initialize_player(&mut self, player: PlayerId, now: SimTick) {
        if self.players.contains_key(&player) {
            tracing::warn!(player = %player, "Player already initialized, keeping ledger");
            return;
        }
        tracing::info!(player = %player, "Initialized player resources");
        self.players.insert(player.clone(), PlayerLedger::starter(now));
        self.sync_player(&player);
    }

    /// Leave hook: drop the ledger. Returns false for unknown players.
    pub fn remove_player(&mut self, player: &PlayerId) -> bool {
        let removed = self.players.remove(player).is_some();
        if removed {
            tracing::info!(player = %player, "Removed player resources");
        }
        removed
    }

    /// Read access to one player's ledger.
    pub fn ledger(&self, player: &PlayerId) -> Option<&PlayerLedger> {
        self.players.get(player)
    }

    pub(crate) fn ledger_mut(&mut self, player: &PlayerId) -> Option<&mut PlayerLedger> {
        self.players.get_mut(player)
    }

    /// Credit `amount` units of `kind`, clamped to the per-kind stack
    /// cap. Overflow beyond the cap is silently dropped; the outcome
    /// reports requested versus credited so the caller can tell.
    ///
    /// Returns `None` for unknown players.
    pub fn give_resource(
        &mut self,
        player: &PlayerId,
        kind: ResourceKind,
        amount: u32,
        now: SimTick,
    ) -> Option<CreditOutcome> {
        let ledger = self.players.get_mut(player)?;
        let current = ledger.amount(kind);
        let cap = kind.stack_cap();
        let credited = amount.min(cap.saturating_sub(current));
        let total = current + credited;

        if credited > 0 {
            ledger.resources.insert(kind, total);
            ledger.last_updated = now;
        }
        if credited < amount {
            tracing::debug!(
                player = %player,
                kind = %kind,
                requested = amount,
                credited,
                "Ledger credit truncated at stack cap"
            );
        }

        self.sync.resource_updated(player, kind, total);
        self.emit_sync(player);
        Some(CreditOutcome {
            requested: amount,
            credited,
            total,
        })
    }

    /// Replace the contents of a hotbar slot.
    ///
    /// Returns false for unknown players or out-of-bounds slots.
    pub fn set_hotbar_slot(
        &mut self,
        player: &PlayerId,
        slot: usize,
        item: Option<HotbarItem>,
        now: SimTick,
    ) -> bool {
        if slot >= HOTBAR_SIZE {
            return false;
        }
        let Some(ledger) = self.players.get_mut(player) else {
            return false;
        };
        ledger.hotbar[slot] = item;
        ledger.last_updated = now;

        let hotbar = ledger.hotbar.clone();
        self.sync.hotbar_updated(player, &hotbar);
        self.emit_sync(player);
        true
    }

    /// Index of the first empty hotbar slot, if any.
    pub fn find_empty_hotbar_slot(&self, player: &PlayerId) -> Option<usize> {
        self.players
            .get(player)?
            .hotbar
            .iter()
            .position(|slot| slot.is_none())
    }

    /// Activate a hotbar slot.
    ///
    /// Consumables decrement by one and clear the slot at zero; other
    /// item kinds only emit the slot-used event (their use semantics
    /// belong to collaborators). Returns false when the slot is empty,
    /// out of bounds, or the player is unknown.
    pub fn use_hotbar_slot(&mut self, player: &PlayerId, slot: usize, now: SimTick) -> bool {
        if slot >= HOTBAR_SIZE {
            return false;
        }
        let Some(ledger) = self.players.get_mut(player) else {
            return false;
        };
        let Some(item) = ledger.hotbar[slot].clone() else {
            return false;
        };

        let mut mutated = false;
        if item.kind == ItemKind::Consumable {
            if item.amount <= 1 {
                ledger.hotbar[slot] = None;
            } else {
                let mut rest = item.clone();
                rest.amount -= 1;
                ledger.hotbar[slot] = Some(rest);
            }
            ledger.last_updated = now;
            mutated = true;
        }

        let hotbar = ledger.hotbar.clone();
        self.sync.slot_used(player, slot, &item.item_id);
        if mutated {
            self.sync.hotbar_updated(player, &hotbar);
            self.emit_sync(player);
        }
        true
    }

    /// Push the player's full state through the sync collaborator.
    pub fn sync_player(&mut self, player: &PlayerId) {
        self.emit_sync(player);
    }

    /// Commit hook used by the transaction engine after a successful
    /// execute: stamp the mutation tick, announce a ledger credit if
    /// the transaction made one, and resync.
    pub(crate) fn commit(
        &mut self,
        player: &PlayerId,
        now: SimTick,
        credited: Option<(ResourceKind, u32)>,
    ) {
        if let Some(ledger) = self.players.get_mut(player) {
            ledger.last_updated = now;
            let hotbar = ledger.hotbar.clone();
            if let Some((kind, total)) = credited {
                self.sync.resource_updated(player, kind, total);
            }
            self.sync.hotbar_updated(player, &hotbar);
        }
        self.emit_sync(player);
    }

    fn emit_sync(&mut self, player: &PlayerId) {
        if let Some(ledger) = self.players.get(player) {
            let snapshot = ledger.snapshot();
            self.sync.player_synced(player, &snapshot);
        }
    }
}

impl Default for PlayerResourcesManager {
    fn default() -> Self {
        Self::new()
    }
}
