//! Atomic item movement between ledger and hotbar.
//!
//! Every request walks Validate → Snapshot → Execute → Commit. A
//! failure at any stage restores the pre-transaction snapshot before
//! returning, so a failed request is provably effect-free. Snapshot
//! restore is the sole rollback mechanism; there is no partial-undo
//! logic anywhere else.

use crate::ledger::{PlayerLedger, PlayerResourcesManager};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use wildroot_core::{HotbarItem, PlayerId, ResourceKind, SimTick, HOTBAR_SIZE};

/// Requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionOp {
    /// Move items, consuming the source.
    Move,
    /// Place items without consuming the source.
    Copy,
    /// Declared by the wire protocol but rejected deterministically.
    Swap,
}

/// Which container a transaction side addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// The resource ledger.
    Inventory,
    /// The quick-access slot array.
    Hotbar,
}

/// One atomic ledger/hotbar mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    /// Operation to perform.
    pub op: TransactionOp,
    /// Container items come from.
    pub source: ContainerKind,
    /// Container items go to.
    pub target: ContainerKind,
    /// Item being moved (resource key for ledger sides).
    pub item_id: String,
    /// Unit count for ledger-sourced moves.
    pub amount: u32,
    /// Source hotbar slot when the source is the hotbar.
    pub source_slot: Option<usize>,
    /// Target hotbar slot; `None` means "first empty slot".
    pub target_slot: Option<usize>,
}

impl InventoryTransaction {
    /// Move `amount` of a ledger resource into the hotbar.
    pub fn move_to_hotbar(item_id: impl Into<String>, amount: u32, target_slot: Option<usize>) -> Self {
        Self {
            op: TransactionOp::Move,
            source: ContainerKind::Inventory,
            target: ContainerKind::Hotbar,
            item_id: item_id.into(),
            amount,
            source_slot: None,
            target_slot,
        }
    }

    /// Move a hotbar slot's contents back into the ledger.
    pub fn move_to_inventory(source_slot: usize) -> Self {
        Self {
            op: TransactionOp::Move,
            source: ContainerKind::Hotbar,
            target: ContainerKind::Inventory,
            item_id: String::new(),
            amount: 0,
            source_slot: Some(source_slot),
            target_slot: None,
        }
    }

    /// Swap the contents of two hotbar slots.
    pub fn move_hotbar_slot(from: usize, to: usize) -> Self {
        Self {
            op: TransactionOp::Move,
            source: ContainerKind::Hotbar,
            target: ContainerKind::Hotbar,
            item_id: String::new(),
            amount: 0,
            source_slot: Some(from),
            target_slot: Some(to),
        }
    }

    /// Place a ledger resource into the hotbar without consuming it.
    pub fn copy_to_hotbar(item_id: impl Into<String>, amount: u32, target_slot: Option<usize>) -> Self {
        Self {
            op: TransactionOp::Copy,
            source: ContainerKind::Inventory,
            target: ContainerKind::Hotbar,
            item_id: item_id.into(),
            amount,
            source_slot: None,
            target_slot,
        }
    }
}

/// Structured rejection reasons. Never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// No ledger exists for the player.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    /// A hotbar slot index is outside `0..HOTBAR_SIZE`.
    #[error("hotbar slot {0} out of bounds")]
    SlotOutOfBounds(usize),
    /// The item id does not name a ledger resource.
    #[error("item {0} is not a ledger resource")]
    NotALedgerResource(String),
    /// Requested amount was zero.
    #[error("transaction amount must be positive")]
    ZeroAmount,
    /// The ledger holds less than the requested amount.
    #[error("insufficient {item_id}: have {available}, need {requested}")]
    InsufficientResources {
        /// Item that fell short.
        item_id: String,
        /// Units currently held.
        available: u32,
        /// Units the transaction asked for.
        requested: u32,
    },
    /// A hotbar source side did not name its slot.
    #[error("hotbar source requires a source slot")]
    MissingSourceSlot,
    /// A hotbar-to-hotbar move did not name its target slot.
    #[error("hotbar-to-hotbar move requires a target slot")]
    MissingTargetSlot,
    /// The named source slot holds nothing.
    #[error("source hotbar slot {0} is empty")]
    EmptySourceSlot(usize),
    /// The named target slot is already occupied.
    #[error("target hotbar slot {0} is occupied")]
    SlotOccupied(usize),
    /// Auto-placement found no empty hotbar slot.
    #[error("no empty hotbar slot available")]
    NoEmptySlot,
    /// The operation is declared but has no semantics.
    #[error("unsupported transaction operation: {0:?}")]
    UnsupportedOperation(TransactionOp),
    /// The source/target container pair has no defined behavior.
    #[error("unsupported container route: {from:?} -> {to:?}")]
    InvalidRoute {
        /// Requested source container.
        from: ContainerKind,
        /// Requested target container.
        to: ContainerKind,
    },
}

/// What a committed transaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Hotbar slot that received an item, when one did.
    pub placed_slot: Option<usize>,
}

/// Deep copy of one ledger's mutable state, held for the duration of a
/// single transaction and used strictly for rollback.
struct LedgerSnapshot {
    resources: HashMap<ResourceKind, u32>,
    hotbar: [Option<HotbarItem>; HOTBAR_SIZE],
    last_updated: SimTick,
}

impl LedgerSnapshot {
    fn capture(ledger: &PlayerLedger) -> Self {
        Self {
            resources: ledger.resources.clone(),
            hotbar: ledger.hotbar.clone(),
            last_updated: ledger.last_updated,
        }
    }

    fn restore(self, ledger: &mut PlayerLedger) {
        ledger.resources = self.resources;
        ledger.hotbar = self.hotbar;
        ledger.last_updated = self.last_updated;
    }
}

/// The atomic state machine moving items between ledger and hotbar.
pub struct TransactionEngine;

impl TransactionEngine {
    /// Create the engine. Stateless; all state lives in the manager.
    pub fn new() -> Self {
        Self
    }

    /// Run one transaction against `player`'s ledger.
    ///
    /// On success the mutation tick is stamped and a resync is pushed.
    /// On any failure the ledger is byte-for-byte what it was before
    /// the call.
    pub fn apply(
        &self,
        players: &mut PlayerResourcesManager,
        player: &PlayerId,
        tx: &InventoryTransaction,
        now: SimTick,
    ) -> Result<TransactionReceipt, TransactionError> {
        let ledger = players
            .ledger_mut(player)
            .ok_or_else(|| TransactionError::UnknownPlayer(player.to_string()))?;

        Self::validate(ledger, tx)?;

        let snapshot = LedgerSnapshot::capture(ledger);
        match Self::execute(ledger, tx) {
            Ok((receipt, credited)) => {
                players.commit(player, now, credited);
                tracing::debug!(player = %player, op = ?tx.op, "Transaction committed");
                Ok(receipt)
            }
            Err(err) => {
                // ledger_mut cannot fail here; the player was present above.
                if let Some(ledger) = players.ledger_mut(player) {
                    snapshot.restore(ledger);
                }
                tracing::debug!(player = %player, op = ?tx.op, error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }

    /// Read-only admission checks. Mutates nothing.
    fn validate(ledger: &PlayerLedger, tx: &InventoryTransaction) -> Result<(), TransactionError> {
        if tx.op == TransactionOp::Swap {
            return Err(TransactionError::UnsupportedOperation(tx.op));
        }

        if let Some(slot) = tx.target_slot {
            if tx.target == ContainerKind::Hotbar && slot >= HOTBAR_SIZE {
                return Err(TransactionError::SlotOutOfBounds(slot));
            }
        }
        if let Some(slot) = tx.source_slot {
            if tx.source == ContainerKind::Hotbar && slot >= HOTBAR_SIZE {
                return Err(TransactionError::SlotOutOfBounds(slot));
            }
        }

        match (tx.source, tx.target) {
            (ContainerKind::Inventory, ContainerKind::Hotbar) => {
                let kind: ResourceKind = tx
                    .item_id
                    .parse()
                    .map_err(|_| TransactionError::NotALedgerResource(tx.item_id.clone()))?;
                if tx.amount == 0 {
                    return Err(TransactionError::ZeroAmount);
                }
                let available = ledger.amount(kind);
                if available < tx.amount {
                    return Err(TransactionError::InsufficientResources {
                        item_id: tx.item_id.clone(),
                        available,
                        requested: tx.amount,
                    });
                }
                Ok(())
            }
            (ContainerKind::Hotbar, ContainerKind::Inventory) => {
                let slot = tx.source_slot.ok_or(TransactionError::MissingSourceSlot)?;
                let item = ledger.hotbar[slot]
                    .as_ref()
                    .ok_or(TransactionError::EmptySourceSlot(slot))?;
                if item.resource_kind().is_none() {
                    return Err(TransactionError::NotALedgerResource(item.item_id.clone()));
                }
                Ok(())
            }
            (ContainerKind::Hotbar, ContainerKind::Hotbar) => {
                // Swapping slots is unconditional; only bounds matter,
                // and both were checked above.
                tx.source_slot.ok_or(TransactionError::MissingSourceSlot)?;
                tx.target_slot.ok_or(TransactionError::MissingTargetSlot)?;
                Ok(())
            }
            (ContainerKind::Inventory, ContainerKind::Inventory) => {
                Err(TransactionError::InvalidRoute {
                    from: tx.source,
                    to: tx.target,
                })
            }
        }
    }

    /// Apply the already-validated request to the ledger.
    ///
    /// The second tuple element reports a ledger credit (kind and new
    /// total) so commit can push the resource-updated event for it.
    fn execute(
        ledger: &mut PlayerLedger,
        tx: &InventoryTransaction,
    ) -> Result<(TransactionReceipt, Option<(ResourceKind, u32)>), TransactionError> {
        match (tx.source, tx.target) {
            (ContainerKind::Inventory, ContainerKind::Hotbar) => {
                // Validation guaranteed the parse and the quantity.
                let kind: ResourceKind = tx
                    .item_id
                    .parse()
                    .map_err(|_| TransactionError::NotALedgerResource(tx.item_id.clone()))?;

                let slot = match tx.target_slot {
                    Some(slot) => {
                        if ledger.hotbar[slot].is_some() {
                            return Err(TransactionError::SlotOccupied(slot));
                        }
                        slot
                    }
                    None => ledger
                        .hotbar
                        .iter()
                        .position(|s| s.is_none())
                        .ok_or(TransactionError::NoEmptySlot)?,
                };

                if tx.op == TransactionOp::Move {
                    let remaining = ledger.amount(kind) - tx.amount;
                    if remaining == 0 {
                        ledger.resources.remove(&kind);
                    } else {
                        ledger.resources.insert(kind, remaining);
                    }
                }
                ledger.hotbar[slot] = Some(HotbarItem::from_resource(kind, tx.amount));
                Ok((
                    TransactionReceipt {
                        placed_slot: Some(slot),
                    },
                    None,
                ))
            }
            (ContainerKind::Hotbar, ContainerKind::Inventory) => {
                let slot = tx.source_slot.ok_or(TransactionError::MissingSourceSlot)?;
                let item = ledger.hotbar[slot]
                    .take()
                    .ok_or(TransactionError::EmptySourceSlot(slot))?;
                let kind = item
                    .resource_kind()
                    .ok_or_else(|| TransactionError::NotALedgerResource(item.item_id.clone()))?;

                // Movement conserves units, so this credit is uncapped;
                // the stack cap only applies to harvest and admin
                // credits through give_resource.
                let total = ledger.amount(kind) + item.amount;
                ledger.resources.insert(kind, total);
                Ok((
                    TransactionReceipt { placed_slot: None },
                    Some((kind, total)),
                ))
            }
            (ContainerKind::Hotbar, ContainerKind::Hotbar) => {
                let from = tx.source_slot.ok_or(TransactionError::MissingSourceSlot)?;
                let to = tx.target_slot.ok_or(TransactionError::MissingTargetSlot)?;
                ledger.hotbar.swap(from, to);
                Ok((
                    TransactionReceipt {
                        placed_slot: Some(to),
                    },
                    None,
                ))
            }
            (ContainerKind::Inventory, ContainerKind::Inventory) => {
                Err(TransactionError::InvalidRoute {
                    from: tx.source,
                    to: tx.target,
                })
            }
        }
    }
}

impl Default for TransactionEngine {
    fn default() -> Self {
        Self::new()
    }
}
