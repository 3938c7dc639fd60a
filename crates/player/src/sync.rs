//! Client-facing sync contract.
//!
//! The economy core never talks to the network directly; after every
//! committed mutation it pushes state through this trait. Default
//! methods are no-ops so an unwired host still runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wildroot_core::{HotbarItem, PlayerId, ResourceKind, SimTick, HOTBAR_SIZE};

/// Full per-player state pushed by a sync.
///
/// `level` and `experience` are placeholder progression fields carried
/// for client payload compatibility; nothing in the economy core
/// mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Ledger quantities by resource kind.
    pub resources: HashMap<ResourceKind, u32>,
    /// Full hotbar array.
    pub hotbar: [Option<HotbarItem>; HOTBAR_SIZE],
    /// Placeholder progression level.
    pub level: u32,
    /// Placeholder progression experience.
    pub experience: u32,
    /// Tick of the last committed mutation, for client ordering.
    pub last_updated: SimTick,
}

/// Outbound event sink implemented by the networking collaborator.
pub trait ClientSync {
    /// A ledger quantity changed; `total` is the new amount.
    fn resource_updated(&mut self, _player: &PlayerId, _kind: ResourceKind, _total: u32) {}

    /// The hotbar array changed.
    fn hotbar_updated(&mut self, _player: &PlayerId, _hotbar: &[Option<HotbarItem>; HOTBAR_SIZE]) {}

    /// A hotbar slot was activated.
    fn slot_used(&mut self, _player: &PlayerId, _slot: usize, _item_id: &str) {}

    /// Full state push after a committed mutation.
    fn player_synced(&mut self, _player: &PlayerId, _snapshot: &PlayerSnapshot) {}
}

/// Sync sink that drops everything. Used when no client transport is
/// wired, and as the default for tests that don't observe sync.
pub struct NullSync;

impl ClientSync for NullSync {}
