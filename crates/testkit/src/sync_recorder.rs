//! Recording client-sync double.
//!
//! Captures every outbound sync call so tests can assert on the event
//! stream a real networking collaborator would have seen.

use std::cell::RefCell;
use std::rc::Rc;
use wildroot_core::{HotbarItem, PlayerId, ResourceKind, HOTBAR_SIZE};
use wildroot_player::{ClientSync, PlayerSnapshot};

/// One captured outbound sync call.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// `resource_updated` was emitted.
    ResourceUpdated {
        /// Target player.
        player: PlayerId,
        /// Resource whose total changed.
        kind: ResourceKind,
        /// New ledger total.
        total: u32,
    },
    /// `hotbar_updated` was emitted.
    HotbarUpdated {
        /// Target player.
        player: PlayerId,
        /// Full hotbar array at emission time.
        hotbar: Vec<Option<HotbarItem>>,
    },
    /// `slot_used` was emitted.
    SlotUsed {
        /// Target player.
        player: PlayerId,
        /// Activated slot index.
        slot: usize,
        /// Item id in the slot when used.
        item_id: String,
    },
    /// `player_synced` was emitted.
    PlayerSynced {
        /// Target player.
        player: PlayerId,
        /// Tick stamp carried by the snapshot.
        last_updated: u64,
    },
}

/// Shared handle to the captured event list.
pub type SyncLog = Rc<RefCell<Vec<SyncEvent>>>;

/// `ClientSync` implementation that records every call.
pub struct RecordingSync {
    log: SyncLog,
}

impl RecordingSync {
    /// Create a recorder and the handle tests read events through.
    pub fn new() -> (Self, SyncLog) {
        let log: SyncLog = Rc::new(RefCell::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

impl ClientSync for RecordingSync {
    fn resource_updated(&mut self, player: &PlayerId, kind: ResourceKind, total: u32) {
        self.log.borrow_mut().push(SyncEvent::ResourceUpdated {
            player: player.clone(),
            kind,
            total,
        });
    }

    fn hotbar_updated(&mut self, player: &PlayerId, hotbar: &[Option<HotbarItem>; HOTBAR_SIZE]) {
        self.log.borrow_mut().push(SyncEvent::HotbarUpdated {
            player: player.clone(),
            hotbar: hotbar.to_vec(),
        });
    }

    fn slot_used(&mut self, player: &PlayerId, slot: usize, item_id: &str) {
        self.log.borrow_mut().push(SyncEvent::SlotUsed {
            player: player.clone(),
            slot,
            item_id: item_id.to_string(),
        });
    }

    fn player_synced(&mut self, player: &PlayerId, snapshot: &PlayerSnapshot) {
        self.log.borrow_mut().push(SyncEvent::PlayerSynced {
            player: player.clone(),
            last_updated: snapshot.last_updated.0,
        });
    }
}
