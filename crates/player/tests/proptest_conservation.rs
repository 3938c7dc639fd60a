//! Property-based tests for ledger/hotbar conservation
//!
//! Validates transaction invariants:
//! - Any sequence of MOVE transactions conserves total unit count
//! - A failed transaction leaves the ledger deep-equal to before
//! - COPY is the only operation allowed to mint units

use proptest::prelude::*;
use wildroot_core::{PlayerId, ResourceKind, SimTick, HOTBAR_SIZE};
use wildroot_player::{InventoryTransaction, PlayerResourcesManager, TransactionEngine};

#[derive(Debug, Clone)]
enum MoveStep {
    ToHotbar {
        kind: ResourceKind,
        amount: u32,
        target_slot: Option<usize>,
    },
    ToInventory {
        source_slot: usize,
    },
    SlotSwap {
        from: usize,
        to: usize,
    },
}

fn any_harvestable() -> impl Strategy<Value = ResourceKind> {
    prop_oneof![
        Just(ResourceKind::Wood),
        Just(ResourceKind::Stone),
        Just(ResourceKind::Fiber),
        Just(ResourceKind::Crystal),
    ]
}

fn move_step() -> impl Strategy<Value = MoveStep> {
    prop_oneof![
        (
            any_harvestable(),
            1u32..20,
            prop_oneof![Just(None), (0usize..HOTBAR_SIZE).prop_map(Some)],
        )
            .prop_map(|(kind, amount, target_slot)| MoveStep::ToHotbar {
                kind,
                amount,
                target_slot,
            }),
        (0usize..HOTBAR_SIZE).prop_map(|source_slot| MoveStep::ToInventory { source_slot }),
        (0usize..HOTBAR_SIZE, 0usize..HOTBAR_SIZE)
            .prop_map(|(from, to)| MoveStep::SlotSwap { from, to }),
    ]
}

fn step_to_tx(step: &MoveStep) -> InventoryTransaction {
    match step {
        MoveStep::ToHotbar {
            kind,
            amount,
            target_slot,
        } => InventoryTransaction::move_to_hotbar(kind.as_key(), *amount, *target_slot),
        MoveStep::ToInventory { source_slot } => {
            InventoryTransaction::move_to_inventory(*source_slot)
        }
        MoveStep::SlotSwap { from, to } => InventoryTransaction::move_hotbar_slot(*from, *to),
    }
}

proptest! {
    /// Property: MOVE sequences never create or destroy units
    ///
    /// Whatever mix of inventory-to-hotbar, hotbar-to-inventory and
    /// slot-swap moves runs, and whichever of them get rejected, the
    /// total unit count across both containers is that of the starter
    /// kit plus the seeded credit.
    #[test]
    fn move_sequences_conserve_units(
        seed_credit in 0u32..60,
        steps in prop::collection::vec(move_step(), 1..40),
    ) {
        let mut players = PlayerResourcesManager::new();
        let engine = TransactionEngine::new();
        let player = PlayerId::new("prop_player");
        players.initialize_player(player.clone(), SimTick::ZERO);
        players.give_resource(&player, ResourceKind::Wood, seed_credit, SimTick(1));

        let expected = players.ledger(&player).unwrap().total_units();

        for (i, step) in steps.iter().enumerate() {
            let tx = step_to_tx(step);
            let now = SimTick(2 + i as u64);
            // Rejections are fine; they must just be effect-free.
            let _ = engine.apply(&mut players, &player, &tx, now);
            prop_assert_eq!(
                players.ledger(&player).unwrap().total_units(),
                expected,
                "Unit count drifted after step {:?}",
                step
            );
        }
    }

    /// Property: A failed transaction is byte-for-byte effect-free
    #[test]
    fn failed_transactions_leave_ledger_untouched(
        seed_credit in 0u32..60,
        steps in prop::collection::vec(move_step(), 1..40),
    ) {
        let mut players = PlayerResourcesManager::new();
        let engine = TransactionEngine::new();
        let player = PlayerId::new("prop_player");
        players.initialize_player(player.clone(), SimTick::ZERO);
        players.give_resource(&player, ResourceKind::Stone, seed_credit, SimTick(1));

        for (i, step) in steps.iter().enumerate() {
            let tx = step_to_tx(step);
            let before = players.ledger(&player).unwrap().clone();
            let now = SimTick(2 + i as u64);
            if engine.apply(&mut players, &player, &tx, now).is_err() {
                prop_assert_eq!(
                    players.ledger(&player).unwrap(),
                    &before,
                    "Failed {:?} mutated the ledger",
                    step
                );
            }
        }
    }

    /// Property: COPY mints exactly the copied amount
    #[test]
    fn copy_mints_exactly_the_placed_amount(
        kind in any_harvestable(),
        amount in 1u32..5,
    ) {
        let mut players = PlayerResourcesManager::new();
        let engine = TransactionEngine::new();
        let player = PlayerId::new("prop_player");
        players.initialize_player(player.clone(), SimTick::ZERO);
        players.give_resource(&player, kind, 10, SimTick(1));

        let before = players.ledger(&player).unwrap().total_units();
        let tx = InventoryTransaction::copy_to_hotbar(kind.as_key(), amount, None);
        let receipt = engine.apply(&mut players, &player, &tx, SimTick(2));
        prop_assert!(receipt.is_ok());

        let after = players.ledger(&player).unwrap().total_units();
        prop_assert_eq!(after, before + amount as u64);
    }
}
