//! Harvesting engine: attack → node damage → randomized yield.
//!
//! Tool and combat multipliers come from injected collaborators; when
//! the host wires none, the neutral defaults leave raw damage
//! unscaled. Yield credits are pushed through a caller-supplied sink
//! so the engine stays decoupled from the ledger store.

use crate::node::{DamageOutcome, NodeManager};
use rand::Rng;
use wildroot_core::{PlayerId, ResourceKind, SimTick};

/// Chance of a critical harvest on any connecting hit.
pub const CRIT_CHANCE: f64 = 0.05;

/// Yield multiplier applied by a critical harvest.
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Independent chance of an extra rare-variant unit per hit.
pub const RARE_DROP_CHANCE: f64 = 0.02;

/// Tool collaborator scaling damage and yield per actor/resource/tool.
///
/// Default methods are the identity, so an unwired provider degrades
/// to neutral multipliers instead of failing the attack.
pub trait ToolProvider {
    /// Multiplier applied to raw attack damage.
    fn damage_multiplier(&self, _actor: &PlayerId, _kind: ResourceKind, _tool: Option<&str>) -> f64 {
        1.0
    }

    /// Multiplier applied to the computed yield.
    fn yield_multiplier(&self, _actor: &PlayerId, _kind: ResourceKind, _tool: Option<&str>) -> f64 {
        1.0
    }
}

/// Identity tool provider used when no real one is wired.
pub struct NeutralTools;

impl ToolProvider for NeutralTools {}

/// Combat-stat collaborator supplying the actor's melee stat.
///
/// The stat is expressed on a 100-point scale; 100 leaves damage
/// unchanged.
pub trait CombatStatProvider {
    /// Melee stat for `actor`; 100 is neutral.
    fn melee_stat(&self, _actor: &PlayerId) -> u32 {
        100
    }
}

/// Identity stat provider used when no real one is wired.
pub struct NeutralStats;

impl CombatStatProvider for NeutralStats {}

/// One credited resource entry produced by a strike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldEntry {
    /// Resource credited.
    pub kind: ResourceKind,
    /// Units credited.
    pub amount: u32,
}

/// Everything a single strike did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeReport {
    /// True when this strike destroyed the node, so upstream combat
    /// can award secondary rewards.
    pub destroyed: bool,
    /// Damage actually applied after multipliers, floored.
    pub effective_damage: u32,
    /// Resources credited to the attacker, in credit order.
    pub yields: Vec<YieldEntry>,
}

impl StrikeReport {
    /// Report for a strike that did not connect.
    pub fn miss() -> Self {
        Self {
            destroyed: false,
            effective_damage: 0,
            yields: Vec::new(),
        }
    }
}

/// Converts raw attacks into node damage and player yield.
pub struct HarvestingEngine {
    tools: Box<dyn ToolProvider>,
    stats: Box<dyn CombatStatProvider>,
}

impl HarvestingEngine {
    /// Engine with neutral collaborators.
    pub fn new() -> Self {
        Self {
            tools: Box::new(NeutralTools),
            stats: Box::new(NeutralStats),
        }
    }

    /// Engine with explicit collaborators.
    pub fn with_providers(
        tools: Box<dyn ToolProvider>,
        stats: Box<dyn CombatStatProvider>,
    ) -> Self {
        Self { tools, stats }
    }

    /// Apply one attack against `node_id`.
    ///
    /// No-op (all-false report) when the node is unknown or already
    /// dead. Yield entries are pushed through `credit` in order; the
    /// caller routes them to the player ledger.
    #[allow(clippy::too_many_arguments)]
    pub fn strike(
        &self,
        nodes: &mut NodeManager,
        rng: &mut impl Rng,
        now: SimTick,
        node_id: &str,
        raw_damage: u32,
        actor: &PlayerId,
        tool: Option<&str>,
        mut credit: impl FnMut(ResourceKind, u32),
    ) -> StrikeReport {
        let node = match nodes.node(node_id) {
            Some(node) if node.is_alive => node,
            _ => return StrikeReport::miss(),
        };
        let kind = node.kind;
        let max_health = node.max_health;
        let base_yield = node.base_yield;
        let quality = node.quality_multiplier as f64;

        let melee = self.stats.melee_stat(actor) as f64 / 100.0;
        let damage_mult = self.tools.damage_multiplier(actor, kind, tool);
        let effective_damage = (raw_damage as f64 * damage_mult * melee).floor() as u32;
        if effective_damage == 0 {
            return StrikeReport::miss();
        }

        // Yield pipeline: damage ratio scaled by quality and tool, with
        // a crit roll and a hard floor of one unit per connecting hit.
        let yield_mult = self.tools.yield_multiplier(actor, kind, tool);
        let damage_ratio = effective_damage as f64 / max_health as f64;
        let mut raw_yield = base_yield as f64 * damage_ratio * quality * yield_mult;
        if rng.gen::<f64>() < CRIT_CHANCE {
            raw_yield *= CRIT_MULTIPLIER;
        }
        let amount = (raw_yield.floor() as u32).max(1);

        let mut yields = vec![YieldEntry { kind, amount }];
        if let Some(rare) = kind.metadata().rare_drop {
            if rng.gen::<f64>() < RARE_DROP_CHANCE {
                yields.push(YieldEntry {
                    kind: rare,
                    amount: 1,
                });
            }
        }

        let outcome = nodes.damage(node_id, effective_damage, now, rng);
        let destroyed = outcome == DamageOutcome::Destroyed;

        for entry in &yields {
            credit(entry.kind, entry.amount);
        }

        tracing::debug!(
            node_id,
            actor = %actor,
            effective_damage,
            destroyed,
            yield_count = yields.len(),
            "Harvest strike"
        );

        StrikeReport {
            destroyed,
            effective_damage,
            yields,
        }
    }
}

impl Default for HarvestingEngine {
    fn default() -> Self {
        Self::new()
    }
}
