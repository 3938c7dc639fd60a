//! Node placement search with bounded retries and guaranteed fallback.
//!
//! Placement samples random points around configured zone anchors,
//! probes straight down for solid ground, and rejects steep surfaces
//! and points too close to existing nodes. The search never blocks:
//! after the attempt budget is spent it falls back to a small offset
//! around the chosen anchor.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wildroot_core::WorldPos;

/// Maximum surface tilt from vertical a node will sit on, in degrees.
pub const MAX_SURFACE_TILT_DEGREES: f32 = 45.0;

/// First solid surface found by a downward probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Height of the surface at the probed column.
    pub height: f64,
    /// Tilt of the surface from vertical, in degrees.
    pub tilt_degrees: f32,
}

/// Physics collaborator answering downward raycasts.
///
/// The economy core owns no collision geometry; whatever hosts it
/// supplies the probe. Returning `None` means the column has no solid
/// ground (void, deep water).
pub trait TerrainProbe {
    /// Probe straight down at (x, z) for the first solid surface.
    fn probe_down(&self, x: f64, z: f64) -> Option<SurfaceHit>;
}

/// Tunables for the placement search.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// World-region anchor points nodes cluster around.
    pub zone_anchors: Vec<WorldPos>,
    /// Sampling radius around the chosen anchor.
    pub zone_radius: f64,
    /// Minimum horizontal distance to any currently-alive node.
    pub min_spacing: f64,
    /// Attempt budget before falling back.
    pub max_attempts: u32,
    /// Offset radius used by the anchor fallback.
    pub fallback_radius: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            zone_anchors: vec![
                WorldPos::new(0.0, 16.0, 0.0),
                WorldPos::new(120.0, 22.0, -60.0),
                WorldPos::new(-90.0, 12.0, 80.0),
                WorldPos::new(60.0, 30.0, 140.0),
                WorldPos::new(-140.0, 18.0, -120.0),
            ],
            zone_radius: 40.0,
            min_spacing: 10.0,
            max_attempts: 20,
            fallback_radius: 4.0,
        }
    }
}

/// Outcome of one placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSpot {
    /// Accepted position.
    pub position: WorldPos,
    /// True when the attempt budget was exhausted and the anchor
    /// fallback was used.
    pub fell_back: bool,
}

/// Search for a spawn position near a random zone anchor.
///
/// Returns `None` only when no anchors are configured. Otherwise the
/// search always completes: either an attempt passes the surface and
/// spacing checks, or the fallback produces an approximate position at
/// the anchor height.
pub fn find_spawn_position(
    config: &PlacementConfig,
    rng: &mut impl Rng,
    terrain: &dyn TerrainProbe,
    occupied: &[WorldPos],
) -> Option<PlacedSpot> {
    if config.zone_anchors.is_empty() {
        return None;
    }

    let anchor = config.zone_anchors[rng.gen_range(0..config.zone_anchors.len())];

    for _ in 0..config.max_attempts {
        let x = anchor.x + rng.gen_range(-config.zone_radius..=config.zone_radius);
        let z = anchor.z + rng.gen_range(-config.zone_radius..=config.zone_radius);

        let hit = match terrain.probe_down(x, z) {
            Some(hit) => hit,
            None => continue,
        };
        if hit.tilt_degrees > MAX_SURFACE_TILT_DEGREES {
            continue;
        }

        let candidate = WorldPos::new(x, hit.height, z);
        let min_spacing_sq = config.min_spacing * config.min_spacing;
        let too_close = occupied
            .iter()
            .any(|pos| candidate.horizontal_distance_sq(pos) < min_spacing_sq);
        if too_close {
            continue;
        }

        return Some(PlacedSpot {
            position: candidate,
            fell_back: false,
        });
    }

    // Budget spent: settle for an approximate spot at the anchor height.
    let x = anchor.x + rng.gen_range(-config.fallback_radius..=config.fallback_radius);
    let z = anchor.z + rng.gen_range(-config.fallback_radius..=config.fallback_radius);
    tracing::warn!(
        anchor_x = anchor.x,
        anchor_z = anchor.z,
        attempts = config.max_attempts,
        "Placement search exhausted, using anchor fallback"
    );
    Some(PlacedSpot {
        position: WorldPos::new(x, anchor.y, z),
        fell_back: true,
    })
}
