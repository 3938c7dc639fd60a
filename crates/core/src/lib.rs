#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod item;
pub mod resource;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use item::{HotbarItem, ItemKind, HOTBAR_SIZE};
pub use resource::{ResourceKind, ResourceMetadata, LEDGER_STACK_CAP};

/// Simulation ticks per second (50 ms fixed step).
pub const TICKS_PER_SECOND: u64 = 20;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Construct a tick offset by whole seconds at the fixed tick rate.
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds * TICKS_PER_SECOND)
    }
}

/// Stable session identifier for a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap a session identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// World-space position. Fixed once assigned to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    /// World X coordinate.
    pub x: f64,
    /// World Y coordinate (height).
    pub y: f64,
    /// World Z coordinate.
    pub z: f64,
}

impl WorldPos {
    /// Create a position from raw coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance to another position.
    pub fn distance_sq(&self, other: &WorldPos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Squared distance ignoring height, used for node spacing checks.
    pub fn horizontal_distance_sq(&self, other: &WorldPos) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advance_and_seconds() {
        let tick = SimTick::ZERO.advance(5);
        assert_eq!(tick, SimTick(5));
        assert_eq!(SimTick::from_seconds(60), SimTick(1200));
    }

    #[test]
    fn world_pos_distances() {
        let a = WorldPos::new(0.0, 0.0, 0.0);
        let b = WorldPos::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_sq(&b), 25.0);

        let c = WorldPos::new(3.0, 100.0, 4.0);
        assert_eq!(a.horizontal_distance_sq(&c), 25.0);
    }
}
