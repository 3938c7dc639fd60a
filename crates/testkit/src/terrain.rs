//! Terrain probe doubles for placement tests.

use wildroot_world::{SurfaceHit, TerrainProbe};

/// Flat solid ground at a constant height and zero tilt.
pub struct FlatTerrain {
    height: f64,
}

impl FlatTerrain {
    /// Flat ground at `height`.
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

impl TerrainProbe for FlatTerrain {
    fn probe_down(&self, _x: f64, _z: f64) -> Option<SurfaceHit> {
        Some(SurfaceHit {
            height: self.height,
            tilt_degrees: 0.0,
        })
    }
}

/// Terrain with a uniform surface tilt, for slope-rejection tests.
pub struct SlopedTerrain {
    height: f64,
    tilt_degrees: f32,
}

impl SlopedTerrain {
    /// Ground at `height` tilted by `tilt_degrees` from vertical.
    pub fn new(height: f64, tilt_degrees: f32) -> Self {
        Self {
            height,
            tilt_degrees,
        }
    }
}

impl TerrainProbe for SlopedTerrain {
    fn probe_down(&self, _x: f64, _z: f64) -> Option<SurfaceHit> {
        Some(SurfaceHit {
            height: self.height,
            tilt_degrees: self.tilt_degrees,
        })
    }
}

/// Terrain with no solid ground anywhere, forcing the anchor fallback.
pub struct VoidTerrain;

impl TerrainProbe for VoidTerrain {
    fn probe_down(&self, _x: f64, _z: f64) -> Option<SurfaceHit> {
        None
    }
}
