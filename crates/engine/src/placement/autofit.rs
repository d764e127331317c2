//! Normalizes arbitrary assets to an instance footprint and the floor.

use glam::DVec3;
use shared::Footprint;

/// Axis-aligned bounding box in an asset's native units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on the origin
    pub fn centered(size: DVec3) -> Self {
        Self {
            min: -size * 0.5,
            max: size * 0.5,
        }
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Bounds after a uniform scale about the asset pivot
    pub fn scaled(&self, factor: f64) -> Self {
        let a = self.min * factor;
        let b = self.max * factor;
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// Base scale and floor offset for an asset at scale factor 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFit {
    pub base_scale: f64,
    pub floor_offset_y: f64,
}

// Flat or broken axes count as 1 so a degenerate mesh does not blow up
fn usable_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        1.0
    }
}

/// Uniform scale that keeps the asset inside the footprint and under the
/// ceiling, preserving its aspect ratio.
pub fn base_scale(bounds: &Aabb, footprint: Footprint, wall_height: f64) -> f64 {
    let size = bounds.size();
    (footprint.width / usable_extent(size.x))
        .min(footprint.length / usable_extent(size.z))
        .min(wall_height / usable_extent(size.y))
}

/// Vertical translation putting the lowest point of the scaled asset at y = 0
pub fn floor_offset(bounds: &Aabb, total_scale: f64) -> f64 {
    -bounds.scaled(total_scale).min.y
}

pub fn auto_fit(bounds: &Aabb, footprint: Footprint, wall_height: f64) -> AutoFit {
    let base_scale = base_scale(bounds, footprint, wall_height);
    AutoFit {
        base_scale,
        floor_offset_y: floor_offset(bounds, base_scale),
    }
}
