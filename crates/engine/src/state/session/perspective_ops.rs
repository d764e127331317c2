//! 3D gestures on the overlay

use std::f64::consts::TAU;

use shared::{Axis, FurnitureInstance, OverlayTransform, Rotation};

use super::{LayoutSession, Snapshot, UpdateKind, ViewKind};
use crate::error::{LayoutError, Result};
use crate::placement::{clamp_plan, clamp_world};
use crate::transform;
use crate::units::{world_to_plan, WorldPoint};

impl LayoutSession {
    /// Drag an instance across the floor in world units.
    ///
    /// Every update is clamped so the scaled footprint stays inside the
    /// room. A committed drag also writes the new position back to the
    /// design, so it is clamped by the larger of the scaled and stored
    /// footprints. Returns the applied world position.
    pub fn drag_world(&mut self, id: &str, x: f64, z: f64, kind: UpdateKind) -> Result<[f64; 3]> {
        self.require_view(ViewKind::Perspective, "drag_world")?;
        if !(x.is_finite() && z.is_finite()) {
            return Err(LayoutError::InvalidTransform(format!(
                "world position ({x}, {z}) is not finite"
            )));
        }
        let mut next = self.committed_base();
        let (inst, current) = overlay_target(&next, id)?;
        let s = current.scale_factor;
        let room = next.design.room.clone();

        // The stored plan footprint is unscaled; the overlay must agree with it
        let grow = if kind == UpdateKind::Committed { s.max(1.0) } else { s };
        let world = clamp_world(
            WorldPoint::new(x, z),
            inst.footprint.width * grow / 2.0,
            inst.footprint.length * grow / 2.0,
            &room,
        );
        let position = [world.x, self.rest_height(id, inst.footprint, s), world.z];

        if kind == UpdateKind::Committed {
            let plan = world_to_plan(world, inst.footprint, &room)?;
            let plan = clamp_plan(plan, inst.footprint, &room);
            next.design = transform::move_instance(&next.design, id, plan)?;
        }
        next.overlay.entries.insert(
            id.to_string(),
            OverlayTransform {
                world_position: position,
                ..current
            },
        );
        self.update(next, kind, "drag_world");
        Ok(position)
    }

    /// Set the uniform scale multiplier on top of the auto-fit scale.
    ///
    /// The factor is clamped into the configured slider range. The instance
    /// is re-clamped for its new extent and re-rested on the floor.
    pub fn set_scale_factor(&mut self, id: &str, factor: f64, kind: UpdateKind) -> Result<f64> {
        self.require_view(ViewKind::Perspective, "set_scale_factor")?;
        if !factor.is_finite() {
            return Err(LayoutError::InvalidTransform(format!("scale factor {factor} is not finite")));
        }
        let factor = self.settings.clamp_scale_factor(factor);
        let mut next = self.committed_base();
        let (inst, current) = overlay_target(&next, id)?;

        let [x, _, z] = current.world_position;
        let world = clamp_world(
            WorldPoint::new(x, z),
            inst.footprint.width * factor / 2.0,
            inst.footprint.length * factor / 2.0,
            &next.design.room,
        );
        let y = self.rest_height(id, inst.footprint, factor);

        next.overlay.entries.insert(
            id.to_string(),
            OverlayTransform {
                scale_factor: factor,
                world_position: [world.x, y, world.z],
                ..current
            },
        );
        self.update(next, kind, "set_scale_factor");
        Ok(factor)
    }

    /// Set one rotation axis. The angle is normalized into `[0, 2π)`.
    pub fn set_rotation(&mut self, id: &str, axis: Axis, radians: f64, kind: UpdateKind) -> Result<Rotation> {
        self.require_view(ViewKind::Perspective, "set_rotation")?;
        if !radians.is_finite() {
            return Err(LayoutError::InvalidTransform(format!("rotation {radians} is not finite")));
        }
        let mut next = self.committed_base();
        let (_, mut current) = overlay_target(&next, id)?;
        current.rotation.set(axis, normalize_angle(radians));
        let rotation = current.rotation;

        next.overlay.entries.insert(id.to_string(), current);
        self.update(next, kind, "set_rotation");
        Ok(rotation)
    }

}

fn overlay_target(snapshot: &Snapshot, id: &str) -> Result<(FurnitureInstance, OverlayTransform)> {
    let inst = snapshot
        .design
        .instance(id)
        .ok_or_else(|| LayoutError::NotFound(id.to_string()))?;
    let current = snapshot.overlay.get(id).copied().unwrap_or_default();
    Ok((inst.clone(), current))
}

/// Wrap into `[0, 2π)`. `rem_euclid` can round tiny negatives up to exactly 2π.
fn normalize_angle(radians: f64) -> f64 {
    let r = radians.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}
