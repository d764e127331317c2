//! Keeps furniture footprints inside the room walls.

use shared::{Footprint, PlanPoint, Room};

use crate::units::WorldPoint;

/// Clamp a center coordinate so `[value - half_extent, value + half_extent]`
/// stays within `[-room_half, room_half]`. Objects wider than the room are
/// centered on that axis.
pub fn clamp_axis(value: f64, half_extent: f64, room_half: f64) -> f64 {
    if !(half_extent <= room_half) {
        return 0.0;
    }
    value.max(-room_half + half_extent).min(room_half - half_extent)
}

/// Clamp a room-centered position with post-scale half extents `(hw, hl)`
pub fn clamp_world(position: WorldPoint, half_width: f64, half_length: f64, room: &Room) -> WorldPoint {
    WorldPoint {
        x: clamp_axis(position.x, half_width, room.width() / 2.0),
        z: clamp_axis(position.z, half_length, room.length() / 2.0),
    }
}

fn clamp_plan_axis(value: f64, extent: f64, room_extent: f64) -> f64 {
    if !(extent <= room_extent) {
        return (room_extent - extent) / 2.0;
    }
    value.max(0.0).min(room_extent - extent)
}

/// Top-left anchored equivalent of [`clamp_world`] for an unscaled footprint.
/// Positions already inside the room come back unchanged.
pub fn clamp_plan(position: PlanPoint, footprint: Footprint, room: &Room) -> PlanPoint {
    PlanPoint {
        x: clamp_plan_axis(position.x, footprint.width, room.width()),
        y: clamp_plan_axis(position.y, footprint.length, room.length()),
    }
}
