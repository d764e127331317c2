//! Factory functions for test data.
//!
//! Builds rooms, instances and designs directly, bypassing the catalog, so
//! tests can set up exact geometry.

use glam::DVec3;
use shared::*;

use crate::placement::Aabb;

// ── Rooms and designs ───────────────────────────────────────────

/// Plain room with default colors and a tile floor
pub fn room(width: f64, length: f64) -> Room {
    Room::new(width, length)
}

/// Design over `room` holding `instances` in order
pub fn design_with(room: Room, instances: Vec<FurnitureInstance>) -> Design {
    Design {
        room,
        furniture: instances,
    }
}

/// 20 x 20 room with nothing in it
pub fn empty_design() -> Design {
    design_with(room(20.0, 20.0), Vec::new())
}

// ── Instances ───────────────────────────────────────────────────

/// Instance without an asset (renders as a proxy box)
pub fn instance_at(id: &str, x: f64, y: f64, width: f64, length: f64) -> FurnitureInstance {
    FurnitureInstance {
        id: id.to_string(),
        type_id: "table".to_string(),
        subtype_id: None,
        name: id.to_string(),
        position: PlanPoint::new(x, y),
        footprint: Footprint::new(width, length),
        color: Color::rgb(0x46, 0x82, 0xb4),
        asset: None,
    }
}

/// Instance that needs `path` loaded before it can be drawn
pub fn instance_with_asset(id: &str, path: &str, x: f64, y: f64, width: f64, length: f64) -> FurnitureInstance {
    FurnitureInstance {
        asset: Some(AssetRef {
            id: format!("{id}-model"),
            path: path.to_string(),
            y_offset: 0.0,
        }),
        ..instance_at(id, x, y, width, length)
    }
}

// ── Asset bounds ────────────────────────────────────────────────

pub fn bounds(min: [f64; 3], max: [f64; 3]) -> Aabb {
    Aabb::new(DVec3::from_array(min), DVec3::from_array(max))
}

/// 1 x 1 x 1 asset sitting on its own origin
pub fn unit_bounds() -> Aabb {
    bounds([-0.5, 0.0, -0.5], [0.5, 1.0, 0.5])
}

/// Asset whose pivot is at its center, so half of it hangs below y = 0
pub fn centered_bounds(width: f64, height: f64, length: f64) -> Aabb {
    Aabb::centered(DVec3::new(width, height, length))
}
