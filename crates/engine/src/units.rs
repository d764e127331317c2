//! Conversions between feet, editor units and world units.
//!
//! Feet are canonical. Editor units are feet times a fixed editor scale and
//! only exist inside the 2D view. World units equal feet but are centered on
//! the room instead of anchored at its top-left corner.

use serde::{Deserialize, Serialize};
use shared::{Footprint, PlanPoint, Room};

use crate::error::{LayoutError, Result};

pub const DEFAULT_EDITOR_SCALE: f64 = 10.0;

/// Horizontal world position (`y` is the vertical axis in world space)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Rectangle in editor units, as reported by the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
}

/// Feet <-> editor unit conversion for one editor scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    editor_scale: f64,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            editor_scale: DEFAULT_EDITOR_SCALE,
        }
    }
}

impl UnitConverter {
    pub fn new(editor_scale: f64) -> Result<Self> {
        if !(editor_scale.is_finite() && editor_scale > 0.0) {
            return Err(LayoutError::InvalidEditorScale(editor_scale));
        }
        Ok(Self { editor_scale })
    }

    pub fn editor_scale(&self) -> f64 {
        self.editor_scale
    }

    pub fn feet_to_editor(&self, feet: f64) -> f64 {
        feet * self.editor_scale
    }

    pub fn editor_to_feet(&self, editor: f64) -> f64 {
        editor / self.editor_scale
    }

    pub fn point_to_feet(&self, x: f64, y: f64) -> PlanPoint {
        PlanPoint::new(self.editor_to_feet(x), self.editor_to_feet(y))
    }

    pub fn rect_to_editor(&self, position: PlanPoint, footprint: Footprint) -> PlanRect {
        PlanRect {
            x: self.feet_to_editor(position.x),
            y: self.feet_to_editor(position.y),
            width: self.feet_to_editor(footprint.width),
            length: self.feet_to_editor(footprint.length),
        }
    }

    /// Normalize a canvas rectangle back to feet
    pub fn rect_to_feet(&self, rect: PlanRect) -> (PlanPoint, Footprint) {
        (
            self.point_to_feet(rect.x, rect.y),
            Footprint::new(
                self.editor_to_feet(rect.width),
                self.editor_to_feet(rect.length),
            ),
        )
    }

    /// Editor units to canvas pixels. `room_scale` is pixels per foot and
    /// never leaves the renderer.
    pub fn editor_to_screen(&self, editor: f64, room_scale: f64) -> f64 {
        editor * (room_scale / self.editor_scale)
    }

    pub fn screen_to_editor(&self, screen: f64, room_scale: f64) -> f64 {
        screen / (room_scale / self.editor_scale)
    }
}

/// Reject rooms whose dimensions are non-positive or non-finite
pub fn validate_room(room: &Room) -> Result<()> {
    if room.is_valid() {
        Ok(())
    } else {
        Err(LayoutError::InvalidRoom {
            width: room.width(),
            length: room.length(),
        })
    }
}

/// Top-left anchored plan position to the room-centered world position of
/// the footprint's center.
pub fn plan_to_world(position: PlanPoint, footprint: Footprint, room: &Room) -> Result<WorldPoint> {
    validate_room(room)?;
    Ok(WorldPoint {
        x: position.x - room.width() / 2.0 + footprint.width / 2.0,
        z: position.y - room.length() / 2.0 + footprint.length / 2.0,
    })
}

/// Inverse of [`plan_to_world`]
pub fn world_to_plan(world: WorldPoint, footprint: Footprint, room: &Room) -> Result<PlanPoint> {
    validate_room(room)?;
    Ok(PlanPoint {
        x: world.x + room.width() / 2.0 - footprint.width / 2.0,
        y: world.z + room.length() / 2.0 - footprint.length / 2.0,
    })
}
