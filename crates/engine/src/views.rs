//! Read-only models the two renderers draw from

use std::collections::HashMap;

use serde::Serialize;
use shared::{Color, Design, InstanceId, Rotation};

use crate::placement::{MeshSource, Placement};
use crate::settings::EngineSettings;
use crate::state::Snapshot;
use crate::units::UnitConverter;

/// One rectangle on the 2D canvas, in editor units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanItem {
    pub id: InstanceId,
    pub editor_x: f64,
    pub editor_y: f64,
    pub editor_width: f64,
    pub editor_length: f64,
    pub color: Color,
    pub label: String,
}

impl PlanItem {
    /// Canvas pixel rectangle `[x, y, width, length]` at `room_scale`
    pub fn to_screen(&self, units: &UnitConverter, room_scale: f64) -> [f64; 4] {
        [
            units.editor_to_screen(self.editor_x, room_scale),
            units.editor_to_screen(self.editor_y, room_scale),
            units.editor_to_screen(self.editor_width, room_scale),
            units.editor_to_screen(self.editor_length, room_scale),
        ]
    }
}

/// One object in the 3D scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldItem {
    pub id: InstanceId,
    pub world: [f64; 3],
    /// Auto-fit base scale times the user's scale factor
    pub scale: f64,
    pub rotation: Rotation,
    pub color: Color,
    /// `None` while the asset is still loading
    pub mesh: Option<MeshSource>,
}

/// Plan canvas items in z-order
pub fn plan_items(design: &Design, units: &UnitConverter) -> Vec<PlanItem> {
    design
        .furniture
        .iter()
        .map(|inst| {
            let rect = units.rect_to_editor(inst.position, inst.footprint);
            PlanItem {
                id: inst.id.clone(),
                editor_x: rect.x,
                editor_y: rect.y,
                editor_width: rect.width,
                editor_length: rect.length,
                color: inst.color,
                label: inst.name.clone(),
            }
        })
        .collect()
}

/// 3D scene items in z-order. Instances without an overlay entry are skipped.
pub fn world_items(
    snapshot: &Snapshot,
    placements: &HashMap<InstanceId, Placement>,
    settings: &EngineSettings,
) -> Vec<WorldItem> {
    snapshot
        .design
        .furniture
        .iter()
        .filter_map(|inst| {
            let transform = snapshot.overlay.get(&inst.id)?;
            let placement = placements.get(&inst.id);
            let base = placement.map_or(1.0, |p| p.base_scale(inst.footprint, settings.wall_height));
            Some(WorldItem {
                id: inst.id.clone(),
                world: transform.world_position,
                scale: base * transform.scale_factor,
                rotation: transform.rotation,
                color: inst.color,
                mesh: placement.map(|p| p.mesh_source(inst.footprint, settings.proxy_height)),
            })
        })
        .collect()
}
