//! Pure edits over a [`Design`].
//!
//! Each function takes the current design by reference and returns a new one,
//! or an error with nothing changed. Holders of the old value keep seeing it.

use std::collections::HashSet;

use shared::catalog::is_registered_texture;
use shared::{
    Color, Design, FloorType, Footprint, FurnitureInstance, InstanceId, PlanPoint, Room,
    RoomDimensions, RoomTemplate,
};

use crate::catalog::CatalogResolver;
use crate::error::{LayoutError, Result};
use crate::ids::IdGenerator;
use crate::placement::clamp_plan;
use crate::units::validate_room;

/// Resolve a catalog entry into a fresh instance at `position`
pub fn instantiate(
    catalog: &dyn CatalogResolver,
    ids: &mut dyn IdGenerator,
    type_id: &str,
    subtype_id: Option<&str>,
    position: PlanPoint,
) -> Result<FurnitureInstance> {
    let item = catalog
        .lookup(type_id, subtype_id)
        .ok_or_else(|| LayoutError::CatalogLookup {
            type_id: type_id.to_string(),
            subtype: subtype_id.map(str::to_string),
        })?;

    Ok(FurnitureInstance {
        id: ids.next_id(&item.subtype_id),
        type_id: item.type_id,
        subtype_id: Some(item.subtype_id),
        name: item.name,
        position,
        footprint: Footprint::new(item.default_width, item.default_length),
        color: item.default_color,
        asset: item.assets.into_iter().next(),
    })
}

pub fn create_instance(
    design: &Design,
    catalog: &dyn CatalogResolver,
    ids: &mut dyn IdGenerator,
    type_id: &str,
    subtype_id: Option<&str>,
    position: PlanPoint,
) -> Result<(Design, InstanceId)> {
    ensure_finite_point(position)?;
    let instance = instantiate(catalog, ids, type_id, subtype_id, position)?;
    let id = instance.id.clone();
    let mut next = design.clone();
    next.furniture.push(instance);
    Ok((next, id))
}

/// Replace an instance's position. No clamping happens here.
pub fn move_instance(design: &Design, id: &str, position: PlanPoint) -> Result<Design> {
    ensure_finite_point(position)?;
    edit_instance(design, id, |inst| inst.position = position)
}

/// Replace an instance's footprint, raising each side to at least `min_side`
pub fn resize_instance(design: &Design, id: &str, footprint: Footprint, min_side: f64) -> Result<Design> {
    let footprint = enforce_min_footprint(footprint, min_side);
    edit_instance(design, id, |inst| inst.footprint = footprint)
}

pub fn recolor_instance(design: &Design, id: &str, color: Color) -> Result<Design> {
    edit_instance(design, id, |inst| inst.color = color)
}

pub fn delete_instance(design: &Design, id: &str) -> Result<Design> {
    if !design.contains(id) {
        return Err(LayoutError::NotFound(id.to_string()));
    }
    let mut next = design.clone();
    next.furniture.retain(|f| f.id != id);
    Ok(next)
}

/// Pull one instance back inside the room
pub fn clamp_instance(design: &Design, id: &str) -> Result<Design> {
    let room = design.room.clone();
    edit_instance(design, id, |inst| {
        inst.position = clamp_plan(inst.position, inst.footprint, &room);
    })
}

/// Check a design coming in from outside the engine. Ids must be unique and
/// positions finite; undersized or broken footprints are raised to
/// `min_side`.
pub fn normalize_design(design: &Design, min_side: f64) -> Result<Design> {
    let mut seen = HashSet::new();
    for inst in &design.furniture {
        if !seen.insert(inst.id.as_str()) {
            return Err(LayoutError::DuplicateId(inst.id.clone()));
        }
        ensure_finite_point(inst.position)?;
    }
    let mut next = design.clone();
    for inst in &mut next.furniture {
        inst.footprint = enforce_min_footprint(inst.footprint, min_side);
    }
    Ok(next)
}

/// Build a whole new design from a template. Every item goes through the
/// same catalog path as [`create_instance`]; one unknown type aborts all.
pub fn apply_template(
    template: &RoomTemplate,
    catalog: &dyn CatalogResolver,
    ids: &mut dyn IdGenerator,
    min_side: f64,
) -> Result<Design> {
    let room = Room {
        dimensions: template.dimensions,
        wall_color: template.wall_color,
        floor_color: template.floor_color,
        floor_type: template.floor_type,
        floor_texture: template
            .floor_texture
            .clone()
            .filter(|t| is_registered_texture(template.floor_type, t)),
    };
    validate_room(&room)?;

    let mut design = Design::new(room);
    for item in &template.furniture {
        let position = PlanPoint::new(item.x, item.y);
        ensure_finite_point(position)?;
        let mut instance = instantiate(catalog, ids, &item.type_id, item.subtype_id.as_deref(), position)?;
        instance.footprint = enforce_min_footprint(Footprint::new(item.width, item.length), min_side);
        instance.color = item.color;
        instance.position = clamp_plan(instance.position, instance.footprint, &design.room);
        design.furniture.push(instance);
    }
    Ok(design)
}

// ── Room ──────────────────────────────────────────────────────

/// Resize the room and pull every instance back inside it
pub fn set_room_dimensions(design: &Design, width: f64, length: f64) -> Result<Design> {
    let mut next = design.clone();
    next.room.dimensions = RoomDimensions { width, length };
    validate_room(&next.room)?;
    let room = next.room.clone();
    for inst in &mut next.furniture {
        inst.position = clamp_plan(inst.position, inst.footprint, &room);
    }
    Ok(next)
}

pub fn set_wall_color(design: &Design, color: Color) -> Design {
    let mut next = design.clone();
    next.room.wall_color = color;
    next
}

pub fn set_floor_color(design: &Design, color: Color) -> Design {
    let mut next = design.clone();
    next.room.floor_color = color;
    next
}

/// Change the floor type. The texture belongs to the old type, so it is cleared.
pub fn set_floor_type(design: &Design, floor_type: FloorType) -> Design {
    let mut next = design.clone();
    next.room.floor_type = floor_type;
    next.room.floor_texture = None;
    next
}

pub fn set_floor_texture(design: &Design, texture: Option<String>) -> Result<Design> {
    if let Some(path) = &texture {
        if !is_registered_texture(design.room.floor_type, path) {
            return Err(LayoutError::InvalidTexture {
                floor_type: design.room.floor_type,
                texture: path.clone(),
            });
        }
    }
    let mut next = design.clone();
    next.room.floor_texture = texture;
    Ok(next)
}

// ── Helpers ───────────────────────────────────────────────────

fn edit_instance(design: &Design, id: &str, edit: impl FnOnce(&mut FurnitureInstance)) -> Result<Design> {
    let mut next = design.clone();
    let inst = next
        .instance_mut(id)
        .ok_or_else(|| LayoutError::NotFound(id.to_string()))?;
    edit(inst);
    Ok(next)
}

fn ensure_finite_point(position: PlanPoint) -> Result<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::InvalidTransform(format!(
            "position ({}, {}) is not finite",
            position.x, position.y
        )))
    }
}

// NaN compares false, so it also falls back to the minimum
fn at_least(value: f64, min: f64) -> f64 {
    if value >= min && value.is_finite() {
        value
    } else {
        min
    }
}

pub fn enforce_min_footprint(footprint: Footprint, min_side: f64) -> Footprint {
    Footprint::new(at_least(footprint.width, min_side), at_least(footprint.length, min_side))
}
