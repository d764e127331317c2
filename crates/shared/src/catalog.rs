//! Catalog, template and floor texture data types

use serde::{Deserialize, Serialize};

use crate::{Color, FloorType, RoomDimensions};

/// A 3D model that can represent a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
    pub path: String,
    /// Per-asset correction added to the computed floor rest height
    #[serde(default)]
    pub y_offset: f64,
}

/// A concrete furniture variant with its default size and color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSubtype {
    pub id: String,
    pub name: String,
    /// Default footprint width in feet
    pub width: f64,
    /// Default footprint length in feet
    pub length: f64,
    pub color: Color,
    #[serde(default)]
    pub models: Vec<AssetRef>,
}

/// A furniture family (chair, table, ...) grouping its variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    pub subtypes: Vec<CatalogSubtype>,
}

/// One piece of furniture in a room template, measured in feet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    /// Category id, or a subtype id used as shorthand
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    pub color: Color,
}

/// A predefined room with suggested finishes and furniture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub id: String,
    pub name: String,
    pub dimensions: RoomDimensions,
    pub wall_color: Color,
    pub floor_color: Color,
    pub floor_type: FloorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_texture: Option<String>,
    pub furniture: Vec<TemplateItem>,
}

/// A floor texture choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorTexture {
    pub name: &'static str,
    pub path: &'static str,
}

const TILE_TEXTURES: &[FloorTexture] = &[
    FloorTexture { name: "Ceramic", path: "/assets/tile.jpg" },
    FloorTexture { name: "Marble", path: "/assets/marble.jpg" },
];

const CARPET_TEXTURES: &[FloorTexture] = &[
    FloorTexture { name: "Gray Wool", path: "/textures/carpet_gray.jpg" },
    FloorTexture { name: "Beige Shag", path: "/textures/carpet_beige.jpg" },
];

const MATERIAL_TEXTURES: &[FloorTexture] = &[
    FloorTexture { name: "Hardwood Oak", path: "/textures/hardwood_oak.jpg" },
    FloorTexture { name: "Bamboo", path: "/textures/bamboo.jpg" },
];

/// Textures registered for a floor type
pub fn texture_options(floor_type: FloorType) -> &'static [FloorTexture] {
    match floor_type {
        FloorType::Tile => TILE_TEXTURES,
        FloorType::Carpet => CARPET_TEXTURES,
        FloorType::Material => MATERIAL_TEXTURES,
    }
}

/// Whether `path` is one of the textures registered for `floor_type`
pub fn is_registered_texture(floor_type: FloorType, path: &str) -> bool {
    texture_options(floor_type).iter().any(|t| t.path == path)
}
