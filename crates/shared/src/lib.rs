//! Plain data model for room layouts.
//!
//! Lengths are in feet. Plan positions are anchored at the room's top-left
//! corner; the 3D overlay types use room-centered world units instead.

pub mod catalog;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use catalog::{AssetRef, CatalogCategory, CatalogSubtype, FloorTexture, RoomTemplate, TemplateItem};

/// Unique identifier of a placed furniture instance
pub type InstanceId = String;

/// Error returned when a color string is not `#rgb` or `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

/// RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // Shorthand: each digit is doubled (#abc == #aabbcc)
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Floor finish; selects which textures are valid for the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorType {
    #[default]
    Tile,
    Carpet,
    Material,
}

impl FloorType {
    pub fn all() -> &'static [FloorType] {
        &[FloorType::Tile, FloorType::Carpet, FloorType::Material]
    }
}

impl fmt::Display for FloorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FloorType::Tile => "tile",
            FloorType::Carpet => "carpet",
            FloorType::Material => "material",
        })
    }
}

/// Room size in feet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub length: f64,
}

/// The room being furnished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub dimensions: RoomDimensions,
    pub wall_color: Color,
    pub floor_color: Color,
    #[serde(default)]
    pub floor_type: FloorType,
    /// Path of one of the textures registered for `floor_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_texture: Option<String>,
}

impl Room {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            dimensions: RoomDimensions { width, length },
            wall_color: Color::rgb(0xf5, 0xf5, 0xf5),
            floor_color: Color::rgb(0xe0, 0xe0, 0xe0),
            floor_type: FloorType::Tile,
            floor_texture: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.dimensions.width
    }

    pub fn length(&self) -> f64 {
        self.dimensions.length
    }

    /// Both dimensions positive and finite
    pub fn is_valid(&self) -> bool {
        let RoomDimensions { width, length } = self.dimensions;
        width.is_finite() && length.is_finite() && width > 0.0 && length > 0.0
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new(20.0, 20.0)
    }
}

/// Top-left corner of a footprint, in feet from the room origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Plan-view size of a furniture instance in feet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub length: f64,
}

impl Footprint {
    pub const fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }
}

/// A furniture piece placed in the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureInstance {
    pub id: InstanceId,
    /// Catalog category id
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_id: Option<String>,
    /// Display label
    #[serde(default)]
    pub name: String,
    pub position: PlanPoint,
    pub footprint: Footprint,
    pub color: Color,
    /// 3D model to instantiate; `None` renders as a proxy box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
}

/// Room plus furniture in z-order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Design {
    pub room: Room,
    #[serde(default)]
    pub furniture: Vec<FurnitureInstance>,
}

impl Design {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            furniture: Vec::new(),
        }
    }

    pub fn instance(&self, id: &str) -> Option<&FurnitureInstance> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn instance_mut(&mut self, id: &str) -> Option<&mut FurnitureInstance> {
        self.furniture.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.furniture.iter().any(|f| f.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &InstanceId> {
        self.furniture.iter().map(|f| &f.id)
    }
}

// ============================================================================
// 3D overlay
// ============================================================================

/// Rotation axis for the perspective view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, radians: f64) {
        match axis {
            Axis::X => self.x = radians,
            Axis::Y => self.y = radians,
            Axis::Z => self.z = radians,
        }
    }
}

fn default_scale_factor() -> f64 {
    1.0
}

/// Perspective-only transform of one instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayTransform {
    /// Multiplier on top of the auto-fit base scale
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default)]
    pub rotation: Rotation,
    /// Room-centered `[x, y, z]`; `y` is the floor rest height
    #[serde(default)]
    pub world_position: [f64; 3],
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            rotation: Rotation::default(),
            world_position: [0.0; 3],
        }
    }
}

/// Overlay transforms keyed by instance id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Overlay {
    pub entries: BTreeMap<InstanceId, OverlayTransform>,
}

impl Overlay {
    pub fn get(&self, id: &str) -> Option<&OverlayTransform> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut OverlayTransform> {
        self.entries.get_mut(id)
    }
}
