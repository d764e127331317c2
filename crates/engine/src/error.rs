//! Error types for layout operations

use shared::{FloorType, InstanceId};
use thiserror::Error;

use crate::state::ViewKind;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Structural errors surfaced to the caller of a mutating operation.
///
/// Every operation that returns one of these leaves the design untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("unknown furniture type {type_id:?} (subtype {subtype:?})")]
    CatalogLookup {
        type_id: String,
        subtype: Option<String>,
    },

    #[error("no furniture instance with id {0:?}")]
    NotFound(InstanceId),

    #[error("furniture id {0:?} is used more than once")]
    DuplicateId(InstanceId),

    #[error("room dimensions must be positive and finite, got {width} x {length}")]
    InvalidRoom { width: f64, length: f64 },

    #[error("texture {texture:?} is not registered for {floor_type} floors")]
    InvalidTexture {
        floor_type: FloorType,
        texture: String,
    },

    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    #[error("{op} is not available in the {view} view")]
    UnsupportedInView { op: &'static str, view: ViewKind },

    #[error("editor scale must be positive and finite, got {0}")]
    InvalidEditorScale(f64),

    #[error("unknown room template {0:?}")]
    UnknownTemplate(String),
}

/// Asset load failure. Recovered with a proxy box, never surfaced to users.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to load asset {path:?}: {reason}")]
pub struct LoadError {
    pub path: String,
    pub reason: String,
}

impl LoadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
