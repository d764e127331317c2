//! Furniture catalog and room template lookup

use shared::{AssetRef, CatalogCategory, CatalogSubtype, Color, RoomTemplate};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");
const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.json");

/// Resolved catalog entry: what a new instance starts with
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub type_id: String,
    pub subtype_id: String,
    pub name: String,
    pub default_width: f64,
    pub default_length: f64,
    pub default_color: Color,
    pub assets: Vec<AssetRef>,
}

impl CatalogItem {
    fn from_subtype(category: &CatalogCategory, subtype: &CatalogSubtype) -> Self {
        Self {
            type_id: category.id.clone(),
            subtype_id: subtype.id.clone(),
            name: subtype.name.clone(),
            default_width: subtype.width,
            default_length: subtype.length,
            default_color: subtype.color,
            assets: subtype.models.clone(),
        }
    }
}

/// Read-only source of furniture defaults
pub trait CatalogResolver {
    fn lookup(&self, type_id: &str, subtype_id: Option<&str>) -> Option<CatalogItem>;
}

/// Catalog backed by in-memory category data
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<CatalogCategory>,
}

impl StaticCatalog {
    pub fn new(categories: Vec<CatalogCategory>) -> Self {
        Self { categories }
    }

    /// The catalog shipped with the engine
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            tracing::error!("Built-in catalog is malformed: {e}");
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let categories: Vec<CatalogCategory> =
            serde_json::from_str(json).map_err(|e| format!("Invalid catalog JSON: {e}"))?;
        Ok(Self::new(categories))
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }
}

impl CatalogResolver for StaticCatalog {
    fn lookup(&self, type_id: &str, subtype_id: Option<&str>) -> Option<CatalogItem> {
        if let Some(category) = self.categories.iter().find(|c| c.id == type_id) {
            let subtype = match subtype_id {
                Some(sub) => category.subtypes.iter().find(|s| s.id == sub)?,
                None => category.subtypes.first()?,
            };
            return Some(CatalogItem::from_subtype(category, subtype));
        }

        // Templates name variants directly ("sofa" rather than "chair"/"sofa")
        if subtype_id.is_some() {
            return None;
        }
        self.categories.iter().find_map(|category| {
            category
                .subtypes
                .iter()
                .find(|s| s.id == type_id)
                .map(|s| CatalogItem::from_subtype(category, s))
        })
    }
}

/// Predefined rooms
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<RoomTemplate>,
}

impl TemplateLibrary {
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_TEMPLATES).unwrap_or_else(|e| {
            tracing::error!("Built-in templates are malformed: {e}");
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let templates: Vec<RoomTemplate> =
            serde_json::from_str(json).map_err(|e| format!("Invalid template JSON: {e}"))?;
        Ok(Self { templates })
    }

    pub fn get(&self, id: &str) -> Option<&RoomTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn all(&self) -> &[RoomTemplate] {
        &self.templates
    }
}
