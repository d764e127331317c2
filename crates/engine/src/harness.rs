//! Headless harness for driving a layout session programmatically.
//!
//! Uses the built-in catalog, sequential ids and an in-memory asset table,
//! so runs are deterministic.

use std::sync::Arc;

use shared::{Design, FurnitureInstance, InstanceId, PlanPoint, Room};

use crate::catalog::StaticCatalog;
use crate::error::Result;
use crate::ids::SequentialIds;
use crate::loader::{AssetLoader, MemoryLoader, MeshHandle};
use crate::placement::Aabb;
use crate::settings::EngineSettings;
use crate::state::{LayoutSession, ViewKind};
use crate::views::WorldItem;

/// Headless harness: a session plus a synchronous asset table
pub struct TestHarness {
    pub session: LayoutSession,
    pub loader: MemoryLoader,
}

impl TestHarness {
    /// Plan view over an empty 20 x 20 room
    pub fn new() -> Self {
        Self::plan(Design::new(Room::default()))
    }

    pub fn plan(design: Design) -> Self {
        Self::with_view(design, ViewKind::Plan)
    }

    pub fn perspective(design: Design) -> Self {
        Self::with_view(design, ViewKind::Perspective)
    }

    /// Harness over `design`. An invalid room falls back to an empty one.
    pub fn with_view(design: Design, view: ViewKind) -> Self {
        Self::try_new(design, view, EngineSettings::default()).unwrap_or_else(|e| {
            tracing::warn!("Harness design rejected ({e}), using an empty room");
            Self::from_session(LayoutSession::blank(view))
        })
    }

    /// Harness with explicit settings; fails like [`LayoutSession::enter`]
    pub fn try_new(design: Design, view: ViewKind, settings: EngineSettings) -> Result<Self> {
        Ok(Self::from_session(LayoutSession::enter(design, view, settings)?))
    }

    fn from_session(session: LayoutSession) -> Self {
        Self {
            session: session
                .with_catalog(Arc::new(StaticCatalog::builtin()))
                .with_ids(Box::new(SequentialIds::new())),
            loader: MemoryLoader::new(),
        }
    }

    // ── Design I/O ────────────────────────────────────────────

    /// Replace the session with one over a design parsed from JSON
    pub fn load_design_json(&mut self, json: &str) -> std::result::Result<(), String> {
        let design: Design = serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        let loader = std::mem::take(&mut self.loader);
        *self = Self::try_new(design, self.session.view(), self.session.settings().clone())
            .map_err(|e| e.to_string())?;
        self.loader = loader;
        Ok(())
    }

    pub fn export_design_json(&self) -> String {
        serde_json::to_string_pretty(&self.session.export_design()).unwrap_or_default()
    }

    // ── Assets ────────────────────────────────────────────────

    /// Make `path` loadable with the given native bounds
    pub fn register_asset(&mut self, path: &str, bounds: Aabb) -> MeshHandle {
        self.loader.insert(path, bounds)
    }

    /// Register every model path in the built-in catalog with `bounds`
    pub fn register_catalog_assets(&mut self, bounds: Aabb) {
        for category in StaticCatalog::builtin().categories() {
            for subtype in &category.subtypes {
                for model in &subtype.models {
                    self.loader.insert(model.path.clone(), bounds);
                }
            }
        }
    }

    /// Run every pending load to completion, in request order
    pub fn load_all(&mut self) -> usize {
        let requests = self.session.pending_loads();
        let count = requests.len();
        for request in requests {
            let result = self.loader.load(&request.asset_path);
            self.session.complete_load(&request.instance_id, result);
        }
        count
    }

    // ── Shortcuts ─────────────────────────────────────────────

    /// Create from the catalog at the plan's default drop point (5, 5)
    pub fn create(&mut self, type_id: &str, subtype_id: Option<&str>) -> Result<InstanceId> {
        self.session
            .create_instance(type_id, subtype_id, PlanPoint::new(5.0, 5.0))
    }

    pub fn create_at(&mut self, type_id: &str, subtype_id: Option<&str>, x: f64, y: f64) -> Result<InstanceId> {
        self.session.create_instance(type_id, subtype_id, PlanPoint::new(x, y))
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn switch_view(&mut self, view: ViewKind) -> Result<()> {
        self.session.switch_view(view)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn instance_count(&self) -> usize {
        self.session.design().furniture.len()
    }

    pub fn instance(&self, id: &str) -> Option<&FurnitureInstance> {
        self.session.design().instance(id)
    }

    pub fn world_item(&self, id: &str) -> Option<WorldItem> {
        self.session.world_items().into_iter().find(|item| item.id == id)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
