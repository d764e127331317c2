//! Layout session: the engine instance behind one view.
//!
//! A session owns the live design and 3D overlay, the undo history, the
//! active selection and the cache of loaded assets. Plan and perspective
//! views use the same session type and differ only in which operations they
//! accept.

mod design_ops;
mod history;
mod loads;
mod perspective_ops;
mod plan_ops;
mod room_ops;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{Design, Footprint, InstanceId, Overlay};

use crate::catalog::{CatalogResolver, StaticCatalog};
use crate::error::{LayoutError, Result};
use crate::ids::{IdGenerator, UuidIds};
use crate::placement::{clamp_world, Placement};
use crate::settings::EngineSettings;
use crate::transform;
use crate::units::{plan_to_world, validate_room, UnitConverter};
use crate::views::{self, PlanItem, WorldItem};

use super::history::History;
use super::selection::SelectionState;

/// Which renderer the session serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Plan,
    Perspective,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Plan => "plan",
            ViewKind::Perspective => "perspective",
        })
    }
}

/// Distinguishes gesture feedback from the end of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    /// Intermediate drag/slider value; visible to renderers, never recorded
    Transient,
    /// Gesture release or discrete edit; recorded as exactly one snapshot
    Committed,
}

/// Everything undo/redo restores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub design: Design,
    pub overlay: Overlay,
}

/// Makes sure an id is never handed out twice within a session, including
/// ids that arrived with the entry design.
struct UniqueIds<'a> {
    inner: &'a mut dyn IdGenerator,
    issued: &'a mut HashSet<InstanceId>,
}

impl IdGenerator for UniqueIds<'_> {
    fn next_id(&mut self, hint: &str) -> InstanceId {
        loop {
            let id = self.inner.next_id(hint);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

pub struct LayoutSession {
    view: ViewKind,
    settings: EngineSettings,
    units: UnitConverter,
    catalog: Arc<dyn CatalogResolver + Send + Sync>,
    ids: Box<dyn IdGenerator + Send>,
    issued: HashSet<InstanceId>,
    live: Snapshot,
    history: History<Snapshot>,
    selection: SelectionState,
    /// Loaded assets by instance id; survives undo/redo
    placements: HashMap<InstanceId, Placement>,
    in_flight: HashSet<InstanceId>,
    /// Live state holds an unfinished gesture that history has not seen
    gesture_pending: bool,
    /// Monotonically increasing counter for renderer cache invalidation
    version: u64,
}

impl LayoutSession {
    /// Start a session on `design`, capturing it as the entry state.
    ///
    /// Uses the built-in catalog and UUID ids; see [`Self::with_catalog`]
    /// and [`Self::with_ids`].
    /// Fails on an invalid room, duplicate ids or non-finite positions.
    /// Footprints under the minimum side are raised to it.
    pub fn enter(design: Design, view: ViewKind, settings: EngineSettings) -> Result<Self> {
        validate_room(&design.room)?;
        let units = settings.units()?;
        let design = transform::normalize_design(&design, settings.min_footprint_side())?;
        let issued = design.ids().cloned().collect();

        let live = Snapshot {
            design,
            overlay: Overlay::default(),
        };
        let mut session = Self {
            view,
            units,
            catalog: Arc::new(StaticCatalog::builtin()),
            ids: Box::new(UuidIds),
            issued,
            history: History::with_limit(live.clone(), settings.history_limit),
            settings,
            live,
            selection: SelectionState::default(),
            placements: HashMap::new(),
            in_flight: HashSet::new(),
            gesture_pending: false,
            version: 0,
        };

        Self::place_assetless(&mut session.placements, &session.live.design);
        let mut entry = session.live.clone();
        session.resync_overlay(&mut entry)?;
        session.live = entry.clone();
        session.history = History::with_limit(entry, session.settings.history_limit);

        tracing::info!(
            view = %view,
            instances = session.live.design.furniture.len(),
            "Entered layout session"
        );
        Ok(session)
    }

    /// Session over an empty default room with default settings
    pub fn blank(view: ViewKind) -> Self {
        let live = Snapshot {
            design: Design::default(),
            overlay: Overlay::default(),
        };
        let settings = EngineSettings::default();
        Self {
            view,
            units: UnitConverter::default(),
            catalog: Arc::new(StaticCatalog::builtin()),
            ids: Box::new(UuidIds),
            issued: HashSet::new(),
            history: History::with_limit(live.clone(), settings.history_limit),
            settings,
            live,
            selection: SelectionState::default(),
            placements: HashMap::new(),
            in_flight: HashSet::new(),
            gesture_pending: false,
            version: 0,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogResolver + Send + Sync>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_ids(mut self, ids: Box<dyn IdGenerator + Send>) -> Self {
        self.ids = ids;
        self
    }

    /// Leave the current view and re-enter as `view` with the exported design.
    ///
    /// The overlay is rebuilt from plan positions and the history restarts
    /// from the handed-off design. Ids, catalog and loaded assets carry over.
    pub fn switch_view(&mut self, view: ViewKind) -> Result<()> {
        let mut entry = Snapshot {
            design: self.committed_base().design,
            overlay: Overlay::default(),
        };
        self.resync_overlay(&mut entry)?;

        self.view = view;
        self.gesture_pending = false;
        self.live = entry.clone();
        self.history = History::with_limit(entry, self.settings.history_limit);
        self.selection.clear();
        self.version += 1;

        tracing::info!(view = %view, "Switched view");
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn design(&self) -> &Design {
        &self.live.design
    }

    pub fn overlay(&self) -> &Overlay {
        &self.live.overlay
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.live
    }

    /// The Feet-only design handed to the next view
    pub fn export_design(&self) -> Design {
        self.live.design.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn catalog(&self) -> &dyn CatalogResolver {
        self.catalog.as_ref()
    }

    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn selected(&self) -> Option<&InstanceId> {
        self.selection.active()
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.live.design.contains(id) {
            return Err(LayoutError::NotFound(id.to_string()));
        }
        self.selection.select(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Renderer views ────────────────────────────────────────

    pub fn plan_items(&self) -> Vec<PlanItem> {
        views::plan_items(&self.live.design, &self.units)
    }

    pub fn world_items(&self) -> Vec<WorldItem> {
        views::world_items(&self.live, &self.placements, &self.settings)
    }

    // ── Internals ─────────────────────────────────────────────

    fn require_view(&self, expected: ViewKind, op: &'static str) -> Result<()> {
        if self.view == expected {
            Ok(())
        } else {
            Err(LayoutError::UnsupportedInView { op, view: self.view })
        }
    }

    /// The state every edit starts from: the live state, minus any
    /// unfinished gesture. Rest heights follow the current placement cache.
    fn committed_base(&self) -> Snapshot {
        if !self.gesture_pending {
            return self.live.clone();
        }
        let mut base = self.history.current().clone();
        self.apply_rest_heights(&mut base);
        base
    }

    /// Replace the live state; committed updates also record a snapshot
    fn update(&mut self, next: Snapshot, kind: UpdateKind, action: &'static str) {
        self.live = next;
        self.version += 1;
        self.gesture_pending = kind == UpdateKind::Transient;
        if kind == UpdateKind::Committed {
            self.history.commit(self.live.clone());
            tracing::debug!(action, cursor = self.history.cursor(), "Committed edit");
        }
    }

    fn rest_height(&self, id: &str, footprint: Footprint, scale_factor: f64) -> f64 {
        self.placements
            .get(id)
            .map(|p| {
                p.resting_height(
                    footprint,
                    scale_factor,
                    self.settings.wall_height,
                    self.settings.proxy_height,
                )
            })
            .unwrap_or(0.0)
    }

    /// Position an instance's overlay entry from its plan position,
    /// clamped with its current scale factor.
    fn place_from_plan(&self, overlay: &mut Overlay, design: &Design, id: &str) -> Result<()> {
        let inst = design
            .instance(id)
            .ok_or_else(|| LayoutError::NotFound(id.to_string()))?;
        let world = plan_to_world(inst.position, inst.footprint, &design.room)?;

        let entry = overlay.entries.entry(id.to_string()).or_default();
        let s = entry.scale_factor;
        let world = clamp_world(
            world,
            inst.footprint.width * s / 2.0,
            inst.footprint.length * s / 2.0,
            &design.room,
        );
        entry.world_position = [world.x, self.rest_height(id, inst.footprint, s), world.z];
        Ok(())
    }

    /// Rebuild overlay positions for every instance, dropping stale entries
    fn resync_overlay(&self, snapshot: &mut Snapshot) -> Result<()> {
        let design = &snapshot.design;
        snapshot.overlay.entries.retain(|id, _| design.contains(id));
        for inst in &design.furniture {
            self.place_from_plan(&mut snapshot.overlay, design, &inst.id)?;
        }
        Ok(())
    }

    /// Recompute every rest height in `snapshot` from the placement cache
    fn apply_rest_heights(&self, snapshot: &mut Snapshot) {
        for inst in &snapshot.design.furniture {
            if let Some(entry) = snapshot.overlay.get_mut(&inst.id) {
                entry.world_position[1] = self.rest_height(&inst.id, inst.footprint, entry.scale_factor);
            }
        }
    }

    fn refresh_rest_heights(&mut self) {
        let mut live = self.live.clone();
        self.apply_rest_heights(&mut live);
        self.live = live;
    }

    /// Instances without a model go straight to the proxy box
    fn place_assetless(placements: &mut HashMap<InstanceId, Placement>, design: &Design) {
        for inst in &design.furniture {
            if inst.asset.is_none() && !placements.contains_key(&inst.id) {
                placements.insert(inst.id.clone(), Placement::Proxy);
            }
        }
    }
}
