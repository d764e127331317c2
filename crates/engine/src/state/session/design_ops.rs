use shared::{Color, Design, Footprint, InstanceId, Overlay, PlanPoint, RoomTemplate};

use super::{LayoutSession, Snapshot, UniqueIds, UpdateKind};
use crate::error::Result;
use crate::transform;

impl LayoutSession {
    /// Add a catalog item at `position` (feet), clamp it into the room and
    /// select it.
    pub fn create_instance(
        &mut self,
        type_id: &str,
        subtype_id: Option<&str>,
        position: PlanPoint,
    ) -> Result<InstanceId> {
        let base = self.committed_base();
        let mut ids = UniqueIds {
            inner: self.ids.as_mut(),
            issued: &mut self.issued,
        };
        let (design, id) = transform::create_instance(
            &base.design,
            self.catalog.as_ref(),
            &mut ids,
            type_id,
            subtype_id,
            position,
        )?;
        let design = transform::clamp_instance(&design, &id)?;
        Self::place_assetless(&mut self.placements, &design);

        let mut next = Snapshot {
            design,
            overlay: base.overlay,
        };
        self.place_from_plan(&mut next.overlay, &next.design, &id)?;
        self.update(next, UpdateKind::Committed, "create_instance");
        self.selection.select(id.clone());

        tracing::debug!(%id, type_id, "Created instance");
        Ok(id)
    }

    /// Committed move in feet; the result is clamped into the room
    pub fn move_instance(&mut self, id: &str, position: PlanPoint) -> Result<PlanPoint> {
        let base = self.committed_base();
        let design = transform::move_instance(&base.design, id, position)?;
        let design = transform::clamp_instance(&design, id)?;
        let placed = design.instance(id).map(|i| i.position).unwrap_or(position);
        self.commit_design(design, base.overlay, id, "move_instance")?;
        Ok(placed)
    }

    /// Committed resize in feet. Sides below the minimum are raised to it,
    /// then the instance is pulled back inside the room.
    pub fn resize_instance(&mut self, id: &str, footprint: Footprint) -> Result<Footprint> {
        let min_side = self.settings.min_footprint_side();
        let base = self.committed_base();
        let design = transform::resize_instance(&base.design, id, footprint, min_side)?;
        let design = transform::clamp_instance(&design, id)?;
        let applied = design.instance(id).map(|i| i.footprint).unwrap_or(footprint);
        self.commit_design(design, base.overlay, id, "resize_instance")?;
        Ok(applied)
    }

    /// Change an instance's color. Both views write the same field.
    pub fn recolor_instance(&mut self, id: &str, color: Color) -> Result<()> {
        let base = self.committed_base();
        let next = Snapshot {
            design: transform::recolor_instance(&base.design, id, color)?,
            overlay: base.overlay,
        };
        self.update(next, UpdateKind::Committed, "recolor_instance");
        Ok(())
    }

    pub fn delete_instance(&mut self, id: &str) -> Result<()> {
        let base = self.committed_base();
        let design = transform::delete_instance(&base.design, id)?;
        let mut overlay = base.overlay;
        overlay.entries.remove(id);

        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        self.update(Snapshot { design, overlay }, UpdateKind::Committed, "delete_instance");
        tracing::debug!(%id, "Deleted instance");
        Ok(())
    }

    /// Replace the whole design with a template, as one undoable step.
    ///
    /// Fails without changes if any template item is missing from the
    /// catalog.
    pub fn apply_template(&mut self, template: &RoomTemplate) -> Result<()> {
        let min_side = self.settings.min_footprint_side();
        let mut ids = UniqueIds {
            inner: self.ids.as_mut(),
            issued: &mut self.issued,
        };
        let design = transform::apply_template(template, self.catalog.as_ref(), &mut ids, min_side)?;
        Self::place_assetless(&mut self.placements, &design);

        let mut next = Snapshot {
            design,
            overlay: Overlay::default(),
        };
        self.resync_overlay(&mut next)?;
        self.selection.clear();
        self.update(next, UpdateKind::Committed, "apply_template");

        tracing::info!(
            template = %template.id,
            instances = self.live.design.furniture.len(),
            "Applied room template"
        );
        Ok(())
    }

    /// Commit a design edit to one instance and re-place its overlay entry
    fn commit_design(&mut self, design: Design, overlay: Overlay, id: &str, action: &'static str) -> Result<()> {
        let mut next = Snapshot { design, overlay };
        self.place_from_plan(&mut next.overlay, &next.design, id)?;
        self.update(next, UpdateKind::Committed, action);
        Ok(())
    }
}
