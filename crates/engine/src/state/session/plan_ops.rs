//! 2D canvas gestures, in editor units

use shared::{Design, Footprint, Overlay, PlanPoint};

use super::{LayoutSession, Snapshot, UpdateKind, ViewKind};
use crate::error::Result;
use crate::transform;
use crate::units::PlanRect;

impl LayoutSession {
    /// Drag an instance on the plan canvas.
    ///
    /// Transient updates follow the pointer unclamped; the committed update
    /// is clamped into the room. Returns the position stored, in feet.
    pub fn drag_plan(&mut self, id: &str, x: f64, y: f64, kind: UpdateKind) -> Result<PlanPoint> {
        self.require_view(ViewKind::Plan, "drag_plan")?;
        let position = self.units.point_to_feet(x, y);

        let base = self.committed_base();
        let mut design = transform::move_instance(&base.design, id, position)?;
        if kind == UpdateKind::Committed {
            design = transform::clamp_instance(&design, id)?;
        }
        let placed = design.instance(id).map(|i| i.position).unwrap_or(position);

        self.apply_plan_edit(design, base.overlay, id, kind, "drag_plan")?;
        Ok(placed)
    }

    /// Apply a transformer box (move and resize) from the plan canvas.
    ///
    /// The rectangle is normalized back to feet; sides under the minimum
    /// resize are raised to it.
    pub fn transform_plan(&mut self, id: &str, rect: PlanRect, kind: UpdateKind) -> Result<(PlanPoint, Footprint)> {
        self.require_view(ViewKind::Plan, "transform_plan")?;
        let (position, footprint) = self.units.rect_to_feet(rect);
        let min_side = self.settings.min_footprint_side();

        let base = self.committed_base();
        let design = transform::move_instance(&base.design, id, position)?;
        let mut design = transform::resize_instance(&design, id, footprint, min_side)?;
        if kind == UpdateKind::Committed {
            design = transform::clamp_instance(&design, id)?;
        }
        let applied = design
            .instance(id)
            .map(|i| (i.position, i.footprint))
            .unwrap_or((position, footprint));

        self.apply_plan_edit(design, base.overlay, id, kind, "transform_plan")?;
        Ok(applied)
    }

    fn apply_plan_edit(
        &mut self,
        design: Design,
        overlay: Overlay,
        id: &str,
        kind: UpdateKind,
        action: &'static str,
    ) -> Result<()> {
        let mut next = Snapshot { design, overlay };
        self.place_from_plan(&mut next.overlay, &next.design, id)?;
        self.update(next, kind, action);
        Ok(())
    }
}
