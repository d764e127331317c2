use shared::{Color, Design, FloorType};

use super::{LayoutSession, Snapshot, UpdateKind};
use crate::error::Result;
use crate::transform;

impl LayoutSession {
    /// Resize the room. Every instance is pulled back inside it and its
    /// 3D position follows.
    pub fn set_room_dimensions(&mut self, width: f64, length: f64) -> Result<()> {
        let base = self.committed_base();
        let mut next = Snapshot {
            design: transform::set_room_dimensions(&base.design, width, length)?,
            overlay: base.overlay,
        };
        self.resync_overlay(&mut next)?;
        self.update(next, UpdateKind::Committed, "set_room_dimensions");
        tracing::debug!(width, length, "Resized room");
        Ok(())
    }

    pub fn set_wall_color(&mut self, color: Color) {
        self.commit_room(|d| transform::set_wall_color(d, color), "set_wall_color");
    }

    pub fn set_floor_color(&mut self, color: Color) {
        self.commit_room(|d| transform::set_floor_color(d, color), "set_floor_color");
    }

    /// Switching the floor type drops the current texture
    pub fn set_floor_type(&mut self, floor_type: FloorType) {
        self.commit_room(|d| transform::set_floor_type(d, floor_type), "set_floor_type");
    }

    /// `None` clears the texture; a path must belong to the current floor type
    pub fn set_floor_texture(&mut self, texture: Option<String>) -> Result<()> {
        let base = self.committed_base();
        let next = Snapshot {
            design: transform::set_floor_texture(&base.design, texture)?,
            overlay: base.overlay,
        };
        self.update(next, UpdateKind::Committed, "set_floor_texture");
        Ok(())
    }

    fn commit_room(&mut self, edit: impl FnOnce(&Design) -> Design, action: &'static str) {
        let base = self.committed_base();
        let next = Snapshot {
            design: edit(&base.design),
            overlay: base.overlay,
        };
        self.update(next, UpdateKind::Committed, action);
    }
}
