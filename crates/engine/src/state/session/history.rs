use super::{LayoutSession, Snapshot};

impl LayoutSession {
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot; `false` at the entry state
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        tracing::debug!(cursor = self.history.cursor(), "Undo");
        true
    }

    /// Re-apply the next snapshot; `false` when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        tracing::debug!(cursor = self.history.cursor(), "Redo");
        true
    }

    /// Abandon an unfinished gesture and return to the last committed state
    pub fn cancel_transient(&mut self) {
        let snapshot = self.history.current().clone();
        self.restore(snapshot);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.live = snapshot;
        self.gesture_pending = false;
        // Assets may have finished loading since the snapshot was taken
        self.refresh_rest_heights();
        self.selection.prune(&self.live.design);
        self.version += 1;
    }
}
