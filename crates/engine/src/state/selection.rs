use shared::{Design, InstanceId};

/// Active selection; at most one instance at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    active: Option<InstanceId>,
}

impl SelectionState {
    pub fn select(&mut self, id: InstanceId) {
        self.active = Some(id);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&InstanceId> {
        self.active.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Drop the selection if its instance no longer exists
    pub fn prune(&mut self, design: &Design) {
        if let Some(id) = &self.active {
            if !design.contains(id) {
                self.active = None;
            }
        }
    }
}
