//! Instance id generation

use shared::InstanceId;

/// Source of fresh instance ids. Implementations never hand out the same id
/// twice, even across undo.
pub trait IdGenerator {
    fn next_id(&mut self, hint: &str) -> InstanceId;
}

/// Monotonic counter: `"{hint}-1"`, `"{hint}-2"`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, hint: &str) -> InstanceId {
        self.issued += 1;
        format!("{hint}-{}", self.issued)
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, _hint: &str) -> InstanceId {
        uuid::Uuid::new_v4().to_string()
    }
}
