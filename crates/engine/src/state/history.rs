//! Linear undo/redo history over immutable snapshots

/// Snapshots `S_0..=S_n` plus a cursor at the applied one.
///
/// `S_0` is never evicted, so undo can always get back to the entry state.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Unbounded history starting at `initial`
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, usize::MAX)
    }

    /// History holding at most `limit` snapshots (at least two: the entry
    /// state and the latest one)
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: limit.max(2),
        }
    }

    /// Drop everything after the cursor, append `snapshot`, move onto it
    pub fn commit(&mut self, snapshot: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        // Evict the oldest edit after the entry state
        while self.snapshots.len() > self.limit {
            self.snapshots.remove(1);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; `None` at the entry state
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward; `None` at the newest snapshot
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn current(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    pub fn initial(&self) -> &T {
        &self.snapshots[0]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
