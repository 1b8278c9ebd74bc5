use crate::snapshot::Snapshot;

/// Stack of pre-stroke snapshots, most recent last.
///
/// Grows by one per started stroke and has no capacity limit; every entry
/// holds a full encoded surface.
#[derive(Debug, Default, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// The snapshot an undo would restore
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns true if there is a snapshot to go back to
    pub fn can_undo(&self) -> bool {
        !self.is_empty()
    }

    /// Total encoded size of all snapshots, in bytes
    pub fn encoded_bytes(&self) -> usize {
        self.snapshots.iter().map(Snapshot::encoded_len).sum()
    }
}
