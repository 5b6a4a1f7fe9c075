use std::sync::{Arc, PoisonError, RwLock};

use dronedeck_protocol::Snapshot;

/// Single-slot holder for the current snapshot.
///
/// `set` replaces the slot wholesale; readers always see either the previous
/// snapshot or the new one, never a partial write. With concurrent fetches in
/// flight, the most recently completed one wins; there is no sequence
/// numbering and no merging.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first successful fetch.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, snapshot: Snapshot) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(snapshot));
    }
}
