//! Snapshot persistence over a store.
//!
//! Persistence is best-effort and never interrupts play: a failed save or
//! an unreadable file is logged and swallowed, surfacing to the caller as
//! "no snapshot". This is the only place the engine touches the wall clock,
//! to stamp `saved_at_utc` on the way out.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use super::snapshot::SaveSnapshot;
use super::store::SaveStore;

/// Serializes snapshots in and out of a `SaveStore`.
#[derive(Clone, Debug)]
pub struct SaveService<S: SaveStore> {
    store: S,
}

impl<S: SaveStore> SaveService<S> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a snapshot, stamping the save time.
    pub fn save(&mut self, snapshot: &SaveSnapshot) {
        let mut stamped = snapshot.clone();
        stamped.saved_at_utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);

        let blob = match serde_json::to_vec(&stamped) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to serialize snapshot");
                return;
            }
        };

        if let Err(e) = self.store.write(&blob) {
            warn!(error = %e, "failed to write snapshot");
        } else {
            debug!(bytes = blob.len(), "snapshot saved");
        }
    }

    /// Load the stored snapshot, if any. Unreadable or corrupt saves are
    /// logged and reported as absent.
    pub fn load(&self) -> Option<SaveSnapshot> {
        let blob = match self.store.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read snapshot");
                return None;
            }
        };

        if blob.is_empty() {
            warn!("snapshot file is empty");
            return None;
        }

        match serde_json::from_slice(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "failed to parse snapshot");
                None
            }
        }
    }

    /// Remove the stored snapshot. Best-effort.
    pub fn delete(&mut self) {
        if let Err(e) = self.store.delete() {
            warn!(error = %e, "failed to delete snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardGenerator, Layout};
    use crate::save::store::MemorySaveStore;

    fn sample_snapshot() -> SaveSnapshot {
        let board = BoardGenerator::create(Layout::new(2, 2), 3).unwrap();
        SaveSnapshot::capture(&board, 200, 2, 9)
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut service = SaveService::new(MemorySaveStore::new());
        let snap = sample_snapshot();

        service.save(&snap);
        let loaded = service.load().expect("snapshot present");

        assert_eq!(loaded.pair_ids, snap.pair_ids);
        assert_eq!(loaded.score, 200);
        assert_eq!(loaded.combo, 2);
        assert_eq!(loaded.tries_remaining, 9);
        // Stamped on the way out.
        assert!(loaded.saved_at_utc > 0);
    }

    #[test]
    fn test_load_missing_is_none() {
        let service = SaveService::new(MemorySaveStore::new());
        assert!(service.load().is_none());
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let mut store = MemorySaveStore::new();
        store.write(b"{not json").unwrap();

        let service = SaveService::new(store);
        assert!(service.load().is_none());
    }

    #[test]
    fn test_load_empty_is_none() {
        let mut store = MemorySaveStore::new();
        store.write(b"").unwrap();

        let service = SaveService::new(store);
        assert!(service.load().is_none());
    }

    #[test]
    fn test_delete_removes_save() {
        let mut service = SaveService::new(MemorySaveStore::new());
        service.save(&sample_snapshot());
        assert!(service.load().is_some());

        service.delete();
        assert!(service.load().is_none());
    }
}
