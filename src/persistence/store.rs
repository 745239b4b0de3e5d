//! Deadline store: CRUD over a whole-collection snapshot.
//!
//! # Invariants
//! - Every write is read-modify-write of the full snapshot. There is no
//!   locking; with two writers the last write wins.
//! - `list` always returns deadlines sorted by target date, ties in the
//!   order they were stored.
//! - A snapshot that cannot be parsed reads as empty. It is copied aside
//!   before the next write replaces it.
//! - Ids are unique within the stored collection.

use super::backend::{FileBackend, SnapshotBackend};
use super::error::StoreError;
use super::record::{decode_snapshot, encode_snapshot, Snapshot};
use crate::domain::{generate_id, sort_canonical, Deadline, DeadlinePatch, NewDeadline};
use anyhow::anyhow;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::path::Path;

/// Capability handed to the presentation layer
pub trait DeadlineStore {
    /// All deadlines in canonical order, or the read error
    fn try_list(&self) -> Result<Vec<Deadline>, StoreError>;

    /// All deadlines in canonical order. Read failures degrade to an empty
    /// collection and are logged.
    fn list(&self) -> Vec<Deadline> {
        match self.try_list() {
            Ok(deadlines) => deadlines,
            Err(err) => {
                warn!("event=store_list module=store status=degraded error={}", err);
                Vec::new()
            }
        }
    }

    /// Store a new deadline and return it with its assigned id
    fn create(&mut self, data: NewDeadline) -> Result<Deadline, StoreError>;

    /// Merge `patch` over the deadline with `id`. Unknown ids are ignored.
    fn update(&mut self, id: &str, patch: DeadlinePatch) -> Result<(), StoreError>;

    /// Remove the deadline with `id`, if present
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

enum Loaded {
    Ok(Snapshot),
    Corrupt(serde_json::Error),
}

/// Store that keeps the collection as one serialized snapshot in a backend
#[derive(Debug, Clone)]
pub struct SnapshotStore<B> {
    backend: B,
}

/// The store used by the application
pub type JsonFileStore = SnapshotStore<FileBackend>;

impl JsonFileStore {
    /// Store backed by the snapshot file inside `data_dir`
    pub fn open_in(data_dir: &Path) -> Self {
        Self::new(FileBackend::in_dir(data_dir))
    }
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn load(&self) -> Result<Loaded, StoreError> {
        let payload = self
            .backend
            .read()
            .map_err(StoreError::StorageUnavailable)?
            .unwrap_or_default();

        match decode_snapshot(&payload) {
            Ok(snapshot) => Ok(Loaded::Ok(snapshot)),
            Err(err) => Ok(Loaded::Corrupt(err)),
        }
    }

    /// Snapshot to modify, and whether the stored payload must be kept
    /// aside before it is replaced
    fn load_for_write(&self) -> Result<(Vec<Deadline>, bool), StoreError> {
        match self.load()? {
            Loaded::Ok(snapshot) => Ok((snapshot.deadlines, snapshot.dropped > 0)),
            Loaded::Corrupt(err) => {
                warn!(
                    "event=store_load module=store status=corrupt location={} error={}",
                    self.backend.describe(),
                    err
                );
                Ok((Vec::new(), true))
            }
        }
    }

    fn persist(&mut self, deadlines: &[Deadline], preserve_previous: bool) -> Result<(), StoreError> {
        if preserve_previous {
            match self.backend.preserve() {
                Ok(Some(location)) => {
                    warn!("event=store_preserve module=store status=ok copy={}", location)
                }
                Ok(None) => {}
                Err(err) => error!("event=store_preserve module=store status=error error={:#}", err),
            }
        }

        let payload = encode_snapshot(deadlines).map_err(|err| StoreError::PersistenceFailure(anyhow!(err)))?;
        self.backend.write(&payload).map_err(|err| {
            error!(
                "event=store_write module=store status=error location={} error={:#}",
                self.backend.describe(),
                err
            );
            StoreError::PersistenceFailure(err)
        })
    }
}

impl<B: SnapshotBackend> DeadlineStore for SnapshotStore<B> {
    fn try_list(&self) -> Result<Vec<Deadline>, StoreError> {
        match self.load()? {
            Loaded::Ok(snapshot) => {
                let mut deadlines = snapshot.deadlines;
                sort_canonical(&mut deadlines);
                Ok(deadlines)
            }
            Loaded::Corrupt(err) => Err(StoreError::StorageUnavailable(
                anyhow!(err).context(format!("corrupt snapshot at {}", self.backend.describe())),
            )),
        }
    }

    fn create(&mut self, data: NewDeadline) -> Result<Deadline, StoreError> {
        data.validate()?;
        let (mut deadlines, preserve) = self.load_for_write()?;

        let mut id = generate_id();
        while deadlines.iter().any(|d| d.id == id) {
            id = generate_id();
        }

        let mut deadline = Deadline::from_new(id, data);
        if deadline.created_at.is_none() {
            deadline.created_at = Some(Utc::now());
        }
        deadlines.push(deadline.clone());

        self.persist(&deadlines, preserve)?;
        info!(
            "event=deadline_create module=store status=ok id={} type={}",
            deadline.id,
            deadline.kind.to_tag()
        );
        Ok(deadline)
    }

    fn update(&mut self, id: &str, patch: DeadlinePatch) -> Result<(), StoreError> {
        let (mut deadlines, preserve) = self.load_for_write()?;

        let Some(index) = deadlines.iter().position(|d| d.id == id) else {
            debug!("event=deadline_update module=store status=missing id={}", id);
            return Ok(());
        };

        patch.validate()?;
        deadlines[index].apply(patch);

        self.persist(&deadlines, preserve)?;
        info!("event=deadline_update module=store status=ok id={}", id);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let (mut deadlines, preserve) = self.load_for_write()?;

        let before = deadlines.len();
        deadlines.retain(|d| d.id != id);
        if deadlines.len() == before {
            debug!("event=deadline_delete module=store status=missing id={}", id);
            return Ok(());
        }

        self.persist(&deadlines, preserve)?;
        info!("event=deadline_delete module=store status=ok id={}", id);
        Ok(())
    }
}
