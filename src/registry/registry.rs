use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use log::{error, info, warn};

use super::{normalize_alias, DriverRecord, RegistryError};

/// How far a mutation got: committed in memory only, or also flushed to the
/// backing file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    /// In-memory state and backing file both updated.
    Persisted,
    /// In-memory state updated, but rewriting the backing file failed. The
    /// on-disk copy is stale until the next successful persist.
    MemoryOnly,
}

/// In-memory driver registry backed by a JSON file.
///
/// This is intentionally simple and synchronous: one `Mutex` guards the
/// whole collection, and every mutation rewrites the backing file in full
/// while the lock is held, so concurrent persists can never interleave. If
/// we need more read throughput later, the lock can become an `RwLock`
/// without changing the public API.
pub struct DriverRegistry {
    inner: Mutex<HashMap<String, DriverRecord>>,
    path: PathBuf,
}

impl DriverRegistry {
    /// Opens a registry backed by `path`, loading whatever records the file
    /// holds.
    ///
    /// A missing, unreadable, or malformed file is logged and treated as an
    /// empty registry; construction itself never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match load_records(&path) {
            Ok(records) => {
                info!(
                    "loaded {} driver record(s) from {}",
                    records.len(),
                    path.display()
                );
                records
            }
            Err(err) => {
                warn!(
                    "unable to load driver registry from {}, starting empty: {:#}",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        };
        Self {
            inner: Mutex::new(records),
            path,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of all registered drivers. Records are cloned out of the
    /// lock, so the result stays valid regardless of later mutations. If the
    /// internal mutex is poisoned, this returns an empty list as a
    /// conservative default.
    pub fn all(&self) -> Vec<DriverRecord> {
        let guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };

        guard.values().cloned().collect()
    }

    /// Looks up the driver registered under `alias`, case-insensitively.
    pub fn find(&self, alias: &str) -> Option<DriverRecord> {
        let guard = self.inner.lock().ok()?;

        match guard.get(&normalize_alias(alias)) {
            Some(record) => {
                info!(
                    "resolved driver {} against alias {}",
                    record.class_name, alias
                );
                Some(record.clone())
            }
            None => {
                warn!("no driver registered for alias {}", alias);
                None
            }
        }
    }

    /// Inserts or updates a driver record, keyed case-insensitively by its
    /// alias.
    ///
    /// An existing record gets the input's class name unconditionally, but
    /// keeps its stored jar path when the input carries `None`, so callers
    /// can update a class name without re-sending the jar location. A `Some`
    /// jar path always replaces the stored one.
    ///
    /// Returns [`PersistOutcome::Persisted`] when the backing file was also
    /// rewritten, [`PersistOutcome::MemoryOnly`] when the write failed (the
    /// failure is logged and the in-memory change is kept).
    pub fn upsert(&self, record: DriverRecord) -> Result<PersistOutcome, RegistryError> {
        if record.alias.trim().is_empty() {
            return Err(RegistryError::EmptyAlias);
        }

        let mut guard = self
            .inner
            .lock()
            .map_err(|e| RegistryError::Internal(format!("Mutex poisoned in upsert: {}", e)))?;

        match guard.entry(record.key()) {
            Entry::Occupied(mut entry) => {
                info!(
                    "updating driver for alias {} to {}",
                    record.alias, record.class_name
                );
                let existing = entry.get_mut();
                existing.class_name = record.class_name;
                if record.jar_file.is_some() {
                    existing.jar_file = record.jar_file;
                }
            }
            Entry::Vacant(entry) => {
                info!(
                    "registering driver {} for alias {}",
                    record.class_name, record.alias
                );
                entry.insert(record);
            }
        }

        Ok(self.persist_locked(&guard))
    }

    /// Removes the driver registered under `alias`, case-insensitively.
    ///
    /// Returns `Err(RegistryError::NotFound)` without touching the backing
    /// file when no record matches.
    pub fn remove(&self, alias: &str) -> Result<PersistOutcome, RegistryError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| RegistryError::Internal(format!("Mutex poisoned in remove: {}", e)))?;

        match guard.remove(&normalize_alias(alias)) {
            Some(removed) => {
                info!(
                    "removed driver {} against alias {}",
                    removed.class_name, alias
                );
                Ok(self.persist_locked(&guard))
            }
            None => {
                warn!("no driver registered for alias {}", alias);
                Err(RegistryError::NotFound(alias.to_string()))
            }
        }
    }

    /// Rewrites the backing file from the locked collection. By the time
    /// this runs the in-memory change is already committed, so a failed
    /// write is logged and reported as `MemoryOnly` rather than propagated.
    fn persist_locked(&self, records: &HashMap<String, DriverRecord>) -> PersistOutcome {
        match write_records(&self.path, records) {
            Ok(()) => PersistOutcome::Persisted,
            Err(err) => {
                error!(
                    "unable to persist driver registry to {}: {:#}",
                    self.path.display(),
                    err
                );
                PersistOutcome::MemoryOnly
            }
        }
    }
}

fn load_records(path: &Path) -> anyhow::Result<HashMap<String, DriverRecord>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<DriverRecord> =
        serde_json::from_str(&raw).with_context(|| format!("decoding {}", path.display()))?;

    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        // Hand-edited files may carry duplicate aliases; last one wins.
        if let Some(previous) = map.insert(record.key(), record) {
            warn!(
                "duplicate alias {} in {}, keeping the later entry",
                previous.alias,
                path.display()
            );
        }
    }
    Ok(map)
}

fn write_records(path: &Path, records: &HashMap<String, DriverRecord>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    // Sorted by alias so successive rewrites stay diffable.
    let mut entries: Vec<&DriverRecord> = records.values().collect();
    entries.sort_by(|a, b| a.alias.cmp(&b.alias));

    let json = serde_json::to_string_pretty(&entries).context("encoding driver records")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
