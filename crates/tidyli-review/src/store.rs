//! Decision store: one live decision per profile URL, persisted on every change

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tidyli_core::{Decision, ProfileDecision};

/// Decision persistence failed
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("decision storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable home for the full decision collection
///
/// Implementations read and write the whole collection at once; there is no
/// per-record update.
pub trait DecisionStorage {
    fn load(&self) -> Result<Vec<ProfileDecision>, StoreError>;
    fn save(&mut self, records: &[ProfileDecision]) -> Result<(), StoreError>;
}

/// Decisions as a single JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DecisionStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<ProfileDecision>, StoreError> {
        Ok(tidyli_storage::read_json_or_default(&self.path)?)
    }

    fn save(&mut self, records: &[ProfileDecision]) -> Result<(), StoreError> {
        tidyli_storage::write_json(&self.path, records)?;
        Ok(())
    }
}

/// In-process storage, used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub records: Vec<ProfileDecision>,
    pub saves: usize,
}

impl DecisionStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<ProfileDecision>, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[ProfileDecision]) -> Result<(), StoreError> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// In-memory decisions keyed by profile URL, backed by a [`DecisionStorage`]
///
/// A URL with no record is `Pending`. Setting `Pending` deletes the record, so the
/// store only ever holds keep/remove records.
pub struct DecisionStore {
    storage: Box<dyn DecisionStorage>,
    records: Vec<ProfileDecision>,
    index: HashMap<String, usize>,
}

impl DecisionStore {
    /// Load persisted decisions and reconcile them.
    ///
    /// Duplicate records for one URL collapse to the one with the newest timestamp.
    /// A URL whose newest record is `pending` has no live record.
    pub fn open(storage: Box<dyn DecisionStorage>) -> Result<Self, StoreError> {
        let persisted = storage.load()?;
        let total = persisted.len();

        let mut store = Self {
            storage,
            records: Vec::with_capacity(total),
            index: HashMap::with_capacity(total),
        };

        for record in persisted {
            match store.index.get(&record.profile_url).copied() {
                Some(i) if store.records[i].timestamp > record.timestamp => {}
                Some(i) => store.records[i] = record,
                None => store.push(record),
            }
        }
        store.records.retain(|r| r.decision != Decision::Pending);
        store.rebuild_index();

        if store.records.len() != total {
            tracing::debug!(
                "Reconciled {} stored decisions into {} live records",
                total,
                store.records.len()
            );
        }
        Ok(store)
    }

    /// Current decision for `url`; `Pending` when nothing is stored
    pub fn get(&self, url: &str) -> Decision {
        self.index
            .get(url)
            .map(|&i| self.records[i].decision)
            .unwrap_or(Decision::Pending)
    }

    /// Replace the decision for `url` and persist the whole collection.
    ///
    /// An existing record is updated in place, so repeating an identical call leaves
    /// the state unchanged. If the write fails the in-memory records are rolled back.
    pub fn set(&mut self, url: &str, decision: Decision, timestamp: i64) -> Result<(), StoreError> {
        let snapshot = self.records.clone();

        match (self.index.get(url).copied(), decision) {
            (Some(i), Decision::Pending) => {
                self.records.remove(i);
                self.rebuild_index();
            }
            (None, Decision::Pending) => {}
            (Some(i), _) => {
                self.records[i].decision = decision;
                self.records[i].timestamp = timestamp;
            }
            (None, _) => self.push(ProfileDecision {
                profile_url: url.to_string(),
                decision,
                timestamp,
            }),
        }

        if let Err(e) = self.persist() {
            self.records = snapshot;
            self.rebuild_index();
            return Err(e);
        }
        tracing::debug!("Decision for {} set to {}", url, decision);
        Ok(())
    }

    /// Write every live record to storage
    pub fn persist(&mut self) -> Result<(), StoreError> {
        self.storage.save(&self.records)
    }

    /// Live records in the order they were first decided
    pub fn records(&self) -> &[ProfileDecision] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, record: ProfileDecision) {
        self.index
            .insert(record.profile_url.clone(), self.records.len());
        self.records.push(record);
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.profile_url.clone(), i))
            .collect();
    }
}
