//! Read-only view of existing records consulted by reference and uniqueness checks.

use super::error::LookupError;
use super::kind::RecordKind;
use super::record::ValidatedRecord;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Existing records as seen at validation time.
///
/// Implementations must answer both questions through an index; the validator
/// calls them once per reference or unique field.
pub trait Snapshot {
    /// Whether a record of `kind` with `id` exists.
    fn exists(&self, kind: RecordKind, id: &Uuid) -> Result<bool, LookupError>;

    /// Id of the record of `kind` holding `value` in the unique `field`.
    fn find_unique(&self, kind: RecordKind, field: &str, value: &str) -> Result<Option<Uuid>, LookupError>;
}

/// Hash-indexed in-memory snapshot.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshot {
    ids: HashMap<RecordKind, HashSet<Uuid>>,
    unique: HashMap<(RecordKind, &'static str, String), Uuid>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes an accepted record, replacing the unique keys it held before.
    /// Tasks carry integer ids and are skipped since nothing references them.
    pub fn insert(&mut self, record: &ValidatedRecord) {
        let kind = record.kind();
        let Some(id) = record.uuid() else {
            return;
        };
        self.ids.entry(kind).or_default().insert(id);
        self.release_unique_keys(kind, &id);

        for spec in kind.fields().iter().filter(|f| f.unique) {
            if let Some(value) = record.get(spec.name).and_then(|v| v.as_str()) {
                self.unique.insert((kind, spec.name, value.to_string()), id);
            }
        }
    }

    /// Drops a record and its unique keys.
    pub fn remove(&mut self, kind: RecordKind, id: &Uuid) {
        if let Some(ids) = self.ids.get_mut(&kind) {
            ids.remove(id);
        }
        self.release_unique_keys(kind, id);
    }

    fn release_unique_keys(&mut self, kind: RecordKind, id: &Uuid) {
        self.unique.retain(|(k, _, _), owner| !(*k == kind && owner == id));
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        self.ids.get(&kind).map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.values().all(HashSet::is_empty)
    }
}

impl Snapshot for MemorySnapshot {
    fn exists(&self, kind: RecordKind, id: &Uuid) -> Result<bool, LookupError> {
        Ok(self.ids.get(&kind).is_some_and(|ids| ids.contains(id)))
    }

    fn find_unique(&self, kind: RecordKind, field: &str, value: &str) -> Result<Option<Uuid>, LookupError> {
        let Some(spec) = kind.field(field).filter(|f| f.unique) else {
            return Err(LookupError(format!("{} has no unique index on '{}'", kind, field)));
        };
        Ok(self.unique.get(&(kind, spec.name, value.to_string())).copied())
    }
}
