//! Pure record-set transitions.
//!
//! # Responsibility
//! - Express every store mutation as a tagged `Command`.
//! - Compute the next `RecordsState` without touching persistence.
//!
//! # Invariants
//! - `reduce` never mutates its input state.
//! - Every successful transition bumps `revision` by exactly one.
//! - Record ids stay unique: `Add` rejects duplicates, `Load` keeps the
//!   first occurrence of a repeated id.

use super::error::{StoreError, StoreResult};
use crate::model::record::{Category, Record, RecordId};
use std::collections::HashSet;
use std::sync::Arc;

/// Store mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the whole set. Resets `selected` on every record.
    Load(Vec<Record>),
    Add(Record),
    /// Replace the record with the same id.
    Update(Record),
    Delete(RecordId),
    ToggleSelected(RecordId),
    /// Mark the listed ids selected. Unknown ids are ignored.
    RestoreSelection(Vec<RecordId>),
}

impl Command {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::ToggleSelected(_) => "toggle_selected",
            Self::RestoreSelection(_) => "restore_selection",
        }
    }
}

/// Immutable snapshot of the record set.
///
/// Cloning is cheap; the record vector is shared.
#[derive(Debug, Clone, Default)]
pub struct RecordsState {
    records: Arc<Vec<Record>>,
    revision: u64,
}

impl RecordsState {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Change counter, bumped by every transition from this snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// Ids of selected records in store order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.records
            .iter()
            .filter(|record| record.selected)
            .map(|record| record.id)
            .collect()
    }

    /// True when both snapshots share one record vector and revision.
    pub fn is_same_snapshot(&self, other: &RecordsState) -> bool {
        self.revision == other.revision && Arc::ptr_eq(&self.records, &other.records)
    }

    /// Re-bases this snapshot onto `persisted`, carrying selection over by
    /// id. Persisted `selected` flags are ignored and the revision is kept.
    pub(crate) fn rebase(&self, persisted: Vec<Record>) -> RecordsState {
        let selected: HashSet<RecordId> = self.selected_ids().into_iter().collect();
        let mut seen = HashSet::with_capacity(persisted.len());
        let records = persisted
            .into_iter()
            .filter(|record| seen.insert(record.id))
            .map(|record| Record {
                selected: selected.contains(&record.id),
                ..record
            })
            .collect();
        RecordsState {
            records: Arc::new(records),
            revision: self.revision,
        }
    }

    fn position(&self, id: RecordId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

/// Applies one command to `state` and returns the next state.
///
/// # Errors
/// - `DuplicateId` when adding an id that already exists.
/// - `NotFound` when updating, deleting or toggling a missing id.
pub fn reduce(state: &RecordsState, command: Command) -> StoreResult<RecordsState> {
    let records = match command {
        Command::Load(incoming) => {
            let mut seen = HashSet::with_capacity(incoming.len());
            incoming
                .into_iter()
                .filter(|record| seen.insert(record.id))
                .map(|record| Record {
                    selected: false,
                    ..record
                })
                .collect()
        }
        Command::Add(record) => {
            if state.contains(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            let mut records = state.records.as_ref().clone();
            records.push(record);
            records
        }
        Command::Update(record) => {
            let index = state.position(record.id)?;
            let mut records = state.records.as_ref().clone();
            records[index] = record;
            records
        }
        Command::Delete(id) => {
            let index = state.position(id)?;
            let mut records = state.records.as_ref().clone();
            records.remove(index);
            records
        }
        Command::ToggleSelected(id) => {
            let index = state.position(id)?;
            let mut records = state.records.as_ref().clone();
            records[index].selected = !records[index].selected;
            records
        }
        Command::RestoreSelection(ids) => {
            let wanted: HashSet<RecordId> = ids.into_iter().collect();
            state
                .records
                .iter()
                .map(|record| Record {
                    selected: record.selected || wanted.contains(&record.id),
                    ..record.clone()
                })
                .collect()
        }
    };

    Ok(RecordsState {
        records: Arc::new(records),
        revision: state.revision + 1,
    })
}
