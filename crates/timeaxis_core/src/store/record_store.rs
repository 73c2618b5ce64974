//! Record store service.
//!
//! # Responsibility
//! - Own the canonical in-memory record set for one session.
//! - Persist every mutation through a `SlotRepository` before it becomes
//!   visible in memory.
//!
//! # Invariants
//! - In-memory state is swapped only after the matching write succeeded, so
//!   a failed write leaves both sides on the previous snapshot.
//! - Record mutations read the records slot first and apply the change to
//!   what is persisted, so a store that was never loaded cannot drop
//!   stored records. In-memory selection is carried over by id.
//! - Selection is reset only by `load`.
//! - Toggle writes the selection slot only; record CRUD writes the records
//!   slot only.

use super::error::{StoreError, StoreResult};
use super::state::{reduce, Command, RecordsState};
use crate::config::StoreConfig;
use crate::model::record::{Category, Record, RecordId};
use crate::repo::slot_repo::SlotRepository;
use log::{error, info, warn};
use std::time::Instant;

const DEFAULT_RECORDS_JSON: &str = include_str!("../../data/records.json");

/// Parses the bundled fallback dataset.
pub fn default_records() -> StoreResult<Vec<Record>> {
    serde_json::from_str(DEFAULT_RECORDS_JSON).map_err(|err| {
        StoreError::InvalidData(format!("bundled default records are malformed: {err}"))
    })
}

/// Injectable record store bound to one slot backend.
pub struct RecordStore<S: SlotRepository> {
    slots: S,
    config: StoreConfig,
    state: RecordsState,
}

impl<S: SlotRepository> RecordStore<S> {
    /// Creates an empty store. Call `load` before reading records.
    ///
    /// # Errors
    /// - Returns `Config` when slot keys are invalid or collide.
    pub fn new(slots: S, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            slots,
            config,
            state: RecordsState::default(),
        })
    }

    /// Creates an empty store with default configuration.
    pub fn with_defaults(slots: S) -> Self {
        Self {
            slots,
            config: StoreConfig::default(),
            state: RecordsState::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Loads the persisted record set, or the bundled defaults when the
    /// records slot is absent, with every `selected` flag reset.
    pub fn load(&mut self) -> StoreResult<&[Record]> {
        let started_at = Instant::now();
        let result = self.read_persisted_records().and_then(|(records, source)| {
            let incoming = records.len();
            let next = reduce(&self.state, Command::Load(records))?;
            if next.records().len() != incoming {
                warn!(
                    "event=store_load module=store status=dedup dropped={}",
                    incoming - next.records().len()
                );
            }
            Ok((next, source))
        });

        match result {
            Ok((next, source)) => {
                info!(
                    "event=store_load module=store status=ok source={} count={} duration_ms={}",
                    source,
                    next.records().len(),
                    started_at.elapsed().as_millis()
                );
                self.state = next;
                Ok(self.state.records())
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Appends a new record.
    ///
    /// # Errors
    /// - `DuplicateId` when `record.id` already exists.
    /// - `Persistence` when the write fails; memory is left untouched.
    pub fn add(&mut self, record: Record) -> StoreResult<()> {
        let id = record.id;
        self.commit_records(Command::Add(record), id)
    }

    /// Replaces the record sharing `record.id`.
    pub fn update(&mut self, record: Record) -> StoreResult<()> {
        let id = record.id;
        self.commit_records(Command::Update(record), id)
    }

    /// Removes the record with `id`.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<()> {
        self.commit_records(Command::Delete(id), id)
    }

    /// Flips `selected` for one record after the configured minimum latency.
    ///
    /// The flip is applied only when the future completes. Dropping it
    /// earlier cancels the toggle and leaves the previous selection intact.
    /// Returns the record's new selection state.
    pub async fn toggle_selected(&mut self, id: RecordId) -> StoreResult<bool> {
        if !self.state.contains(id) {
            warn!("event=store_toggle module=store status=error code=NOT_FOUND record_id={id}");
            return Err(StoreError::NotFound(id));
        }

        let latency = self.config.toggle_min_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let next = reduce(&self.state, Command::ToggleSelected(id))?;
        let selected = next.get(id).is_some_and(|record| record.selected);
        if let Err(err) = self.write_selection(&next) {
            error!(
                "event=store_toggle module=store status=error record_id={} error={}",
                id, err
            );
            return Err(err);
        }
        self.state = next;
        info!("event=store_toggle module=store status=ok record_id={id} selected={selected}");
        Ok(selected)
    }

    /// Re-applies the persisted selection slot on top of the loaded records.
    ///
    /// Returns the number of selected records afterwards.
    pub fn restore_selection(&mut self) -> StoreResult<usize> {
        let Some(payload) = self.slots.read_slot(&self.config.selection_slot)? else {
            return Ok(self.state.selected_ids().len());
        };
        let ids: Vec<RecordId> = serde_json::from_str(&payload)?;
        let next = reduce(&self.state, Command::RestoreSelection(ids))?;
        self.state = next;
        let count = self.state.selected_ids().len();
        info!("event=store_restore_selection module=store status=ok selected={count}");
        Ok(count)
    }

    pub fn records(&self) -> &[Record] {
        self.state.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.state.get(id)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Record> {
        self.state.by_category(category)
    }

    pub fn people(&self) -> Vec<&Record> {
        self.by_category(Category::Person)
    }

    pub fn organizations(&self) -> Vec<&Record> {
        self.by_category(Category::Organization)
    }

    /// Cheap shared snapshot for selectors.
    pub fn snapshot(&self) -> RecordsState {
        self.state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    fn read_persisted_records(&self) -> StoreResult<(Vec<Record>, &'static str)> {
        match self.slots.read_slot(&self.config.records_slot)? {
            Some(payload) => Ok((serde_json::from_str(&payload)?, "slot")),
            None => Ok((default_records()?, "bundle")),
        }
    }

    fn commit_records(&mut self, command: Command, id: RecordId) -> StoreResult<()> {
        let name = command.name();
        let result = self.read_persisted_records().and_then(|(persisted, _)| {
            let next = reduce(&self.state.rebase(persisted), command)?;
            let payload = serde_json::to_string(next.records())?;
            self.slots.write_slot(&self.config.records_slot, &payload)?;
            Ok(next)
        });

        match result {
            Ok(next) => {
                self.state = next;
                info!(
                    "event=store_{name} module=store status=ok record_id={id} count={}",
                    self.state.records().len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_{name} module=store status=error code={} record_id={} error={}",
                    err.code(),
                    id,
                    err
                );
                Err(err)
            }
        }
    }

    fn write_selection(&self, state: &RecordsState) -> StoreResult<()> {
        let payload = serde_json::to_string(&state.selected_ids())?;
        self.slots
            .write_slot(&self.config.selection_slot, &payload)?;
        Ok(())
    }
}
