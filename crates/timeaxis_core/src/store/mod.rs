//! Record store: command transitions and the persisted store service.
//!
//! # Responsibility
//! - Keep state transitions pure and unit-testable (`state::reduce`).
//! - Bind transitions to persistence in `record_store::RecordStore`.

pub mod error;
pub mod record_store;
pub mod state;

pub use error::{Notice, StoreError, StoreResult};
pub use record_store::{default_records, RecordStore};
pub use state::{reduce, Command, RecordsState};
