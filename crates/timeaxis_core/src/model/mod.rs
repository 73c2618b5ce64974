//! Domain model for timeline records.
//!
//! # Responsibility
//! - Define canonical data structures shared by store, selectors and layout.
//! - Keep the persisted wire shape and the in-memory shape identical.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Open-ended ranges are resolved at evaluation time, never stored.

pub mod record;
