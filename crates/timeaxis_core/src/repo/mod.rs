//! Repository layer for persisted timeline state.
//!
//! # Responsibility
//! - Define the named-slot persistence contract the record store depends on.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - A slot write replaces the whole payload or nothing.
//! - An absent slot is reported as `None`, never as an empty payload.

pub mod slot_repo;
