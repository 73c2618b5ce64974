//! Record store error taxonomy.
//!
//! # Invariants
//! - Store operations return these as values; nothing crosses the store
//!   boundary as a panic.
//! - `code()` values are stable and shown to users verbatim.

use crate::config::ConfigError;
use crate::model::record::RecordId;
use crate::repo::slot_repo::SlotError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Update, delete or toggle targeted an id that is not in the store.
    NotFound(RecordId),
    /// Add targeted an id that is already in the store.
    DuplicateId(RecordId),
    /// Reading or writing persisted state failed.
    Persistence(SlotError),
    /// Persisted or bundled JSON could not be decoded or encoded.
    InvalidData(String),
    Config(ConfigError),
}

impl StoreError {
    /// Stable error code for user-facing notices.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateId(_) => "DUPLICATE_ID",
            Self::Persistence(_) | Self::InvalidData(_) | Self::Config(_) => "ERROR",
        }
    }

    /// Builds the dismissible notice shown for this failure.
    pub fn notice(&self) -> Notice {
        Notice {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::DuplicateId(id) => write!(f, "record id already exists: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SlotError> for StoreError {
    fn from(value: SlotError) -> Self {
        Self::Persistence(value)
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// User-facing failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub code: &'static str,
    pub message: String,
}
