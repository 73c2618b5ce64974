//! Core logic for the TimeAxis timeline.
//! Record store, derived selectors, pure layout and click queries.

pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod selectors;
pub mod store;
pub mod timeline;

pub use config::{ConfigError, StoreConfig, TimelineConfig};
pub use layout::age_query::{age_at, probe, AgeLabel, ClickProbe};
pub use layout::engine::{compute_layout, AxisScale};
pub use layout::geometry::{EventGeometry, RecordGeometry, TimelineLayout};
pub use layout::LayoutMode;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{current_year, Category, Event, Record, RecordId};
pub use repo::slot_repo::{SlotError, SlotRepository, SlotResult, SqliteSlotRepository};
pub use selectors::{DerivedView, EventDatum, SelectorCache};
pub use store::{Command, Notice, RecordStore, RecordsState, StoreError, StoreResult};
pub use timeline::TimelineView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
