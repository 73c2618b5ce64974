//! Runtime configuration for the store and the timeline view.
//!
//! # Responsibility
//! - Provide defaults matching the shipped application behavior.
//! - Validate caller overrides before they reach persistence or layout.
//!
//! # Invariants
//! - Slot keys are short ASCII identifiers; records and selection slots differ.
//! - Viewport width is finite and non-negative.

use crate::layout::LayoutMode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_RECORDS_SLOT: &str = "timeAxisRecords";
pub const DEFAULT_SELECTION_SLOT: &str = "timeAxisSelection";
pub const DEFAULT_TOGGLE_MIN_LATENCY: Duration = Duration::from_millis(200);
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_MODE_SETTLE_DELAY: Duration = Duration::from_millis(500);

static SLOT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]{0,63}$").expect("valid slot key regex"));

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidSlotKey(String),
    /// Records and selection would overwrite each other.
    SlotKeyCollision(String),
    InvalidViewportWidth(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSlotKey(key) => write!(f, "invalid slot key: `{key}`"),
            Self::SlotKeyCollision(key) => {
                write!(f, "records and selection slots must differ: `{key}`")
            }
            Self::InvalidViewportWidth(width) => write!(f, "invalid viewport width: {width}"),
        }
    }
}

impl Error for ConfigError {}

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Slot holding the serialized record collection.
    pub records_slot: String,
    /// Slot holding the selected id list.
    pub selection_slot: String,
    /// Minimum time a selection toggle takes before it settles.
    pub toggle_min_latency: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            records_slot: DEFAULT_RECORDS_SLOT.to_string(),
            selection_slot: DEFAULT_SELECTION_SLOT.to_string(),
            toggle_min_latency: DEFAULT_TOGGLE_MIN_LATENCY,
        }
    }
}

impl StoreConfig {
    pub fn with_toggle_min_latency(mut self, latency: Duration) -> Self {
        self.toggle_min_latency = latency;
        self
    }

    /// Checks slot keys for shape and collisions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in [&self.records_slot, &self.selection_slot] {
            if !SLOT_KEY_RE.is_match(key) {
                return Err(ConfigError::InvalidSlotKey(key.clone()));
            }
        }
        if self.records_slot == self.selection_slot {
            return Err(ConfigError::SlotKeyCollision(self.records_slot.clone()));
        }
        Ok(())
    }
}

/// Timeline view settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineConfig {
    /// Device viewport width in pixels. Drawing width is this minus 40.
    pub viewport_width: f64,
    pub mode: LayoutMode,
    /// Delay a rendering adapter waits after a mode switch before it
    /// relayouts, so in-flight transitions can finish.
    pub mode_settle_delay: Duration,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            mode: LayoutMode::Chronicle,
            mode_settle_delay: DEFAULT_MODE_SETTLE_DELAY,
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_viewport_width(self.viewport_width)
    }
}

pub(crate) fn validate_viewport_width(width: f64) -> Result<(), ConfigError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewportWidth(width))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, TimelineConfig};

    #[test]
    fn defaults_are_valid() {
        StoreConfig::default().validate().unwrap();
        TimelineConfig::default().validate().unwrap();
    }

    #[test]
    fn slot_keys_must_be_identifiers() {
        let config = StoreConfig {
            records_slot: "bad key!".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSlotKey("bad key!".to_string()))
        );
    }

    #[test]
    fn slot_keys_must_not_collide() {
        let config = StoreConfig {
            selection_slot: "timeAxisRecords".to_string(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SlotKeyCollision(_))
        ));
    }

    #[test]
    fn viewport_width_rejects_nan_and_negative() {
        for width in [f64::NAN, -1.0, f64::INFINITY] {
            let config = TimelineConfig {
                viewport_width: width,
                ..TimelineConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }
}
