//! Pure timeline layout and click queries.
//!
//! # Responsibility
//! - Map charted records and events to pixel geometry for one layout mode.
//! - Back-compute per-row ages from a clicked x coordinate.
//!
//! # Invariants
//! - Nothing here touches a display surface or fails; degenerate inputs
//!   produce finite, possibly zero or negative length, geometry.
//! - Same inputs always produce identical output.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod age_query;
pub mod engine;
pub mod geometry;

/// Horizontal space reserved outside the drawing area.
pub const VIEWPORT_MARGIN: f64 = 40.0;
/// Left inset added to chronicle start positions.
pub const CHRONICLE_START_INSET: f64 = 5.0;
/// Pulled off chronicle end positions so end markers do not touch the edge.
pub const CHRONICLE_END_INSET: f64 = 10.0;
/// Common origin of every row in align-left mode.
pub const ALIGN_LEFT_ORIGIN_X: f64 = 100.0;
pub const ALIGN_LEFT_PX_PER_YEAR: f64 = 4.0;
pub const ROW_HEIGHT: f64 = 60.0;

/// Mutually exclusive layout modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// Shared absolute-year axis.
    #[default]
    Chronicle,
    /// Every row starts at the same origin; lengths compare lifespans.
    AlignLeft,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chronicle => "chronicle",
            Self::AlignLeft => "alignLeft",
        }
    }
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds halves toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Converts a rounded float to a year/age count without panicking.
pub(crate) fn to_whole_years(value: f64) -> i32 {
    // `as` saturates and maps NaN to zero.
    value as i32
}
