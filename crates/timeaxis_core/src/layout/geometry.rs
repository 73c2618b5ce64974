//! Geometry value objects consumed by rendering adapters.
//!
//! Coordinates are in pixels relative to the canvas origin (top-left).

use super::LayoutMode;
use crate::model::record::{Category, RecordId};

pub const RECORD_COLOR: &str = "#364f6b";
pub const EVENT_COLOR: &str = "#fc5185";
pub const MARKER_RADIUS: f64 = 5.0;
pub const THUMBNAIL_SIZE: f64 = 40.0;

/// Fill color for a record's line and end-point markers.
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Person | Category::Organization => RECORD_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Horizontal segment animated from `from_x2` to `x2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    /// Rest frame of the moving end before the transition.
    pub from_x2: f64,
    pub x2: f64,
    pub y: f64,
}

impl Segment {
    /// Signed rendered length. Negative when the record ends before it starts.
    pub fn length(&self) -> f64 {
        self.x2 - self.x1
    }
}

/// Circle marker with an optional hover caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub color: &'static str,
    pub hover_text: String,
    /// Caption baseline; x follows the pointer.
    pub hover_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub href: String,
}

/// Everything drawn for one charted record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGeometry {
    /// Position in chart data.
    pub row: usize,
    pub record_id: RecordId,
    pub category: Category,
    pub start_year: i32,
    pub start_x: f64,
    pub end_x: f64,
    pub top_y: f64,
    pub line: Segment,
    pub start_marker: Marker,
    pub end_marker: Marker,
    pub label: TextLabel,
    pub thumbnail: ImageBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventGeometry {
    pub base_index: usize,
    pub owner_id: RecordId,
    pub year: i32,
    pub marker: Marker,
}

/// One full layout pass. Replaced wholesale on every relayout.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub mode: LayoutMode,
    pub viewport_width: f64,
    /// `viewport_width - 40`, floored at zero.
    pub drawing_width: f64,
    pub canvas_height: f64,
    pub area_start_year: i32,
    pub area_end_year: i32,
    pub period: i32,
    pub current_year: i32,
    pub rows: Vec<RecordGeometry>,
    pub events: Vec<EventGeometry>,
}

impl TimelineLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_for(&self, id: RecordId) -> Option<&RecordGeometry> {
        self.rows.iter().find(|row| row.record_id == id)
    }

    /// Returns whether every coordinate in the pass is finite.
    pub fn is_finite(&self) -> bool {
        let row_ok = |row: &RecordGeometry| {
            [
                row.start_x,
                row.end_x,
                row.top_y,
                row.line.from_x2,
                row.label.x,
                row.thumbnail.x,
                row.end_marker.center.x,
            ]
            .iter()
            .all(|value| value.is_finite())
        };
        self.rows.iter().all(row_ok)
            && self
                .events
                .iter()
                .all(|event| event.marker.center.x.is_finite() && event.marker.center.y.is_finite())
            && self.drawing_width.is_finite()
            && self.canvas_height.is_finite()
    }
}
