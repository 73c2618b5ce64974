//! Click-to-age query against an already computed layout.
//!
//! # Responsibility
//! - Convert one clicked x into an age for every charted person row.
//! - Produce the guide line, probe dots and labels for that click.
//!
//! # Invariants
//! - Chronicle ages reuse the layout's own scale (`period / drawing_width`).
//! - Align-left ages go through the implied absolute year first.
//! - Organizations never get an age.

use super::engine::AxisScale;
use super::geometry::{Point, RecordGeometry, TimelineLayout};
use super::{
    round_half_up, to_whole_years, LayoutMode, ALIGN_LEFT_ORIGIN_X, ALIGN_LEFT_PX_PER_YEAR,
    CHRONICLE_START_INSET,
};
use crate::model::record::{Category, RecordId};

pub const PROBE_RADIUS: f64 = 2.5;
const AGE_LABEL_OFFSET_X: f64 = 5.0;
const AGE_LABEL_OFFSET_Y: f64 = 17.0;

/// Vertical guide drawn through the whole canvas at the click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
}

/// Age caption for one row. Empty text for organizations.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeLabel {
    pub row: usize,
    pub record_id: RecordId,
    pub age: Option<i32>,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything drawn for one click. Replaces the previous probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickProbe {
    pub x: f64,
    pub guide: GuideLine,
    pub dots: Vec<Point>,
    pub dot_radius: f64,
    pub labels: Vec<AgeLabel>,
}

impl ClickProbe {
    pub fn age_of(&self, id: RecordId) -> Option<i32> {
        self.labels
            .iter()
            .find(|label| label.record_id == id)
            .and_then(|label| label.age)
    }
}

/// Absolute year implied by an align-left click for a row starting at
/// `start_year`.
pub fn align_left_year_at(x: f64, start_year: i32) -> i32 {
    let years = to_whole_years(round_half_up((x - ALIGN_LEFT_ORIGIN_X) / ALIGN_LEFT_PX_PER_YEAR));
    years.saturating_add(start_year)
}

/// Age in whole years at click `x` on `row`, or `None` for organizations.
pub fn age_at(layout: &TimelineLayout, row: &RecordGeometry, x: f64) -> Option<i32> {
    if row.category != Category::Person {
        return None;
    }

    let age = match layout.mode {
        LayoutMode::Chronicle => {
            let scale = if layout.drawing_width > 0.0 {
                f64::from(layout.period) / layout.drawing_width
            } else {
                0.0
            };
            to_whole_years(round_half_up((x - row.start_x) * scale))
        }
        LayoutMode::AlignLeft => {
            let year = align_left_year_at(x, row.start_year);
            year.saturating_sub(row.start_year)
        }
    };
    Some(age)
}

/// Builds the guide line, dots and labels for a click at `x`.
pub fn probe(layout: &TimelineLayout, x: f64) -> ClickProbe {
    let labels = layout
        .rows
        .iter()
        .map(|row| {
            let age = age_at(layout, row, x);
            AgeLabel {
                row: row.row,
                record_id: row.record_id,
                age,
                x: x + AGE_LABEL_OFFSET_X,
                y: row.top_y + AGE_LABEL_OFFSET_Y,
                text: age.map(|age| format!("Age : {age}")).unwrap_or_default(),
            }
        })
        .collect();

    ClickProbe {
        x,
        guide: GuideLine {
            x,
            y1: 0.0,
            y2: layout.canvas_height,
        },
        dots: layout
            .rows
            .iter()
            .map(|row| Point { x, y: row.top_y })
            .collect(),
        dot_radius: PROBE_RADIUS,
        labels,
    }
}

/// Inverse of the chronicle axis: absolute year at `x`.
///
/// Unlike `age_at`, this is an absolute lookup and is used for hover
/// captions on the axis itself.
pub fn chronicle_year_at(scale: &AxisScale, x: f64) -> i32 {
    if scale.period == 0 || scale.drawing_width <= 0.0 {
        return scale.area_start_year;
    }
    let offset = (x - CHRONICLE_START_INSET) * f64::from(scale.period) / scale.drawing_width;
    to_whole_years(round_half_up(offset)).saturating_add(scale.area_start_year)
}
