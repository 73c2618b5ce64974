//! Layout computation for both modes.
//!
//! # Invariants
//! - Row index is the record's position in chart data, never its store index.
//! - Event markers sit on their owner's row (`top_y(base_index)`).
//! - A zero chronicle period collapses every x to the start inset.
//! - Align-left segments end at `origin + lifespan * px_per_year`.

use super::geometry::{
    category_color, EventGeometry, ImageBox, Marker, Point, RecordGeometry, Segment, TextLabel,
    TimelineLayout, EVENT_COLOR, MARKER_RADIUS, THUMBNAIL_SIZE,
};
use super::{
    LayoutMode, ALIGN_LEFT_ORIGIN_X, ALIGN_LEFT_PX_PER_YEAR, CHRONICLE_END_INSET,
    CHRONICLE_START_INSET, ROW_HEIGHT, VIEWPORT_MARGIN,
};
use crate::model::record::Record;
use crate::selectors::{DerivedView, EventDatum};

const LABEL_OFFSET_Y: f64 = 12.0;
const POINT_HOVER_OFFSET_Y: f64 = 20.0;
const EVENT_HOVER_OFFSET_Y: f64 = 10.0;
const THUMBNAIL_OFFSET_X: f64 = 50.0;
const THUMBNAIL_OFFSET_Y: f64 = 20.0;
const CANVAS_ROW_HEIGHT: f64 = 50.0;
const CANVAS_BASE_HEIGHT: f64 = 250.0;

/// Drawing width for a device viewport, floored at zero.
pub fn drawing_width(viewport_width: f64) -> f64 {
    (viewport_width - VIEWPORT_MARGIN).max(0.0)
}

/// Vertical baseline of row `index`.
pub fn top_y(index: usize) -> f64 {
    (index as f64 + 1.0) * ROW_HEIGHT
}

/// Canvas height for `rows` charted records.
pub fn canvas_height(rows: usize) -> f64 {
    rows as f64 * CANVAS_ROW_HEIGHT + CANVAS_BASE_HEIGHT
}

/// Year-to-pixel mapping for one mode and selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub mode: LayoutMode,
    pub drawing_width: f64,
    pub area_start_year: i32,
    pub period: i32,
    pub current_year: i32,
}

impl AxisScale {
    pub fn new(mode: LayoutMode, viewport_width: f64, view: &DerivedView) -> Self {
        Self {
            mode,
            drawing_width: drawing_width(viewport_width),
            area_start_year: view.area_start_year,
            period: view.period(),
            current_year: view.current_year,
        }
    }

    /// Absolute distance from the axis start, in pixels. Zero when the
    /// period is degenerate.
    fn chronicle_offset(&self, year: i32) -> f64 {
        if self.period == 0 {
            return 0.0;
        }
        let years = f64::from(year) - f64::from(self.area_start_year);
        (self.drawing_width * years / f64::from(self.period)).abs()
    }

    /// Chronicle x of an absolute year.
    pub fn year_x(&self, year: i32) -> f64 {
        self.chronicle_offset(year) + CHRONICLE_START_INSET
    }

    pub fn start_x(&self, record: &Record) -> f64 {
        match self.mode {
            LayoutMode::Chronicle => self.year_x(record.start),
            LayoutMode::AlignLeft => ALIGN_LEFT_ORIGIN_X,
        }
    }

    pub fn end_x(&self, record: &Record) -> f64 {
        match self.mode {
            LayoutMode::Chronicle if self.period == 0 => CHRONICLE_START_INSET,
            LayoutMode::Chronicle => {
                self.chronicle_offset(record.resolved_end(self.current_year)) - CHRONICLE_END_INSET
            }
            LayoutMode::AlignLeft => {
                ALIGN_LEFT_ORIGIN_X
                    + f64::from(record.lifespan(self.current_year)) * ALIGN_LEFT_PX_PER_YEAR
            }
        }
    }

    /// Event marker x. Align-left measures from the owner's start year.
    pub fn event_x(&self, event_year: i32, owner_start: i32) -> f64 {
        match self.mode {
            LayoutMode::Chronicle => self.year_x(event_year),
            LayoutMode::AlignLeft => {
                ALIGN_LEFT_ORIGIN_X
                    + (f64::from(event_year) - f64::from(owner_start)) * ALIGN_LEFT_PX_PER_YEAR
            }
        }
    }
}

/// Computes one full layout pass for the charted records of `view`.
pub fn compute_layout(view: &DerivedView, mode: LayoutMode, viewport_width: f64) -> TimelineLayout {
    let scale = AxisScale::new(mode, viewport_width, view);

    let rows: Vec<RecordGeometry> = view
        .chart_data
        .iter()
        .enumerate()
        .map(|(row, record)| record_geometry(&scale, row, record))
        .collect();

    let events = view
        .event_data
        .iter()
        .filter_map(|event| {
            // Event data is derived from the same chart data, so the owner
            // is always present; skip instead of panicking if it is not.
            let owner = view.chart_data.get(event.base_index)?;
            Some(event_geometry(&scale, event, owner))
        })
        .collect();

    TimelineLayout {
        mode,
        viewport_width,
        drawing_width: scale.drawing_width,
        canvas_height: canvas_height(rows.len()),
        area_start_year: view.area_start_year,
        area_end_year: view.area_end_year,
        period: scale.period,
        current_year: view.current_year,
        rows,
        events,
    }
}

fn record_geometry(scale: &AxisScale, row: usize, record: &Record) -> RecordGeometry {
    let start_x = scale.start_x(record);
    let end_x = scale.end_x(record);
    let y = top_y(row);
    let color = category_color(record.category);
    let end_text = end_year_text(record);

    RecordGeometry {
        row,
        record_id: record.id,
        category: record.category,
        start_year: record.start,
        start_x,
        end_x,
        top_y: y,
        line: Segment {
            x1: start_x,
            from_x2: start_x,
            x2: end_x,
            y,
        },
        start_marker: Marker {
            center: Point { x: start_x, y },
            radius: MARKER_RADIUS,
            color,
            hover_text: record.start.to_string(),
            hover_y: y + POINT_HOVER_OFFSET_Y,
        },
        end_marker: Marker {
            center: Point { x: end_x, y },
            radius: MARKER_RADIUS,
            color,
            hover_text: end_text.clone(),
            hover_y: y + POINT_HOVER_OFFSET_Y,
        },
        label: TextLabel {
            x: start_x,
            y: y - LABEL_OFFSET_Y,
            text: format!("{} ({} ~ {})", record.name, record.start, end_text),
        },
        thumbnail: ImageBox {
            x: start_x - THUMBNAIL_OFFSET_X,
            y: y - THUMBNAIL_OFFSET_Y,
            width: THUMBNAIL_SIZE,
            height: THUMBNAIL_SIZE,
            href: record.image_url.clone(),
        },
    }
}

fn event_geometry(scale: &AxisScale, event: &EventDatum, owner: &Record) -> EventGeometry {
    let y = top_y(event.base_index);
    EventGeometry {
        base_index: event.base_index,
        owner_id: event.owner_id,
        year: event.start,
        marker: Marker {
            center: Point {
                x: scale.event_x(event.start, owner.start),
                y,
            },
            radius: MARKER_RADIUS,
            color: EVENT_COLOR,
            hover_text: format!("{} : {}", event.start, event.content),
            hover_y: y - EVENT_HOVER_OFFSET_Y,
        },
    }
}

/// Ongoing records print an empty end year.
fn end_year_text(record: &Record) -> String {
    match record.end {
        Some(end) if end != 0 => end.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{canvas_height, compute_layout, drawing_width, top_y};
    use crate::layout::LayoutMode;
    use crate::model::record::{Category, Record};
    use crate::selectors::DerivedView;
    use crate::store::state::{reduce, Command, RecordsState};

    fn view_of(records: Vec<Record>) -> DerivedView {
        let ids: Vec<u64> = records.iter().map(|record| record.id).collect();
        let state = reduce(&RecordsState::default(), Command::Load(records)).unwrap();
        let state = reduce(&state, Command::RestoreSelection(ids)).unwrap();
        DerivedView::compute(&state, 2026)
    }

    #[test]
    fn helpers_match_fixed_constants() {
        assert_eq!(drawing_width(1000.0), 960.0);
        assert_eq!(drawing_width(10.0), 0.0);
        assert_eq!(top_y(0), 60.0);
        assert_eq!(top_y(2), 180.0);
        assert_eq!(canvas_height(3), 400.0);
    }

    #[test]
    fn chronicle_reference_example() {
        let view = view_of(vec![
            Record::new(1, Category::Person, "a", 1800).with_end(1850),
            Record::new(2, Category::Person, "b", 1820).with_end(1900),
        ]);
        let layout = compute_layout(&view, LayoutMode::Chronicle, 1000.0);

        assert_eq!(layout.period, 120);
        assert_eq!(layout.rows[0].start_x, 85.0);
        assert_eq!(layout.rows[0].end_x, 470.0);
        assert_eq!(layout.rows[1].start_x, 245.0);
        assert_eq!(layout.rows[1].end_x, 870.0);
        assert_eq!(layout.rows[1].top_y, 120.0);
    }

    #[test]
    fn align_left_end_scales_lifespan() {
        let view = view_of(vec![Record::new(1, Category::Person, "a", 1800).with_end(1850)]);
        let layout = compute_layout(&view, LayoutMode::AlignLeft, 1000.0);
        let row = &layout.rows[0];
        assert_eq!(row.start_x, 100.0);
        assert_eq!(row.end_x, 300.0);
        assert_eq!(row.line.from_x2, 100.0);
    }

    #[test]
    fn event_markers_follow_mode_and_owner_row() {
        let view = view_of(vec![
            Record::new(1, Category::Person, "a", 1800).with_end(1850),
            Record::new(2, Category::Person, "b", 1820)
                .with_end(1900)
                .with_event(1850, "mid"),
        ]);

        let chronicle = compute_layout(&view, LayoutMode::Chronicle, 1000.0);
        let event = &chronicle.events[0];
        assert_eq!(event.base_index, 1);
        assert_eq!(event.marker.center.x, 485.0);
        assert_eq!(event.marker.center.y, 120.0);
        assert_eq!(event.marker.hover_text, "1850 : mid");

        let align = compute_layout(&view, LayoutMode::AlignLeft, 1000.0);
        assert_eq!(align.events[0].marker.center.x, 100.0 + 30.0 * 4.0);
    }

    #[test]
    fn ongoing_label_prints_empty_end() {
        let view = view_of(vec![Record::new(1, Category::Organization, "Guild", 1990)]);
        let layout = compute_layout(&view, LayoutMode::Chronicle, 1000.0);
        assert_eq!(layout.rows[0].label.text, "Guild (1990 ~ )");
        assert_eq!(layout.area_end_year, 2036);
    }

    #[test]
    fn empty_selection_produces_empty_layout() {
        let view = view_of(Vec::new());
        let layout = compute_layout(&view, LayoutMode::Chronicle, 1000.0);
        assert!(layout.is_empty());
        assert_eq!(layout.canvas_height, 250.0);
        assert!(layout.is_finite());
    }
}
