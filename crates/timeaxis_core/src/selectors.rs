//! Derived views over a record snapshot.
//!
//! # Responsibility
//! - Compute chart data, flattened event data and the padded year range.
//! - Keep results referentially stable while the snapshot is unchanged.
//!
//! # Invariants
//! - Chart data preserves store order; its positions are row indices.
//! - Both ends of a non-empty year range carry exactly `YEAR_PADDING` years.
//! - An empty selection yields a `0..0` range.
//! - Year arithmetic saturates; extreme years never panic.

use crate::model::record::{Category, Record, RecordId};
use crate::store::state::RecordsState;
use std::sync::Arc;

/// Years added before the earliest start and after the latest end.
pub const YEAR_PADDING: i32 = 10;

/// One event marker source tagged with its owner's row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDatum {
    /// Owner's position within the current chart data.
    ///
    /// Only meaningful inside the `DerivedView` that produced it.
    pub base_index: usize,
    pub owner_id: RecordId,
    pub owner_name: String,
    pub start: i32,
    pub content: String,
}

/// Selected records in store order.
pub fn chart_data(records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.selected)
        .cloned()
        .collect()
}

/// Flattens the events of every charted record, tagged with its row.
pub fn event_data(chart: &[Record]) -> Vec<EventDatum> {
    chart
        .iter()
        .enumerate()
        .flat_map(|(base_index, record)| {
            record.events.iter().map(move |event| EventDatum {
                base_index,
                owner_id: record.id,
                owner_name: record.name.clone(),
                start: event.start,
                content: event.content.clone(),
            })
        })
        .collect()
}

/// Earliest start minus padding, or 0 for an empty chart.
pub fn area_start_year(chart: &[Record]) -> i32 {
    chart
        .iter()
        .map(|record| record.start)
        .min()
        .map_or(0, |start| start.saturating_sub(YEAR_PADDING))
}

/// Latest resolved end plus padding, or 0 for an empty chart.
pub fn area_end_year(chart: &[Record], current_year: i32) -> i32 {
    chart
        .iter()
        .map(|record| record.resolved_end(current_year))
        .max()
        .map_or(0, |end| {
            let end = if end == 0 { current_year } else { end };
            end.saturating_add(YEAR_PADDING)
        })
}

/// Title text for the displayed range.
pub fn history_range(area_start: i32, area_end: i32) -> String {
    format!("A.D. {area_start} ~ {area_end}")
}

/// All derived values for one snapshot and evaluation year.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub revision: u64,
    pub current_year: i32,
    pub chart_data: Vec<Record>,
    pub event_data: Vec<EventDatum>,
    pub area_start_year: i32,
    pub area_end_year: i32,
    pub people: Vec<Record>,
    pub organizations: Vec<Record>,
}

impl DerivedView {
    pub fn compute(state: &RecordsState, current_year: i32) -> Self {
        let records = state.records();
        let chart = chart_data(records);
        let partition = |category: Category| -> Vec<Record> {
            records
                .iter()
                .filter(|record| record.category == category)
                .cloned()
                .collect()
        };

        Self {
            revision: state.revision(),
            current_year,
            event_data: event_data(&chart),
            area_start_year: area_start_year(&chart),
            area_end_year: area_end_year(&chart, current_year),
            people: partition(Category::Person),
            organizations: partition(Category::Organization),
            chart_data: chart,
        }
    }

    /// Span of the chronicle axis in years, saturating at the `i32` bounds.
    pub fn period(&self) -> i32 {
        self.area_end_year.saturating_sub(self.area_start_year)
    }

    pub fn has_selection(&self) -> bool {
        !self.chart_data.is_empty()
    }

    /// Checkbox state for the selection surface.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.chart_data.iter().any(|record| record.id == id)
    }

    pub fn history_range(&self) -> String {
        history_range(self.area_start_year, self.area_end_year)
    }
}

/// Returns the same `Arc<DerivedView>` until the snapshot or year changes.
///
/// Snapshots are compared by revision and by identity of the shared record
/// vector, so sibling states with equal revisions never share a view.
#[derive(Debug, Default)]
pub struct SelectorCache {
    cached: Option<(RecordsState, Arc<DerivedView>)>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, state: &RecordsState, current_year: i32) -> Arc<DerivedView> {
        if let Some((source, view)) = &self.cached {
            if source.is_same_snapshot(state) && view.current_year == current_year {
                return Arc::clone(view);
            }
        }
        let view = Arc::new(DerivedView::compute(state, current_year));
        self.cached = Some((state.clone(), Arc::clone(&view)));
        view
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
