//! Timeline view-model.
//!
//! # Responsibility
//! - Hold the active layout mode and viewport width.
//! - Own the current layout pass and the current click probe.
//!
//! # Invariants
//! - A relayout replaces the previous pass wholesale and clears the probe,
//!   so nothing from an older pass survives.
//! - Clicks are answered against the pass that is currently displayed.

use crate::config::{validate_viewport_width, ConfigError, TimelineConfig};
use crate::layout::age_query::{chronicle_year_at, probe, ClickProbe};
use crate::layout::engine::{compute_layout, AxisScale};
use crate::layout::geometry::TimelineLayout;
use crate::layout::LayoutMode;
use crate::selectors::DerivedView;
use log::debug;
use std::sync::Arc;

pub struct TimelineView {
    config: TimelineConfig,
    layout: Option<Arc<TimelineLayout>>,
    probe: Option<ClickProbe>,
}

impl TimelineView {
    pub fn new(config: TimelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            layout: None,
            probe: None,
        })
    }

    pub fn mode(&self) -> LayoutMode {
        self.config.mode
    }

    pub fn viewport_width(&self) -> f64 {
        self.config.viewport_width
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&Arc<TimelineLayout>> {
        self.layout.as_ref()
    }

    pub fn probe(&self) -> Option<&ClickProbe> {
        self.probe.as_ref()
    }

    /// Switches mode and relayouts.
    pub fn set_mode(&mut self, mode: LayoutMode, view: &DerivedView) -> Arc<TimelineLayout> {
        self.config.mode = mode;
        self.relayout(view)
    }

    /// Applies a new viewport width and relayouts.
    pub fn resize(
        &mut self,
        viewport_width: f64,
        view: &DerivedView,
    ) -> Result<Arc<TimelineLayout>, ConfigError> {
        validate_viewport_width(viewport_width)?;
        self.config.viewport_width = viewport_width;
        Ok(self.relayout(view))
    }

    /// Recomputes the layout for `view`, superseding the previous pass.
    pub fn relayout(&mut self, view: &DerivedView) -> Arc<TimelineLayout> {
        let layout = Arc::new(compute_layout(
            view,
            self.config.mode,
            self.config.viewport_width,
        ));
        debug!(
            "event=timeline_relayout module=timeline status=ok mode={} revision={} rows={} events={}",
            layout.mode,
            view.revision,
            layout.rows.len(),
            layout.events.len()
        );
        self.probe = None;
        self.layout = Some(Arc::clone(&layout));
        layout
    }

    /// Answers a click at `x`. Returns `None` before the first layout.
    pub fn click(&mut self, x: f64) -> Option<&ClickProbe> {
        let layout = self.layout.as_ref()?;
        let next = probe(layout, x);
        debug!(
            "event=timeline_click module=timeline status=ok mode={} rows={}",
            layout.mode,
            next.labels.len()
        );
        self.probe = Some(next);
        self.probe.as_ref()
    }

    pub fn clear_probe(&mut self) {
        self.probe = None;
    }

    /// Absolute year under `x` on the chronicle axis, for axis hovers.
    ///
    /// Returns `None` in align-left mode, where x has no shared year.
    pub fn year_at(&self, x: f64, view: &DerivedView) -> Option<i32> {
        match self.config.mode {
            LayoutMode::Chronicle => {
                let scale = AxisScale::new(LayoutMode::Chronicle, self.config.viewport_width, view);
                Some(chronicle_year_at(&scale, x))
            }
            LayoutMode::AlignLeft => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimelineView;
    use crate::config::TimelineConfig;
    use crate::layout::LayoutMode;
    use crate::model::record::{Category, Record};
    use crate::selectors::DerivedView;
    use crate::store::state::{reduce, Command, RecordsState};

    fn view() -> DerivedView {
        let records = vec![Record::new(1, Category::Person, "a", 1800).with_end(1850)];
        let state = reduce(&RecordsState::default(), Command::Load(records)).unwrap();
        let state = reduce(&state, Command::ToggleSelected(1)).unwrap();
        DerivedView::compute(&state, 2026)
    }

    fn config(width: f64) -> TimelineConfig {
        TimelineConfig {
            viewport_width: width,
            ..TimelineConfig::default()
        }
    }

    #[test]
    fn click_before_layout_is_ignored() {
        let mut timeline = TimelineView::new(config(1000.0)).unwrap();
        assert!(timeline.click(100.0).is_none());
    }

    #[test]
    fn relayout_clears_previous_probe() {
        let view = view();
        let mut timeline = TimelineView::new(config(1000.0)).unwrap();
        timeline.relayout(&view);
        assert!(timeline.click(300.0).is_some());

        timeline.set_mode(LayoutMode::AlignLeft, &view);
        assert!(timeline.probe().is_none());
        assert_eq!(timeline.layout().unwrap().mode, LayoutMode::AlignLeft);
    }

    #[test]
    fn resize_rejects_invalid_width_and_keeps_layout() {
        let view = view();
        let mut timeline = TimelineView::new(config(1000.0)).unwrap();
        let before = timeline.relayout(&view);
        assert!(timeline.resize(f64::NAN, &view).is_err());
        assert_eq!(timeline.layout().unwrap().as_ref(), before.as_ref());
        assert_eq!(timeline.viewport_width(), 1000.0);
    }

    #[test]
    fn year_lookup_only_in_chronicle() {
        let view = view();
        let mut timeline = TimelineView::new(config(1000.0)).unwrap();
        // single row 1800..1850 -> axis 1790..1860, 960 / 70 px per year
        assert_eq!(timeline.year_at(5.0, &view), Some(1790));
        timeline.set_mode(LayoutMode::AlignLeft, &view);
        assert_eq!(timeline.year_at(5.0, &view), None);
    }
}
