use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::pie::{FAILED_LABEL, SUCCESS_LABEL};
use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::model::{Dataset, PayloadRange, SiteSelector};
use crate::reactive::{ControlEvent, Dispatcher, OutputId, RenderSink};

// ---------------------------------------------------------------------------
// Rendered charts
// ---------------------------------------------------------------------------

/// Latest chart for each output slot.
#[derive(Debug, Default, Serialize)]
pub struct ChartBoard {
    pub success_pie: Option<ChartSpec>,
    pub payload_scatter: Option<ChartSpec>,
}

impl RenderSink for ChartBoard {
    fn render(&mut self, output: OutputId, chart: ChartSpec) {
        match output {
            OutputId::SuccessPie => self.success_pie = Some(chart),
            OutputId::PayloadScatter => self.payload_scatter = Some(chart),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Owns the dataset and the current selection; reruns charts on change.
    pub dispatcher: Dispatcher,

    pub charts: ChartBoard,

    /// Slider positions. May be inverted while the user drags.
    pub payload_lo: f64,
    pub payload_hi: f64,

    /// Text narrowing the site dropdown options.
    pub site_search: String,

    pub site_colors: ColorMap,
    pub outcome_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Self {
        let selection = config.initial_selection();
        let mut state = Self {
            payload_lo: selection.payload.lo,
            payload_hi: selection.payload.hi,
            dispatcher: Dispatcher::dashboard(Arc::new(Dataset::default()), selection),
            config,
            charts: ChartBoard::default(),
            site_search: String::new(),
            site_colors: ColorMap::default(),
            outcome_colors: ColorMap::new([SUCCESS_LABEL, FAILED_LABEL]),
            booster_colors: ColorMap::default(),
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset, reset the controls and redraw.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let selection = self.config.initial_selection();
        self.payload_lo = selection.payload.lo;
        self.payload_hi = selection.payload.hi;
        self.site_search.clear();

        self.site_colors = ColorMap::new(dataset.sites());
        self.booster_colors =
            ColorMap::new(dataset.records().iter().map(|r| r.booster_category.as_str()));

        self.dispatcher = Dispatcher::dashboard(Arc::new(dataset), selection);
        self.dispatcher.refresh_all(&mut self.charts);
        self.status_message = None;
    }

    pub fn dataset(&self) -> &Dataset {
        self.dispatcher.dataset()
    }

    pub fn selected_site(&self) -> &SiteSelector {
        &self.dispatcher.selection().site
    }

    /// Publish a new site selection.
    pub fn select_site(&mut self, site: SiteSelector) {
        self.dispatcher
            .publish(ControlEvent::SiteChanged(site), &mut self.charts);
    }

    /// Publish the current slider positions.
    pub fn publish_payload_range(&mut self) {
        let range = PayloadRange::new(self.payload_lo, self.payload_hi);
        self.dispatcher
            .publish(ControlEvent::PayloadChanged(range), &mut self.charts);
    }

    /// Colours matching the labels of the current pie chart.
    pub fn pie_colors(&self) -> &ColorMap {
        match self.selected_site() {
            SiteSelector::All => &self.site_colors,
            SiteSelector::Site(_) => &self.outcome_colors,
        }
    }

    /// Number of launches currently shown in the scatter chart.
    pub fn visible_launches(&self) -> usize {
        self.charts
            .payload_scatter
            .as_ref()
            .map_or(0, |c| c.points().len())
    }

    /// Write both current charts as pretty-printed JSON.
    pub fn export_charts(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &self.charts)
            .context("writing chart JSON")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let ds = Dataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 5000.0, Outcome::Success, "FT"),
        ]);
        AppState::new(DashboardConfig::default(), ds)
    }

    #[test]
    fn new_state_renders_both_charts_for_all_sites() {
        let s = state();
        let pie = s.charts.success_pie.as_ref().expect("pie rendered");
        assert_eq!(pie.slices().len(), 2);
        assert_eq!(s.visible_launches(), 3);
        assert_eq!((s.payload_lo, s.payload_hi), (0.0, 10000.0));
        assert_eq!(s.selected_site(), &SiteSelector::All);
    }

    #[test]
    fn controls_update_charts() {
        let mut s = state();
        s.select_site(SiteSelector::Site("A".into()));
        let pie = s.charts.success_pie.as_ref().expect("pie rendered");
        assert_eq!(pie.slices()[0].value, 1);
        assert_eq!(pie.slices()[1].value, 1);
        assert_eq!(s.pie_colors().legend_entries().len(), 2);

        s.payload_lo = 1000.0;
        s.publish_payload_range();
        assert_eq!(s.visible_launches(), 1);
    }

    #[test]
    fn new_dataset_resets_controls() {
        let mut s = state();
        s.select_site(SiteSelector::Site("A".into()));
        s.payload_hi = 2000.0;
        s.publish_payload_range();

        s.set_dataset(Dataset::from_records(vec![LaunchRecord::new(
            "C",
            100.0,
            Outcome::Failure,
            "B5",
        )]));
        assert_eq!(s.selected_site(), &SiteSelector::All);
        assert_eq!(s.payload_hi, 10000.0);
        assert_eq!(s.dataset().sites(), ["C".to_string()]);
        assert_eq!(s.visible_launches(), 1);
    }

    #[test]
    fn export_writes_both_charts() {
        let s = state();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("charts.json");
        s.export_charts(&path).expect("export");

        let text = std::fs::read_to_string(&path).expect("read back");
        let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(json["success_pie"]["kind"], "pie");
        assert_eq!(json["payload_scatter"]["data"]["values"].as_array().map(Vec::len), Some(3));
    }
}
