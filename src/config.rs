use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::data::model::{FilterSelection, PayloadRange, SiteSelector};

/// Static dashboard settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Launch records loaded at startup, relative to the working directory.
    pub data_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Bounds of the payload range sliders, in kg.
    pub payload_bounds: RangeInclusive<f64>,
    pub payload_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
            min_window_size: [600.0, 500.0],
            payload_bounds: 0.0..=10000.0,
            payload_step: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Selection the controls start from: every site, full slider range.
    pub fn initial_selection(&self) -> FilterSelection {
        FilterSelection {
            site: SiteSelector::All,
            payload: PayloadRange::new(*self.payload_bounds.start(), *self.payload_bounds.end()),
        }
    }
}
