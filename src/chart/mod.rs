//! Chart layer: pure aggregations from the dataset to renderable chart specs.
//!
//! ```text
//!   Dataset + FilterSelection
//!        │
//!        ├──► pie::pie_chart          success counts per site / per outcome
//!        └──► scatter::scatter_chart  payload vs. outcome per launch
//!        │
//!        ▼
//!    ChartSpec  (consumed by ui::plot, exportable as JSON)
//! ```

use serde::Serialize;

pub mod pie;
pub mod scatter;

pub use pie::pie_chart;
pub use scatter::scatter_chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Scatter,
}

/// One pie wedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
}

/// One scatter marker; `category` picks its colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ChartData {
    Slices(Vec<Slice>),
    Points(Vec<ScatterPoint>),
}

/// Renderer-independent description of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn pie(title: impl Into<String>, slices: Vec<Slice>) -> Self {
        Self {
            kind: ChartKind::Pie,
            title: title.into(),
            x_label: None,
            y_label: None,
            data: ChartData::Slices(slices),
        }
    }

    pub fn scatter(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: Vec<ScatterPoint>,
    ) -> Self {
        Self {
            kind: ChartKind::Scatter,
            title: title.into(),
            x_label: Some(x_label.into()),
            y_label: Some(y_label.into()),
            data: ChartData::Points(points),
        }
    }

    pub fn slices(&self) -> &[Slice] {
        match &self.data {
            ChartData::Slices(s) => s,
            ChartData::Points(_) => &[],
        }
    }

    pub fn points(&self) -> &[ScatterPoint] {
        match &self.data {
            ChartData::Points(p) => p,
            ChartData::Slices(_) => &[],
        }
    }

    /// True when there is nothing to draw: no points, or every slice is zero.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Slices(s) => s.iter().all(|s| s.value == 0),
            ChartData::Points(p) => p.is_empty(),
        }
    }
}
