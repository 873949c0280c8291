use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::ChartSpec;
use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Segments per radian of arc when tessellating wedges.
const ARC_RESOLUTION: f64 = 24.0;

/// Render the success pie chart.
pub fn pie_plot(ui: &mut Ui, chart: Option<&ChartSpec>, colors: &ColorMap) {
    let Some(chart) = chart else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches for this selection");
        });
        return;
    }

    Plot::new("success_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            let total: u64 = chart.slices().iter().map(|s| s.value).sum();
            // Start at 12 o'clock, go clockwise.
            let mut start = FRAC_PI_2;
            for slice in chart.slices() {
                let sweep = TAU * slice.value as f64 / total as f64;
                let color = colors.color_for(&slice.label);

                for wedge in wedge_polygons(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .fill_color(color)
                            .name(&slice.label),
                    );
                }

                if slice.value > 0 {
                    let mid = start - sweep / 2.0;
                    let pct = 100.0 * slice.value as f64 / total as f64;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            format!("{pct:.1}%"),
                        )
                        .color(Color32::WHITE),
                    );
                }
                start -= sweep;
            }
        });
}

/// Split a unit-circle wedge into convex pieces of at most a quarter turn,
/// sweeping clockwise from `start`.
fn wedge_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let mut pieces = Vec::new();
    let mut done = 0.0;
    while sweep - done > 1e-9 {
        let part = (sweep - done).min(FRAC_PI_2);
        let a0 = start - done;
        let steps = ((part * ARC_RESOLUTION).ceil() as usize).max(1);

        let mut pts = Vec::with_capacity(steps + 2);
        pts.push([0.0, 0.0]);
        for i in 0..=steps {
            let a = a0 - part * i as f64 / steps as f64;
            pts.push([a.cos(), a.sin()]);
        }
        pieces.push(pts);
        done += part;
    }
    pieces
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Render the payload scatter chart, one series per booster category.
pub fn scatter_plot(ui: &mut Ui, chart: Option<&ChartSpec>, colors: &ColorMap) {
    let Some(chart) = chart else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_deref().unwrap_or_default())
        .y_axis_label(chart.y_label.as_deref().unwrap_or_default())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, color) in colors.legend_entries() {
                let series: Vec<[f64; 2]> = chart
                    .points()
                    .iter()
                    .filter(|p| &p.category == category)
                    .map(|p| [p.x, p.y])
                    .collect();
                if series.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(series))
                        .name(category)
                        .color(*color)
                        .radius(4.0),
                );
            }
        });
}
