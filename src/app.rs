use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Heading + filter controls ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::control_panel(ui, &mut self.state);
        });

        // ---- Central panel: pie | scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            ui.columns(2, |columns| {
                plot::pie_plot(
                    &mut columns[0],
                    state.charts.success_pie.as_ref(),
                    state.pie_colors(),
                );
                plot::scatter_plot(
                    &mut columns[1],
                    state.charts.payload_scatter.as_ref(),
                    &state.booster_colors,
                );
            });
        });
    }
}
