use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelector};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Control panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the dashboard heading and the filter controls.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&state.config.title)
                .size(32.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36))
                .strong(),
        );
    });
    ui.add_space(6.0);

    site_dropdown(ui, state);
    ui.add_space(6.0);
    payload_slider(ui, state);
    ui.add_space(4.0);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    // Clone what we need so we can mutate state inside the closure.
    let sites = state.dataset().sites().to_vec();
    let current = state.selected_site().clone();
    let mut chosen: Option<SiteSelector> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Launch site");
        egui::ComboBox::from_id_salt("site_dropdown")
            .selected_text(current.to_string())
            .width(260.0)
            .show_ui(ui, |ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.site_search)
                        .hint_text("Select a Launch Site here"),
                );
                ui.separator();

                if ui
                    .selectable_label(current == SiteSelector::All, SiteSelector::All.to_string())
                    .clicked()
                {
                    chosen = Some(SiteSelector::All);
                }

                let needle = state.site_search.to_lowercase();
                for site in sites.iter().filter(|s| s.to_lowercase().contains(&needle)) {
                    let selected = current.matches(site) && current != SiteSelector::All;
                    if ui.selectable_label(selected, site).clicked() {
                        chosen = Some(SiteSelector::Site(site.clone()));
                    }
                }
            });
    });

    if let Some(site) = chosen {
        state.site_search.clear();
        state.select_site(site);
    }
}

fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let bounds = state.config.payload_bounds.clone();
    let step = state.config.payload_step;

    ui.label("Payload range (Kg):");
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(
                egui::Slider::new(&mut state.payload_lo, bounds.clone())
                    .step_by(step)
                    .text("min"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut state.payload_hi, bounds)
                    .step_by(step)
                    .text("max"),
            )
            .changed();
    });
    if changed {
        state.publish_payload_range();
    }

    ui.label(format!(
        "Selected payload range: {}",
        PayloadRange::new(state.payload_lo, state.payload_hi)
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded from {} sites, {} in scatter",
            state.dataset().len(),
            state.dataset().sites().len(),
            state.visible_launches()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        match state.export_charts(&path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
