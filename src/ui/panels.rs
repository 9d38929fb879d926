use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – analysis operations
// ---------------------------------------------------------------------------

/// Render the left panel with one button per analysis step.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.strong("Cleaning");
    ui.label("Copies of the loaded table:");
    if ui.button("Keep valid emails").clicked() {
        state.filter_emails();
    }
    if ui.button("Impute missing grades").clicked() {
        state.impute_missing();
    }
    if state.derived.is_some() && ui.button("Back to loaded table").clicked() {
        state.show_loaded();
    }
    ui.separator();

    ui.strong("Scoring");
    ui.add(
        egui::Slider::new(&mut state.options.max_nans_per_subject, 0..=5)
            .text("max missing"),
    );
    if ui.button("Score subjects").clicked() {
        state.score();
    }
    ui.separator();

    ui.strong("Gender / age");
    ui.label(
        RichText::new("Replaces the loaded ages with the over-40 flag.")
            .small()
            .color(Color32::YELLOW),
    );
    if ui.button("Correlate gender and age").clicked() {
        state.correlate();
    }
    ui.separator();

    if ui.button("Refresh age histogram").clicked() {
        state.show_age_distribution();
    }
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
        });

        ui.separator();

        if let (Some(analysis), Some(ds)) = (&state.analysis, &state.dataset) {
            ui.label(format!(
                "{} participants loaded from {}",
                ds.len(),
                analysis.data_fname().display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open questionnaire results")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
