use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct QuestionnaireApp {
    pub state: AppState,
}

impl eframe::App for QuestionnaireApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis steps ----
        egui::SidePanel::left("analysis_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::age_histogram(ui, &self.state);
            plot::gender_age_means(ui, &self.state);
            ui.separator();
            table::participant_table(ui, &self.state);
        });
    }
}
