use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Participant table
// ---------------------------------------------------------------------------

/// Render the currently visible table, one line per participant.
pub fn participant_table(ui: &mut Ui, state: &AppState) {
    let Some((label, dataset, highlighted)) = state.visible_table() else {
        return;
    };

    ui.strong(format!("{label}  ({} rows)", dataset.len()));

    let columns = &dataset.column_names;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(32.0))
        .columns(Column::auto().at_least(48.0), columns.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for col in columns {
                header.col(|ui| {
                    ui.strong(col.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                let idx = row.index();
                let participant = &dataset.rows[idx];
                let marked = highlighted.binary_search(&idx).is_ok();

                row.col(|ui| {
                    let text = RichText::new(idx.to_string());
                    ui.label(if marked { text.color(Color32::YELLOW) } else { text });
                });
                for col in columns {
                    row.col(|ui| {
                        ui.label(participant.get(col).to_string());
                    });
                }
            });
        });
}
