use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use questionnaire_viewer::data::model::GRADE_COLUMNS;

use crate::color::dimmed;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

/// Render the last histogram handed to the plot surface.
pub fn age_histogram(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.surface.histogram else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view participants  (File → Open…)");
        });
        return;
    };

    ui.heading(chart.title.as_str());

    let bars: Vec<Bar> = chart
        .histogram
        .bars()
        .map(|(left, count)| {
            Bar::new(left + 5.0, count as f64)
                .width(10.0)
                .name(format!("{left}–{}", left + 10.0))
        })
        .collect();

    Plot::new("age_histogram")
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Gender / age means
// ---------------------------------------------------------------------------

/// Grouped bars: one cluster per question, one bar per (gender, over 40).
pub fn gender_age_means(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        return;
    };
    if summary.is_empty() {
        ui.label("No participant with a known age and gender.");
        return;
    }

    ui.heading("mean grade by gender and age");

    let n_groups = summary.len() as f64;
    let bar_width = 0.8 / n_groups;

    Plot::new("gender_age_means")
        .legend(Legend::default())
        .x_axis_label("question")
        .y_axis_label("mean grade")
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (g, (key, means)) in summary.groups.iter().enumerate() {
                let base = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&key.gender))
                    .unwrap_or(Color32::GRAY);
                let color = if key.over_40 { base } else { dimmed(base) };
                let offset = (g as f64 - (n_groups - 1.0) / 2.0) * bar_width;

                let bars: Vec<Bar> = means
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| !m.is_nan())
                    .map(|(q, &m)| {
                        Bar::new(q as f64 + 1.0 + offset, m)
                            .width(bar_width)
                            .name(GRADE_COLUMNS[q])
                    })
                    .collect();

                let age_label = if key.over_40 { "over 40" } else { "40 or under" };
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color)
                        .name(format!("{}, {age_label}", key.gender)),
                );
            }
        });
}
