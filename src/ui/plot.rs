use eframe::egui::{Stroke, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use rusty_folds::model_selection::ScoreSummary;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Score box plot (central panel)
// ---------------------------------------------------------------------------

/// Render one box per scorer from the last cross-validation run.
pub fn score_plot(ui: &mut Ui, state: &AppState) {
    let results = match &state.results {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.table.is_some() {
                    ui.heading("Press Run to cross-validate");
                } else {
                    ui.heading("Open a file to evaluate  (File → Open…)");
                }
            });
            return;
        }
    };

    Plot::new("score_plot")
        .legend(Legend::default())
        .x_axis_label("Metric")
        .y_axis_label("Test score")
        .include_y(0.0)
        .include_y(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (slot, (name, scores)) in results.test_scores.iter().enumerate() {
                let Some(summary) = ScoreSummary::from_scores(scores) else {
                    continue;
                };
                let x = slot as f64;
                let color = state.color_map.color_for(name);

                let spread = BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                );
                let elem = BoxElem::new(x, spread)
                    .name(name)
                    .box_width(0.5)
                    .whisker_width(0.3)
                    .stroke(Stroke::new(1.5, color))
                    .fill(color.linear_multiply(0.2));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(name).color(color));

                let outliers: PlotPoints = summary
                    .outliers(scores)
                    .into_iter()
                    .map(|s| [x, s])
                    .collect();
                plot_ui.points(Points::new(outliers).radius(3.0).color(color));
            }
        });
}
