use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_folds::data::loader::load_file;
use rusty_folds::estimator::Criterion;
use rusty_folds::metrics::{Metric, PosLabel};
use rusty_folds::model_selection::{ErrorScore, ScoreSummary};

use crate::state::{AppState, EstimatorKind};

// ---------------------------------------------------------------------------
// Left side panel – experiment settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Experiment");
    ui.separator();

    let columns = match &state.table {
        Some(table) => table.column_names.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Target column ----
            ui.strong("Target column");
            let current_target = state.config.target.clone();
            egui::ComboBox::from_id_salt("target_column")
                .selected_text(&current_target)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui.selectable_label(current_target == *col, col).clicked() {
                            state.set_target(col.clone());
                        }
                    }
                });

            // ---- Positive label ----
            ui.strong("Positive label");
            let current_pos = state.config.pos_label.0.clone();
            egui::ComboBox::from_id_salt("pos_label")
                .selected_text(&current_pos)
                .show_ui(ui, |ui: &mut Ui| {
                    for val in state.target_values() {
                        let label = val.to_string();
                        if ui.selectable_label(current_pos == label, &label).clicked() {
                            state.config.pos_label = PosLabel(label);
                        }
                    }
                });
            ui.separator();

            // ---- Folds ----
            ui.strong("Cross-validation");
            ui.add(egui::Slider::new(&mut state.config.n_splits, 2..=20).text("folds"));
            ui.checkbox(&mut state.config.shuffle, "Shuffle (stratified)");
            if state.config.shuffle {
                let mut seed = state.config.seed.unwrap_or(0);
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Seed");
                    ui.add(egui::DragValue::new(&mut seed));
                });
                state.config.seed = Some(seed);
            }
            let mut raise = state.config.error_score == ErrorScore::Raise;
            if ui.checkbox(&mut raise, "Stop on first failing split").changed() {
                state.config.error_score = if raise {
                    ErrorScore::Raise
                } else {
                    ErrorScore::default()
                };
            }
            ui.checkbox(&mut state.config.return_train_score, "Train scores");
            ui.separator();

            // ---- Estimator ----
            ui.strong("Estimator");
            ui.radio_value(&mut state.estimator, EstimatorKind::DecisionTree, "Decision tree");
            ui.radio_value(&mut state.estimator, EstimatorKind::MostFrequent, "Most frequent (baseline)");
            if state.estimator == EstimatorKind::DecisionTree {
                ui.horizontal(|ui: &mut Ui| {
                    ui.radio_value(&mut state.config.criterion, Criterion::Gini, "gini");
                    ui.radio_value(&mut state.config.criterion, Criterion::Entropy, "entropy");
                });
                let mut limited = state.config.max_depth.is_some();
                let mut depth = state.config.max_depth.unwrap_or(3);
                ui.horizontal(|ui: &mut Ui| {
                    ui.checkbox(&mut limited, "Max depth");
                    ui.add_enabled(limited, egui::DragValue::new(&mut depth).range(1..=64));
                });
                state.config.max_depth = limited.then_some(depth);
            }
            ui.separator();

            // ---- Metrics (colour swatch per metric) ----
            ui.strong("Metrics");
            for metric in Metric::ALL {
                let mut checked = state.config.metrics.contains(&metric);
                let text = RichText::new(metric.name()).color(state.color_map.color_for(metric.name()));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_metric(metric);
                }
            }
            ui.separator();

            if ui.button("Run").clicked() {
                state.run_evaluation();
            }
        });
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

        if let Some(table) = &state.table {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} rows, {} columns",
                table.len(),
                table.column_names.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – numeric summary of the last run
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(results) = &state.results else {
        ui.label("No evaluation yet.");
        return;
    };

    egui::Grid::new("summary_grid")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("metric");
            ui.strong("mean");
            ui.strong("std");
            ui.strong("median");
            ui.strong("train mean");
            ui.end_row();

            for (name, scores) in &results.test_scores {
                ui.label(RichText::new(format!("test_{name}")).color(state.color_map.color_for(name)));
                match ScoreSummary::from_scores(scores) {
                    Some(s) => {
                        ui.label(format!("{:.3}", s.mean));
                        ui.label(format!("{:.3}", s.std));
                        ui.label(format!("{:.3}", s.median));
                    }
                    None => {
                        ui.label("nan");
                        ui.label("");
                        ui.label("");
                    }
                }
                let train_mean = results
                    .train(name)
                    .and_then(ScoreSummary::from_scores)
                    .map(|s| format!("{:.3}", s.mean))
                    .unwrap_or_default();
                ui.label(train_mean);
                ui.end_row();
            }
        });

    let fit: f64 = results.fit_time.iter().sum();
    let score: f64 = results.score_time.iter().sum();
    ui.label(format!(
        "{} splits, fit {:.3}s, score {:.3}s",
        results.n_splits(),
        fit,
        score
    ));
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_path(state, path);
    }
}

/// Load `path` into the state, reporting failures in the status bar.
pub fn load_path(state: &mut AppState, path: PathBuf) {
    match load_file(&path) {
        Ok(table) => state.set_table(table, Some(path)),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
