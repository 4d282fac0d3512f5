mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::RustyFoldsApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let mut app = RustyFoldsApp::default();

    // Optional data file on the command line, loaded before the window opens.
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        ui::panels::load_path(&mut app.state, path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Folds – Cross-Validation Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
