mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalaryScopeApp;
use eframe::egui;

/// Dataset loaded at startup: an explicit CLI argument, falling back to the
/// bundled sample when it exists.
fn startup_path() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let default = PathBuf::from("data/Salaries.csv");
    default.exists().then_some(default)
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let initial = startup_path();
    eframe::run_native(
        "Salary Scope – Faculty Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryScopeApp::new(initial)))),
    )
}
