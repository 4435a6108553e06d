use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryScopeApp {
    pub state: AppState,
}

impl SalaryScopeApp {
    /// Start the app, loading `initial` before the first frame when given.
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = initial {
            // A bad startup path is not fatal; the error stays visible in
            // the status line and File → Open still works.
            let _ = state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for SalaryScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selector and readouts ----
        egui::SidePanel::left("selector_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.state.dashboard {
                Some(dash) => charts::dashboard_charts(ui, dash),
                None => {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        ui.heading("Open a salary dataset to begin  (File → Open…)");
                    });
                }
            }
        });
    }
}
