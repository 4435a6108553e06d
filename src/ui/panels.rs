use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::{ProfessorShare, RecordCount};
use crate::data::model::Key;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – discipline selector and readouts
// ---------------------------------------------------------------------------

/// Render the left panel: the discipline selector plus the two numeric
/// readouts that track it.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Salary Scope");
    ui.separator();

    let Some(dash) = &mut state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Discipline selector ----
    ui.strong("Discipline");

    // Snapshot entries up front so the combo closure can mutate the filter.
    let counts: Vec<(String, u64)> = {
        let table = dash
            .index
            .group_table::<RecordCount>(dash.discipline_counts);
        dash.disciplines
            .iter()
            .map(|d| {
                let count = table
                    .and_then(|t| t.get(&Key::from(d.clone())))
                    .map_or(0, |c| c.count);
                (d.clone(), count)
            })
            .collect()
    };

    let current = dash.selected_discipline();
    let selected_text = current.clone().unwrap_or_else(|| "All disciplines".to_string());
    egui::ComboBox::from_id_salt("discipline_selector")
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current.is_none(), "All disciplines")
                .clicked()
            {
                dash.set_discipline(None);
            }
            for (discipline, count) in &counts {
                let label = format!("{discipline}  ({count})");
                if ui
                    .selectable_label(current.as_deref() == Some(discipline), label)
                    .clicked()
                {
                    dash.set_discipline(Some(discipline.clone()));
                }
            }
        });

    ui.separator();

    // ---- Percent-of-professors readouts ----
    ui.strong("Full professorships");
    if let Some(shares) = dash
        .index
        .group_table::<ProfessorShare>(dash.professor_share)
    {
        let women = shares
            .get(&Key::from("Female"))
            .map_or(0.0, |s| s.fraction_professors());
        let men = shares
            .get(&Key::from("Male"))
            .map_or(0.0, |s| s.fraction_professors());
        ui.label(format!("Women who are professors: {:.2}%", women * 100.0));
        ui.label(format!("Men who are professors: {:.2}%", men * 100.0));
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

        if let Some(dash) = &state.dashboard {
            ui.label(format!(
                "{} records loaded, {} selected",
                dash.index.len(),
                dash.index.included_len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        // Errors already land in the status line; nothing more to do here.
        let _ = state.load_path(&path);
    }
}
