use eframe::egui::{self, text::LayoutJob, Align, Color32, FontSelection, RichText, ScrollArea, Ui};

use crate::color::to_color32;
use crate::data::label::GroupLabel;
use crate::state::AppState;

/// Series label with its italic spans, in the series colour.
fn label_job(ui: &Ui, label: &GroupLabel, color: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for span in &label.spans {
        let mut text = RichText::new(span.text.as_str()).color(color);
        if span.italic {
            text = text.italics();
        }
        text.append_to(&mut job, ui.style(), FontSelection::Default, Align::Center);
    }
    job
}

// ---------------------------------------------------------------------------
// Left side panel – series toggles
// ---------------------------------------------------------------------------

/// Render the left series panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    let groups: Vec<(GroupLabel, Color32, usize)> = match &state.diagram {
        Some(d) => d
            .groups
            .iter()
            .map(|g| (g.label.clone(), to_color32(g.color, 1.0), g.cluster))
            .collect(),
        None => {
            ui.label("No spreadsheet loaded.");
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut current_cluster = None;
            for (g, (label, color, cluster)) in groups.iter().enumerate() {
                if current_cluster != Some(*cluster) {
                    ui.add_space(4.0);
                    ui.strong(format!("Index group {}", cluster + 1));
                    current_cluster = Some(*cluster);
                }

                let mut checked = state.is_visible(g);
                let text = label_job(ui, label, *color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_group(g);
                }
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
            let can_export = state.diagram.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Export…")).clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(d) = &state.diagram {
            ui.label(format!(
                "{} series, {} levels, {} links",
                d.groups.len(),
                d.levels.len(),
                d.links.len()
            ));
        }
        if let Some(src) = &state.source {
            ui.separator();
            ui.label(src.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open energy table")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export diagram")
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .add_filter("PDF", &["pdf"])
        .set_file_name("energy_profile.svg")
        .save_file();

    if let Some(path) = file {
        match state.export(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
