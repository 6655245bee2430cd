use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let domains: Vec<(Dimension, Vec<String>)> = Dimension::ALL
        .into_iter()
        .map(|dim| (dim, dataset.domain(dim).iter().cloned().collect()))
        .collect();
    let bounds = dataset.experience_bounds;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (dim, all_values) in &domains {
                let n_selected = state.criteria.selection(*dim).len();
                let header_text = format!("{}  ({n_selected}/{})", dim.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(*dim != Dimension::JobRole)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(*dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(*dim);
                            }
                        });

                        for value in all_values {
                            let mut checked = state.criteria.selection(*dim).contains(value);
                            let mut text = RichText::new(value);
                            let colors = match dim {
                                Dimension::Department => state.department_colors.as_ref(),
                                Dimension::Gender => state.gender_colors.as_ref(),
                                Dimension::JobRole => None,
                            };
                            if let Some(cm) = colors {
                                text = text.color(cm.color_for(value));
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(*dim, value);
                            }
                        }
                    });
            }

            ui.separator();
            experience_slider(ui, state, bounds);

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

/// Two sliders acting as an inclusive range selector on total working years.
fn experience_slider(ui: &mut Ui, state: &mut AppState, bounds: Option<(u32, u32)>) {
    ui.strong("Years of Experience");
    let Some((lo, hi)) = bounds else {
        return;
    };

    let (mut min, mut max) = state.criteria.experience;
    let min_changed = ui.add(egui::Slider::new(&mut min, lo..=hi).text("from")).changed();
    let max_changed = ui.add(egui::Slider::new(&mut max, lo..=hi).text("to")).changed();

    if min_changed || max_changed {
        // Dragging one handle past the other drags the other along.
        if min_changed && min > max {
            max = min;
        } else if max_changed && max < min {
            min = max;
        }
        state.set_experience_range(min, max);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the section tabs.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(format!(
                "{} employees loaded, {} visible",
                report.total, report.visible
            ));
            ui.separator();
        }

        if state.dataset.is_some() {
            for section in Section::ALL {
                ui.selectable_value(&mut state.section, section, section.title());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open HR dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
