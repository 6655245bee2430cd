use eframe::egui::{self, RichText, Ui};

use crate::state::{AppState, Section};
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HrPandaApp {
    pub state: AppState,
}

impl HrPandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HrPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + section tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(crate::config::FILTER_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| central(ui, &self.state));
        });
    }
}

fn central(ui: &mut Ui, state: &AppState) {
    ui.heading("👥 HR Analytics Dashboard");
    ui.separator();

    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an HR dataset to begin  (File → Open…)");
        });
        return;
    };

    if report.visible == 0 {
        ui.label(RichText::new("No employees match the current filters.").strong());
        ui.add_space(4.0);
    }

    match state.section {
        Section::Overview => sections::overview(ui, &report.overview, state),
        Section::Demographics => sections::demographics(ui, &report.demographics, state),
        Section::Compensation => sections::compensation(ui, &report.compensation, state),
        Section::Satisfaction => sections::satisfaction(ui, &report.satisfaction),
    }
}
