use std::path::Path;

use eframe::egui;
use hr_panda::app::HrPandaApp;
use hr_panda::config;
use hr_panda::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Try the conventional file in the working directory; a failure leaves
    // the error in the status bar and File → Open… usable.
    let mut state = AppState::default();
    state.load(Path::new(config::DEFAULT_DATASET));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "HR Analytics Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(HrPandaApp::new(state)))),
    )
}
