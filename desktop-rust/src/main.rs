mod app;
mod thumbs;

use app::PickerApp;
use picker_common::Config;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("config not loaded, using defaults: {err}");
        Config::default()
    });
    let initial_folder = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Thumbnail Picker",
        options,
        Box::new(move |_cc| Box::new(PickerApp::new(config, initial_folder))),
    )
}
