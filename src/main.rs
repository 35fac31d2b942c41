#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use photomark::{AppConfig, PhotomarkApp};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load_or_default(std::env::args_os().nth(1).map(PathBuf::from));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([390.0, 844.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Photomark",
        native_options,
        Box::new(|cc| Ok(Box::new(PhotomarkApp::new(cc, config)))),
    )
}
