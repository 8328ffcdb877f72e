mod analytics;
mod app;
mod canvas;
mod controls;
mod inspector;
mod markers;
mod theme;
mod views;

use app::QvizApp;
use egui::ViewportBuilder;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1300.0, 860.0])
            .with_title("qviz: quorum latency"),
        ..Default::default()
    };
    eframe::run_native(
        "qviz",
        options,
        Box::new(|cc| Ok(Box::new(QvizApp::new(cc)))),
    )
}
