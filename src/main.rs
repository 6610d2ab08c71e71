mod api;
mod app;
mod data;
mod state;
mod ui;

use api::{ClientConfig, PredictionClient};
use app::HumedadApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ClientConfig::default();
    log::info!("Prediction server: {}", config.base_url());
    let client = PredictionClient::with_http(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HumedadApp – Filtro de laboratorio",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(HumedadApp::new(client)))
        }),
    )
}
