use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;

use crate::api::{NotifyEvent, PredictionClient};
use crate::data::model::PredictionResult;
use crate::data::sampler;
use crate::state::{AppState, Tab};
use crate::ui::{panels, result};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HumedadApp {
    pub state: AppState,
    client: Arc<PredictionClient>,
    results_tx: Sender<PredictionResult>,
    results_rx: Receiver<PredictionResult>,
    alerts_tx: Sender<NotifyEvent>,
    alerts_rx: Receiver<NotifyEvent>,
}

impl HumedadApp {
    pub fn new(client: PredictionClient) -> Self {
        let (results_tx, results_rx) = mpsc::channel();
        let (alerts_tx, alerts_rx) = mpsc::channel();
        Self {
            state: AppState::default(),
            client: Arc::new(client),
            results_tx,
            results_rx,
            alerts_tx,
            alerts_rx,
        }
    }

    /// Simulate a cycle and submit it in the background.
    fn start_sampling(&mut self, ctx: &egui::Context) {
        let reading = sampler::generate();
        log::info!("Simulated sample {}: {reading:?}", reading.id);
        self.state.begin_sampling(&reading);

        let tx = self.results_tx.clone();
        let ctx = ctx.clone();
        self.client.spawn_predict(reading, move |result| {
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Apply completions on the UI thread.
    fn drain_channels(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            log::info!("Prediction status: {}", result.status());
            self.state.apply_result(result);
        }
        while let Ok(event) = self.alerts_rx.try_recv() {
            log::debug!("Alert outcome: {event:?}");
        }
    }
}

impl eframe::App for HumedadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_channels();

        // ---- Bottom panel: tab bar ----
        egui::TopBottomPanel::bottom("tab_bar").show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
        });

        // ---- Central panel: selected tab ----
        let mut start = false;
        egui::CentralPanel::default().show(ctx, |ui| match self.state.selected_tab {
            Tab::Sampling => start = panels::sampling_view(ui, &self.state),
            other => panels::placeholder_view(ui, other),
        });
        if start && self.state.can_start_sampling() {
            self.start_sampling(ctx);
        }

        // ---- Result sheet ----
        let Some(current) = &self.state.result else {
            return;
        };
        match result::result_sheet(ctx, current) {
            result::SheetAction::None => {}
            result::SheetAction::Close => self.state.dismiss_result(),
            result::SheetAction::SendAlert => {
                self.client.notify(current, self.alerts_tx.clone());
                self.state.dismiss_result();
            }
        }
    }
}
