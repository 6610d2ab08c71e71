use eframe::egui::{self, Align2, Color32, RichText, Ui};
use time::OffsetDateTime;

use super::plot;
use crate::data::model::{HumidityClass, PredictionResult};
use crate::data::report;

pub const LOW_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
pub const HIGH_COLOR: Color32 = Color32::from_rgb(255, 149, 0);

// ---------------------------------------------------------------------------
// Presentation rules
// ---------------------------------------------------------------------------

/// Colour band for the confidence bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.7 {
            ConfidenceTier::High
        } else if confidence > 0.5 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            ConfidenceTier::High => Color32::GREEN,
            ConfidenceTier::Medium => Color32::YELLOW,
            ConfidenceTier::Low => Color32::RED,
        }
    }
}

pub fn class_color(class: HumidityClass) -> Color32 {
    match class {
        HumidityClass::Low => LOW_COLOR,
        HumidityClass::High => HIGH_COLOR,
    }
}

/// Regression output is a fraction; the sheet shows it as a percentage.
pub fn humidity_text(humidity: f64) -> String {
    format!("Humedad Predicha: {:.2}%", humidity * 100.0)
}

pub fn probability_text(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn confidence_text(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

pub fn verdict_text(result: &PredictionResult) -> &'static str {
    if result.needs_another_cycle() {
        "HUMEDAD ALTA - Se recomienda otro ciclo de secado"
    } else {
        "HUMEDAD BAJA - Secado finalizado correctamente"
    }
}

// ---------------------------------------------------------------------------
// Result sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAction {
    None,
    Close,
    SendAlert,
}

/// Render the modal result sheet and report what the user clicked.
pub fn result_sheet(ctx: &egui::Context, result: &PredictionResult) -> SheetAction {
    let mut open = true;
    let mut action = SheetAction::None;

    egui::Window::new("Resultados de la Predicción")
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            action = sheet_body(ui, result);
        });

    if !open {
        return SheetAction::Close;
    }
    action
}

fn sheet_body(ui: &mut Ui, result: &PredictionResult) -> SheetAction {
    let mut action = SheetAction::None;

    if result.is_error() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(result.status()).color(Color32::RED));
        });
    } else {
        if let Some(humidity) = result.humidity() {
            ui.label(RichText::new(humidity_text(humidity)).heading());
            ui.add_space(8.0);
        }

        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            model_outputs(ui, result);
        });
        ui.add_space(8.0);

        let verdict_color = if result.needs_another_cycle() {
            Color32::RED
        } else {
            Color32::GREEN
        };
        let icon = if result.needs_another_cycle() { "⚠" } else { "✔" };
        ui.label(
            RichText::new(format!("{icon} {}", verdict_text(result)))
                .strong()
                .color(verdict_color),
        );

        if result.needs_another_cycle() {
            ui.add_space(6.0);
            let button = egui::Button::new(
                RichText::new("✉ Enviar alerta por correo").color(Color32::WHITE),
            )
            .fill(HIGH_COLOR)
            .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                action = SheetAction::SendAlert;
            }
            if ui.button("Copiar informe").clicked() {
                let report = report::drying_report(result, now_local());
                ui.ctx().copy_text(report.to_clipboard_text());
            }
        }

        if let Some(message) = result.message() {
            ui.add_space(6.0);
            ui.label(RichText::new(message).small().color(Color32::GRAY));
        }
    }

    ui.add_space(12.0);
    if ui
        .add(egui::Button::new("Cerrar").min_size(egui::vec2(ui.available_width(), 32.0)))
        .clicked()
        && action == SheetAction::None
    {
        action = SheetAction::Close;
    }
    action
}

/// Classification label, probabilities and confidence.
fn model_outputs(ui: &mut Ui, result: &PredictionResult) {
    if let Some(classification) = result.classification() {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong("Clasificación:");
            ui.label(
                RichText::new(classification.display_label())
                    .strong()
                    .color(class_color(classification.class)),
            );
        });
    }

    if let (Some(low), Some(high)) = (result.probability_low(), result.probability_high()) {
        ui.add_space(4.0);
        ui.strong("Probabilidades:");
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Humedad Baja:");
            ui.label(RichText::new(probability_text(low)).strong().color(LOW_COLOR));
        });
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Humedad Alta:");
            ui.label(RichText::new(probability_text(high)).strong().color(HIGH_COLOR));
        });
        plot::probability_chart(ui, low, high);
    }

    if let Some(confidence) = result.confidence() {
        ui.add_space(4.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.strong("Nivel de Confianza:");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                ui.strong(confidence_text(confidence));
            });
        });
        let fraction = confidence.clamp(0.0, 1.0) as f32;
        ui.add(
            egui::ProgressBar::new(fraction)
                .fill(ConfidenceTier::of(confidence).color())
                .desired_height(10.0),
        );
    }
}

fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
