use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::SampleReading;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Bottom tab bar
// ---------------------------------------------------------------------------

/// Render the tab selector.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let width = ui.available_width() / Tab::ALL.len() as f32;
        for tab in Tab::ALL {
            let text = RichText::new(format!("{}  {}", tab.icon(), tab.title())).size(15.0);
            let selected = state.selected_tab == tab;
            let label = egui::SelectableLabel::new(selected, text);
            if ui.add_sized([width - 8.0, 32.0], label).clicked() {
                state.selected_tab = tab;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Sampling screen
// ---------------------------------------------------------------------------

/// Render the sampling screen. Returns `true` when the user asked for a new sample.
pub fn sampling_view(ui: &mut Ui, state: &AppState) -> bool {
    let mut start = false;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new("🧪 Filtro de laboratorio")
                .size(30.0)
                .strong()
                .color(Color32::WHITE),
        );
        ui.add_space(ui.available_height() * 0.3);

        let label = RichText::new("Empezar Muestreo")
            .size(20.0)
            .strong()
            .color(Color32::BLACK);
        let button = egui::Button::new(label)
            .fill(Color32::WHITE)
            .corner_radius(12.0)
            .min_size(egui::vec2(ui.available_width() * 0.8, 48.0));
        if ui.add_enabled(state.can_start_sampling(), button).clicked() {
            start = true;
        }

        if state.sampling {
            ui.add_space(12.0);
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Enviando muestra…");
            });
        }

        if let Some(reading) = &state.last_reading {
            ui.add_space(24.0);
            reading_summary(ui, reading);
        }
    });
    start
}

/// Compact table of the last submitted reading.
fn reading_summary(ui: &mut Ui, reading: &SampleReading) {
    egui::CollapsingHeader::new(RichText::new(format!("Última muestra #{}", reading.id)).strong())
        .id_salt("last_reading")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("reading_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    let rows = [
                        ("Humedad inicial", format!("{:.1} %", reading.initial_humidity_pct)),
                        ("Temperatura inicial", format!("{:.1} °C", reading.initial_temperature_c)),
                        ("Densidad", format!("{:.2} g/cm³", reading.material_density_g_cm3)),
                        ("Porosidad del filtro", format!("{:.1} µm", reading.filter_porosity_um)),
                        ("Contenido orgánico", format!("{:.1} %", reading.organic_content_pct)),
                        ("Duración del ciclo", format!("{:.0} min", reading.cycle_duration_min)),
                        ("Eficiencia de secado", format!("{:.1} %", reading.drying_efficiency_pct)),
                    ];
                    for (name, value) in rows {
                        ui.label(name);
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Placeholder tabs
// ---------------------------------------------------------------------------

pub fn placeholder_view(ui: &mut Ui, tab: Tab) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(RichText::new(tab.title()).color(Color32::WHITE));
    });
}
