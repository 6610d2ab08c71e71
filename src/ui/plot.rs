use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use super::result::{HIGH_COLOR, LOW_COLOR};

// ---------------------------------------------------------------------------
// Class probability chart (result sheet)
// ---------------------------------------------------------------------------

/// Two bars: P(low humidity) and P(high humidity), in percent.
pub fn probability_chart(ui: &mut Ui, probability_low: f64, probability_high: f64) {
    let bars = vec![
        Bar::new(0.0, probability_low * 100.0)
            .name("Humedad Baja")
            .fill(LOW_COLOR)
            .width(0.6),
        Bar::new(1.0, probability_high * 100.0)
            .name("Humedad Alta")
            .fill(HIGH_COLOR)
            .width(0.6),
    ];

    Plot::new("probability_plot")
        .height(120.0)
        .include_y(0.0)
        .include_y(100.0)
        .y_axis_label("%")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
