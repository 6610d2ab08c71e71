use std::fmt::Write as _;

use time::OffsetDateTime;
use time::macros::format_description;

use super::model::PredictionResult;

pub const REPORT_SUBJECT: &str = "Informe de Secado - Recomendación de Ciclo Adicional";

/// Plain-text drying report for an operator alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryingReport {
    pub subject: String,
    pub body: String,
}

impl DryingReport {
    /// Subject and body joined the way a mail client would paste them.
    pub fn to_clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

/// Build the report for `result`, dated `at`.
///
/// Lines are only emitted for values the server actually returned; the
/// probabilities need both sides to be present.
pub fn drying_report(result: &PredictionResult, at: OffsetDateTime) -> DryingReport {
    let date_format = format_description!("[day]/[month]/[year] [hour]:[minute]");
    let date = at.format(&date_format).unwrap_or_else(|err| {
        log::warn!("Formatting report date failed: {err}");
        at.unix_timestamp().to_string()
    });

    let mut body = String::new();
    body.push_str("INFORME DE SECADO\n");
    body.push_str("========================\n\n");
    let _ = writeln!(body, "Fecha: {date}");
    body.push_str("\nRESULTADOS:");

    if let Some(humidity) = result.humidity() {
        let _ = write!(body, "\n- Humedad predicha: {humidity:.2}%");
    }
    if let Some(class) = result.class() {
        let _ = write!(body, "\n- Clasificación: {}", class.default_label());
    }
    if let (Some(low), Some(high)) = (result.probability_low(), result.probability_high()) {
        let _ = write!(body, "\n- Probabilidad Humedad Baja: {:.1}%", low * 100.0);
        let _ = write!(body, "\n- Probabilidad Humedad Alta: {:.1}%", high * 100.0);
    }

    body.push_str("\n\nRECOMENDACIÓN: Se requiere un ciclo adicional de secado.");

    DryingReport {
        subject: REPORT_SUBJECT.to_string(),
        body,
    }
}
