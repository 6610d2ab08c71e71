use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::PredictionError;

/// Status shown for every successfully interpreted response.
pub const STATUS_COMPLETED: &str = "Predicción completada";

// ---------------------------------------------------------------------------
// SampleReading – the simulated sensor record sent to the server
// ---------------------------------------------------------------------------

/// One drying cycle's sensor readings, exactly as `/predict_complete` expects them.
///
/// Fields are generated independently; nothing ties the efficiency to the
/// other measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReading {
    pub id: i64,
    #[serde(rename = "HumedadInicial_pct")]
    pub initial_humidity_pct: f64,
    #[serde(rename = "TemperaturaInicial_C")]
    pub initial_temperature_c: f64,
    #[serde(rename = "DensidadMaterial_g_cm3")]
    pub material_density_g_cm3: f64,
    /// Greek small mu (U+03BC), not the micro sign.
    #[serde(rename = "PorosidadFiltro_\u{3bc}m")]
    pub filter_porosity_um: f64,
    #[serde(rename = "ContenidoOrg\u{e1}nico_pct")]
    pub organic_content_pct: f64,
    /// Cycle start, whole seconds since the Unix epoch.
    #[serde(rename = "HoraInicio_ts")]
    pub cycle_start_ts: i64,
    #[serde(rename = "DuracionCiclo_min")]
    pub cycle_duration_min: f64,
    #[serde(rename = "EficienciaSecado_pct")]
    pub drying_efficiency_pct: f64,
    /// Label-class hint, 0 or 1.
    #[serde(rename = "HumedadFinal_Clase")]
    pub final_humidity_class: u8,
    #[serde(rename = "NecesitaOtroCiclo")]
    pub needs_another_cycle: bool,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Discrete humidity class predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidityClass {
    Low,
    High,
}

impl HumidityClass {
    /// Map the wire integer onto a class. Anything but 0/1 is rejected.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(HumidityClass::Low),
            1 => Some(HumidityClass::High),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HumidityClass::Low => 0,
            HumidityClass::High => 1,
        }
    }

    /// Label used when the server does not send one.
    pub fn default_label(self) -> &'static str {
        match self {
            HumidityClass::Low => "Humedad Baja",
            HumidityClass::High => "Humedad Alta",
        }
    }
}

impl fmt::Display for HumidityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub class: HumidityClass,
    /// Human-readable label from the server, if any.
    pub label: Option<String>,
}

impl Classification {
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.class.default_label())
    }
}

// ---------------------------------------------------------------------------
// Prediction – a successfully interpreted server response
// ---------------------------------------------------------------------------

/// Which model outputs the server populated.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Regression { humidity: f64 },
    Classification(Classification),
    Both {
        humidity: f64,
        classification: Classification,
    },
    /// Success response carrying neither a regression value nor a class.
    Inconclusive,
}

impl PredictionOutcome {
    pub fn from_parts(humidity: Option<f64>, classification: Option<Classification>) -> Self {
        match (humidity, classification) {
            (Some(humidity), Some(classification)) => PredictionOutcome::Both {
                humidity,
                classification,
            },
            (Some(humidity), None) => PredictionOutcome::Regression { humidity },
            (None, Some(classification)) => PredictionOutcome::Classification(classification),
            (None, None) => PredictionOutcome::Inconclusive,
        }
    }

    pub fn humidity(&self) -> Option<f64> {
        match self {
            PredictionOutcome::Regression { humidity } | PredictionOutcome::Both { humidity, .. } => {
                Some(*humidity)
            }
            _ => None,
        }
    }

    pub fn classification(&self) -> Option<&Classification> {
        match self {
            PredictionOutcome::Classification(c)
            | PredictionOutcome::Both {
                classification: c, ..
            } => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub outcome: PredictionOutcome,
    /// Probability of class 0 (low humidity).
    pub probability_low: Option<f64>,
    /// Probability of class 1 (high humidity).
    pub probability_high: Option<f64>,
    pub confidence: Option<f64>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// PredictionResult – what the caller renders
// ---------------------------------------------------------------------------

/// Terminal result of one prediction request. Every failure is folded in here
/// so the caller always has something to render.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Completed(Prediction),
    Failed(PredictionError),
}

impl PredictionResult {
    fn prediction(&self) -> Option<&Prediction> {
        match self {
            PredictionResult::Completed(p) => Some(p),
            PredictionResult::Failed(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PredictionResult::Failed(_))
    }

    /// `"Predicción completada"` or `"Error: …"`.
    pub fn status(&self) -> String {
        match self {
            PredictionResult::Completed(_) => STATUS_COMPLETED.to_string(),
            PredictionResult::Failed(err) => format!("Error: {err}"),
        }
    }

    /// Predicted humidity (regression mode).
    pub fn humidity(&self) -> Option<f64> {
        self.prediction().and_then(|p| p.outcome.humidity())
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.prediction().and_then(|p| p.outcome.classification())
    }

    pub fn class(&self) -> Option<HumidityClass> {
        self.classification().map(|c| c.class)
    }

    pub fn label(&self) -> Option<&str> {
        self.classification().and_then(|c| c.label.as_deref())
    }

    pub fn probability_low(&self) -> Option<f64> {
        self.prediction().and_then(|p| p.probability_low)
    }

    pub fn probability_high(&self) -> Option<f64> {
        self.prediction().and_then(|p| p.probability_high)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.prediction().and_then(|p| p.confidence)
    }

    pub fn message(&self) -> Option<&str> {
        self.prediction().and_then(|p| p.message.as_deref())
    }

    /// True iff the predicted class is 1 ("high humidity").
    pub fn needs_another_cycle(&self) -> bool {
        self.class() == Some(HumidityClass::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> SampleReading {
        SampleReading {
            id: 42,
            initial_humidity_pct: 55.5,
            initial_temperature_c: 61.25,
            material_density_g_cm3: 0.93,
            filter_porosity_um: 12.0,
            organic_content_pct: 3.3,
            cycle_start_ts: 1_746_800_000,
            cycle_duration_min: 45.0,
            drying_efficiency_pct: 88.8,
            final_humidity_class: 1,
            needs_another_cycle: false,
        }
    }

    #[test]
    fn sample_reading_uses_server_keys() {
        let value = serde_json::to_value(reading()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected = vec![
            "id",
            "HumedadInicial_pct",
            "TemperaturaInicial_C",
            "DensidadMaterial_g_cm3",
            "PorosidadFiltro_μm",
            "ContenidoOrgánico_pct",
            "HoraInicio_ts",
            "DuracionCiclo_min",
            "EficienciaSecado_pct",
            "HumedadFinal_Clase",
            "NecesitaOtroCiclo",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(obj["HoraInicio_ts"], serde_json::json!(1_746_800_000i64));
        assert_eq!(obj["NecesitaOtroCiclo"], serde_json::json!(false));
    }

    #[test]
    fn sample_reading_survives_json() {
        let original = reading();
        let text = serde_json::to_string(&original).unwrap();
        let decoded: SampleReading = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn outcome_from_parts_picks_variant() {
        let class = Classification {
            class: HumidityClass::Low,
            label: None,
        };
        assert_eq!(
            PredictionOutcome::from_parts(Some(0.3), None),
            PredictionOutcome::Regression { humidity: 0.3 }
        );
        assert!(matches!(
            PredictionOutcome::from_parts(Some(0.3), Some(class.clone())),
            PredictionOutcome::Both { .. }
        ));
        assert_eq!(
            PredictionOutcome::from_parts(None, Some(class.clone())),
            PredictionOutcome::Classification(class)
        );
        assert_eq!(
            PredictionOutcome::from_parts(None, None),
            PredictionOutcome::Inconclusive
        );
    }

    #[test]
    fn failed_result_exposes_nothing_but_status() {
        let result = PredictionResult::Failed(PredictionError::EmptyResponse);
        assert!(result.is_error());
        assert_eq!(result.status(), "Error: Sin datos en la respuesta");
        assert_eq!(result.humidity(), None);
        assert_eq!(result.class(), None);
        assert_eq!(result.confidence(), None);
        assert_eq!(result.message(), None);
        assert!(!result.needs_another_cycle());
    }

    #[test]
    fn classification_label_falls_back_to_class_name() {
        let unlabeled = Classification {
            class: HumidityClass::High,
            label: None,
        };
        assert_eq!(unlabeled.display_label(), "Humedad Alta");
        let labeled = Classification {
            class: HumidityClass::High,
            label: Some("Alta".into()),
        };
        assert_eq!(labeled.display_label(), "Alta");
    }
}
