use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::{Map, Value as JsonValue};
use url::Url;

use super::transport::{Transport, TransportError, UreqTransport};
use crate::data::model::{
    Classification, HumidityClass, Prediction, PredictionOutcome, PredictionResult,
    SampleReading,
};

pub const DEFAULT_BASE_URL: &str = "http://192.168.100.68:5001";
pub const PREDICT_PATH: &str = "predict_complete";
pub const ALERT_PATH: &str = "api/send_gemini_email";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Every way a prediction can fail. Each one ends up as the `status` text of a
/// `PredictionResult::Failed`, so the display strings are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    /// No response at all: connection refused, DNS, TLS, timeout.
    #[error("{0}")]
    Transport(String),
    #[error("Sin datos en la respuesta")]
    EmptyResponse,
    /// The response carried an `error` key.
    #[error("{0}")]
    ServerReported(String),
    #[error("Respuesta inválida: {0}")]
    Decode(String),
    #[error("URL inválida: {0}")]
    InvalidEndpoint(String),
    #[error("No se pudo codificar la muestra: {0}")]
    Encode(String),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Where the prediction server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, PredictionError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| PredictionError::InvalidEndpoint(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PredictionError::InvalidEndpoint(base_url.to_string()));
        }
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn predict_url(&self) -> Result<Url, PredictionError> {
        self.endpoint(PREDICT_PATH)
    }

    pub fn alert_url(&self) -> Result<Url, PredictionError> {
        self.endpoint(ALERT_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PredictionError> {
        self.base_url
            .join(path)
            .map_err(|err| PredictionError::InvalidEndpoint(format!("{path}: {err}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
            .unwrap_or_else(|err| unreachable!("DEFAULT_BASE_URL is invalid: {err}"))
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Talks to the prediction server. Cheap to share behind an `Arc`.
pub struct PredictionClient {
    pub(super) config: ClientConfig,
    pub(super) transport: Arc<dyn Transport>,
}

impl PredictionClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client using the real HTTP stack.
    pub fn with_http(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(UreqTransport::default()))
    }

    /// Submit `reading` and normalize whatever comes back. Blocks on the network;
    /// never fails, errors become `PredictionResult::Failed`.
    pub fn predict(&self, reading: &SampleReading) -> PredictionResult {
        match self.try_predict(reading) {
            Ok(prediction) => {
                log::info!(
                    "Prediction for sample {} completed: class={:?} humidity={:?}",
                    reading.id,
                    prediction.outcome.classification().map(|c| c.class),
                    prediction.outcome.humidity()
                );
                PredictionResult::Completed(prediction)
            }
            Err(err) => {
                match &err {
                    PredictionError::ServerReported(msg) => log::warn!("Server reported: {msg}"),
                    other => log::error!("Prediction for sample {} failed: {other}", reading.id),
                }
                PredictionResult::Failed(err)
            }
        }
    }

    fn try_predict(&self, reading: &SampleReading) -> Result<Prediction, PredictionError> {
        let url = self.config.predict_url()?;
        let body =
            serde_json::to_value(reading).map_err(|err| PredictionError::Encode(err.to_string()))?;
        log::info!("Submitting sample {} to {url}", reading.id);

        let reply = self
            .transport
            .post_json(&url, &body)
            .map_err(|err| match err {
                TransportError::BodyTooLarge { limit } => {
                    PredictionError::Decode(format!("la respuesta supera {limit} bytes"))
                }
                other => PredictionError::Transport(other.to_string()),
            })?;
        if !reply.is_success() {
            log::warn!("Prediction endpoint answered HTTP {}", reply.status);
        }
        log::debug!("Prediction response: {}", reply.body_text());

        interpret_response(&reply.body)
    }

    /// Run `predict` on a worker thread. `on_complete` is called exactly once,
    /// from that thread.
    pub fn spawn_predict<F>(self: &Arc<Self>, reading: SampleReading, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(PredictionResult) + Send + 'static,
    {
        let client = Arc::clone(self);
        thread::spawn(move || {
            let result = client.predict(&reading);
            on_complete(result);
        })
    }
}

// ---------------------------------------------------------------------------
// Response interpretation
// ---------------------------------------------------------------------------

/// Turn a raw response body into a `Prediction`.
///
/// Order matters: empty body, then undecodable body, then an `error` key,
/// then field extraction. Fields of the wrong JSON type count as absent.
/// Bytes that are not valid UTF-8 are a decode error, never patched up.
pub fn interpret_response(body: &[u8]) -> Result<Prediction, PredictionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PredictionError::EmptyResponse);
    }

    let root: JsonValue =
        serde_json::from_slice(body).map_err(|err| PredictionError::Decode(err.to_string()))?;
    let obj = root
        .as_object()
        .ok_or_else(|| PredictionError::Decode("se esperaba un objeto JSON".to_string()))?;

    match obj.get("error") {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::String(msg)) => return Err(PredictionError::ServerReported(msg.clone())),
        Some(other) => return Err(PredictionError::ServerReported(other.to_string())),
    }

    let humidity = number(obj, "prediction");
    let classification = class_code(obj).map(|class| Classification {
        class,
        label: string(obj, "prediction_label"),
    });

    Ok(Prediction {
        outcome: PredictionOutcome::from_parts(humidity, classification),
        probability_low: number(obj, "probability_low"),
        probability_high: number(obj, "probability_high"),
        confidence: number(obj, "confidence"),
        message: string(obj, "message"),
    })
}

fn number(obj: &Map<String, JsonValue>, key: &str) -> Option<f64> {
    obj.get(key).and_then(JsonValue::as_f64)
}

fn string(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    obj.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn class_code(obj: &Map<String, JsonValue>) -> Option<HumidityClass> {
    let raw = obj.get("prediction_class")?;
    let code = raw.as_i64().or_else(|| {
        raw.as_f64()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    });
    let class = code.and_then(HumidityClass::from_code);
    if class.is_none() && !raw.is_null() {
        log::warn!("Ignoring unexpected prediction_class {raw}");
    }
    class
}
