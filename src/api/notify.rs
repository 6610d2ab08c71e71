//! Fire-and-forget alert request asking the server to email the operators.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use serde::Serialize;

use super::client::PredictionClient;
use super::transport::HttpReply;
use crate::data::model::{HumidityClass, PredictionResult};

/// Body of `POST /api/send_gemini_email`. Missing values default to 0 / "".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPayload {
    pub humedad_predicha: f64,
    pub clase_predicha: u8,
    pub probabilidad_0: f64,
    pub probabilidad_1: f64,
    pub confianza: f64,
    pub mensaje: String,
}

impl AlertPayload {
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            humedad_predicha: result.humidity().unwrap_or(0.0),
            clase_predicha: result.class().map(HumidityClass::code).unwrap_or(0),
            probabilidad_0: result.probability_low().unwrap_or(0.0),
            probabilidad_1: result.probability_high().unwrap_or(0.0),
            confianza: result.confidence().unwrap_or(0.0),
            mensaje: result.message().unwrap_or_default().to_string(),
        }
    }
}

/// Diagnostic outcome of one alert request. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    Delivered { status: u16, body: String },
    Failed { error: String },
}

impl PredictionClient {
    /// Ask the server to send the alert email for `result`.
    ///
    /// Only results that need another cycle are sent; anything else returns
    /// `None` without touching the network. The outcome is logged and reported
    /// once on `events`.
    pub fn notify(
        self: &Arc<Self>,
        result: &PredictionResult,
        events: Sender<NotifyEvent>,
    ) -> Option<JoinHandle<()>> {
        if !result.needs_another_cycle() {
            log::debug!("Skipping alert: result does not need another cycle");
            return None;
        }

        let payload = AlertPayload::from_result(result);
        let client = Arc::clone(self);
        Some(thread::spawn(move || {
            let event = match client.send_alert(&payload) {
                Ok(reply) => {
                    let body = reply.body_text();
                    log::info!("Alert request answered HTTP {}: {body}", reply.status);
                    NotifyEvent::Delivered {
                        status: reply.status,
                        body,
                    }
                }
                Err(err) => {
                    log::error!("Alert request failed: {err:#}");
                    NotifyEvent::Failed {
                        error: format!("{err:#}"),
                    }
                }
            };
            // The receiver may already be gone when the app is closing.
            let _ = events.send(event);
        }))
    }

    fn send_alert(&self, payload: &AlertPayload) -> Result<HttpReply> {
        let url = self.config.alert_url().context("building alert URL")?;
        let body = serde_json::to_value(payload).context("encoding alert payload")?;
        self.transport
            .post_json(&url, &body)
            .with_context(|| format!("posting alert to {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::client::tests::ScriptedTransport;
    use crate::data::model::{Classification, Prediction, PredictionOutcome};
    use crate::api::PredictionError;
    use std::sync::mpsc;

    fn high_result() -> PredictionResult {
        PredictionResult::Completed(Prediction {
            outcome: PredictionOutcome::Classification(Classification {
                class: HumidityClass::High,
                label: Some("Humedad Alta".into()),
            }),
            probability_low: Some(0.1),
            probability_high: Some(0.9),
            confidence: Some(0.9),
            message: Some("Repetir secado".into()),
        })
    }

    fn client(transport: Arc<ScriptedTransport>) -> Arc<PredictionClient> {
        Arc::new(PredictionClient::new(ClientConfig::default(), transport))
    }

    #[test]
    fn payload_defaults_missing_values() {
        let result = PredictionResult::Completed(Prediction {
            outcome: PredictionOutcome::Classification(Classification {
                class: HumidityClass::High,
                label: None,
            }),
            probability_low: None,
            probability_high: None,
            confidence: None,
            message: None,
        });
        let value = serde_json::to_value(AlertPayload::from_result(&result)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "humedad_predicha": 0.0,
                "clase_predicha": 1,
                "probabilidad_0": 0.0,
                "probabilidad_1": 0.0,
                "confianza": 0.0,
                "mensaje": ""
            })
        );
    }

    #[test]
    fn delivered_alert_reports_status_and_body() {
        let transport = ScriptedTransport::replying(r#"{"sent":true}"#);
        let (tx, rx) = mpsc::channel();
        client(transport.clone())
            .notify(&high_result(), tx)
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(
            rx.recv().unwrap(),
            NotifyEvent::Delivered {
                status: 200,
                body: r#"{"sent":true}"#.to_string()
            }
        );
        let requests = transport.requests.lock().unwrap();
        let (url, body) = &requests[0];
        assert_eq!(url.path(), "/api/send_gemini_email");
        assert_eq!(body["clase_predicha"], serde_json::json!(1));
        assert_eq!(body["probabilidad_1"], serde_json::json!(0.9));
        assert_eq!(body["mensaje"], serde_json::json!("Repetir secado"));
    }

    #[test]
    fn server_error_status_is_still_delivered() {
        let transport = ScriptedTransport::default();
        transport.push_ok(502, "bad gateway");
        let (tx, rx) = mpsc::channel();
        client(Arc::new(transport))
            .notify(&high_result(), tx)
            .unwrap()
            .join()
            .unwrap();
        assert!(matches!(
            rx.recv().unwrap(),
            NotifyEvent::Delivered { status: 502, .. }
        ));
    }

    #[test]
    fn transport_failure_is_captured_as_event() {
        let (tx, rx) = mpsc::channel();
        client(ScriptedTransport::failing("network unreachable"))
            .notify(&high_result(), tx)
            .unwrap()
            .join()
            .unwrap();
        match rx.recv().unwrap() {
            NotifyEvent::Failed { error } => {
                assert!(error.contains("posting alert"));
                assert!(error.contains("network unreachable"));
            }
            other => panic!("expected failure event, got {other:?}"),
        }
    }

    #[test]
    fn low_humidity_result_sends_nothing() {
        let transport = ScriptedTransport::replying("{}");
        let (tx, rx) = mpsc::channel();
        let low = PredictionResult::Failed(PredictionError::EmptyResponse);
        assert!(client(transport.clone()).notify(&low, tx).is_none());
        assert!(rx.try_recv().is_err());
        assert!(transport.requests.lock().unwrap().is_empty());
    }
}
