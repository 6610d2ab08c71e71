/// Network layer for the prediction server.
///
/// ```text
///  SampleReading ──► client::predict ──► transport (POST /predict_complete)
///                          │
///                          ▼
///                  PredictionResult ──► notify (POST /api/send_gemini_email)
///                                          │
///                                          ▼
///                                    NotifyEvent channel
/// ```

pub mod client;
pub mod notify;
pub mod transport;

pub use client::{ClientConfig, PredictionClient, PredictionError};
pub use notify::NotifyEvent;
