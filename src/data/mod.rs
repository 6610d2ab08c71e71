/// Data layer: the sampled input record, the normalized prediction result,
/// and the derived operator report.
///
/// Architecture:
/// ```text
///   ┌──────────┐
///   │ sampler  │  RNG + clock → SampleReading
///   └──────────┘
///        │  (api::client posts it)
///        ▼
///   ┌────────────────┐
///   │ PredictionResult│  Completed(Prediction) | Failed(PredictionError)
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report  │  result → plain-text drying report
///   └──────────┘
/// ```

pub mod model;
pub mod report;
pub mod sampler;
