use crate::data::model::{PredictionResult, SampleReading};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Bottom tab bar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Sampling,
    History,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Sampling, Tab::History, Tab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Sampling => "Muestreo",
            Tab::History => "Historial",
            Tab::Settings => "Ajustes",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Sampling => "🧪",
            Tab::History => "🕘",
            Tab::Settings => "⚙",
        }
    }
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub selected_tab: Tab,

    /// Result currently shown in the result sheet. Replaced, never merged.
    pub result: Option<PredictionResult>,

    /// Reading most recently submitted, kept for the sampling screen.
    pub last_reading: Option<SampleReading>,

    /// Whether a prediction request is in flight.
    pub sampling: bool,
}

impl AppState {
    /// Record a reading that is about to be submitted.
    pub fn begin_sampling(&mut self, reading: &SampleReading) {
        self.last_reading = Some(reading.clone());
        self.sampling = true;
    }

    /// Store a completed prediction, overwriting whatever was shown.
    pub fn apply_result(&mut self, result: PredictionResult) {
        self.result = Some(result);
        self.sampling = false;
    }

    /// Close the result sheet.
    pub fn dismiss_result(&mut self) {
        self.result = None;
    }

    pub fn can_start_sampling(&self) -> bool {
        !self.sampling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PredictionError;
    use crate::data::model::{Prediction, PredictionOutcome};

    fn reading() -> SampleReading {
        crate::data::sampler::generate()
    }

    #[test]
    fn sampling_blocks_until_result_arrives() {
        let mut state = AppState::default();
        assert!(state.can_start_sampling());
        state.begin_sampling(&reading());
        assert!(!state.can_start_sampling());
        assert!(state.last_reading.is_some());

        state.apply_result(PredictionResult::Failed(PredictionError::EmptyResponse));
        assert!(state.can_start_sampling());
        assert!(state.result.is_some());
    }

    #[test]
    fn new_result_replaces_previous() {
        let mut state = AppState::default();
        state.apply_result(PredictionResult::Failed(PredictionError::EmptyResponse));
        let completed = PredictionResult::Completed(Prediction {
            outcome: PredictionOutcome::Inconclusive,
            probability_low: None,
            probability_high: None,
            confidence: Some(0.4),
            message: None,
        });
        state.apply_result(completed.clone());
        assert_eq!(state.result, Some(completed));

        state.dismiss_result();
        assert!(state.result.is_none());
    }

    #[test]
    fn tabs_start_on_sampling() {
        let state = AppState::default();
        assert_eq!(state.selected_tab, Tab::Sampling);
        assert_eq!(Tab::ALL.map(Tab::title), ["Muestreo", "Historial", "Ajustes"]);
    }
}
