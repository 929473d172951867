//! Observable lifecycle of a log fetch

use crate::logs::fetcher::{DataSource, FetchOutcome};

/// `Idle -> Loading -> Success | Error`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(FetchOutcome),
    Error(String),
}

impl FetchState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Success with zero records; rendered as "no data", not as an error
    pub fn is_empty_success(&self) -> bool {
        matches!(self, Self::Success(outcome) if outcome.records.is_empty())
    }

    /// Whether the view should show the "using sample data" notice
    pub fn is_sample_data(&self) -> bool {
        matches!(
            self,
            Self::Success(FetchOutcome {
                source: DataSource::Sample,
                ..
            })
        )
    }

    /// Move to `next`, logging the transition
    pub fn transition(&mut self, next: FetchState) {
        match &next {
            FetchState::Success(outcome) => tracing::info!(
                from = self.name(),
                to = next.name(),
                records = outcome.records.len(),
                source = ?outcome.source,
                "Fetch state changed"
            ),
            FetchState::Error(reason) => tracing::warn!(
                from = self.name(),
                to = next.name(),
                error = %reason,
                "Fetch state changed"
            ),
            _ => tracing::debug!(from = self.name(), to = next.name(), "Fetch state changed"),
        }
        *self = next;
    }
}

impl From<Result<FetchOutcome, crate::error::FetchError>> for FetchState {
    fn from(result: Result<FetchOutcome, crate::error::FetchError>) -> Self {
        match result {
            Ok(outcome) => Self::Success(outcome),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::logs::sample::sample_logs;
    use reqwest::StatusCode;

    #[test]
    fn test_default_is_idle() {
        let state = FetchState::default();
        assert_eq!(state, FetchState::Idle);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_transition_sequence() {
        let mut state = FetchState::default();
        state.transition(FetchState::Loading);
        assert!(state.is_loading());

        state.transition(FetchState::Success(FetchOutcome::remote(Vec::new())));
        assert!(state.is_empty_success());
        assert!(!state.is_sample_data());
    }

    #[test]
    fn test_sample_outcome_flags_sample_data() {
        let state = FetchState::Success(FetchOutcome::sample());
        assert!(state.is_sample_data());
        assert!(!state.is_empty_success());
        if let FetchState::Success(outcome) = state {
            assert_eq!(outcome.records, sample_logs());
        }
    }

    #[test]
    fn test_error_result_keeps_reason() {
        let state = FetchState::from(Err::<FetchOutcome, _>(FetchError::HttpStatus(
            StatusCode::BAD_GATEWAY,
        )));
        assert_eq!(state, FetchState::Error("Network response was not ok".to_string()));
    }
}
