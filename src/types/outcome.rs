//! Outcome types
//!
//! Records what happened when one case was submitted, and the ordered run
//! those records belong to.

use serde::{Deserialize, Serialize};

use crate::types::case::Case;

/// Result classification of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// The recorded result of submitting one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub case_id: u32,
    /// Copy of the case label
    pub label: String,
    /// Round-trip latency in seconds, two decimal places
    pub elapsed_seconds: f64,
    /// Diagnostic text on success, error description otherwise
    pub response_text: String,
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn success(case: &Case, elapsed_seconds: f64, response_text: impl Into<String>) -> Self {
        Self {
            case_id: case.id,
            label: case.label.clone(),
            elapsed_seconds: round_seconds(elapsed_seconds),
            response_text: response_text.into(),
            status: OutcomeStatus::Success,
        }
    }

    pub fn error(case: &Case, elapsed_seconds: f64, response_text: impl Into<String>) -> Self {
        Self {
            case_id: case.id,
            label: case.label.clone(),
            elapsed_seconds: round_seconds(elapsed_seconds),
            response_text: response_text.into(),
            status: OutcomeStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Round to two decimal places, never negative.
pub fn round_seconds(seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    (seconds * 100.0).round() / 100.0
}

/// Ordered outcomes of one client execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Operator-supplied name of the model variant under test
    pub model_label: String,
    outcomes: Vec<Outcome>,
}

impl Run {
    pub fn new(model_label: impl Into<String>) -> Self {
        Self {
            model_label: model_label.into(),
            outcomes: Vec::new(),
        }
    }

    /// Append the next outcome. Outcomes are only ever added at the end.
    pub fn push(&mut self, outcome: Outcome) {
        debug_assert!(
            self.outcomes.iter().all(|o| o.case_id != outcome.case_id),
            "case {} submitted twice in one run",
            outcome.case_id
        );
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}
