//! Error types for the visibility harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    /// The extraction adapter could not obtain a stable snapshot in time.
    ///
    /// Carries the last wrong-state observation, if any, so a report can
    /// distinguish "never became ready" from "became ready in the wrong
    /// state" (e.g. a Review popup stuck on a pagination message).
    #[error("Timed out waiting for {what} after {attempts} attempt(s){}", fmt_last_state(.last_state))]
    ExtractionTimeout {
        what: String,
        attempts: usize,
        last_state: Option<String>,
    },

    /// Non-empty reconciliation result, already formatted with every
    /// missing and unexpected record.
    #[error("Visibility mismatch in {category}:\n{message}")]
    Visibility { category: String, message: String },

    #[error("Session state error: {0}")]
    SessionState(String),

    #[error("Result file error: {0}")]
    ResultFile(String),

    #[error("Fixture parse error: {0}")]
    FixtureParse(String),

    #[error("Step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Common(#[from] casework_common::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

fn fmt_last_state(last_state: &Option<String>) -> String {
    match last_state {
        Some(state) => format!("; last state: {state}"),
        None => String::new(),
    }
}
