use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Typed errors for the coaching engine.
///
/// Missing-input conditions (no reference pace, no age, no active phase, no
/// prior plan) are not errors: every component has a documented fallback.
/// What remains is construction-time invariant violations, malformed stored
/// payloads and store failures, which the caller may retry.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("invalid training strategy: {0}")]
    InvalidStrategy(String),

    #[error("no active plan found for athlete {0}")]
    NoActivePlan(Uuid),

    #[error("no workout scheduled on {date} for athlete {athlete_id}")]
    WorkoutNotFound { athlete_id: Uuid, date: NaiveDate },

    #[error("malformed stored payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
