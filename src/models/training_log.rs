use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Input channel a logged session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Manual,
    Screenshot,
    Voice,
}

impl LogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Manual => "manual",
            LogSource::Screenshot => "screenshot",
            LogSource::Voice => "voice",
        }
    }
}

/// One completed session as stored in `training_logs`.
///
/// Records are append-only: late-arriving metrics may be patched in, but a
/// log is never deleted and its date/distance never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingLogRecord {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub date: NaiveDate,
    pub distance_km: f64,
    pub duration_seconds: i32,
    pub avg_heart_rate: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub rpe: Option<i32>,
    pub feeling: Option<String>,
    pub notes: Option<String>,
    pub weekly_plan_id: Option<Uuid>,
    pub workout_type: Option<String>,
    pub is_planned: Option<bool>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new training log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingLog {
    pub athlete_id: Uuid,
    pub date: NaiveDate,
    pub distance_km: f64,
    pub duration_seconds: i32,
    pub avg_heart_rate: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub rpe: Option<i32>,
    pub feeling: Option<String>,
    pub notes: Option<String>,
    pub weekly_plan_id: Option<Uuid>,
    pub workout_type: Option<String>,
    pub is_planned: Option<bool>,
    pub source: LogSource,
}
