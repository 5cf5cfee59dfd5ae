use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::CoachError;

/// Workout types the plan builder can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    EasyRun,
    LongRun,
    Tempo,
    Intervals,
    Recovery,
    Fartlek,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::EasyRun => "easy_run",
            WorkoutType::LongRun => "long_run",
            WorkoutType::Tempo => "tempo",
            WorkoutType::Intervals => "intervals",
            WorkoutType::Recovery => "recovery",
            WorkoutType::Fartlek => "fartlek",
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::EasyRun => "Easy run",
            WorkoutType::LongRun => "Long run",
            WorkoutType::Tempo => "Tempo run",
            WorkoutType::Intervals => "Intervals",
            WorkoutType::Recovery => "Recovery run",
            WorkoutType::Fartlek => "Fartlek",
        }
    }

    /// One-line session description shown to the athlete.
    pub fn description(&self) -> &'static str {
        match self {
            WorkoutType::EasyRun => "Easy run at a conversational pace",
            WorkoutType::LongRun => "Long run at an easy, steady pace",
            WorkoutType::Tempo => "Sustained effort close to threshold pace",
            WorkoutType::Intervals => "VO2max intervals with full recoveries",
            WorkoutType::Recovery => "Very light recovery jog",
            WorkoutType::Fartlek => "Speed play: surges by feel",
        }
    }
}

/// Target heart-rate band for a workout, in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateRange {
    pub low_bpm: u16,
    pub high_bpm: u16,
}

impl std::fmt::Display for HeartRateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low_bpm, self.high_bpm)
    }
}

/// A single scheduled session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub date: NaiveDate,
    pub weekday: String,
    pub workout_type: WorkoutType,
    pub label: String,
    pub description: String,
    pub distance_km: f64,
    pub target_pace: String,
    pub treadmill_kmh: f64,
    pub target_hr: Option<HeartRateRange>,
    pub rpe: u8,
}

/// Plan provenance and the feedback that shaped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    pub generator: String,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub adjustment_percent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_percent: Option<i32>,
    #[serde(default)]
    pub is_recovery_week: bool,
}

/// One week's schedule. Superseded, not mutated, when the next week is
/// planned; only single-workout reschedules patch a plan in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_km: f64,
    pub workouts: Vec<Workout>,
    pub meta: PlanMeta,
}

/// Persisted row of `weekly_plans`; the plan itself lives in `plan_data`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyPlanRecord {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub plan_data: serde_json::Value,
    pub total_distance_km: f64,
    pub total_sessions: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyPlanRecord {
    /// Deserializes the stored plan payload.
    pub fn plan(&self) -> Result<WeeklyPlan, CoachError> {
        Ok(serde_json::from_value(self.plan_data.clone())?)
    }
}
