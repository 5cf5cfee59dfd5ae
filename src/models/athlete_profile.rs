use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::OnboardingStage;

/// Athlete experience level, used to key the knowledge tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

/// Athlete profile as stored in `athlete_profiles`.
///
/// Most fields are optional: onboarding fills them in incrementally and the
/// engine falls back to level-specific defaults for anything missing. The
/// profile is immutable for the duration of a single plan build.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AthleteProfile {
    pub id: Uuid,
    pub level: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub weekly_runs: Option<i32>,
    pub preferred_days: Option<String>,
    pub pace_5k_seconds: Option<i32>,
    pub race_distance: Option<String>,
    pub race_distance_km: Option<f64>,
    pub race_date: Option<NaiveDate>,
    pub target_time_seconds: Option<i32>,
    pub current_weekly_km: Option<f64>,
    pub resting_hr: Option<i32>,
    pub max_hr: Option<i32>,
    pub onboarding_stage: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AthleteProfile {
    /// Parsed experience level; unknown or missing values read as intermediate.
    pub fn training_level(&self) -> Level {
        self.level
            .as_deref()
            .and_then(Level::parse)
            .unwrap_or(Level::Intermediate)
    }

    /// Target number of runs per week; defaults to 3.
    pub fn weekly_runs_target(&self) -> usize {
        self.weekly_runs.filter(|n| *n > 0).unwrap_or(3) as usize
    }

    /// Reference 5K pace in seconds per km, if the athlete supplied one.
    pub fn reference_pace(&self) -> Option<i64> {
        self.pace_5k_seconds.filter(|p| *p > 0).map(i64::from)
    }

    pub fn stage(&self) -> OnboardingStage {
        OnboardingStage::parse(&self.onboarding_stage).unwrap_or(OnboardingStage::Started)
    }

    /// Body mass index, used for safety gating upstream of plan generation.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height_cm, self.weight_kg) {
            (Some(h), Some(w)) if h > 0.0 => {
                let meters = h / 100.0;
                Some(w / (meters * meters))
            }
            _ => None,
        }
    }
}
