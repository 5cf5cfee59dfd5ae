use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AthleteProfile, OnboardingStage};

const PROFILE_COLUMNS: &str = "id, level, age, height_cm, weight_kg, weekly_runs, preferred_days, \
     pace_5k_seconds, race_distance, race_distance_km, race_date, target_time_seconds, \
     current_weekly_km, resting_hr, max_hr, onboarding_stage, created_at, updated_at";

/// Read access to athlete profiles. The engine never creates profiles; it
/// only reads them and records the small updates onboarding and scheduling
/// preferences produce.
#[derive(Clone)]
pub struct AthleteProfileService {
    db: PgPool,
}

impl AthleteProfileService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, athlete_id: Uuid) -> Result<Option<AthleteProfile>> {
        let profile = sqlx::query_as::<_, AthleteProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM athlete_profiles WHERE id = $1"
        ))
        .bind(athlete_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    /// Every athlete who has finished onboarding; the weekly cycle iterates
    /// over this set.
    pub async fn list_onboarded(&self) -> Result<Vec<AthleteProfile>> {
        let profiles = sqlx::query_as::<_, AthleteProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM athlete_profiles \
             WHERE onboarding_stage = 'completed' ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(profiles)
    }

    /// Stores a normalized preferred-day list, e.g. "monday, wednesday".
    pub async fn update_preferred_days(&self, athlete_id: Uuid, days: &str) -> Result<()> {
        sqlx::query("UPDATE athlete_profiles SET preferred_days = $2, updated_at = $3 WHERE id = $1")
            .bind(athlete_id)
            .bind(days)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        Ok(())
    }

    pub async fn set_onboarding_stage(
        &self,
        athlete_id: Uuid,
        stage: OnboardingStage,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE athlete_profiles SET onboarding_stage = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(athlete_id)
        .bind(stage.as_str())
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
