use anyhow::Result;
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::engine::strategy_builder::{build_phases, cycle_start_date};
use crate::models::{validate_phases, AthleteProfile, TrainingStrategy, CYCLE_WEEKS};

const STRATEGY_COLUMNS: &str = "id, athlete_id, goal_type, race_distance_km, race_date, \
     target_time_seconds, total_weeks, start_date, end_date, phases, status, created_at";

/// Creates and reads macro-cycle strategies. The phase list is fixed at
/// creation; only the start date (and the derived end date) may be revised.
#[derive(Clone)]
pub struct StrategyService {
    db: PgPool,
}

impl StrategyService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn active_strategy(&self, athlete_id: Uuid) -> Result<Option<TrainingStrategy>> {
        let strategy = sqlx::query_as::<_, TrainingStrategy>(&format!(
            "SELECT {STRATEGY_COLUMNS} FROM training_strategies \
             WHERE athlete_id = $1 AND status = 'active' \
             ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(athlete_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(strategy)
    }

    /// Builds and stores a new macro-cycle for the athlete. The phase list
    /// is validated before it can reach the store; a malformed cycle is a
    /// bug in construction and must fail here, not during later plan builds.
    pub async fn create_strategy(
        &self,
        profile: &AthleteProfile,
        today: NaiveDate,
    ) -> Result<TrainingStrategy> {
        let phases = build_phases(profile);
        validate_phases(&phases)?;

        let start_date = cycle_start_date(profile, today);
        let end_date = start_date + Duration::days(i64::from(CYCLE_WEEKS) * 7 - 1);
        let goal_type = if profile.race_date.is_some() { "race" } else { "general" };

        let strategy = sqlx::query_as::<_, TrainingStrategy>(&format!(
            "INSERT INTO training_strategies (athlete_id, goal_type, race_distance_km, \
                 race_date, target_time_seconds, total_weeks, start_date, end_date, phases, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active') \
             RETURNING {STRATEGY_COLUMNS}"
        ))
        .bind(profile.id)
        .bind(goal_type)
        .bind(profile.race_distance_km)
        .bind(profile.race_date)
        .bind(profile.target_time_seconds)
        .bind(CYCLE_WEEKS as i32)
        .bind(start_date)
        .bind(end_date)
        .bind(serde_json::to_value(&phases)?)
        .fetch_one(&self.db)
        .await?;

        Ok(strategy)
    }

    /// Revises when training actually begins. Phase boundaries and volume
    /// targets stay untouched; they are reinterpreted relative to the new
    /// start date.
    pub async fn update_start_date(&self, strategy_id: Uuid, start_date: NaiveDate) -> Result<()> {
        let end_date = start_date + Duration::days(i64::from(CYCLE_WEEKS) * 7 - 1);
        sqlx::query(
            "UPDATE training_strategies SET start_date = $2, end_date = $3 WHERE id = $1",
        )
        .bind(strategy_id)
        .bind(start_date)
        .bind(end_date)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn complete_strategy(&self, strategy_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE training_strategies SET status = 'completed' WHERE id = $1")
            .bind(strategy_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
