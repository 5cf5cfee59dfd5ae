use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::engine::calendar::weekday_label;
use crate::error::CoachError;
use crate::models::{WeeklyPlan, WeeklyPlanRecord};

const PLAN_COLUMNS: &str = "id, athlete_id, week_start, week_end, plan_data, total_distance_km, \
     total_sessions, status, created_at, updated_at";

/// How many recent plans the recovery scan looks back over.
const RECOVERY_LOOKBACK_PLANS: i64 = 8;

/// Plan persistence, keyed by (athlete, week start). A new plan for the same
/// week replaces the old one through the upsert; concurrent pipelines for
/// the same athlete serialize on that row.
#[derive(Clone)]
pub struct WeeklyPlanService {
    db: PgPool,
}

impl WeeklyPlanService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn upsert_plan(
        &self,
        athlete_id: Uuid,
        plan: &WeeklyPlan,
    ) -> Result<WeeklyPlanRecord> {
        let record = sqlx::query_as::<_, WeeklyPlanRecord>(&format!(
            "INSERT INTO weekly_plans (athlete_id, week_start, week_end, plan_data, \
                 total_distance_km, total_sessions, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'active') \
             ON CONFLICT (athlete_id, week_start) DO UPDATE SET \
                 week_end = EXCLUDED.week_end, \
                 plan_data = EXCLUDED.plan_data, \
                 total_distance_km = EXCLUDED.total_distance_km, \
                 total_sessions = EXCLUDED.total_sessions, \
                 status = 'active', \
                 updated_at = $7 \
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(athlete_id)
        .bind(plan.week_start)
        .bind(plan.week_end)
        .bind(serde_json::to_value(plan)?)
        .bind(plan.total_km)
        .bind(plan.workouts.len() as i32)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    pub async fn plan_by_week_start(
        &self,
        athlete_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPlanRecord>> {
        let record = sqlx::query_as::<_, WeeklyPlanRecord>(&format!(
            "SELECT {PLAN_COLUMNS} FROM weekly_plans \
             WHERE athlete_id = $1 AND week_start = $2 LIMIT 1"
        ))
        .bind(athlete_id)
        .bind(week_start)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    pub async fn latest_active_plan(&self, athlete_id: Uuid) -> Result<Option<WeeklyPlanRecord>> {
        let record = sqlx::query_as::<_, WeeklyPlanRecord>(&format!(
            "SELECT {PLAN_COLUMNS} FROM weekly_plans \
             WHERE athlete_id = $1 AND status = 'active' \
             ORDER BY week_start DESC LIMIT 1"
        ))
        .bind(athlete_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// Weeks since the last recovery week, derived by scanning recent plans
    /// newest-first until one carries the recovery flag. Kept as a query so
    /// the plan history stays the single source of truth.
    pub async fn weeks_since_recovery(&self, athlete_id: Uuid) -> Result<u32> {
        let payloads: Vec<serde_json::Value> = sqlx::query_scalar(
            "SELECT plan_data FROM weekly_plans WHERE athlete_id = $1 \
             ORDER BY week_start DESC LIMIT $2",
        )
        .bind(athlete_id)
        .bind(RECOVERY_LOOKBACK_PLANS)
        .fetch_all(&self.db)
        .await?;

        let mut count = 0;
        for payload in payloads {
            let is_recovery = payload
                .pointer("/meta/is_recovery_week")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            if is_recovery {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Moves a single workout of the latest active plan to a new date. This
    /// is the only in-place plan mutation; everything else supersedes the
    /// plan wholesale.
    pub async fn reschedule_workout(
        &self,
        athlete_id: Uuid,
        workout_date: Option<NaiveDate>,
        new_date: NaiveDate,
    ) -> Result<WeeklyPlan> {
        let record = self
            .latest_active_plan(athlete_id)
            .await?
            .ok_or(CoachError::NoActivePlan(athlete_id))?;
        let mut plan = record.plan()?;

        let workout = match workout_date {
            Some(date) => plan
                .workouts
                .iter_mut()
                .find(|w| w.date == date)
                .ok_or(CoachError::WorkoutNotFound { athlete_id, date })?,
            None => plan
                .workouts
                .first_mut()
                .ok_or(CoachError::NoActivePlan(athlete_id))?,
        };

        workout.date = new_date;
        workout.weekday = weekday_label(new_date).to_string();

        self.upsert_plan(athlete_id, &plan).await?;
        Ok(plan)
    }
}
