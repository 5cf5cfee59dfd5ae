use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateTrainingLog, TrainingLogRecord};

const LOG_COLUMNS: &str = "id, athlete_id, date, distance_km, duration_seconds, avg_heart_rate, \
     max_heart_rate, rpe, feeling, notes, weekly_plan_id, workout_type, is_planned, source, \
     created_at";

/// Append-only access to the training log.
#[derive(Clone)]
pub struct TrainingLogService {
    db: PgPool,
}

impl TrainingLogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn insert_log(&self, log: CreateTrainingLog) -> Result<TrainingLogRecord> {
        let record = sqlx::query_as::<_, TrainingLogRecord>(&format!(
            "INSERT INTO training_logs (athlete_id, date, distance_km, duration_seconds, \
                 avg_heart_rate, max_heart_rate, rpe, feeling, notes, weekly_plan_id, \
                 workout_type, is_planned, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {LOG_COLUMNS}"
        ))
        .bind(log.athlete_id)
        .bind(log.date)
        .bind(log.distance_km)
        .bind(log.duration_seconds)
        .bind(log.avg_heart_rate)
        .bind(log.max_heart_rate)
        .bind(log.rpe)
        .bind(log.feeling)
        .bind(log.notes)
        .bind(log.weekly_plan_id)
        .bind(log.workout_type)
        .bind(log.is_planned)
        .bind(log.source.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// All logs for an athlete in `[start, end]`, oldest first.
    pub async fn logs_in_range(
        &self,
        athlete_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrainingLogRecord>> {
        let logs = sqlx::query_as::<_, TrainingLogRecord>(&format!(
            "SELECT {LOG_COLUMNS} FROM training_logs \
             WHERE athlete_id = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date, created_at"
        ))
        .bind(athlete_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    pub async fn latest_log(&self, athlete_id: Uuid) -> Result<Option<TrainingLogRecord>> {
        let log = sqlx::query_as::<_, TrainingLogRecord>(&format!(
            "SELECT {LOG_COLUMNS} FROM training_logs WHERE athlete_id = $1 \
             ORDER BY date DESC, created_at DESC LIMIT 1"
        ))
        .bind(athlete_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(log)
    }

    /// Patches late-arriving metrics onto an existing log. Date and distance
    /// are never rewritten.
    pub async fn update_metrics(
        &self,
        log_id: Uuid,
        avg_heart_rate: Option<i32>,
        max_heart_rate: Option<i32>,
        rpe: Option<i32>,
    ) -> Result<Option<TrainingLogRecord>> {
        let record = sqlx::query_as::<_, TrainingLogRecord>(&format!(
            "UPDATE training_logs SET \
                 avg_heart_rate = COALESCE($2, avg_heart_rate), \
                 max_heart_rate = COALESCE($3, max_heart_rate), \
                 rpe = COALESCE($4, rpe) \
             WHERE id = $1 RETURNING {LOG_COLUMNS}"
        ))
        .bind(log_id)
        .bind(avg_heart_rate)
        .bind(max_heart_rate)
        .bind(rpe)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }
}
