//! Rolling fitness/fatigue/form metrics over the training log.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::TrainingLogRecord;

/// Freshness status derived from the form signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Fresh,
    Optimal,
    Tired,
    Overtrained,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Fresh => "fresh",
            FormStatus::Optimal => "optimal",
            FormStatus::Tired => "tired",
            FormStatus::Overtrained => "overtrained",
        }
    }
}

/// Chronic load (fitness), acute load (fatigue) and their balance (form),
/// all in average km per day at one-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingIndex {
    pub fitness: f64,
    pub fatigue: f64,
    pub form: f64,
    pub status: FormStatus,
}

fn sum_km(logs: &[TrainingLogRecord], days: i64, now: NaiveDate) -> f64 {
    let start = now - Duration::days(days - 1);
    logs.iter()
        .filter(|log| log.date >= start && log.date <= now)
        .map(|log| log.distance_km)
        .sum()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Computes the index over the trailing 42-day (fitness) and 7-day (fatigue)
/// windows, both inclusive of `now`. An empty history reads as optimal: new
/// athletes are not penalized for having no data.
pub fn calculate_training_index(logs: &[TrainingLogRecord], now: NaiveDate) -> TrainingIndex {
    let fitness = round1(sum_km(logs, 42, now) / 42.0);
    let fatigue = round1(sum_km(logs, 7, now) / 7.0);
    let form = round1(fitness - fatigue);

    let status = if form > 5.0 {
        FormStatus::Fresh
    } else if form >= 0.0 {
        FormStatus::Optimal
    } else if form >= -5.0 {
        FormStatus::Tired
    } else {
        FormStatus::Overtrained
    };

    TrainingIndex { fitness, fatigue, form, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn log(date: NaiveDate, distance_km: f64) -> TrainingLogRecord {
        TrainingLogRecord {
            id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            date,
            distance_km,
            duration_seconds: 3600,
            avg_heart_rate: None,
            max_heart_rate: None,
            rpe: None,
            feeling: None,
            notes: None,
            weekly_plan_id: None,
            workout_type: None,
            is_planned: None,
            source: "manual".to_string(),
            created_at: Utc::now(),
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 13).unwrap() - Duration::days(offset)
    }

    #[test]
    fn empty_history_reads_as_optimal() {
        let index = calculate_training_index(&[], day(0));
        assert_eq!(index.fitness, 0.0);
        assert_eq!(index.fatigue, 0.0);
        assert_eq!(index.form, 0.0);
        assert_eq!(index.status, FormStatus::Optimal);
    }

    #[test]
    fn heavy_recent_load_flags_overtrained() {
        let logs: Vec<_> = (0..7).map(|i| log(day(i), 12.0)).collect();
        let index = calculate_training_index(&logs, day(0));
        assert_eq!(index.fatigue, 12.0);
        assert_eq!(index.fitness, 2.0);
        assert_eq!(index.form, -10.0);
        assert_eq!(index.status, FormStatus::Overtrained);
    }

    #[test]
    fn old_sessions_leave_the_acute_window() {
        // One session 10 days back: counts for fitness, not for fatigue.
        let logs = vec![log(day(10), 21.0)];
        let index = calculate_training_index(&logs, day(0));
        assert_eq!(index.fatigue, 0.0);
        assert_eq!(index.fitness, 0.5);
        assert_eq!(index.status, FormStatus::Optimal);
    }

    #[test]
    fn sessions_beyond_42_days_are_ignored() {
        let logs = vec![log(day(42), 100.0)];
        let index = calculate_training_index(&logs, day(0));
        assert_eq!(index.fitness, 0.0);
    }

    #[test]
    fn steady_taper_reads_fresh() {
        // Plenty of chronic volume, nothing in the last week.
        let logs: Vec<_> = (8..40).map(|i| log(day(i), 10.0)).collect();
        let index = calculate_training_index(&logs, day(0));
        assert_eq!(index.fatigue, 0.0);
        assert!(index.form > 5.0);
        assert_eq!(index.status, FormStatus::Fresh);
    }
}
