//! Compares a past week's schedule against the sessions actually logged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{TrainingLogRecord, WeeklyPlan, WorkoutType};

/// Planned-versus-actual summary for one week. Derived on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub planned_km: f64,
    pub actual_km: f64,
    pub compliance_percent: i32,
    pub planned_workouts: usize,
    pub completed_workouts: usize,
    pub missed_types: Vec<WorkoutType>,
}

/// Evaluates compliance for `plan` against the logs of its week.
///
/// A workout counts as completed when any log exists on its date; volume is
/// not matched per session. Every log contributes to `actual_km`, including
/// several on the same day. `missed_types` keeps duplicates so a report can
/// show two missed easy runs as two entries.
pub fn calculate_compliance(plan: &WeeklyPlan, logs: &[TrainingLogRecord]) -> ComplianceReport {
    let planned_km: f64 = plan.workouts.iter().map(|w| w.distance_km).sum();
    let actual_km: f64 = logs.iter().map(|log| log.distance_km).sum();

    let logged_dates: HashSet<_> = logs.iter().map(|log| log.date).collect();
    let completed_workouts = plan
        .workouts
        .iter()
        .filter(|w| logged_dates.contains(&w.date))
        .count();
    let missed_types: Vec<WorkoutType> = plan
        .workouts
        .iter()
        .filter(|w| !logged_dates.contains(&w.date))
        .map(|w| w.workout_type)
        .collect();

    let compliance_percent = if planned_km > 0.0 {
        ((actual_km / planned_km) * 100.0).round() as i32
    } else {
        0
    };

    ComplianceReport {
        planned_km,
        actual_km,
        compliance_percent,
        planned_workouts: plan.workouts.len(),
        completed_workouts,
        missed_types,
    }
}
