use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::CoachError;
use crate::models::WorkoutType;

/// Total length of a macro-cycle, in weeks.
pub const CYCLE_WEEKS: u32 = 12;

/// Named phases of the macro-cycle, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseName {
    Base,
    Development,
    Stabilization,
    Taper,
}

impl PhaseName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseName::Base => "base",
            PhaseName::Development => "development",
            PhaseName::Stabilization => "stabilization",
            PhaseName::Taper => "taper",
        }
    }
}

/// One contiguous block of the macro-cycle with its volume target and
/// workout emphasis. Week numbers are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: PhaseName,
    pub display_name: String,
    pub start_week: u32,
    pub end_week: u32,
    pub duration_weeks: u32,
    pub focus: String,
    pub target_weekly_km_min: f64,
    pub target_weekly_km_max: f64,
    pub key_workouts: Vec<WorkoutType>,
    pub intensity_distribution: String,
}

impl Phase {
    pub fn contains_week(&self, week: u32) -> bool {
        week >= self.start_week && week <= self.end_week
    }
}

/// Checks the construction-time invariant on a phase list: exactly four
/// phases covering weeks 1..=CYCLE_WEEKS contiguously, with no gaps or
/// overlaps. A strategy that fails this check must never reach the store.
pub fn validate_phases(phases: &[Phase]) -> Result<(), CoachError> {
    if phases.len() != 4 {
        return Err(CoachError::InvalidStrategy(format!(
            "expected 4 phases, got {}",
            phases.len()
        )));
    }

    let mut expected_start = 1;
    for phase in phases {
        if phase.start_week != expected_start {
            return Err(CoachError::InvalidStrategy(format!(
                "phase '{}' starts at week {}, expected week {}",
                phase.name.as_str(),
                phase.start_week,
                expected_start
            )));
        }
        if phase.end_week < phase.start_week {
            return Err(CoachError::InvalidStrategy(format!(
                "phase '{}' has end week {} before start week {}",
                phase.name.as_str(),
                phase.end_week,
                phase.start_week
            )));
        }
        expected_start = phase.end_week + 1;
    }

    if expected_start != CYCLE_WEEKS + 1 {
        return Err(CoachError::InvalidStrategy(format!(
            "phases cover weeks 1..={}, expected 1..={}",
            expected_start - 1,
            CYCLE_WEEKS
        )));
    }

    Ok(())
}

/// 1-based week index of `now` within a cycle starting at `start_date`.
/// Dates at or before the start clamp to week 1.
pub fn weeks_since(start_date: NaiveDate, now: NaiveDate) -> u32 {
    let days = (now - start_date).num_days();
    if days <= 0 {
        1
    } else {
        ((days + 6) / 7) as u32
    }
}

/// The phase active at `now`, together with the resolved week index.
/// Returns `None` for the phase once the cycle is complete.
pub fn current_phase<'a>(
    phases: &'a [Phase],
    start_date: NaiveDate,
    now: NaiveDate,
) -> (Option<&'a Phase>, u32) {
    let week = weeks_since(start_date, now);
    let phase = phases.iter().find(|p| p.contains_week(week));
    (phase, week)
}

/// A macro-cycle as stored in `training_strategies`. The phase list lives in
/// the `phases` JSONB column; boundaries and volume targets are fixed at
/// creation, only `start_date`/`end_date` may be revised afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingStrategy {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub goal_type: Option<String>,
    pub race_distance_km: Option<f64>,
    pub race_date: Option<NaiveDate>,
    pub target_time_seconds: Option<i32>,
    pub total_weeks: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub phases: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TrainingStrategy {
    /// Deserializes the stored phase list.
    pub fn phase_list(&self) -> Result<Vec<Phase>, CoachError> {
        Ok(serde_json::from_value(self.phases.clone())?)
    }

    /// Resolves the phase active at `now` against the stored phase list.
    pub fn resolve(&self, now: NaiveDate) -> Result<(Option<Phase>, u32), CoachError> {
        let phases = self.phase_list()?;
        let (phase, week) = current_phase(&phases, self.start_date, now);
        Ok((phase.cloned(), week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::strategy_builder::standard_phases;
    use assert_matches::assert_matches;

    fn phases() -> Vec<Phase> {
        standard_phases(25.0)
    }

    #[test]
    fn builder_phases_satisfy_the_invariant() {
        assert!(validate_phases(&phases()).is_ok());
    }

    #[test]
    fn rejects_wrong_phase_count() {
        let mut p = phases();
        p.pop();
        assert_matches!(validate_phases(&p), Err(CoachError::InvalidStrategy(_)));
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let mut gapped = phases();
        gapped[1].start_week = 6;
        assert!(validate_phases(&gapped).is_err());

        let mut overlapping = phases();
        overlapping[1].start_week = 4;
        assert!(validate_phases(&overlapping).is_err());
    }

    #[test]
    fn rejects_short_coverage() {
        let mut p = phases();
        p[3].end_week = 11;
        assert!(validate_phases(&p).is_err());
    }

    #[test]
    fn week_index_clamps_to_one() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(weeks_since(start, start), 1);
        let before = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        assert_eq!(weeks_since(start, before), 1);
    }

    #[test]
    fn week_six_falls_in_the_development_phase() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let phase_list = phases();
        let (phase, week) = current_phase(&phase_list, start, now);
        assert_eq!(week, 6);
        let phase = phase.expect("phase should be active at week 6");
        assert_eq!(phase.name, PhaseName::Development);
        assert_eq!((phase.start_week, phase.end_week), (5, 8));
    }

    #[test]
    fn completed_cycle_resolves_to_no_phase() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let now = start + chrono::Duration::days(13 * 7);
        let phase_list = phases();
        let (phase, week) = current_phase(&phase_list, start, now);
        assert!(phase.is_none());
        assert!(week > CYCLE_WEEKS);
    }
}
