//! Builds the 12-week macro-cycle from an athlete's baseline volume.

use chrono::{Duration, NaiveDate};

use crate::engine::knowledge::level_weekly_km_midpoint;
use crate::models::{AthleteProfile, Phase, PhaseName, WorkoutType, CYCLE_WEEKS};

/// The baseline weekly volume the phases scale from: the athlete's reported
/// current volume, or the midpoint of their level's standard range.
pub fn baseline_weekly_km(profile: &AthleteProfile) -> f64 {
    profile
        .current_weekly_km
        .filter(|km| *km > 0.0)
        .unwrap_or_else(|| level_weekly_km_midpoint(profile.training_level()))
}

fn scale_range(base: f64, min_mul: f64, max_mul: f64) -> (f64, f64) {
    ((base * min_mul).round(), (base * max_mul).round())
}

/// The fixed four-phase structure scaled to a baseline volume. Week ranges,
/// focus and intensity distribution do not depend on the athlete.
pub fn standard_phases(baseline_km: f64) -> Vec<Phase> {
    let base = scale_range(baseline_km, 0.9, 1.0);
    let development = scale_range(baseline_km, 1.0, 1.1);
    let stabilization = scale_range(baseline_km, 0.9, 1.0);
    let taper = scale_range(baseline_km, 0.6, 0.8);

    vec![
        Phase {
            name: PhaseName::Base,
            display_name: "Base".to_string(),
            start_week: 1,
            end_week: 4,
            duration_weeks: 4,
            focus: "aerobic base building".to_string(),
            target_weekly_km_min: base.0,
            target_weekly_km_max: base.1,
            key_workouts: vec![WorkoutType::EasyRun, WorkoutType::LongRun],
            intensity_distribution: "80/20".to_string(),
        },
        Phase {
            name: PhaseName::Development,
            display_name: "Development".to_string(),
            start_week: 5,
            end_week: 8,
            duration_weeks: 4,
            focus: "speed and VO2max development".to_string(),
            target_weekly_km_min: development.0,
            target_weekly_km_max: development.1,
            key_workouts: vec![WorkoutType::Tempo, WorkoutType::Intervals, WorkoutType::LongRun],
            intensity_distribution: "75/25".to_string(),
        },
        Phase {
            name: PhaseName::Stabilization,
            display_name: "Stabilization".to_string(),
            start_week: 9,
            end_week: 10,
            duration_weeks: 2,
            focus: "race rhythm and distance specificity".to_string(),
            target_weekly_km_min: stabilization.0,
            target_weekly_km_max: stabilization.1,
            key_workouts: vec![WorkoutType::Tempo, WorkoutType::LongRun],
            intensity_distribution: "80/20".to_string(),
        },
        Phase {
            name: PhaseName::Taper,
            display_name: "Taper".to_string(),
            start_week: 11,
            end_week: CYCLE_WEEKS,
            duration_weeks: 2,
            focus: "volume reduction, keeping sharpness".to_string(),
            target_weekly_km_min: taper.0,
            target_weekly_km_max: taper.1,
            key_workouts: vec![WorkoutType::EasyRun, WorkoutType::Tempo],
            intensity_distribution: "85/15".to_string(),
        },
    ]
}

/// Builds the athlete's macro-cycle phases.
pub fn build_phases(profile: &AthleteProfile) -> Vec<Phase> {
    standard_phases(baseline_weekly_km(profile))
}

/// Cycle start for a known race date: twelve weeks before the race.
pub fn strategy_start_date(race_date: NaiveDate) -> NaiveDate {
    race_date - Duration::days(i64::from(CYCLE_WEEKS) * 7)
}

/// Cycle start for a profile: counted back from the race date when one is
/// set, otherwise training starts today.
pub fn cycle_start_date(profile: &AthleteProfile, today: NaiveDate) -> NaiveDate {
    profile.race_date.map(strategy_start_date).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_phases;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(level: &str, current_weekly_km: Option<f64>) -> AthleteProfile {
        AthleteProfile {
            id: Uuid::new_v4(),
            level: Some(level.to_string()),
            age: Some(34),
            height_cm: None,
            weight_kg: None,
            weekly_runs: Some(3),
            preferred_days: None,
            pace_5k_seconds: Some(330),
            race_distance: None,
            race_distance_km: Some(21.1),
            race_date: None,
            target_time_seconds: None,
            current_weekly_km,
            resting_hr: None,
            max_hr: None,
            onboarding_stage: "completed".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn always_produces_four_valid_phases() {
        for baseline in [5.0, 18.0, 25.0, 42.5, 90.0] {
            let phases = standard_phases(baseline);
            assert!(validate_phases(&phases).is_ok(), "baseline {baseline}");
            assert_eq!(phases[0].start_week, 1);
            assert_eq!(phases[3].end_week, CYCLE_WEEKS);
        }
    }

    #[test]
    fn volume_targets_scale_off_the_baseline() {
        let phases = standard_phases(30.0);
        assert_eq!(phases[0].target_weekly_km_min, 27.0);
        assert_eq!(phases[0].target_weekly_km_max, 30.0);
        assert_eq!(phases[1].target_weekly_km_max, 33.0);
        assert_eq!(phases[3].target_weekly_km_min, 18.0);
        assert_eq!(phases[3].target_weekly_km_max, 24.0);
    }

    #[test]
    fn baseline_prefers_reported_volume() {
        assert_eq!(baseline_weekly_km(&profile("advanced", Some(55.0))), 55.0);
    }

    #[test]
    fn baseline_falls_back_to_level_midpoint() {
        assert_eq!(baseline_weekly_km(&profile("beginner", None)), 15.0);
        assert_eq!(baseline_weekly_km(&profile("advanced", Some(0.0))), 50.0);
    }

    #[test]
    fn start_date_counts_back_twelve_weeks_from_the_race() {
        let race = NaiveDate::from_ymd_opt(2026, 5, 24).unwrap();
        let start = strategy_start_date(race);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!((race - start).num_days(), 84);
    }

    #[test]
    fn cycle_start_defaults_to_today_without_a_race() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();
        assert_eq!(cycle_start_date(&profile("intermediate", None), today), today);
    }
}
