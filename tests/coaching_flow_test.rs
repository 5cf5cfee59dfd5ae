//! The feedback loop composed end to end, without stores: build a week,
//! log some of it, evaluate compliance, decide the adaptation and build the
//! following week.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use run_coach::engine::adaptation::calculate_adaptation;
use run_coach::engine::compliance::calculate_compliance;
use run_coach::engine::plan_builder::{build_weekly_plan, BuildPlanInput};
use run_coach::engine::strategy_builder::{build_phases, standard_phases};
use run_coach::engine::training_index::calculate_training_index;
use run_coach::models::{
    current_phase, validate_phases, AthleteProfile, PhaseName, TrainingLogRecord, WeeklyPlan,
    WorkoutType,
};

fn profile(level: &str) -> AthleteProfile {
    AthleteProfile {
        id: Uuid::new_v4(),
        level: Some(level.to_string()),
        age: Some(35),
        height_cm: None,
        weight_kg: None,
        weekly_runs: Some(3),
        preferred_days: None,
        pace_5k_seconds: Some(330),
        race_distance: Some("10k".to_string()),
        race_distance_km: Some(10.0),
        race_date: Some(NaiveDate::from_ymd_opt(2026, 5, 24).unwrap()),
        target_time_seconds: Some(2700),
        current_weekly_km: Some(30.0),
        resting_hr: None,
        max_hr: None,
        onboarding_stage: "completed".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn log(athlete_id: Uuid, date: NaiveDate, distance_km: f64) -> TrainingLogRecord {
    TrainingLogRecord {
        id: Uuid::new_v4(),
        athlete_id,
        date,
        distance_km,
        duration_seconds: 2400,
        avg_heart_rate: Some(150),
        max_heart_rate: None,
        rpe: Some(5),
        feeling: None,
        notes: None,
        weekly_plan_id: None,
        workout_type: None,
        is_planned: Some(true),
        source: "manual".to_string(),
        created_at: Utc::now(),
    }
}

fn week_of(monday: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

fn built_at() -> DateTime<Utc> {
    "2026-03-08T20:00:00Z".parse().unwrap()
}

fn build_week(profile: &AthleteProfile, monday: NaiveDate) -> WeeklyPlan {
    let phases = build_phases(profile);
    let cycle_start = monday - Duration::days(7);
    let (phase, _week) = current_phase(&phases, cycle_start, monday);
    build_weekly_plan(BuildPlanInput {
        profile,
        dates: &week_of(monday),
        phase,
        decision: None,
        prior_compliance: None,
        built_at: built_at(),
    })
}

#[test]
fn a_fully_completed_week_keeps_next_weeks_volume() {
    let athlete = profile("intermediate");
    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let plan = build_week(&athlete, monday);

    let logs: Vec<_> = plan
        .workouts
        .iter()
        .map(|w| log(athlete.id, w.date, w.distance_km))
        .collect();
    let compliance = calculate_compliance(&plan, &logs);
    assert_eq!(compliance.compliance_percent, 100);
    assert_eq!(compliance.completed_workouts, compliance.planned_workouts);
    assert!(compliance.missed_types.is_empty());

    let index = calculate_training_index(&logs, monday + Duration::days(6));
    let decision = calculate_adaptation(&compliance, 1, Some(index.form));
    assert_eq!(decision.volume_adjustment, 0);
    assert_eq!(decision.reason, "Week completed on plan");

    let next = build_weekly_plan(BuildPlanInput {
        profile: &athlete,
        dates: &week_of(monday + Duration::days(7)),
        phase: None,
        decision: Some(&decision),
        prior_compliance: Some(compliance.compliance_percent),
        built_at: built_at(),
    });
    assert_eq!(next.meta.adjustment_percent, 0);
    assert_eq!(next.meta.compliance_percent, Some(100));
    assert!(!next.meta.is_recovery_week);
}

#[test]
fn a_skipped_week_rolls_volume_back_and_drops_intervals() {
    let athlete = profile("advanced");
    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let phases = standard_phases(50.0);
    let development = phases
        .iter()
        .find(|p| p.name == PhaseName::Development)
        .unwrap();

    let plan = build_weekly_plan(BuildPlanInput {
        profile: &athlete,
        dates: &week_of(monday),
        phase: Some(development),
        decision: None,
        prior_compliance: None,
        built_at: built_at(),
    });
    assert!(plan
        .workouts
        .iter()
        .any(|w| w.workout_type == WorkoutType::Intervals));

    // Nothing logged at all.
    let compliance = calculate_compliance(&plan, &[]);
    assert_eq!(compliance.compliance_percent, 0);
    assert_eq!(compliance.completed_workouts, 0);

    let decision = calculate_adaptation(&compliance, 2, None);
    assert_eq!(decision.volume_adjustment, -15);
    assert!(decision.remove_intervals);

    let next = build_weekly_plan(BuildPlanInput {
        profile: &athlete,
        dates: &week_of(monday + Duration::days(7)),
        phase: Some(development),
        decision: Some(&decision),
        prior_compliance: Some(compliance.compliance_percent),
        built_at: built_at(),
    });
    assert!(next
        .workouts
        .iter()
        .all(|w| w.workout_type != WorkoutType::Intervals));
    assert!(next.total_km < plan.total_km);
}

#[test]
fn the_fourth_loaded_week_forces_a_deload() {
    let athlete = profile("intermediate");
    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let plan = build_week(&athlete, monday);

    let logs: Vec<_> = plan
        .workouts
        .iter()
        .map(|w| log(athlete.id, w.date, w.distance_km))
        .collect();
    let compliance = calculate_compliance(&plan, &logs);

    let decision = calculate_adaptation(&compliance, 4, None);
    assert_eq!(decision.volume_adjustment, -30);
    assert!(decision.is_recovery_week);

    let next = build_weekly_plan(BuildPlanInput {
        profile: &athlete,
        dates: &week_of(monday + Duration::days(7)),
        phase: None,
        decision: Some(&decision),
        prior_compliance: Some(compliance.compliance_percent),
        built_at: built_at(),
    });
    assert!(next.meta.is_recovery_week);
    assert!(next.total_km < plan.total_km);
}

#[test]
fn heavy_recent_load_caps_the_adjustment_even_after_a_big_week() {
    let athlete = profile("intermediate");
    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let plan = build_week(&athlete, monday);
    let week_end = monday + Duration::days(6);

    // Run far more than planned, every single day.
    let logs: Vec<_> = (0..7)
        .map(|i| log(athlete.id, monday + Duration::days(i), 12.0))
        .collect();
    let compliance = calculate_compliance(&plan, &logs);
    assert!(compliance.compliance_percent > 110);

    let index = calculate_training_index(&logs, week_end);
    assert!(index.form < -5.0);

    let decision = calculate_adaptation(&compliance, 1, Some(index.form));
    assert_eq!(decision.volume_adjustment, -10);
    assert!(decision.reason.contains("high fatigue"));
}

#[test]
fn strategy_phases_resolve_across_the_whole_cycle() {
    let athlete = profile("intermediate");
    let phases = build_phases(&athlete);
    validate_phases(&phases).unwrap();

    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let expectations = [
        (0, PhaseName::Base),
        (28, PhaseName::Base),
        (29, PhaseName::Development),
        (56, PhaseName::Development),
        (57, PhaseName::Stabilization),
        (70, PhaseName::Stabilization),
        (71, PhaseName::Taper),
        (84, PhaseName::Taper),
    ];
    for (offset, expected) in expectations {
        let (phase, _week) = current_phase(&phases, start, start + Duration::days(offset));
        assert_eq!(phase.unwrap().name, expected, "day offset {offset}");
    }

    let (phase, week) = current_phase(&phases, start, start + Duration::days(90));
    assert!(phase.is_none());
    assert_eq!(week, 13);
}
