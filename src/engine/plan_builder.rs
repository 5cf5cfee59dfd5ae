//! Weekly schedule construction: day selection, type assignment, per-workout
//! targets and the two volume-scaling passes.

use chrono::{DateTime, NaiveDate, Utc};

use crate::engine::adaptation::AdaptationDecision;
use crate::engine::calendar::{preference_mentions, weekday_label};
use crate::engine::knowledge::{base_distance, phase_template, workout_profile};
use crate::engine::pace_zones::{format_pace, pace_to_speed_kmh, PaceZones};
use crate::models::{
    AthleteProfile, HeartRateRange, Phase, PlanMeta, WeeklyPlan, Workout, WorkoutType,
};

/// Everything the builder needs for one week. The phase and decision are
/// resolved by the caller; passing them in keeps the build deterministic.
#[derive(Debug)]
pub struct BuildPlanInput<'a> {
    pub profile: &'a AthleteProfile,
    /// Candidate calendar dates, ascending. May be a partial week.
    pub dates: &'a [NaiveDate],
    pub phase: Option<&'a Phase>,
    pub decision: Option<&'a AdaptationDecision>,
    /// Compliance of the week being replaced, carried into plan metadata.
    pub prior_compliance: Option<i32>,
    /// Build timestamp, recorded in metadata. Passing it in keeps repeated
    /// builds with identical inputs byte-identical.
    pub built_at: DateTime<Utc>,
}

/// Picks training days from the candidates. Dates matching the athlete's
/// weekday preference win; remaining slots fill from the unmatched dates in
/// their original order.
fn pick_training_days(
    dates: &[NaiveDate],
    preference: Option<&str>,
    weekly_runs: usize,
) -> Vec<NaiveDate> {
    let limit = weekly_runs.min(dates.len());
    let mut picked: Vec<NaiveDate> = match preference {
        Some(pref) => {
            let (matching, rest): (Vec<_>, Vec<_>) = dates
                .iter()
                .copied()
                .partition(|d| preference_mentions(pref, *d));
            matching.into_iter().chain(rest).take(limit).collect()
        }
        None => dates.iter().copied().take(limit).collect(),
    };
    picked.sort_unstable();
    picked
}

/// Rounds to the nearest 0.5 km, the smallest increment an athlete can set
/// on a treadmill or watch.
fn round_half_km(km: f64) -> f64 {
    (km * 2.0).round() / 2.0
}

fn target_heart_rate(workout_type: WorkoutType, age: Option<i32>) -> Option<HeartRateRange> {
    let age = age.filter(|a| *a > 0)?;
    let max_hr = f64::from(220 - age);
    let (low, high) = workout_profile(workout_type).hr_band;
    Some(HeartRateRange {
        low_bpm: (max_hr * low).round() as u16,
        high_bpm: (max_hr * high).round() as u16,
    })
}

/// Clamps the week's total into the phase's volume corridor and scales every
/// workout by the resulting factor.
fn scale_to_phase(workouts: &mut [Workout], phase: &Phase) {
    let (min, max) = (phase.target_weekly_km_min, phase.target_weekly_km_max);
    if min <= 0.0 || max <= 0.0 {
        return;
    }
    let total: f64 = workouts.iter().map(|w| w.distance_km).sum();
    if total <= 0.0 {
        return;
    }
    let target = total.clamp(min, max);
    let scale = target / total;
    for workout in workouts {
        workout.distance_km = round_half_km(workout.distance_km * scale);
    }
}

/// Applies the adaptation percentage on top of any phase scaling.
fn scale_by_volume(workouts: &mut [Workout], percent: i32) {
    if percent == 0 {
        return;
    }
    let scale = 1.0 + f64::from(percent) / 100.0;
    for workout in workouts {
        workout.distance_km = round_half_km(workout.distance_km * scale);
    }
}

/// Demotes interval sessions to easy runs, keeping their slot and distance.
fn remove_interval_sessions(workouts: &mut [Workout]) {
    for workout in workouts {
        if workout.workout_type == WorkoutType::Intervals {
            workout.workout_type = WorkoutType::EasyRun;
            workout.label = WorkoutType::EasyRun.label().to_string();
            workout.description = WorkoutType::EasyRun.description().to_string();
            workout.rpe = workout_profile(WorkoutType::EasyRun).rpe;
        }
    }
}

/// Builds one week's schedule.
///
/// Always succeeds given a valid profile: missing inputs fall back to level
/// defaults, and an empty candidate set yields a valid zero-workout plan.
pub fn build_weekly_plan(input: BuildPlanInput<'_>) -> WeeklyPlan {
    let profile = input.profile;
    let level = profile.training_level();
    let zones = PaceZones::from_reference(profile.reference_pace(), level);
    let template = phase_template(level, input.phase.map(|p| p.name));

    let picked = pick_training_days(
        input.dates,
        profile.preferred_days.as_deref(),
        profile.weekly_runs_target(),
    );

    let mut workouts: Vec<Workout> = picked
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let workout_type = template[i % template.len()];
            let pace = zones.zone_for_workout(workout_type).midpoint_sec_per_km();
            Workout {
                date,
                weekday: weekday_label(date).to_string(),
                workout_type,
                label: workout_type.label().to_string(),
                description: workout_type.description().to_string(),
                distance_km: base_distance(level, workout_type),
                target_pace: format_pace(pace),
                treadmill_kmh: pace_to_speed_kmh(pace),
                target_hr: target_heart_rate(workout_type, profile.age),
                rpe: workout_profile(workout_type).rpe,
            }
        })
        .collect();

    if let Some(phase) = input.phase {
        scale_to_phase(&mut workouts, phase);
    }
    let adjustment_percent = input.decision.map(|d| d.volume_adjustment).unwrap_or(0);
    scale_by_volume(&mut workouts, adjustment_percent);
    if input.decision.is_some_and(|d| d.remove_intervals) {
        remove_interval_sessions(&mut workouts);
    }

    let total_km: f64 = workouts.iter().map(|w| w.distance_km).sum();
    let fallback = input.built_at.date_naive();
    let week_start = workouts
        .first()
        .map(|w| w.date)
        .or_else(|| input.dates.first().copied())
        .unwrap_or(fallback);
    let week_end = workouts
        .last()
        .map(|w| w.date)
        .or_else(|| input.dates.last().copied())
        .unwrap_or(fallback);

    WeeklyPlan {
        week_start,
        week_end,
        total_km: (total_km * 10.0).round() / 10.0,
        workouts,
        meta: PlanMeta {
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: input.built_at,
            adjustment_percent,
            adjustment_reason: input.decision.map(|d| d.reason.clone()),
            compliance_percent: input.prior_compliance,
            is_recovery_week: input.decision.is_some_and(|d| d.is_recovery_week),
        },
    }
}
