//! Coaching knowledge tables.
//!
//! Level and workout parameters are modeled as immutable lookup structures
//! built once at process start, keyed by enum tuples. Components read from
//! these tables instead of scattering magic numbers through the code.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::engine::pace_zones::ZoneKind;
use crate::models::Level::{self, Advanced, Beginner, Intermediate};
use crate::models::WorkoutType::{self, EasyRun, Fartlek, Intervals, LongRun, Recovery, Tempo};
use crate::models::PhaseName;

/// Additive pace-zone offsets from the reference 5K pace, in seconds per km:
/// `(zone, min_offset, max_offset)`. Zone bounds are `fast = base + min` and
/// `slow = base + max`.
pub const ZONE_OFFSETS: [(ZoneKind, i64, i64); 5] = [
    (ZoneKind::Recovery, 90, 120),
    (ZoneKind::Easy, 60, 90),
    (ZoneKind::Tempo, -5, 15),
    (ZoneKind::Threshold, -10, -5),
    (ZoneKind::Interval, -20, -10),
];

/// Fallback reference 5K pace (sec/km) when the athlete has not supplied one.
pub fn default_reference_pace(level: Level) -> i64 {
    match level {
        Beginner => 420,
        Intermediate => 360,
        Advanced => 300,
    }
}

/// Standard weekly volume range (km) per level; the midpoint serves as the
/// baseline when the athlete's current weekly volume is unknown.
static LEVEL_WEEKLY_KM: Lazy<HashMap<Level, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        (Beginner, (10.0, 20.0)),
        (Intermediate, (20.0, 30.0)),
        (Advanced, (40.0, 60.0)),
    ])
});

pub fn level_weekly_km_midpoint(level: Level) -> f64 {
    let (min, max) = LEVEL_WEEKLY_KM[&level];
    ((min + max) / 2.0).round()
}

/// Default session distance (km) per level and workout type.
static BASE_DISTANCES: Lazy<HashMap<(Level, WorkoutType), f64>> = Lazy::new(|| {
    HashMap::from([
        ((Beginner, EasyRun), 3.0),
        ((Beginner, LongRun), 6.0),
        ((Beginner, Recovery), 2.0),
        ((Intermediate, EasyRun), 5.0),
        ((Intermediate, LongRun), 12.0),
        ((Intermediate, Tempo), 6.0),
        ((Intermediate, Fartlek), 5.0),
        ((Intermediate, Recovery), 4.0),
        ((Advanced, EasyRun), 8.0),
        ((Advanced, LongRun), 18.0),
        ((Advanced, Tempo), 8.0),
        ((Advanced, Intervals), 8.0),
        ((Advanced, Fartlek), 7.0),
        ((Advanced, Recovery), 5.0),
    ])
});

/// Session distance for a level/type pair, falling back to the level's easy
/// run when the combination is not tabled (beginners never see tempo work,
/// for example).
pub fn base_distance(level: Level, workout_type: WorkoutType) -> f64 {
    BASE_DISTANCES
        .get(&(level, workout_type))
        .or_else(|| BASE_DISTANCES.get(&(level, EasyRun)))
        .copied()
        .unwrap_or(5.0)
}

/// Cyclic workout-type sequences per level and phase.
static PHASE_TEMPLATES: Lazy<HashMap<(Level, PhaseName), Vec<WorkoutType>>> = Lazy::new(|| {
    HashMap::from([
        ((Beginner, PhaseName::Base), vec![EasyRun, EasyRun, LongRun]),
        ((Beginner, PhaseName::Development), vec![EasyRun, LongRun, EasyRun, LongRun]),
        ((Beginner, PhaseName::Stabilization), vec![EasyRun, LongRun, EasyRun]),
        ((Beginner, PhaseName::Taper), vec![EasyRun, EasyRun]),
        ((Intermediate, PhaseName::Base), vec![EasyRun, EasyRun, LongRun]),
        ((Intermediate, PhaseName::Development), vec![EasyRun, Tempo, LongRun]),
        ((Intermediate, PhaseName::Stabilization), vec![EasyRun, Tempo, LongRun]),
        ((Intermediate, PhaseName::Taper), vec![EasyRun, EasyRun, Tempo]),
        ((Advanced, PhaseName::Base), vec![EasyRun, Tempo, LongRun]),
        ((Advanced, PhaseName::Development), vec![Intervals, Tempo, LongRun]),
        ((Advanced, PhaseName::Stabilization), vec![Intervals, Tempo, LongRun]),
        ((Advanced, PhaseName::Taper), vec![EasyRun, Tempo, LongRun]),
    ])
});

/// The workout-type sequence for a level in a given phase. With no active
/// phase the level's base sequence is the default.
pub fn phase_template(level: Level, phase: Option<PhaseName>) -> &'static [WorkoutType] {
    let name = phase.unwrap_or(PhaseName::Base);
    PHASE_TEMPLATES
        .get(&(level, name))
        .or_else(|| PHASE_TEMPLATES.get(&(level, PhaseName::Base)))
        .map(Vec::as_slice)
        .expect("phase templates cover every level")
}

/// Per-type session parameters: the pace zone it targets, the heart-rate
/// band as fractions of maximum heart rate, and the prescribed RPE.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutProfile {
    pub zone: ZoneKind,
    pub hr_band: (f64, f64),
    pub rpe: u8,
}

static WORKOUT_PROFILES: Lazy<HashMap<WorkoutType, WorkoutProfile>> = Lazy::new(|| {
    HashMap::from([
        (EasyRun, WorkoutProfile { zone: ZoneKind::Easy, hr_band: (0.60, 0.70), rpe: 4 }),
        (Recovery, WorkoutProfile { zone: ZoneKind::Recovery, hr_band: (0.50, 0.60), rpe: 3 }),
        (LongRun, WorkoutProfile { zone: ZoneKind::Easy, hr_band: (0.65, 0.75), rpe: 5 }),
        (Tempo, WorkoutProfile { zone: ZoneKind::Tempo, hr_band: (0.80, 0.88), rpe: 7 }),
        (Intervals, WorkoutProfile { zone: ZoneKind::Interval, hr_band: (0.90, 1.00), rpe: 8 }),
        (Fartlek, WorkoutProfile { zone: ZoneKind::Tempo, hr_band: (0.70, 0.85), rpe: 6 }),
    ])
});

pub fn workout_profile(workout_type: WorkoutType) -> WorkoutProfile {
    WORKOUT_PROFILES[&workout_type]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_template_for_every_phase() {
        let levels = [Beginner, Intermediate, Advanced];
        let phases = [
            PhaseName::Base,
            PhaseName::Development,
            PhaseName::Stabilization,
            PhaseName::Taper,
        ];
        for level in levels {
            for phase in phases {
                assert!(!phase_template(level, Some(phase)).is_empty());
            }
            assert_eq!(phase_template(level, None), phase_template(level, Some(PhaseName::Base)));
        }
    }

    #[test]
    fn untabled_distance_falls_back_to_easy_run() {
        assert_eq!(base_distance(Beginner, Tempo), base_distance(Beginner, EasyRun));
        assert_eq!(base_distance(Advanced, LongRun), 18.0);
    }

    #[test]
    fn level_midpoints_match_the_volume_ranges() {
        assert_eq!(level_weekly_km_midpoint(Beginner), 15.0);
        assert_eq!(level_weekly_km_midpoint(Intermediate), 25.0);
        assert_eq!(level_weekly_km_midpoint(Advanced), 50.0);
    }

    #[test]
    fn interval_sessions_are_rated_hardest() {
        assert_eq!(workout_profile(Intervals).rpe, 8);
        assert!(workout_profile(Recovery).rpe < workout_profile(EasyRun).rpe);
    }
}
