//! Pace zone derivation from a single reference metric (current 5K pace).

use serde::{Deserialize, Serialize};

use crate::engine::knowledge::{default_reference_pace, ZONE_OFFSETS};
use crate::models::{Level, WorkoutType};

/// The five effort zones, slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Recovery,
    Easy,
    Tempo,
    Threshold,
    Interval,
}

impl ZoneKind {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneKind::Recovery => "Z1 Recovery",
            ZoneKind::Easy => "Z2 Easy",
            ZoneKind::Tempo => "Z3 Tempo",
            ZoneKind::Threshold => "Z4 Threshold",
            ZoneKind::Interval => "Z5 Interval",
        }
    }
}

/// A pace band in seconds per km. `fast` is the lower (quicker) bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceZone {
    pub kind: ZoneKind,
    pub fast_sec_per_km: i64,
    pub slow_sec_per_km: i64,
}

impl PaceZone {
    pub fn midpoint_sec_per_km(&self) -> i64 {
        ((self.fast_sec_per_km + self.slow_sec_per_km) as f64 / 2.0).round() as i64
    }

    /// Renders the band as "fast-slow", e.g. "5:55-6:30".
    pub fn pace_range(&self) -> String {
        format!(
            "{}-{}",
            format_pace(self.fast_sec_per_km),
            format_pace(self.slow_sec_per_km)
        )
    }

    /// Treadmill speed bounds, `(min_kmh, max_kmh)`.
    pub fn speed_range_kmh(&self) -> (f64, f64) {
        (
            pace_to_speed_kmh(self.slow_sec_per_km),
            pace_to_speed_kmh(self.fast_sec_per_km),
        )
    }
}

/// All five zones derived from one reference pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceZones {
    pub recovery: PaceZone,
    pub easy: PaceZone,
    pub tempo: PaceZone,
    pub threshold: PaceZone,
    pub interval: PaceZone,
}

impl PaceZones {
    /// Derives zones from the athlete's reference pace. Missing or
    /// non-positive references fall back to the level default.
    pub fn from_reference(reference_pace: Option<i64>, level: Level) -> Self {
        let base = reference_pace
            .filter(|p| *p > 0)
            .unwrap_or_else(|| default_reference_pace(level));

        let zone = |kind: ZoneKind| {
            let (_, min_off, max_off) = ZONE_OFFSETS
                .iter()
                .find(|(k, _, _)| *k == kind)
                .copied()
                .expect("offsets cover every zone");
            PaceZone {
                kind,
                fast_sec_per_km: base + min_off,
                slow_sec_per_km: base + max_off,
            }
        };

        Self {
            recovery: zone(ZoneKind::Recovery),
            easy: zone(ZoneKind::Easy),
            tempo: zone(ZoneKind::Tempo),
            threshold: zone(ZoneKind::Threshold),
            interval: zone(ZoneKind::Interval),
        }
    }

    pub fn zone(&self, kind: ZoneKind) -> &PaceZone {
        match kind {
            ZoneKind::Recovery => &self.recovery,
            ZoneKind::Easy => &self.easy,
            ZoneKind::Tempo => &self.tempo,
            ZoneKind::Threshold => &self.threshold,
            ZoneKind::Interval => &self.interval,
        }
    }

    /// The zone a workout type trains in.
    pub fn zone_for_workout(&self, workout_type: WorkoutType) -> &PaceZone {
        match workout_type {
            WorkoutType::EasyRun => &self.easy,
            WorkoutType::Recovery => &self.recovery,
            WorkoutType::LongRun => &self.easy,
            WorkoutType::Tempo => &self.tempo,
            WorkoutType::Intervals => &self.interval,
            WorkoutType::Fartlek => &self.tempo,
        }
    }
}

/// Formats seconds per km as "m:ss".
pub fn format_pace(sec_per_km: i64) -> String {
    format!("{}:{:02}", sec_per_km / 60, sec_per_km % 60)
}

/// Converts a pace to treadmill speed, rounded to one decimal.
pub fn pace_to_speed_kmh(sec_per_km: i64) -> f64 {
    ((3600.0 / sec_per_km as f64) * 10.0).round() / 10.0
}
