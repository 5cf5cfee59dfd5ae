//! Race finish-time prediction from the current 5K reference.
//!
//! Uses the Riegel endurance model, T2 = T1 * (D2/D1)^1.06.

use serde::{Deserialize, Serialize};

const RIEGEL_EXPONENT: f64 = 1.06;
const REFERENCE_DISTANCE_KM: f64 = 5.0;

/// Finish-time estimates in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacePrediction {
    pub optimistic_seconds: i64,
    pub realistic_seconds: i64,
    pub pessimistic_seconds: i64,
}

/// How a target time compares against the realistic prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalRealism {
    Achievable,
    Challenging,
    VeryAmbitious,
    Unrealistic,
}

impl GoalRealism {
    pub fn message(&self) -> &'static str {
        match self {
            GoalRealism::Achievable => "Your goal is realistic and reachable if you follow the plan.",
            GoalRealism::Challenging => {
                "An ambitious but reachable goal. It will take quality sessions and consistency."
            }
            GoalRealism::VeryAmbitious => {
                "A very ambitious goal. It needs substantial progress and near-perfect execution."
            }
            GoalRealism::Unrealistic => {
                "This goal looks unrealistic for your current shape. Consider adjusting the target time."
            }
        }
    }
}

/// Predicts finish times for a race distance from the current 5K time.
/// Non-positive distances fall back to the half marathon.
pub fn predict_race_time(current_5k_seconds: i64, distance_km: f64) -> RacePrediction {
    let distance = if distance_km > 0.0 { distance_km } else { 21.1 };
    let base =
        current_5k_seconds as f64 * (distance / REFERENCE_DISTANCE_KM).powf(RIEGEL_EXPONENT);

    RacePrediction {
        optimistic_seconds: (base * 0.95).round() as i64,
        realistic_seconds: base.round() as i64,
        pessimistic_seconds: (base * 1.10).round() as i64,
    }
}

/// Grades a target time against the realistic prediction.
pub fn assess_goal_realism(target_seconds: i64, prediction: &RacePrediction) -> GoalRealism {
    let realistic = prediction.realistic_seconds as f64;
    let diff = (target_seconds as f64 - realistic) / realistic;

    if diff > 0.0 {
        GoalRealism::Achievable
    } else if diff > -0.10 {
        GoalRealism::Challenging
    } else if diff > -0.20 {
        GoalRealism::VeryAmbitious
    } else {
        GoalRealism::Unrealistic
    }
}

/// Formats seconds as "h:mm:ss", or "m:ss" under an hour.
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_the_distance_costs_more_than_double_the_time() {
        // 25:00 over 5K.
        let p = predict_race_time(1500, 10.0);
        assert!(p.realistic_seconds > 3000);
        assert!(p.realistic_seconds < 3300);
        assert!(p.optimistic_seconds < p.realistic_seconds);
        assert!(p.pessimistic_seconds > p.realistic_seconds);
    }

    #[test]
    fn five_k_predicts_itself() {
        let p = predict_race_time(1500, 5.0);
        assert_eq!(p.realistic_seconds, 1500);
    }

    #[test]
    fn non_positive_distance_falls_back_to_half_marathon() {
        assert_eq!(predict_race_time(1500, 0.0), predict_race_time(1500, 21.1));
    }

    #[test]
    fn grades_follow_the_gap_to_the_prediction() {
        let p = predict_race_time(1500, 10.0);
        let realistic = p.realistic_seconds;
        assert_eq!(assess_goal_realism(realistic + 300, &p), GoalRealism::Achievable);
        assert_eq!(
            assess_goal_realism(realistic - realistic / 20, &p),
            GoalRealism::Challenging
        );
        assert_eq!(
            assess_goal_realism(realistic - realistic * 15 / 100, &p),
            GoalRealism::VeryAmbitious
        );
        assert_eq!(
            assess_goal_realism(realistic - realistic * 30 / 100, &p),
            GoalRealism::Unrealistic
        );
    }

    #[test]
    fn formats_durations_with_and_without_hours() {
        assert_eq!(format_duration(1500), "25:00");
        assert_eq!(format_duration(5400), "1:30:00");
        assert_eq!(format_duration(3661), "1:01:01");
    }
}
