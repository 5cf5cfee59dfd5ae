//! Turns a compliance report and fatigue signals into next week's
//! volume adjustment.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::engine::compliance::ComplianceReport;
use crate::models::WorkoutType;

/// A deload week is forced after this many consecutive loaded weeks.
pub const RECOVERY_INTERVAL_WEEKS: u32 = 4;

/// Advisory output of the feedback controller, attached to the next plan's
/// metadata. Never retroactively alters a past plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationDecision {
    /// Signed volume change in percent.
    pub volume_adjustment: i32,
    pub reason: String,
    pub is_recovery_week: bool,
    /// Demote interval sessions to easy runs next week.
    pub remove_intervals: bool,
}

fn missed_type_penalty(missed: &[WorkoutType]) -> i32 {
    let missed: HashSet<_> = missed.iter().copied().collect();
    let mut penalty = 0;
    if missed.contains(&WorkoutType::Intervals) {
        penalty += 15;
    }
    if missed.contains(&WorkoutType::Tempo) {
        penalty += 10;
    }
    if missed.contains(&WorkoutType::LongRun) {
        penalty += 10;
    }
    if missed.contains(&WorkoutType::EasyRun) {
        penalty += 5;
    }
    penalty
}

/// Decides the adjustment for the coming week.
///
/// The scheduled deload takes priority over everything else. Otherwise the
/// compliance percentage, discounted for missed key sessions, selects the
/// adjustment band; a known form below -5 then caps the result at -10.
pub fn calculate_adaptation(
    compliance: &ComplianceReport,
    weeks_since_recovery: u32,
    form: Option<f64>,
) -> AdaptationDecision {
    if weeks_since_recovery >= RECOVERY_INTERVAL_WEEKS {
        return AdaptationDecision {
            volume_adjustment: -30,
            reason: "Scheduled deload week".to_string(),
            is_recovery_week: true,
            remove_intervals: false,
        };
    }

    let score = (compliance.compliance_percent - missed_type_penalty(&compliance.missed_types)).max(0);

    let mut decision = if score > 110 {
        AdaptationDecision {
            volume_adjustment: 8,
            reason: "Week completed ahead of plan".to_string(),
            is_recovery_week: false,
            remove_intervals: false,
        }
    } else if score >= 90 {
        AdaptationDecision {
            volume_adjustment: 0,
            reason: "Week completed on plan".to_string(),
            is_recovery_week: false,
            remove_intervals: false,
        }
    } else if score >= 70 {
        AdaptationDecision {
            volume_adjustment: -8,
            reason: "Week partially completed".to_string(),
            is_recovery_week: false,
            remove_intervals: false,
        }
    } else {
        AdaptationDecision {
            volume_adjustment: -15,
            reason: "Low completion, scaling volume back".to_string(),
            is_recovery_week: false,
            remove_intervals: true,
        }
    };

    if let Some(form) = form {
        if form < -5.0 {
            decision.volume_adjustment = decision.volume_adjustment.min(-10);
            decision.reason.push_str("; high fatigue");
        }
    }

    decision
}
