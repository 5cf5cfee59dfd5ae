// The plan-generation and adaptation engine: pure, deterministic components
// composed by the services layer.

pub mod adaptation;
pub mod calendar;
pub mod compliance;
pub mod knowledge;
pub mod pace_zones;
pub mod plan_builder;
pub mod race_predictor;
pub mod strategy_builder;
pub mod training_index;

pub use adaptation::{calculate_adaptation, AdaptationDecision, RECOVERY_INTERVAL_WEEKS};
pub use compliance::{calculate_compliance, ComplianceReport};
pub use pace_zones::{format_pace, pace_to_speed_kmh, PaceZone, PaceZones, ZoneKind};
pub use plan_builder::{build_weekly_plan, BuildPlanInput};
pub use race_predictor::{assess_goal_realism, predict_race_time, GoalRealism, RacePrediction};
pub use strategy_builder::{build_phases, cycle_start_date, strategy_start_date};
pub use training_index::{calculate_training_index, FormStatus, TrainingIndex};
