// Store-facing services and the weekly coaching pipeline

pub mod athlete_profile_service;
pub mod background_job_service;
pub mod coaching_cycle_service;
pub mod strategy_service;
pub mod training_log_service;
pub mod weekly_plan_service;

pub use athlete_profile_service::AthleteProfileService;
pub use background_job_service::BackgroundJobService;
pub use coaching_cycle_service::{CoachingCycleService, CycleOutcome, WeeklyCycleReport};
pub use strategy_service::StrategyService;
pub use training_log_service::TrainingLogService;
pub use weekly_plan_service::WeeklyPlanService;
