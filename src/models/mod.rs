// Data models for athletes, strategies, plans and logs

pub mod athlete_profile;
pub mod onboarding;
pub mod training_log;
pub mod training_strategy;
pub mod weekly_plan;

pub use athlete_profile::*;
pub use onboarding::*;
pub use training_log::*;
pub use training_strategy::*;
pub use weekly_plan::*;
