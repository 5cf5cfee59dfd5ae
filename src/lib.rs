//! Periodized run-coaching engine.
//!
//! Turns an athlete profile and a 12-week macro-cycle into concrete weekly
//! schedules, and closes the feedback loop: compliance against the training
//! log drives a volume adjustment for the following week. The engine itself
//! is deterministic; the services layer connects it to the Postgres stores
//! and the weekly scheduler.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
