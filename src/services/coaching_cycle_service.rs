use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::adaptation::{calculate_adaptation, AdaptationDecision};
use crate::engine::calendar::{monday_of_week, next_monday_from, remaining_week_dates, week_dates};
use crate::engine::compliance::{calculate_compliance, ComplianceReport};
use crate::engine::plan_builder::{build_weekly_plan, BuildPlanInput};
use crate::engine::training_index::{calculate_training_index, TrainingIndex};
use crate::models::{AthleteProfile, Phase, WeeklyPlan};
use crate::services::{
    AthleteProfileService, StrategyService, TrainingLogService, WeeklyPlanService,
};

/// Fitness window of the training index; log fetches cover this much history.
const INDEX_WINDOW_DAYS: i64 = 42;

/// Everything the weekly feedback cycle produced for one athlete. Handed to
/// the rendering collaborator; not persisted beyond the plan itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCycleReport {
    pub athlete_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub compliance: ComplianceReport,
    pub index: TrainingIndex,
    pub decision: AdaptationDecision,
    pub next_plan: WeeklyPlan,
}

/// Tally of one sweep over all onboarded athletes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The composition root of the feedback loop: evaluate last week, decide the
/// adjustment, build and persist next week's plan.
#[derive(Clone)]
pub struct CoachingCycleService {
    profiles: AthleteProfileService,
    logs: TrainingLogService,
    strategies: StrategyService,
    plans: WeeklyPlanService,
}

impl CoachingCycleService {
    pub fn new(db: PgPool) -> Self {
        Self {
            profiles: AthleteProfileService::new(db.clone()),
            logs: TrainingLogService::new(db.clone()),
            strategies: StrategyService::new(db.clone()),
            plans: WeeklyPlanService::new(db),
        }
    }

    async fn active_phase(
        &self,
        athlete_id: Uuid,
        on: NaiveDate,
    ) -> Result<Option<Phase>> {
        match self.strategies.active_strategy(athlete_id).await? {
            Some(strategy) => {
                let (phase, _week) = strategy.resolve(on)?;
                Ok(phase)
            }
            None => Ok(None),
        }
    }

    /// Runs the full feedback cycle for one athlete: compliance over the
    /// current week's plan, adaptation decision, next week's plan, upsert.
    ///
    /// Returns `Ok(None)` when the athlete has no plan for the current week;
    /// there is nothing to evaluate and no feedback to apply. The single
    /// plan upsert at the end means a failed run leaves no partial state.
    pub async fn run_cycle_for(
        &self,
        profile: &AthleteProfile,
        now: DateTime<Utc>,
    ) -> Result<Option<WeeklyCycleReport>> {
        let today = now.date_naive();
        let week_start = monday_of_week(today);
        let week_end = week_start + Duration::days(6);

        let Some(record) = self.plans.plan_by_week_start(profile.id, week_start).await? else {
            return Ok(None);
        };
        let plan = record.plan()?;

        let week_logs = self.logs.logs_in_range(profile.id, week_start, week_end).await?;
        let compliance = calculate_compliance(&plan, &week_logs);

        let index_logs = self
            .logs
            .logs_in_range(profile.id, today - Duration::days(INDEX_WINDOW_DAYS - 1), today)
            .await?;
        let index = calculate_training_index(&index_logs, today);

        let weeks_since_recovery = self.plans.weeks_since_recovery(profile.id).await?;
        let decision = calculate_adaptation(&compliance, weeks_since_recovery, Some(index.form));

        let next_monday = week_start + Duration::days(7);
        let dates = week_dates(next_monday);
        let phase = self.active_phase(profile.id, next_monday).await?;

        let next_plan = build_weekly_plan(BuildPlanInput {
            profile,
            dates: &dates,
            phase: phase.as_ref(),
            decision: Some(&decision),
            prior_compliance: Some(compliance.compliance_percent),
            built_at: now,
        });
        self.plans.upsert_plan(profile.id, &next_plan).await?;

        info!(
            athlete_id = %profile.id,
            compliance = compliance.compliance_percent,
            adjustment = decision.volume_adjustment,
            "planned next week"
        );

        Ok(Some(WeeklyCycleReport {
            athlete_id: profile.id,
            week_start,
            week_end,
            compliance,
            index,
            decision,
            next_plan,
        }))
    }

    /// Builds an athlete's first plan: either the remaining days of the
    /// current week or the next full week. No feedback is applied; there is
    /// no prior plan to evaluate.
    pub async fn initial_plan_for(
        &self,
        profile: &AthleteProfile,
        now: DateTime<Utc>,
        start_this_week: bool,
    ) -> Result<WeeklyPlan> {
        let today = now.date_naive();
        let dates = if start_this_week {
            remaining_week_dates(today)
        } else {
            week_dates(next_monday_from(today))
        };
        let first_day = dates.first().copied().unwrap_or(today);
        let phase = self.active_phase(profile.id, first_day).await?;

        let plan = build_weekly_plan(BuildPlanInput {
            profile,
            dates: &dates,
            phase: phase.as_ref(),
            decision: None,
            prior_compliance: None,
            built_at: now,
        });
        self.plans.upsert_plan(profile.id, &plan).await?;

        Ok(plan)
    }

    /// Runs the cycle for every onboarded athlete. Pipelines run
    /// concurrently and independently; one athlete's failure is logged and
    /// never aborts the others.
    pub async fn run_weekly_cycle(&self, now: DateTime<Utc>) -> Result<CycleOutcome> {
        let athletes = self.profiles.list_onboarded().await?;
        info!(athletes = athletes.len(), "starting weekly coaching cycle");

        let results = futures::future::join_all(
            athletes
                .iter()
                .map(|profile| async move { (profile.id, self.run_cycle_for(profile, now).await) }),
        )
        .await;

        let mut outcome = CycleOutcome::default();
        for (athlete_id, result) in results {
            match result {
                Ok(Some(_)) => outcome.planned += 1,
                Ok(None) => outcome.skipped += 1,
                Err(err) => {
                    outcome.failed += 1;
                    warn!(athlete_id = %athlete_id, "weekly cycle failed: {err:#}");
                }
            }
        }

        info!(
            planned = outcome.planned,
            skipped = outcome.skipped,
            failed = outcome.failed,
            "weekly coaching cycle finished"
        );
        Ok(outcome)
    }
}
