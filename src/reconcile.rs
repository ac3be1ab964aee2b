// ABOUTME: The reconciliation pipeline from stored history to an adjustment plan
// ABOUTME: Chains averaging, deviation measurement, tolerance check, and candidate ranking
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Reconciliation Pipeline
//!
//! One call takes a window of daily records, the goals, and a candidate
//! catalog, and produces a [`ReconciliationResult`]: the averaged intake,
//! its deviation from the goals, the tolerance verdict, and a ranked
//! adjustment plan.
//!
//! The pipeline is total. Empty history averages to zero, an empty catalog
//! yields an empty plan, and no step can fail. Validating goals is the
//! caller's job before invoking [`Reconciler::reconcile`].

use chrono::Utc;

use crate::deviation::calculate_deviation;
use crate::history;
use crate::models::{
    AdjustmentPlan, CandidateFood, DailyRecord, NutritionGoals, ReconciliationResult,
};
use crate::scoring::{RecipeScorer, ScoringPolicy};

/// Runs reconciliation passes with a fixed scoring policy
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    scorer: RecipeScorer,
}

impl Reconciler {
    /// Reconciler with the default scoring policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler with an injected scoring policy
    #[must_use]
    pub const fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            scorer: RecipeScorer::with_policy(policy),
        }
    }

    /// Average `history`, measure its deviation from `goals`, and rank
    /// `candidates` into an adjustment plan.
    ///
    /// `tolerance_pct` bounds each macro deviation (inclusive) for the
    /// on-track verdict; `suggestion_limit` caps the plan length. The
    /// result is stamped with the current time.
    #[must_use]
    pub fn reconcile(
        &self,
        history: &[DailyRecord],
        goals: &NutritionGoals,
        candidates: &[CandidateFood],
        tolerance_pct: f64,
        suggestion_limit: usize,
    ) -> ReconciliationResult {
        let average_consumed = history::average(history);
        let deviation = calculate_deviation(goals, &average_consumed);
        let within_tolerance = deviation.is_within_tolerance(tolerance_pct);
        let suggestions = self.scorer.select_top(&deviation, candidates, suggestion_limit);

        ReconciliationResult {
            as_of: Utc::now(),
            average_consumed,
            goals: *goals,
            deviation,
            plan: AdjustmentPlan {
                deviation,
                suggestions,
            },
            within_tolerance,
        }
    }
}
