// ABOUTME: Core data models for nutrition tracking and reconciliation
// ABOUTME: Defines NutrientProfile, DailyRecord, NutritionGoals, DeviationVector and plan types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! Core types shared by every stage of the pipeline: what was eaten
//! ([`NutrientProfile`], [`DailyRecord`]), what should have been eaten
//! ([`NutritionGoals`]), how far apart the two are ([`DeviationVector`]),
//! and what to do about it ([`CandidateFood`], [`Suggestion`],
//! [`AdjustmentPlan`], [`ReconciliationResult`]).
//!
//! Calories are never independent state. Every calorie figure in the crate
//! is derived from macro grams via the Atwater factors, so stored records
//! cannot drift into claiming calorie totals their macros do not support.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Calories per gram of protein (Atwater factor)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Calories per gram of fat (Atwater factor)
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// Calories per gram of carbohydrate (Atwater factor)
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Macronutrient totals in grams, for a day of eating or a single food.
///
/// Calories are always computed from the macro fields and cannot be set
/// independently. Serialized envelopes include a `calories` field so
/// external readers see the full picture, but deserialization ignores the
/// stored number and recomputes it from the macros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "NutrientProfileRepr", into = "NutrientProfileRepr")]
pub struct NutrientProfile {
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
}

impl NutrientProfile {
    /// Profile from gram amounts
    #[must_use]
    pub const fn new(protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            protein,
            fat,
            carbs,
        }
    }

    /// Derived calorie total: `protein * 4 + fat * 9 + carbs * 4`
    #[must_use]
    pub fn calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN + self.fat * KCAL_PER_G_FAT + self.carbs * KCAL_PER_G_CARBS
    }
}

/// Wire shape of [`NutrientProfile`].
///
/// Keeps a readable `calories` field in stored envelopes without letting
/// it drift from the derived value.
#[derive(Serialize, Deserialize)]
struct NutrientProfileRepr {
    protein: f64,
    fat: f64,
    carbs: f64,
    #[serde(default)]
    calories: f64,
}

impl From<NutrientProfileRepr> for NutrientProfile {
    fn from(repr: NutrientProfileRepr) -> Self {
        // Stored calories are advisory only; the derived value wins
        Self::new(repr.protein, repr.fat, repr.carbs)
    }
}

impl From<NutrientProfile> for NutrientProfileRepr {
    fn from(profile: NutrientProfile) -> Self {
        Self {
            protein: profile.protein,
            fat: profile.fat,
            carbs: profile.carbs,
            calories: profile.calories(),
        }
    }
}

/// One day of synced consumption.
///
/// A date has at most one record; writing a record for an existing date
/// replaces it wholesale. Last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date the totals belong to
    pub date: NaiveDate,
    /// Macro totals consumed on that date
    pub consumed: NutrientProfile,
    /// When the sync pipeline wrote the record
    pub synced_at: DateTime<Utc>,
}

/// Daily macro and calorie targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoals {
    /// Daily protein target in grams
    pub daily_protein: f64,
    /// Daily fat target in grams
    pub daily_fat: f64,
    /// Daily carbohydrate target in grams
    pub daily_carbs: f64,
    /// Daily calorie target
    pub daily_calories: f64,
}

impl NutritionGoals {
    /// Goals from daily gram and calorie targets
    #[must_use]
    pub const fn new(daily_protein: f64, daily_fat: f64, daily_carbs: f64, daily_calories: f64) -> Self {
        Self {
            daily_protein,
            daily_fat,
            daily_carbs,
            daily_calories,
        }
    }

    /// Check the targets are usable for reconciliation.
    ///
    /// Protein and calories must be strictly positive. Fat and carbs may
    /// be zero but not negative.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidGoals`] naming the offending target.
    pub fn validate(&self) -> AppResult<()> {
        if self.daily_protein <= 0.0 {
            return Err(AppError::invalid_goals(
                "daily protein must be greater than zero",
            ));
        }
        if self.daily_calories <= 0.0 {
            return Err(AppError::invalid_goals(
                "daily calories must be greater than zero",
            ));
        }
        if self.daily_fat < 0.0 {
            return Err(AppError::invalid_goals("daily fat must not be negative"));
        }
        if self.daily_carbs < 0.0 {
            return Err(AppError::invalid_goals("daily carbs must not be negative"));
        }
        Ok(())
    }
}

/// Signed percentage deviation of actual intake from goals.
///
/// Positive values are surplus, negative values deficit. A field with a
/// zero goal reports zero deviation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviationVector {
    /// Protein deviation in percent
    pub protein_pct: f64,
    /// Fat deviation in percent
    pub fat_pct: f64,
    /// Carbohydrate deviation in percent
    pub carbs_pct: f64,
    /// Calorie deviation in percent, informational only
    pub calories_pct: f64,
}

impl DeviationVector {
    /// True when every macro deviation sits within `tolerance_pct`,
    /// boundary inclusive. Calories never gate this check.
    #[must_use]
    pub fn is_within_tolerance(&self, tolerance_pct: f64) -> bool {
        self.protein_pct.abs() <= tolerance_pct
            && self.fat_pct.abs() <= tolerance_pct
            && self.carbs_pct.abs() <= tolerance_pct
    }

    /// Largest absolute macro deviation, for reporting
    #[must_use]
    pub fn max_deviation(&self) -> f64 {
        self.protein_pct
            .abs()
            .max(self.fat_pct.abs())
            .max(self.carbs_pct.abs())
    }

    /// Sum of absolute macro deviations.
    ///
    /// The scorer treats small totals as already on goal.
    #[must_use]
    pub fn total_macro_deviation(&self) -> f64 {
        self.protein_pct.abs() + self.fat_pct.abs() + self.carbs_pct.abs()
    }

    /// True when intake is in surplus on protein, fat, and carbs at once
    #[must_use]
    pub fn surplus_on_all_macros(&self) -> bool {
        self.protein_pct > 0.0 && self.fat_pct > 0.0 && self.carbs_pct > 0.0
    }
}

/// Catalog entry eligible for recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFood {
    /// Display name
    pub name: String,
    /// Macro profile of one serving
    pub macros: NutrientProfile,
}

/// A ranked recommendation produced by the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Name of the suggested food
    pub food_name: String,
    /// One-line justification for the suggestion
    pub reason: String,
    /// Fit score in `[0, 1]`, higher is better
    pub score: f64,
}

/// Deviation snapshot plus the ranked suggestions to correct it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustmentPlan {
    /// Deviation the suggestions were ranked against
    pub deviation: DeviationVector,
    /// Descending by score; ties keep catalog order
    pub suggestions: Vec<Suggestion>,
}

/// Complete output of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// When the pass ran
    pub as_of: DateTime<Utc>,
    /// Arithmetic mean of the supplied history
    pub average_consumed: NutrientProfile,
    /// Goals the history was reconciled against
    pub goals: NutritionGoals,
    /// Deviation of the average from the goals
    pub deviation: DeviationVector,
    /// Ranked corrective suggestions
    pub plan: AdjustmentPlan,
    /// Verdict of the macro tolerance check
    pub within_tolerance: bool,
}
