// ABOUTME: Main library entry point for the macrofix nutrition reconciliation engine
// ABOUTME: Wires together models, storage, sync, and the reconciliation pipeline
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Macrofix
//!
//! A nutrition reconciliation engine. Macrofix keeps a local store of
//! daily macro intake synced from an external tracker, compares a recent
//! window of it against daily goals, and ranks candidate foods by how well
//! they would close the gap.
//!
//! ## Pipeline
//!
//! 1. **Sync**: pull per-day totals from a [`sync::NutritionSource`] into
//!    the date-keyed [`store::StateStore`]
//! 2. **Average**: mean the stored window with [`history::average`]
//! 3. **Deviate**: measure goal distance with
//!    [`deviation::calculate_deviation`]
//! 4. **Plan**: rank candidates with [`scoring::RecipeScorer`] inside
//!    [`reconcile::Reconciler`]
//!
//! Calories are always derived from macro grams (4/9/4 per gram) and never
//! stored as independent state.
//!
//! ## Example
//!
//! ```
//! use macrofix::models::{CandidateFood, DailyRecord, NutrientProfile, NutritionGoals};
//! use macrofix::reconcile::Reconciler;
//! use chrono::{NaiveDate, Utc};
//!
//! let goals = NutritionGoals::new(180.0, 60.0, 250.0, 2500.0);
//! goals.validate()?;
//!
//! let history = vec![DailyRecord {
//!     date: NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("bad date")?,
//!     consumed: NutrientProfile::new(140.0, 55.0, 220.0),
//!     synced_at: Utc::now(),
//! }];
//! let catalog = vec![CandidateFood {
//!     name: "Grilled Chicken Breast".into(),
//!     macros: NutrientProfile::new(45.0, 8.0, 2.0),
//! }];
//!
//! let result = Reconciler::new().reconcile(&history, &goals, &catalog, 10.0, 3);
//! assert!(!result.within_tolerance);
//! assert_eq!(result.plan.suggestions[0].food_name, "Grilled Chicken Breast");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod deviation;
pub mod errors;
pub mod history;
pub mod logging;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod scoring;
pub mod store;
pub mod sync;

pub use errors::{AppError, AppResult};
