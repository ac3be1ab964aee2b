// ABOUTME: Averaging of consumed macros over a window of daily records
// ABOUTME: Produces the mean NutrientProfile the deviation step compares against goals
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! History aggregation.

use crate::models::{DailyRecord, NutrientProfile};

/// Arithmetic mean of consumed macros across `records`.
///
/// Every day weighs the same; recency does not matter. Days missing from
/// the window are simply not in the slice and do not drag the mean down.
/// An empty slice averages to the zero profile, which downstream reads as
/// a full deficit.
#[must_use]
pub fn average(records: &[DailyRecord]) -> NutrientProfile {
    if records.is_empty() {
        return NutrientProfile::default();
    }

    let mut total = NutrientProfile::default();
    for record in records {
        total.protein += record.consumed.protein;
        total.fat += record.consumed.fat;
        total.carbs += record.consumed.carbs;
    }

    let count = records.len() as f64;
    NutrientProfile::new(total.protein / count, total.fat / count, total.carbs / count)
}
