// ABOUTME: Plain-text rendering of reconciliation results for the CLI
// ABOUTME: Formats the goal/actual/deviation table, tolerance verdict, and adjustment plan
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Report rendering.

use std::fmt::Write;

use crate::models::ReconciliationResult;

const RULE_HEAVY: &str = "═══════════════════════════════════════════════";
const RULE_LIGHT: &str = "───────────────────────────────────────────────";

/// Render the status report: the goal/actual/deviation table, the
/// tolerance verdict, and ranked suggestions when the verdict is
/// off-track.
#[must_use]
pub fn format_status(result: &ReconciliationResult) -> String {
    let goals = &result.goals;
    let average = &result.average_consumed;
    let deviation = &result.deviation;

    let mut out = String::new();
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "            MACROFIX STATUS REPORT");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Date: {}", result.as_of.format("%B %d, %Y"));
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 MACRO COMPARISON");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "           Goal      Actual    Deviation");
    let _ = writeln!(
        out,
        "Protein:   {:>6.1}g   {:>6.1}g   {:>+6.1}%",
        goals.daily_protein, average.protein, deviation.protein_pct
    );
    let _ = writeln!(
        out,
        "Fat:       {:>6.1}g   {:>6.1}g   {:>+6.1}%",
        goals.daily_fat, average.fat, deviation.fat_pct
    );
    let _ = writeln!(
        out,
        "Carbs:     {:>6.1}g   {:>6.1}g   {:>+6.1}%",
        goals.daily_carbs, average.carbs, deviation.carbs_pct
    );
    let _ = writeln!(
        out,
        "Calories:  {:>6.0}    {:>6.0}    {:>+6.1}%",
        goals.daily_calories,
        average.calories(),
        deviation.calories_pct
    );
    let _ = writeln!(out);

    if result.within_tolerance {
        let _ = writeln!(out, "✓ STATUS: Within tolerance - On track!");
    } else {
        let _ = writeln!(out, "⚠ STATUS: Outside tolerance - Adjustments recommended");
        let _ = writeln!(out, "  Worst macro deviation: {:.1}%", deviation.max_deviation());

        if !result.plan.suggestions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "📋 RECOMMENDED FOODS");
            let _ = writeln!(out, "{RULE_LIGHT}");
            for (index, suggestion) in result.plan.suggestions.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} (score: {:.2})",
                    index + 1,
                    suggestion.food_name,
                    suggestion.score
                );
                let _ = writeln!(out, "   {}", suggestion.reason);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE_HEAVY}");
    out
}

/// Render the reconcile report: the status report plus an adjustment plan
/// section when the verdict is off-track and suggestions exist.
#[must_use]
pub fn format_reconcile(result: &ReconciliationResult) -> String {
    let mut out = format_status(result);

    if !result.within_tolerance && !result.plan.suggestions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "🍽️ ADJUSTMENT PLAN");
        let _ = writeln!(out, "{RULE_LIGHT}");
        let _ = writeln!(out, "Add the following meals to get back on track:");
        let _ = writeln!(out);
        for suggestion in &result.plan.suggestions {
            let _ = writeln!(out, "  • {}", suggestion.food_name);
        }
    }

    out
}
