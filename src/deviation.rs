// ABOUTME: Goal-versus-actual deviation calculation in signed percentages
// ABOUTME: Turns average intake and goals into the DeviationVector the scorer consumes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Deviation measurement.

use crate::models::{DeviationVector, NutrientProfile, NutritionGoals};

/// Percentage deviation of `actual` from `goals`, per field.
///
/// Each field is `(actual - goal) / goal * 100`: positive means surplus,
/// negative means deficit. A field with a zero goal reports zero deviation
/// rather than dividing by zero. The calorie deviation compares the
/// derived calorie figures and is informational only.
#[must_use]
pub fn calculate_deviation(goals: &NutritionGoals, actual: &NutrientProfile) -> DeviationVector {
    DeviationVector {
        protein_pct: pct_deviation(goals.daily_protein, actual.protein),
        fat_pct: pct_deviation(goals.daily_fat, actual.fat),
        carbs_pct: pct_deviation(goals.daily_carbs, actual.carbs),
        calories_pct: pct_deviation(goals.daily_calories, actual.calories()),
    }
}

fn pct_deviation(goal: f64, actual: f64) -> f64 {
    if goal == 0.0 {
        return 0.0;
    }
    ((actual - goal) / goal) * 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn exact_match_deviates_zero() {
        let goals = NutritionGoals::new(200.0, 80.0, 300.0, 2720.0);
        let actual = NutrientProfile::new(200.0, 80.0, 300.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.protein_pct, 0.0));
        assert!(close(deviation.fat_pct, 0.0));
        assert!(close(deviation.carbs_pct, 0.0));
        assert!(close(deviation.calories_pct, 0.0));
    }

    #[test]
    fn surplus_is_positive() {
        let goals = NutritionGoals::new(180.0, 60.0, 250.0, 2500.0);
        let actual = NutrientProfile::new(198.0, 60.0, 250.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.protein_pct, 10.0));

        let goals = NutritionGoals::new(200.0, 60.0, 250.0, 2500.0);
        let actual = NutrientProfile::new(250.0, 60.0, 250.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.protein_pct, 25.0));
    }

    #[test]
    fn deficit_is_negative() {
        let goals = NutritionGoals::new(180.0, 60.0, 250.0, 2500.0);
        let actual = NutrientProfile::new(144.0, 48.0, 200.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.protein_pct, -20.0));
        assert!(close(deviation.fat_pct, -20.0));
        assert!(close(deviation.carbs_pct, -20.0));
    }

    #[test]
    fn half_intake_is_minus_fifty() {
        let goals = NutritionGoals::new(200.0, 80.0, 300.0, 3000.0);
        let actual = NutrientProfile::new(100.0, 40.0, 150.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.protein_pct, -50.0));
        assert!(close(deviation.fat_pct, -50.0));
        assert!(close(deviation.carbs_pct, -50.0));
    }

    #[test]
    fn zero_goal_fields_report_zero_deviation() {
        let goals = NutritionGoals::new(150.0, 0.0, 250.0, 2000.0);
        let actual = NutrientProfile::new(150.0, 30.0, 200.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.fat_pct, 0.0));
        assert!(close(deviation.carbs_pct, -20.0));
    }

    #[test]
    fn calories_compare_derived_values() {
        let goals = NutritionGoals::new(180.0, 60.0, 250.0, 2000.0);
        // Derived: 150*4 + 50*9 + 200*4 = 1850, vs goal 2000 = -7.5%
        let actual = NutrientProfile::new(150.0, 50.0, 200.0);
        let deviation = calculate_deviation(&goals, &actual);

        assert!(close(deviation.calories_pct, -7.5));
    }
}
