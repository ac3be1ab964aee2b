// ABOUTME: Scores candidate foods by how well they close the current macro gap
// ABOUTME: Houses the ScoringPolicy weights and the RecipeScorer rank/reason logic
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Candidate Scoring
//!
//! The scorer looks at one food at a time against the current
//! [`DeviationVector`] and answers "how much would adding this help".
//! Protein carries half the weight, fat and carbs a quarter each; a macro
//! only earns points while it is in deficit, and heavy fat or carbs under
//! a surplus cost a flat penalty. Scores always land in `[0, 1]`.
//!
//! All thresholds live in [`ScoringPolicy`] so tests and experiments can
//! inject their own numbers instead of editing constants.

use crate::models::{CandidateFood, DeviationVector, NutrientProfile, Suggestion};

/// Tunable weights and thresholds for [`RecipeScorer`].
///
/// The defaults are the production values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    /// Total absolute macro deviation (percentage points) below which the
    /// day counts as on goal and every candidate gets `flat_score`
    pub at_goal_total_pct: f64,
    /// Score handed out when adding food cannot help
    pub flat_score: f64,
    /// Weight of the protein contribution
    pub protein_weight: f64,
    /// Grams of protein that earn the full protein contribution
    pub protein_ceiling_g: f64,
    /// Weight of the fat contribution
    pub fat_weight: f64,
    /// Grams of fat that earn the full fat contribution
    pub fat_ceiling_g: f64,
    /// Weight of the carb contribution
    pub carbs_weight: f64,
    /// Grams of carbs that earn the full carb contribution
    pub carbs_ceiling_g: f64,
    /// Surplus percentage beyond which heavy foods are penalized
    pub surplus_threshold_pct: f64,
    /// Fat grams that count as heavy under a fat surplus
    pub heavy_fat_g: f64,
    /// Carb grams that count as heavy under a carb surplus
    pub heavy_carbs_g: f64,
    /// Penalty subtracted per heavy macro under surplus
    pub surplus_penalty: f64,
    /// Deficit percentage that makes a macro worth naming in the reason
    pub reason_deficit_pct: f64,
    /// Protein grams that justify the high-protein reason
    pub reason_protein_g: f64,
    /// Carb grams that justify the high-carb reason
    pub reason_carbs_g: f64,
    /// Fat grams that justify the high-fat reason
    pub reason_fat_g: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            at_goal_total_pct: 5.0,
            flat_score: 0.1,
            protein_weight: 0.5,
            protein_ceiling_g: 40.0,
            fat_weight: 0.25,
            fat_ceiling_g: 25.0,
            carbs_weight: 0.25,
            carbs_ceiling_g: 50.0,
            surplus_threshold_pct: 10.0,
            heavy_fat_g: 20.0,
            heavy_carbs_g: 30.0,
            surplus_penalty: 0.1,
            reason_deficit_pct: 10.0,
            reason_protein_g: 20.0,
            reason_carbs_g: 30.0,
            reason_fat_g: 15.0,
        }
    }
}

/// Ranks candidate foods against a deviation vector
#[derive(Debug, Clone, Default)]
pub struct RecipeScorer {
    policy: ScoringPolicy,
}

impl RecipeScorer {
    /// Scorer with the default policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer with an injected policy
    #[must_use]
    pub const fn with_policy(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    /// How well `macros` addresses `deviation`, in `[0, 1]`.
    ///
    /// When the day is already on goal, or in surplus on all three macros,
    /// every food scores the flat floor: adding food cannot help. Otherwise
    /// each deficient macro contributes its weight scaled linearly up to
    /// the gram ceiling, and heavy fat or carbs under a surplus subtract
    /// the flat penalty.
    #[must_use]
    pub fn score(&self, deviation: &DeviationVector, macros: &NutrientProfile) -> f64 {
        let p = &self.policy;

        // Nothing to fix: any food is equally unhelpful
        if deviation.total_macro_deviation() < p.at_goal_total_pct {
            return p.flat_score;
        }
        // Over on every macro: adding food only makes it worse
        if deviation.surplus_on_all_macros() {
            return p.flat_score;
        }

        let mut score = 0.0;

        if deviation.protein_pct < 0.0 && macros.protein > 0.0 {
            score += p.protein_weight * (macros.protein / p.protein_ceiling_g).min(1.0);
        }

        if deviation.fat_pct < 0.0 && macros.fat > 0.0 {
            score += p.fat_weight * (macros.fat / p.fat_ceiling_g).min(1.0);
        } else if deviation.fat_pct > p.surplus_threshold_pct && macros.fat > p.heavy_fat_g {
            score -= p.surplus_penalty;
        }

        if deviation.carbs_pct < 0.0 && macros.carbs > 0.0 {
            score += p.carbs_weight * (macros.carbs / p.carbs_ceiling_g).min(1.0);
        } else if deviation.carbs_pct > p.surplus_threshold_pct && macros.carbs > p.heavy_carbs_g {
            score -= p.surplus_penalty;
        }

        score.clamp(0.0, 1.0)
    }

    /// One-line justification for suggesting a food under `deviation`.
    ///
    /// Macros are checked protein first, then carbs, then fat; the first
    /// one that is both meaningfully deficient and well covered by the
    /// food names the reason. Everything else is a balanced pick.
    #[must_use]
    pub fn reason_for(&self, deviation: &DeviationVector, macros: &NutrientProfile) -> String {
        let p = &self.policy;

        if deviation.protein_pct < -p.reason_deficit_pct && macros.protein > p.reason_protein_g {
            "High protein to address deficit".to_owned()
        } else if deviation.carbs_pct < -p.reason_deficit_pct && macros.carbs > p.reason_carbs_g {
            "High carbs to address deficit".to_owned()
        } else if deviation.fat_pct < -p.reason_deficit_pct && macros.fat > p.reason_fat_g {
            "High fat to address deficit".to_owned()
        } else {
            "Balanced macros".to_owned()
        }
    }

    /// Rank `candidates` against `deviation` and keep the best `limit`.
    ///
    /// The sort is stable and descending by score, so equally scored
    /// candidates keep their catalog order. Asking for more suggestions
    /// than there are candidates returns them all.
    #[must_use]
    pub fn select_top(
        &self,
        deviation: &DeviationVector,
        candidates: &[CandidateFood],
        limit: usize,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = candidates
            .iter()
            .map(|food| Suggestion {
                food_name: food.name.clone(),
                reason: self.reason_for(deviation, &food.macros),
                score: self.score(deviation, &food.macros),
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn deviation(protein_pct: f64, fat_pct: f64, carbs_pct: f64) -> DeviationVector {
        DeviationVector {
            protein_pct,
            fat_pct,
            carbs_pct,
            calories_pct: 0.0,
        }
    }

    #[test]
    fn protein_deficit_rewards_high_protein_food() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(-25.0, 5.0, 0.0), &NutrientProfile::new(45.0, 10.0, 5.0));
        // 45g clears the 40g ceiling: full protein weight, nothing else
        assert!(close(score, 0.5));
    }

    #[test]
    fn balanced_deficit_sums_weighted_contributions() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(
            &deviation(-10.0, -10.0, -10.0),
            &NutrientProfile::new(30.0, 15.0, 40.0),
        );
        // 0.5*(30/40) + 0.25*(15/25) + 0.25*(40/50)
        assert!(close(score, 0.725));
    }

    #[test]
    fn on_goal_day_scores_flat_floor() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(0.0, 0.0, 0.0), &NutrientProfile::new(45.0, 10.0, 50.0));
        assert!(close(score, 0.1));
    }

    #[test]
    fn small_total_deviation_counts_as_on_goal() {
        let scorer = RecipeScorer::new();
        // 2 + 1 + 1.5 = 4.5, under the 5.0 threshold
        let score = scorer.score(&deviation(-2.0, 1.0, -1.5), &NutrientProfile::new(45.0, 0.0, 0.0));
        assert!(close(score, 0.1));
    }

    #[test]
    fn surplus_on_all_macros_scores_flat_floor() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(20.0, 20.0, 20.0), &NutrientProfile::new(50.0, 25.0, 60.0));
        assert!(close(score, 0.1));
    }

    #[test]
    fn heavy_fat_under_fat_surplus_is_penalized() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(-20.0, 15.0, 0.0), &NutrientProfile::new(20.0, 30.0, 10.0));
        // 0.5*(20/40) - 0.1 fat penalty
        assert!(close(score, 0.15));
    }

    #[test]
    fn penalties_clamp_at_zero() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(-1.0, 15.0, 15.0), &NutrientProfile::new(0.5, 30.0, 40.0));
        assert!(close(score, 0.0));
    }

    #[test]
    fn overweight_policy_still_caps_at_one() {
        let scorer = RecipeScorer::with_policy(ScoringPolicy {
            protein_weight: 0.8,
            fat_weight: 0.5,
            carbs_weight: 0.5,
            ..ScoringPolicy::default()
        });
        // Every ceiling cleared under a full deficit: 0.8 + 0.5 + 0.5
        let score = scorer.score(
            &deviation(-20.0, -20.0, -20.0),
            &NutrientProfile::new(45.0, 30.0, 60.0),
        );
        assert!(close(score, 1.0));
    }

    #[test]
    fn food_with_no_macros_cannot_help_a_deficit() {
        let scorer = RecipeScorer::new();
        let score = scorer.score(&deviation(-20.0, -20.0, -20.0), &NutrientProfile::default());
        assert!(close(score, 0.0));
    }

    #[test]
    fn contribution_caps_at_the_gram_ceiling() {
        let scorer = RecipeScorer::new();
        let dev = deviation(-30.0, 0.0, 0.0);
        let at_ceiling = scorer.score(&dev, &NutrientProfile::new(40.0, 0.0, 0.0));
        let over_ceiling = scorer.score(&dev, &NutrientProfile::new(80.0, 0.0, 0.0));
        assert!(close(at_ceiling, over_ceiling));
        assert!(close(over_ceiling, 0.5));
    }

    #[test]
    fn custom_policy_changes_the_ceiling() {
        let scorer = RecipeScorer::with_policy(ScoringPolicy {
            protein_ceiling_g: 80.0,
            ..ScoringPolicy::default()
        });
        let score = scorer.score(&deviation(-30.0, 0.0, 0.0), &NutrientProfile::new(40.0, 0.0, 0.0));
        // 40g is now only half way to the ceiling
        assert!(close(score, 0.25));
    }

    #[test]
    fn reason_prefers_protein_over_carbs_over_fat() {
        let scorer = RecipeScorer::new();
        let dev = deviation(-15.0, -15.0, -15.0);

        let all_macro = NutrientProfile::new(25.0, 20.0, 35.0);
        assert_eq!(scorer.reason_for(&dev, &all_macro), "High protein to address deficit");

        let no_protein = NutrientProfile::new(10.0, 20.0, 35.0);
        assert_eq!(scorer.reason_for(&dev, &no_protein), "High carbs to address deficit");

        let fat_only = NutrientProfile::new(10.0, 20.0, 10.0);
        assert_eq!(scorer.reason_for(&dev, &fat_only), "High fat to address deficit");
    }

    #[test]
    fn mild_deviation_reads_balanced() {
        let scorer = RecipeScorer::new();
        let reason = scorer.reason_for(&deviation(-5.0, 0.0, 0.0), &NutrientProfile::new(50.0, 0.0, 0.0));
        assert_eq!(reason, "Balanced macros");
    }

    #[test]
    fn select_top_orders_by_score_descending() {
        let scorer = RecipeScorer::new();
        let candidates = vec![
            CandidateFood {
                name: "High Carb Rice".into(),
                macros: NutrientProfile::new(5.0, 2.0, 80.0),
            },
            CandidateFood {
                name: "High Protein Chicken".into(),
                macros: NutrientProfile::new(50.0, 8.0, 0.0),
            },
            CandidateFood {
                name: "Balanced Meal".into(),
                macros: NutrientProfile::new(25.0, 15.0, 30.0),
            },
        ];

        let suggestions = scorer.select_top(&deviation(-30.0, 0.0, 0.0), &candidates, 3);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].food_name, "High Protein Chicken");
        assert_eq!(suggestions[2].food_name, "High Carb Rice");
        assert!(suggestions[0].score >= suggestions[1].score);
        assert!(suggestions[1].score >= suggestions[2].score);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let scorer = RecipeScorer::new();
        let macros = NutrientProfile::new(30.0, 10.0, 20.0);
        let candidates = vec![
            CandidateFood {
                name: "First".into(),
                macros,
            },
            CandidateFood {
                name: "Second".into(),
                macros,
            },
            CandidateFood {
                name: "Third".into(),
                macros,
            },
        ];

        let suggestions = scorer.select_top(&deviation(-20.0, -5.0, -10.0), &candidates, 3);

        assert_eq!(suggestions[0].food_name, "First");
        assert_eq!(suggestions[1].food_name, "Second");
        assert_eq!(suggestions[2].food_name, "Third");
    }

    #[test]
    fn limit_truncates_and_tolerates_excess() {
        let scorer = RecipeScorer::new();
        let candidates = vec![
            CandidateFood {
                name: "A".into(),
                macros: NutrientProfile::new(40.0, 0.0, 0.0),
            },
            CandidateFood {
                name: "B".into(),
                macros: NutrientProfile::new(20.0, 0.0, 0.0),
            },
        ];
        let dev = deviation(-30.0, 0.0, 0.0);

        assert_eq!(scorer.select_top(&dev, &candidates, 1).len(), 1);
        assert_eq!(scorer.select_top(&dev, &candidates, 5).len(), 2);
        assert!(scorer.select_top(&dev, &candidates, 0).is_empty());
    }

    #[test]
    fn empty_catalog_yields_no_suggestions() {
        let scorer = RecipeScorer::new();
        assert!(scorer.select_top(&deviation(-30.0, 0.0, 0.0), &[], 3).is_empty());
    }
}
