//! Preparation comparison
//!
//! Signed per-field differences between two adjusted results. Positive means
//! the second side has more.

use serde::Serialize;

use crate::models::{
    AdjustedMicronutrient, AdjustedNutrition, BaseNutrition, PreparationSettings,
};
use super::engine::NutritionEngine;
use super::healthiness::{HealthinessRating, HealthinessScorer};

/// Difference in one micronutrient, matched by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicronutrientDelta {
    pub name: String,
    pub unit: String,
    pub delta: i64,
}

/// `b - a` for every nutrient field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientDelta {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub saturated_fat: i64,
    pub unsaturated_fat: i64,
    pub fiber: i64,
    pub sugar: i64,
    pub natural_sugar: i64,
    pub added_sugar: i64,
    pub sodium: i64,
    pub micronutrients: Vec<MicronutrientDelta>,
}

impl NutrientDelta {
    /// True when every field, micronutrients included, is zero
    pub fn is_unchanged(&self) -> bool {
        self.calories == 0
            && self.protein == 0
            && self.carbs == 0
            && self.fat == 0
            && self.saturated_fat == 0
            && self.unsaturated_fat == 0
            && self.fiber == 0
            && self.sugar == 0
            && self.natural_sugar == 0
            && self.added_sugar == 0
            && self.sodium == 0
            && self.micronutrients.iter().all(|m| m.delta == 0)
    }
}

/// Field-by-field `b - a`
///
/// Micronutrients keep `a`'s order, followed by any that only `b` lists. A
/// name listed more than once pairs its entries by position: the second
/// "Iron" in `a` diffs against the second "Iron" in `b`. A micronutrient
/// missing on one side counts as zero there.
pub fn diff(a: &AdjustedNutrition, b: &AdjustedNutrition) -> NutrientDelta {
    let mut micronutrients: Vec<MicronutrientDelta> = a
        .micronutrients
        .iter()
        .enumerate()
        .map(|(i, ma)| {
            let k = occurrence(&a.micronutrients, i);
            let b_amount = nth_named(&b.micronutrients, &ma.name, k)
                .map(|mb| mb.amount)
                .unwrap_or(0);
            MicronutrientDelta {
                name: ma.name.clone(),
                unit: ma.unit.clone(),
                delta: b_amount - ma.amount,
            }
        })
        .collect();

    for (i, mb) in b.micronutrients.iter().enumerate() {
        let k = occurrence(&b.micronutrients, i);
        if nth_named(&a.micronutrients, &mb.name, k).is_none() {
            micronutrients.push(MicronutrientDelta {
                name: mb.name.clone(),
                unit: mb.unit.clone(),
                delta: mb.amount,
            });
        }
    }

    NutrientDelta {
        calories: b.calories - a.calories,
        protein: b.protein - a.protein,
        carbs: b.carbs - a.carbs,
        fat: b.fat - a.fat,
        saturated_fat: b.saturated_fat - a.saturated_fat,
        unsaturated_fat: b.unsaturated_fat - a.unsaturated_fat,
        fiber: b.fiber - a.fiber,
        sugar: b.sugar - a.sugar,
        natural_sugar: b.natural_sugar - a.natural_sugar,
        added_sugar: b.added_sugar - a.added_sugar,
        sodium: b.sodium - a.sodium,
        micronutrients,
    }
}

/// How many entries before `index` share its name
fn occurrence(list: &[AdjustedMicronutrient], index: usize) -> usize {
    let name = &list[index].name;
    list[..index].iter().filter(|m| &m.name == name).count()
}

fn nth_named<'a>(
    list: &'a [AdjustedMicronutrient],
    name: &str,
    n: usize,
) -> Option<&'a AdjustedMicronutrient> {
    list.iter().filter(|m| m.name == name).nth(n)
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparationOutcome {
    pub settings: PreparationSettings,
    pub nutrition: AdjustedNutrition,
    pub healthiness: HealthinessRating,
    /// Unrounded score behind `healthiness`
    pub healthiness_score: f64,
}

/// Current vs alternative preparation of the same dish
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparationComparison {
    pub current: PreparationOutcome,
    pub alternative: PreparationOutcome,
    pub delta: NutrientDelta,
}

/// Runs both engines on two setting sets and diffs the results
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    nutrition: NutritionEngine,
    healthiness: HealthinessScorer,
}

impl ComparisonEngine {
    pub fn new(nutrition: NutritionEngine, healthiness: HealthinessScorer) -> Self {
        Self {
            nutrition,
            healthiness,
        }
    }

    fn outcome(&self, base: &BaseNutrition, settings: &PreparationSettings) -> PreparationOutcome {
        let score = self.healthiness.raw_score(settings);
        PreparationOutcome {
            settings: *settings,
            nutrition: self.nutrition.compute(base, settings),
            healthiness: HealthinessRating::from_score(score),
            healthiness_score: score,
        }
    }

    pub fn compare(
        &self,
        base: &BaseNutrition,
        current: &PreparationSettings,
        alternative: &PreparationSettings,
    ) -> PreparationComparison {
        let current = self.outcome(base, current);
        let alternative = self.outcome(base, alternative);
        let delta = diff(&current.nutrition, &alternative.nutrition);
        PreparationComparison {
            current,
            alternative,
            delta,
        }
    }
}
