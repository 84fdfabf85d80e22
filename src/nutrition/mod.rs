//! Nutrition calculation module
//!
//! Preparation-adjusted nutrition, healthiness scoring and comparison. Every
//! function here is pure: no I/O, no shared state.

pub mod breakdown;
pub mod comparison;
pub mod engine;
pub mod healthiness;
pub mod tables;

pub use breakdown::MacroBreakdown;
pub use comparison::{
    diff, ComparisonEngine, MicronutrientDelta, NutrientDelta, PreparationComparison,
    PreparationOutcome,
};
pub use engine::{MacroFallback, NutritionEngine, ResolvedNutrition};
pub use healthiness::{HealthinessRating, HealthinessScorer, HealthinessWeights};
pub use tables::MultiplierTables;

use crate::models::{AdjustedNutrition, BaseNutrition, PreparationSettings};

/// Adjusted nutrition under the default tables
pub fn compute_nutrition(
    base: &BaseNutrition,
    settings: &PreparationSettings,
) -> AdjustedNutrition {
    NutritionEngine::default().compute(base, settings)
}

/// Healthiness rating under the default weights
pub fn compute_healthiness(settings: &PreparationSettings) -> HealthinessRating {
    HealthinessScorer::default().rate(settings)
}
