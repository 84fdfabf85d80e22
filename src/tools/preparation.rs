//! Preparation MCP Tools
//!
//! Nutrition, healthiness and comparison tools. Each call carries its own
//! base nutrition; nothing is stored between calls.

use serde::Serialize;

use crate::config::TiffinConfig;
use crate::models::{
    AdjustedNutrition, BaseNutrition, CookingMethod, DairyContent, OilAmount, OilType,
    PreparationSettings, RawPreparationSettings, ServingSize, Vocabulary,
};
use crate::nutrition::{HealthinessRating, MacroBreakdown, NutrientDelta, PreparationOutcome};

/// Rating with its raw score and display label
#[derive(Debug, Serialize)]
pub struct HealthinessSummary {
    pub rating: HealthinessRating,
    pub raw_score: f64,
    pub label: &'static str,
}

impl HealthinessSummary {
    fn new(rating: HealthinessRating, raw_score: f64) -> Self {
        Self {
            rating,
            raw_score,
            label: rating.label(),
        }
    }

    fn for_settings(config: &TiffinConfig, settings: &PreparationSettings) -> Self {
        let scorer = config.healthiness_scorer();
        Self::new(scorer.rate(settings), scorer.raw_score(settings))
    }
}

/// Response for calculate_nutrition
#[derive(Debug, Serialize)]
pub struct CalculateNutritionResponse {
    pub settings: PreparationSettings,
    pub nutrition: AdjustedNutrition,
    pub macro_breakdown: MacroBreakdown,
    pub healthiness: HealthinessSummary,
}

/// Response for rate_healthiness
#[derive(Debug, Serialize)]
pub struct RateHealthinessResponse {
    pub settings: PreparationSettings,
    pub healthiness: HealthinessSummary,
}

/// One side of compare_preparations
#[derive(Debug, Serialize)]
pub struct PreparationSide {
    pub settings: PreparationSettings,
    pub nutrition: AdjustedNutrition,
    pub macro_breakdown: MacroBreakdown,
    pub healthiness: HealthinessSummary,
}

/// Response for compare_preparations
#[derive(Debug, Serialize)]
pub struct ComparePreparationsResponse {
    pub current: PreparationSide,
    pub alternative: PreparationSide,
    /// alternative minus current
    pub delta: NutrientDelta,
    pub unchanged: bool,
}

#[derive(Debug, Serialize)]
pub struct OilTypeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub saturated_fat_factor: f64,
    pub unsaturated_fat_factor: f64,
    pub healthiness_weight: f64,
}

#[derive(Debug, Serialize)]
pub struct LevelOption {
    pub value: i64,
    pub label: &'static str,
    pub factor: f64,
    pub healthiness_weight: f64,
}

#[derive(Debug, Serialize)]
pub struct CookingMethodOption {
    pub value: &'static str,
    pub legacy_label: &'static str,
    pub calories_factor: f64,
    pub fat_factor: f64,
    pub healthiness_weight: f64,
}

/// Response for list_preparation_options
#[derive(Debug, Serialize)]
pub struct PreparationOptionsResponse {
    pub vocabulary: Vocabulary,
    pub serving_sizes: Vec<f64>,
    pub oil_types: Vec<OilTypeOption>,
    pub oil_amounts: Vec<LevelOption>,
    pub dairy_contents: Vec<LevelOption>,
    pub cooking_methods: Vec<CookingMethodOption>,
    pub default_settings: PreparationSettings,
    pub suggested_alternative: PreparationSettings,
}

/// Parse raw settings under the configured vocabulary
pub fn parse_settings(
    config: &TiffinConfig,
    raw: &RawPreparationSettings,
) -> Result<PreparationSettings, String> {
    PreparationSettings::from_raw(raw, config.vocabulary).map_err(|e| {
        tracing::warn!("Rejected preparation settings: {}", e);
        e.to_string()
    })
}

/// Adjusted nutrition, macro shares and healthiness for one preparation
pub fn calculate_nutrition(
    config: &TiffinConfig,
    base: &BaseNutrition,
    raw: &RawPreparationSettings,
) -> Result<CalculateNutritionResponse, String> {
    let settings = parse_settings(config, raw)?;
    let nutrition = config.nutrition_engine().compute(base, &settings);

    Ok(CalculateNutritionResponse {
        settings,
        macro_breakdown: MacroBreakdown::from_nutrition(&nutrition),
        nutrition,
        healthiness: HealthinessSummary::for_settings(config, &settings),
    })
}

pub fn rate_healthiness(
    config: &TiffinConfig,
    raw: &RawPreparationSettings,
) -> Result<RateHealthinessResponse, String> {
    let settings = parse_settings(config, raw)?;
    Ok(RateHealthinessResponse {
        settings,
        healthiness: HealthinessSummary::for_settings(config, &settings),
    })
}

/// Compare two preparations of the same dish
///
/// Without an explicit alternative the lighter suggested preparation is used.
pub fn compare_preparations(
    config: &TiffinConfig,
    base: &BaseNutrition,
    current: &RawPreparationSettings,
    alternative: Option<&RawPreparationSettings>,
) -> Result<ComparePreparationsResponse, String> {
    let current = parse_settings(config, current)?;
    let alternative = match alternative {
        Some(raw) => parse_settings(config, raw)?,
        None => PreparationSettings::suggested_alternative(),
    };

    let comparison = config.comparison_engine().compare(base, &current, &alternative);

    let side = |outcome: PreparationOutcome| PreparationSide {
        macro_breakdown: MacroBreakdown::from_nutrition(&outcome.nutrition),
        healthiness: HealthinessSummary::new(outcome.healthiness, outcome.healthiness_score),
        settings: outcome.settings,
        nutrition: outcome.nutrition,
    };

    Ok(ComparePreparationsResponse {
        unchanged: comparison.delta.is_unchanged(),
        current: side(comparison.current),
        alternative: side(comparison.alternative),
        delta: comparison.delta,
    })
}

/// Every selectable value with the factors it applies
pub fn list_preparation_options(config: &TiffinConfig) -> PreparationOptionsResponse {
    let tables = &config.tables;
    let weights = &config.healthiness;

    PreparationOptionsResponse {
        vocabulary: config.vocabulary,
        serving_sizes: ServingSize::ALL.iter().map(|s| s.factor()).collect(),
        oil_types: OilType::ALL
            .into_iter()
            .map(|oil| {
                let split = tables.oil_type_factor(oil);
                OilTypeOption {
                    value: oil.as_str(),
                    label: oil.display_name(),
                    saturated_fat_factor: split.saturated_fat,
                    unsaturated_fat_factor: split.unsaturated_fat,
                    healthiness_weight: weights.oil_type_weight(oil),
                }
            })
            .collect(),
        oil_amounts: OilAmount::ALL
            .into_iter()
            .map(|amount| LevelOption {
                value: amount.ordinal(),
                label: amount.display_name(),
                factor: tables.oil_amount_factor(amount),
                healthiness_weight: weights.oil_amount_weight(amount),
            })
            .collect(),
        dairy_contents: DairyContent::ALL
            .into_iter()
            .map(|dairy| LevelOption {
                value: dairy.ordinal(),
                label: dairy.display_name(),
                factor: tables.dairy_content_factor(dairy),
                healthiness_weight: weights.dairy_content_weight(dairy),
            })
            .collect(),
        cooking_methods: CookingMethod::ALL
            .into_iter()
            .map(|method| {
                let factor = tables.cooking_method_factor(method);
                CookingMethodOption {
                    value: method.as_str(),
                    legacy_label: method.legacy_label(),
                    calories_factor: factor.calories,
                    fat_factor: factor.fat,
                    healthiness_weight: weights.cooking_method_weight(method),
                }
            })
            .collect(),
        default_settings: PreparationSettings::default(),
        suggested_alternative: PreparationSettings::suggested_alternative(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LevelInput;

    fn raw(oil_type: &str, oil_amount: i64, dairy: i64, method: &str) -> RawPreparationSettings {
        RawPreparationSettings {
            serving_size: 1.0,
            oil_type: oil_type.to_string(),
            oil_amount: LevelInput::Ordinal(oil_amount),
            dairy_content: LevelInput::Ordinal(dairy),
            cooking_method: method.to_string(),
        }
    }

    #[test]
    fn test_calculate_nutrition_identity() {
        let config = TiffinConfig::default();
        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        let response = calculate_nutrition(&config, &base, &raw("ghee", 2, 2, "pan-fry")).unwrap();
        assert_eq!(response.nutrition.calories, 350);
        assert_eq!(response.nutrition.fat, 15);
        assert_eq!(response.healthiness.rating.value(), 3);
        assert_eq!(response.macro_breakdown.fat_percent, 39);
    }

    #[test]
    fn test_rate_healthiness_rejects_grilled() {
        let config = TiffinConfig::default();
        let err = rate_healthiness(&config, &raw("olive-oil", 1, 0, "grilled")).unwrap_err();
        assert!(err.contains("cookingMethod"));
        assert!(err.contains("grilled"));
    }

    #[test]
    fn test_rate_healthiness_raw_score() {
        let config = TiffinConfig::default();
        let response = rate_healthiness(&config, &raw("olive-oil", 1, 0, "no-fry")).unwrap();
        assert_eq!(response.healthiness.raw_score, 5.75);
        assert_eq!(response.healthiness.rating.value(), 5);
        assert_eq!(response.healthiness.label, "Excellent choice! Very healthy preparation.");
    }

    #[test]
    fn test_legacy_vocabulary_from_config() {
        let config = TiffinConfig {
            vocabulary: Vocabulary::Legacy,
            ..TiffinConfig::default()
        };
        let response = rate_healthiness(&config, &raw("Coconut Oil", 2, 2, "Deep Fried")).unwrap();
        assert_eq!(response.settings.cooking_method, CookingMethod::DeepFry);
        // 3 + 0.25 - 1.0 = 2.25
        assert_eq!(response.healthiness.rating.value(), 2);
    }

    #[test]
    fn test_compare_defaults_to_suggested_alternative() {
        let config = TiffinConfig::default();
        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        let response =
            compare_preparations(&config, &base, &raw("ghee", 2, 2, "pan-fry"), None).unwrap();
        assert_eq!(response.alternative.settings, PreparationSettings::suggested_alternative());
        assert_eq!(response.delta.carbs, 0);
        assert!(response.delta.calories < 0);
        assert!(!response.unchanged);
    }

    #[test]
    fn test_compare_same_settings_unchanged() {
        let config = TiffinConfig::default();
        let base = BaseNutrition::from_macros(500.0, 25.0, 60.0, 22.0);
        let current = raw("coconut-oil", 3, 1, "air-fry");
        let response = compare_preparations(&config, &base, &current, Some(&current)).unwrap();
        assert!(response.unchanged);
        assert_eq!(response.current.healthiness.rating, response.alternative.healthiness.rating);
    }

    #[test]
    fn test_compare_summary_matches_rate_healthiness() {
        let mut config = TiffinConfig::default();
        config.healthiness.baseline = 2.4;
        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        let current = raw("olive-oil", 1, 0, "baked");
        let response = compare_preparations(&config, &base, &current, None).unwrap();
        let rated = rate_healthiness(&config, &current).unwrap();
        assert_eq!(response.current.healthiness.raw_score, rated.healthiness.raw_score);
        assert_eq!(response.current.healthiness.rating, rated.healthiness.rating);
        assert_eq!(response.current.healthiness.label, rated.healthiness.label);
    }

    #[test]
    fn test_compare_rejects_bad_alternative() {
        let config = TiffinConfig::default();
        let base = BaseNutrition::default();
        let mut alternative = raw("ghee", 2, 2, "pan-fry");
        alternative.serving_size = f64::NAN;
        let current = raw("ghee", 2, 2, "pan-fry");
        let err = compare_preparations(&config, &base, &current, Some(&alternative)).unwrap_err();
        assert!(err.contains("servingSize"));
    }

    #[test]
    fn test_list_options_covers_every_value() {
        let options = list_preparation_options(&TiffinConfig::default());
        assert_eq!(options.serving_sizes, vec![0.5, 1.0, 1.5, 2.0]);
        assert_eq!(options.oil_types.len(), 3);
        assert_eq!(options.oil_amounts.len(), 3);
        assert_eq!(options.dairy_contents.len(), 4);
        assert_eq!(options.cooking_methods.len(), 5);
        let deep_fry = options
            .cooking_methods
            .iter()
            .find(|m| m.value == "deep-fry")
            .unwrap();
        assert_eq!(deep_fry.legacy_label, "Deep Fried");
        assert_eq!(deep_fry.healthiness_weight, -1.0);
    }
}
