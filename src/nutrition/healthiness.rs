//! Healthiness rating
//!
//! A 1-5 score built from additive weights on the preparation choices alone.
//! The dish's own nutrient values never enter the score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{CookingMethod, DairyContent, OilAmount, OilType, PreparationSettings};

/// Lowest possible rating
pub const MIN_RATING: u8 = 1;
/// Highest possible rating
pub const MAX_RATING: u8 = 5;

/// A healthiness rating in `MIN_RATING..=MAX_RATING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct HealthinessRating(u8);

impl HealthinessRating {
    /// Round a raw score and clamp it into range. NaN rates as `MIN_RATING`.
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() {
            tracing::warn!("Healthiness score is NaN, rating as {}", MIN_RATING);
            return Self(MIN_RATING);
        }
        let rounded = score.round();
        let clamped = rounded.clamp(MIN_RATING as f64, MAX_RATING as f64);
        Self(clamped as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            5 => "Excellent choice! Very healthy preparation.",
            4 => "Good choice! Healthy preparation.",
            3 => "Moderate healthiness. Balanced preparation.",
            2 => "Less healthy option. Consider adjustments.",
            _ => "Indulgent option. Enjoy occasionally.",
        }
    }
}

impl From<HealthinessRating> for u8 {
    fn from(rating: HealthinessRating) -> u8 {
        rating.0
    }
}

impl fmt::Display for HealthinessRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_RATING)
    }
}

// ============================================================================
// Weights
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OilTypeWeights {
    pub ghee: f64,
    pub coconut_oil: f64,
    pub olive_oil: f64,
}

impl Default for OilTypeWeights {
    fn default() -> Self {
        Self {
            ghee: 0.0,
            coconut_oil: 0.25,
            olive_oil: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OilAmountWeights {
    pub little: f64,
    pub normal: f64,
    pub extra: f64,
}

impl Default for OilAmountWeights {
    fn default() -> Self {
        Self {
            little: 0.75,
            normal: 0.0,
            extra: -0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DairyContentWeights {
    pub none: f64,
    pub little: f64,
    pub normal: f64,
    pub extra: f64,
}

impl Default for DairyContentWeights {
    fn default() -> Self {
        Self {
            none: 0.75,
            little: 0.5,
            normal: 0.0,
            extra: -0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CookingMethodWeights {
    pub no_fry: f64,
    pub pan_fry: f64,
    pub deep_fry: f64,
    pub baked: f64,
    pub air_fry: f64,
}

impl Default for CookingMethodWeights {
    fn default() -> Self {
        Self {
            no_fry: 0.75,
            pan_fry: 0.0,
            deep_fry: -1.0,
            baked: 0.5,
            air_fry: 0.5,
        }
    }
}

/// Additive weights for the healthiness score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthinessWeights {
    /// Score before any preparation choice is applied
    pub baseline: f64,
    pub oil_type: OilTypeWeights,
    pub oil_amount: OilAmountWeights,
    pub dairy_content: DairyContentWeights,
    pub cooking_method: CookingMethodWeights,
}

impl Default for HealthinessWeights {
    fn default() -> Self {
        Self {
            baseline: 3.0,
            oil_type: OilTypeWeights::default(),
            oil_amount: OilAmountWeights::default(),
            dairy_content: DairyContentWeights::default(),
            cooking_method: CookingMethodWeights::default(),
        }
    }
}

impl HealthinessWeights {
    pub fn oil_type_weight(&self, oil: OilType) -> f64 {
        match oil {
            OilType::Ghee => self.oil_type.ghee,
            OilType::CoconutOil => self.oil_type.coconut_oil,
            OilType::OliveOil => self.oil_type.olive_oil,
        }
    }

    pub fn oil_amount_weight(&self, amount: OilAmount) -> f64 {
        match amount {
            OilAmount::Little => self.oil_amount.little,
            OilAmount::Normal => self.oil_amount.normal,
            OilAmount::Extra => self.oil_amount.extra,
        }
    }

    pub fn dairy_content_weight(&self, dairy: DairyContent) -> f64 {
        match dairy {
            DairyContent::None => self.dairy_content.none,
            DairyContent::Little => self.dairy_content.little,
            DairyContent::Normal => self.dairy_content.normal,
            DairyContent::Extra => self.dairy_content.extra,
        }
    }

    pub fn cooking_method_weight(&self, method: CookingMethod) -> f64 {
        match method {
            CookingMethod::NoFry => self.cooking_method.no_fry,
            CookingMethod::PanFry => self.cooking_method.pan_fry,
            CookingMethod::DeepFry => self.cooking_method.deep_fry,
            CookingMethod::Baked => self.cooking_method.baked,
            CookingMethod::AirFry => self.cooking_method.air_fry,
        }
    }
}

// ============================================================================
// Scorer
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HealthinessScorer {
    weights: HealthinessWeights,
}

impl HealthinessScorer {
    pub fn new(weights: HealthinessWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HealthinessWeights {
        &self.weights
    }

    /// The unrounded, unclamped score
    pub fn raw_score(&self, settings: &PreparationSettings) -> f64 {
        let w = &self.weights;
        w.baseline
            + w.oil_type_weight(settings.oil_type)
            + w.oil_amount_weight(settings.oil_amount)
            + w.dairy_content_weight(settings.dairy_content)
            + w.cooking_method_weight(settings.cooking_method)
    }

    pub fn rate(&self, settings: &PreparationSettings) -> HealthinessRating {
        HealthinessRating::from_score(self.raw_score(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServingSize;

    fn settings(
        oil_type: OilType,
        oil_amount: OilAmount,
        dairy_content: DairyContent,
        cooking_method: CookingMethod,
    ) -> PreparationSettings {
        PreparationSettings {
            serving_size: ServingSize::One,
            oil_type,
            oil_amount,
            dairy_content,
            cooking_method,
        }
    }

    #[test]
    fn test_healthiest_preparation_clamps_to_five() {
        let scorer = HealthinessScorer::default();
        let s = settings(
            OilType::OliveOil,
            OilAmount::Little,
            DairyContent::None,
            CookingMethod::NoFry,
        );
        assert_eq!(scorer.raw_score(&s), 5.75);
        assert_eq!(scorer.rate(&s).value(), 5);
    }

    #[test]
    fn test_least_healthy_preparation() {
        let scorer = HealthinessScorer::default();
        let s = settings(
            OilType::OliveOil,
            OilAmount::Extra,
            DairyContent::Extra,
            CookingMethod::DeepFry,
        );
        assert_eq!(scorer.raw_score(&s), 1.25);
        assert_eq!(scorer.rate(&s).value(), 1);
    }

    #[test]
    fn test_worst_case_clamps_to_one() {
        let scorer = HealthinessScorer::default();
        let s = settings(
            OilType::Ghee,
            OilAmount::Extra,
            DairyContent::Extra,
            CookingMethod::DeepFry,
        );
        // 3 - 0.75 - 0.5 - 1.0
        assert_eq!(scorer.raw_score(&s), 0.75);
        assert_eq!(scorer.rate(&s).value(), 1);
    }

    #[test]
    fn test_default_preparation_is_moderate() {
        let rating = HealthinessScorer::default().rate(&PreparationSettings::default());
        assert_eq!(rating.value(), 3);
        assert_eq!(rating.label(), "Moderate healthiness. Balanced preparation.");
    }

    #[test]
    fn test_half_scores_round_up() {
        let scorer = HealthinessScorer::default();
        // 3 + 0.5 (olive) = 3.5
        let s = settings(
            OilType::OliveOil,
            OilAmount::Normal,
            DairyContent::Normal,
            CookingMethod::PanFry,
        );
        assert_eq!(scorer.rate(&s).value(), 4);
    }

    #[test]
    fn test_rating_ignores_serving_size() {
        let scorer = HealthinessScorer::default();
        let base = PreparationSettings::suggested_alternative();
        for serving_size in ServingSize::ALL {
            let s = PreparationSettings { serving_size, ..base };
            assert_eq!(scorer.rate(&s), scorer.rate(&base));
        }
    }

    #[test]
    fn test_every_combination_in_range() {
        let scorer = HealthinessScorer::default();
        for oil_type in OilType::ALL {
            for oil_amount in OilAmount::ALL {
                for dairy in DairyContent::ALL {
                    for method in CookingMethod::ALL {
                        let rating = scorer.rate(&settings(oil_type, oil_amount, dairy, method));
                        assert!((MIN_RATING..=MAX_RATING).contains(&rating.value()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_nan_score_rates_lowest() {
        assert_eq!(HealthinessRating::from_score(f64::NAN).value(), MIN_RATING);
        assert_eq!(HealthinessRating::from_score(f64::INFINITY).value(), MAX_RATING);
        assert_eq!(HealthinessRating::from_score(f64::NEG_INFINITY).value(), MIN_RATING);

        let weights = HealthinessWeights {
            baseline: f64::NAN,
            ..HealthinessWeights::default()
        };
        let rating = HealthinessScorer::new(weights).rate(&PreparationSettings::default());
        assert!((MIN_RATING..=MAX_RATING).contains(&rating.value()));
    }

    #[test]
    fn test_rating_serializes_as_integer() {
        let rating = HealthinessRating::from_score(4.2);
        assert_eq!(serde_json::to_value(rating).unwrap(), serde_json::json!(4));
        assert_eq!(rating.to_string(), "4/5");
    }
}
