//! Preparation-adjusted nutrition
//!
//! Applies the multiplier tables to a base nutrient profile. Detail fields the
//! base record leaves out are derived from the macros first, then every field
//! is scaled and finally rounded.

use serde::{Deserialize, Serialize};

use crate::models::{
    AdjustedMicronutrient, AdjustedNutrition, BaseNutrition, DairyContent, Micronutrient,
    PreparationSettings,
};
use super::tables::MultiplierTables;

/// When a macro field counts as missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacroFallback {
    /// Absent and zero both fall back (a zero-calorie dish reads as unset)
    #[default]
    ZeroOrAbsent,
    /// Only an absent field falls back; an explicit zero is kept
    AbsentOnly,
}

impl MacroFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroFallback::ZeroOrAbsent => "zero-or-absent",
            MacroFallback::AbsentOnly => "absent-only",
        }
    }
}

/// A base profile with every field filled in, before rounding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub saturated_fat: f64,
    pub unsaturated_fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub natural_sugar: f64,
    pub added_sugar: f64,
    pub sodium: f64,
    pub micronutrients: Vec<Micronutrient>,
}

impl ResolvedNutrition {
    /// Round every field to the nearest integer, clamping at zero
    pub fn round(&self) -> AdjustedNutrition {
        AdjustedNutrition {
            calories: finalize("calories", self.calories),
            protein: finalize("protein", self.protein),
            carbs: finalize("carbs", self.carbs),
            fat: finalize("fat", self.fat),
            saturated_fat: finalize("saturatedFat", self.saturated_fat),
            unsaturated_fat: finalize("unsaturatedFat", self.unsaturated_fat),
            fiber: finalize("fiber", self.fiber),
            sugar: finalize("sugar", self.sugar),
            natural_sugar: finalize("naturalSugar", self.natural_sugar),
            added_sugar: finalize("addedSugar", self.added_sugar),
            sodium: finalize("sodium", self.sodium),
            micronutrients: self
                .micronutrients
                .iter()
                .map(|m| AdjustedMicronutrient {
                    name: m.name.clone(),
                    amount: finalize(&m.name, m.amount),
                    unit: m.unit.clone(),
                })
                .collect(),
        }
    }
}

/// Round half away from zero. A negative value here means a table produced
/// one; debug builds stop, release builds log and clamp.
fn finalize(field: &str, value: f64) -> i64 {
    if value.is_nan() || value < 0.0 {
        debug_assert!(false, "{} computed as {} before clamping", field, value);
        tracing::warn!("Nutrient '{}' computed as {}; clamped to 0", field, value);
        return 0;
    }
    value.round() as i64
}

/// Computes adjusted nutrition from a base profile and preparation settings
#[derive(Debug, Clone, Default)]
pub struct NutritionEngine {
    tables: MultiplierTables,
    macro_fallback: MacroFallback,
}

impl NutritionEngine {
    pub fn new(tables: MultiplierTables) -> Self {
        Self {
            tables,
            macro_fallback: MacroFallback::default(),
        }
    }

    pub fn with_macro_fallback(mut self, macro_fallback: MacroFallback) -> Self {
        self.macro_fallback = macro_fallback;
        self
    }

    pub fn tables(&self) -> &MultiplierTables {
        &self.tables
    }

    pub fn macro_fallback(&self) -> MacroFallback {
        self.macro_fallback
    }

    /// Fill in every missing field of a base record
    ///
    /// Macro fallbacks are substituted before the detail ratios are applied,
    /// so a dish with no fat gets `15 * 0.4` saturated fat, not zero.
    pub fn resolve(&self, base: &BaseNutrition) -> ResolvedNutrition {
        let fallbacks = &self.tables.fallbacks;
        let ratios = &self.tables.derivation;

        let calories = self.macro_value(base.calories, fallbacks.calories);
        let protein = self.macro_value(base.protein, fallbacks.protein);
        let carbs = self.macro_value(base.carbs, fallbacks.carbs);
        let fat = self.macro_value(base.fat, fallbacks.fat);

        let micronutrients = if base.micronutrients.is_empty() {
            self.tables.default_micronutrients.clone()
        } else {
            base.micronutrients
                .iter()
                .map(|m| Micronutrient {
                    name: m.name.clone(),
                    amount: if m.amount.is_finite() { m.amount.max(0.0) } else { 0.0 },
                    unit: m.unit.clone(),
                })
                .collect()
        };

        ResolvedNutrition {
            calories,
            protein,
            carbs,
            fat,
            saturated_fat: detail_value(base.saturated_fat, fat * ratios.saturated_fat),
            unsaturated_fat: detail_value(base.unsaturated_fat, fat * ratios.unsaturated_fat),
            fiber: detail_value(base.fiber, carbs * ratios.fiber),
            sugar: detail_value(base.sugar, carbs * ratios.sugar),
            natural_sugar: detail_value(base.natural_sugar, carbs * ratios.natural_sugar),
            added_sugar: detail_value(base.added_sugar, carbs * ratios.added_sugar),
            sodium: detail_value(base.sodium, calories * ratios.sodium),
            micronutrients,
        }
    }

    /// Adjusted values before rounding
    pub fn compute_unrounded(
        &self,
        base: &BaseNutrition,
        settings: &PreparationSettings,
    ) -> ResolvedNutrition {
        let base = self.resolve(base);
        let tables = &self.tables;

        let serving = settings.serving_size.factor();
        let oil_type = tables.oil_type_factor(settings.oil_type);
        let oil_amount = tables.oil_amount_factor(settings.oil_amount);
        let dairy = tables.dairy_content_factor(settings.dairy_content);
        let method = tables.cooking_method_factor(settings.cooking_method);

        // Without dairy, protein and fat use fixed factors instead of the dairy scalar
        let dairy_free = settings.dairy_content == DairyContent::None;
        let (protein_dairy, fat_dairy, saturated_dairy) = if dairy_free {
            (
                tables.dairy_free.protein,
                tables.dairy_free.fat,
                tables.dairy_free.saturated_fat,
            )
        } else {
            (dairy, dairy, dairy)
        };

        let calorie_adjustment = 1.0
            + (oil_amount - 1.0) * tables.calorie_weights.oil_amount
            + (dairy - 1.0) * tables.calorie_weights.dairy_content;

        let retention = if method.calories < 1.0 {
            tables.retention.gentle
        } else {
            tables.retention.harsh
        };

        tracing::debug!(
            "Adjusting nutrition: serving={} oil={} amount={} dairy={} method={}",
            serving,
            settings.oil_type,
            settings.oil_amount.ordinal(),
            settings.dairy_content.ordinal(),
            settings.cooking_method
        );

        ResolvedNutrition {
            calories: base.calories * serving * method.calories * calorie_adjustment,
            protein: base.protein * serving * protein_dairy,
            carbs: base.carbs * serving,
            fat: base.fat * serving * method.fat * oil_amount * fat_dairy,
            saturated_fat: base.saturated_fat
                * serving
                * oil_type.saturated_fat
                * oil_amount
                * saturated_dairy,
            unsaturated_fat: base.unsaturated_fat * serving * oil_type.unsaturated_fat * oil_amount,
            fiber: base.fiber * serving,
            sugar: base.sugar * serving,
            natural_sugar: base.natural_sugar * serving,
            added_sugar: base.added_sugar * serving,
            sodium: base.sodium * serving,
            micronutrients: base
                .micronutrients
                .into_iter()
                .map(|m| Micronutrient {
                    amount: m.amount * serving * retention,
                    ..m
                })
                .collect(),
        }
    }

    /// Adjusted nutrition, rounded
    pub fn compute(
        &self,
        base: &BaseNutrition,
        settings: &PreparationSettings,
    ) -> AdjustedNutrition {
        self.compute_unrounded(base, settings).round()
    }

    fn macro_value(&self, value: Option<f64>, fallback: f64) -> f64 {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => v,
            Some(v) if v == 0.0 && self.macro_fallback == MacroFallback::AbsentOnly => 0.0,
            _ => fallback,
        }
    }
}

/// A stored detail value, or the derived one when it is missing or unusable
fn detail_value(value: Option<f64>, derived: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => derived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CookingMethod, OilAmount, OilType, ServingSize};

    fn engine() -> NutritionEngine {
        NutritionEngine::default()
    }

    fn settings(
        serving_size: ServingSize,
        oil_type: OilType,
        oil_amount: OilAmount,
        dairy_content: DairyContent,
        cooking_method: CookingMethod,
    ) -> PreparationSettings {
        PreparationSettings {
            serving_size,
            oil_type,
            oil_amount,
            dairy_content,
            cooking_method,
        }
    }

    #[test]
    fn test_identity_preparation() {
        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        let result = engine().compute(&base, &PreparationSettings::default());
        assert_eq!(result.calories, 350);
        assert_eq!(result.protein, 20);
        assert_eq!(result.carbs, 30);
        assert_eq!(result.fat, 15);
    }

    #[test]
    fn test_light_preparation() {
        let base = BaseNutrition::from_macros(400.0, 30.0, 40.0, 20.0);
        let s = settings(
            ServingSize::One,
            OilType::OliveOil,
            OilAmount::Little,
            DairyContent::None,
            CookingMethod::NoFry,
        );
        let result = engine().compute(&base, &s);

        // 400 * 0.8 * (1 - 0.09 - 0.1)
        assert_eq!(result.calories, 259);
        // dairy-free protein factor 0.9
        assert_eq!(result.protein, 27);
        assert_eq!(result.carbs, 40);
        // 20 * 0.7 * 0.7 * 0.8
        assert_eq!(result.fat, 8);
        // 8 * 0.7 * 0.7 * 0.7
        assert_eq!(result.saturated_fat, 3);
        // 12 * 1.3 * 0.7
        assert_eq!(result.unsaturated_fat, 11);
        assert_eq!(result.sugar, 4);
        assert_eq!(result.natural_sugar, 3);
        assert_eq!(result.added_sugar, 1);
        assert_eq!(result.sodium, 600);
    }

    #[test]
    fn test_default_micronutrients_gentle_cooking() {
        let base = BaseNutrition::from_macros(400.0, 30.0, 40.0, 20.0);
        let s = settings(
            ServingSize::One,
            OilType::Ghee,
            OilAmount::Normal,
            DairyContent::Normal,
            CookingMethod::Baked,
        );
        let result = engine().compute(&base, &s);
        let amounts: Vec<(&str, i64)> = result
            .micronutrients
            .iter()
            .map(|m| (m.name.as_str(), m.amount))
            .collect();
        assert_eq!(
            amounts,
            vec![
                ("Vitamin A", 165),
                ("Vitamin C", 7),
                ("Calcium", 88),
                ("Iron", 2),
                ("Turmeric (Curcumin)", 17),
            ]
        );
    }

    #[test]
    fn test_micronutrients_lose_value_when_fried() {
        let mut base = BaseNutrition::from_macros(400.0, 30.0, 40.0, 20.0);
        base.micronutrients = vec![Micronutrient::new("Iron", 10.0, "mg")];
        let s = settings(
            ServingSize::Double,
            OilType::Ghee,
            OilAmount::Normal,
            DairyContent::Normal,
            CookingMethod::DeepFry,
        );
        let result = engine().compute(&base, &s);
        assert_eq!(result.micronutrients.len(), 1);
        assert_eq!(result.micronutrients[0].amount, 18);
        assert_eq!(result.micronutrients[0].unit, "mg");
    }

    #[test]
    fn test_missing_macros_fall_back_before_derivation() {
        let base = BaseNutrition {
            protein: Some(0.0),
            ..BaseNutrition::default()
        };
        let resolved = engine().resolve(&base);
        assert_eq!(resolved.calories, 350.0);
        assert_eq!(resolved.protein, 20.0);
        assert_eq!(resolved.carbs, 30.0);
        assert_eq!(resolved.fat, 15.0);
        assert!((resolved.saturated_fat - 6.0).abs() < 1e-9);
        assert!((resolved.unsaturated_fat - 9.0).abs() < 1e-9);
        assert!((resolved.sodium - 525.0).abs() < 1e-9);

        let result = engine().compute(&base, &PreparationSettings::default());
        assert_eq!(result.calories, 350);
        assert_eq!(result.sodium, 525);
    }

    #[test]
    fn test_absent_only_keeps_explicit_zero() {
        let base = BaseNutrition {
            calories: Some(0.0),
            protein: Some(0.0),
            ..BaseNutrition::default()
        };
        let strict = engine().with_macro_fallback(MacroFallback::AbsentOnly);
        let result = strict.compute(&base, &PreparationSettings::default());
        assert_eq!(result.calories, 0);
        assert_eq!(result.protein, 0);
        assert_eq!(result.sodium, 0);
        // carbs and fat were absent, not zero
        assert_eq!(result.carbs, 30);
        assert_eq!(result.fat, 15);
    }

    #[test]
    fn test_negative_macro_treated_as_absent() {
        let base = BaseNutrition::from_macros(-10.0, 20.0, f64::NAN, 15.0);
        let resolved = engine().resolve(&base);
        assert_eq!(resolved.calories, 350.0);
        assert_eq!(resolved.carbs, 30.0);
    }

    #[test]
    fn test_stored_detail_fields_are_not_derived() {
        let mut base = BaseNutrition::from_macros(300.0, 10.0, 50.0, 10.0);
        base.fiber = Some(9.0);
        base.sodium = Some(0.0);
        let result = engine().compute(&base, &PreparationSettings::default());
        assert_eq!(result.fiber, 9);
        assert_eq!(result.sodium, 0);
        assert_eq!(result.sugar, 5);
    }

    #[test]
    fn test_carbs_scale_with_serving_size_only() {
        let base = BaseNutrition::from_macros(512.0, 21.0, 33.0, 17.0);
        for oil_type in OilType::ALL {
            for cooking_method in CookingMethod::ALL {
                let one = settings(
                    ServingSize::One,
                    oil_type,
                    OilAmount::Extra,
                    DairyContent::Little,
                    cooking_method,
                );
                let unrounded = engine().compute_unrounded(&base, &one).carbs;
                for size in ServingSize::ALL {
                    let scaled = PreparationSettings {
                        serving_size: size,
                        ..one
                    };
                    let carbs = engine().compute(&base, &scaled).carbs;
                    assert_eq!(carbs, (unrounded * size.factor()).round() as i64);
                }
            }
        }
    }

    #[test]
    fn test_fat_monotonic_in_oil_amount() {
        let base = BaseNutrition::from_macros(450.0, 22.0, 35.0, 19.0);
        for oil_type in OilType::ALL {
            for dairy_content in DairyContent::ALL {
                for cooking_method in CookingMethod::ALL {
                    for serving_size in ServingSize::ALL {
                        let fats: Vec<i64> = OilAmount::ALL
                            .into_iter()
                            .map(|oil_amount| {
                                let s = settings(
                                    serving_size,
                                    oil_type,
                                    oil_amount,
                                    dairy_content,
                                    cooking_method,
                                );
                                engine().compute(&base, &s).fat
                            })
                            .collect();
                        assert!(fats.windows(2).all(|w| w[0] <= w[1]), "{:?}", fats);
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let base = BaseNutrition::from_macros(275.0, 12.5, 41.0, 9.5);
        let s = PreparationSettings::suggested_alternative();
        assert_eq!(engine().compute(&base, &s), engine().compute(&base, &s));
    }

    #[test]
    fn test_injected_tables_are_used() {
        let mut tables = MultiplierTables::default();
        tables.cooking_method.pan_fry.calories = 2.0;
        let engine = NutritionEngine::new(tables);
        let base = BaseNutrition::from_macros(100.0, 10.0, 10.0, 10.0);
        assert_eq!(engine.compute(&base, &PreparationSettings::default()).calories, 200);
    }

    #[test]
    fn test_finalize_rounds_half_away_from_zero() {
        assert_eq!(finalize("x", 2.5), 3);
        assert_eq!(finalize("x", 2.4999), 2);
        assert_eq!(finalize("x", 0.0), 0);
    }

    fn negative_pan_fry_engine() -> NutritionEngine {
        let mut tables = MultiplierTables::default();
        tables.cooking_method.pan_fry.calories = -1.0;
        NutritionEngine::new(tables)
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "calories computed as -350 before clamping")]
    fn test_finalize_negative_panics_in_debug() {
        finalize("calories", -350.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "before clamping")]
    fn test_finalize_nan_panics_in_debug() {
        finalize("fat", f64::NAN);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "calories computed as")]
    fn test_negative_table_factor_panics_in_debug() {
        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        negative_pan_fry_engine().compute(&base, &PreparationSettings::default());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_negative_values_clamp_in_release() {
        assert_eq!(finalize("calories", -350.0), 0);
        assert_eq!(finalize("fat", f64::NAN), 0);

        let base = BaseNutrition::from_macros(350.0, 20.0, 30.0, 15.0);
        let adjusted = negative_pan_fry_engine().compute(&base, &PreparationSettings::default());
        assert_eq!(adjusted.calories, 0);
        assert_eq!(adjusted.carbs, 30);
    }
}
