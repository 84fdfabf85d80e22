//! Multiplier tables
//!
//! Every numeric constant the nutrition engine applies, grouped by the
//! preparation dimension it belongs to. The tables are plain data: one field
//! per enum variant, so a missing entry is a compile error rather than a
//! runtime lookup failure.

use serde::{Deserialize, Serialize};

use crate::models::{CookingMethod, DairyContent, Micronutrient, OilAmount, OilType};

/// How an oil shifts the saturated/unsaturated fat split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatSplit {
    pub saturated_fat: f64,
    pub unsaturated_fat: f64,
}

/// How a cooking method scales calories and total fat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodFactor {
    pub calories: f64,
    pub fat: f64,
}

// ============================================================================
// Per-Dimension Tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OilTypeFactors {
    pub ghee: FatSplit,
    pub coconut_oil: FatSplit,
    pub olive_oil: FatSplit,
}

impl Default for OilTypeFactors {
    fn default() -> Self {
        Self {
            ghee: FatSplit {
                saturated_fat: 1.2,
                unsaturated_fat: 0.8,
            },
            coconut_oil: FatSplit {
                saturated_fat: 1.1,
                unsaturated_fat: 0.9,
            },
            olive_oil: FatSplit {
                saturated_fat: 0.7,
                unsaturated_fat: 1.3,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OilAmountFactors {
    pub little: f64,
    pub normal: f64,
    pub extra: f64,
}

impl Default for OilAmountFactors {
    fn default() -> Self {
        Self {
            little: 0.7,
            normal: 1.0,
            extra: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DairyContentFactors {
    pub none: f64,
    pub little: f64,
    pub normal: f64,
    pub extra: f64,
}

impl Default for DairyContentFactors {
    fn default() -> Self {
        Self {
            none: 0.5,
            little: 0.8,
            normal: 1.0,
            extra: 1.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CookingMethodFactors {
    pub no_fry: MethodFactor,
    pub pan_fry: MethodFactor,
    pub deep_fry: MethodFactor,
    pub baked: MethodFactor,
    pub air_fry: MethodFactor,
}

impl Default for CookingMethodFactors {
    fn default() -> Self {
        Self {
            no_fry: MethodFactor {
                calories: 0.8,
                fat: 0.7,
            },
            pan_fry: MethodFactor {
                calories: 1.0,
                fat: 1.0,
            },
            deep_fry: MethodFactor {
                calories: 1.4,
                fat: 1.5,
            },
            baked: MethodFactor {
                calories: 0.9,
                fat: 0.8,
            },
            air_fry: MethodFactor {
                calories: 0.85,
                fat: 0.75,
            },
        }
    }
}

// ============================================================================
// Derivation Constants
// ============================================================================

/// Ratios used to fill in detail fields the base record leaves out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DerivationRatios {
    /// Share of fat
    pub saturated_fat: f64,
    /// Share of fat
    pub unsaturated_fat: f64,
    /// Share of carbs
    pub fiber: f64,
    /// Share of carbs
    pub sugar: f64,
    /// Share of carbs
    pub natural_sugar: f64,
    /// Share of carbs
    pub added_sugar: f64,
    /// Milligrams per calorie
    pub sodium: f64,
}

impl Default for DerivationRatios {
    fn default() -> Self {
        Self {
            saturated_fat: 0.4,
            unsaturated_fat: 0.6,
            fiber: 0.15,
            sugar: 0.10,
            natural_sugar: 0.08,
            added_sugar: 0.02,
            sodium: 1.5,
        }
    }
}

/// Macro values substituted when the base record has none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroFallbacks {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for MacroFallbacks {
    fn default() -> Self {
        Self {
            calories: 350.0,
            protein: 20.0,
            carbs: 30.0,
            fat: 15.0,
        }
    }
}

/// Factors that replace the dairy scalar when a dish is made without dairy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DairyFreeOverrides {
    pub protein: f64,
    pub fat: f64,
    pub saturated_fat: f64,
}

impl Default for DairyFreeOverrides {
    fn default() -> Self {
        Self {
            protein: 0.9,
            fat: 0.8,
            saturated_fat: 0.7,
        }
    }
}

/// How strongly oil and dairy deviations feed into calories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalorieWeights {
    pub oil_amount: f64,
    pub dairy_content: f64,
}

impl Default for CalorieWeights {
    fn default() -> Self {
        Self {
            oil_amount: 0.3,
            dairy_content: 0.2,
        }
    }
}

/// Micronutrient retention by cooking intensity
///
/// `gentle` applies when the method's calorie factor is below 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicronutrientRetention {
    pub gentle: f64,
    pub harsh: f64,
}

impl Default for MicronutrientRetention {
    fn default() -> Self {
        Self {
            gentle: 1.1,
            harsh: 0.9,
        }
    }
}

/// Panel used when a dish lists no micronutrients of its own
pub fn default_micronutrients() -> Vec<Micronutrient> {
    vec![
        Micronutrient::new("Vitamin A", 150.0, "mcg"),
        Micronutrient::new("Vitamin C", 6.0, "mg"),
        Micronutrient::new("Calcium", 80.0, "mg"),
        Micronutrient::new("Iron", 1.8, "mg"),
        Micronutrient::new("Turmeric (Curcumin)", 15.0, "mg"),
    ]
}

// ============================================================================
// Multiplier Tables
// ============================================================================

/// The full set of constants injected into a `NutritionEngine`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiplierTables {
    pub oil_type: OilTypeFactors,
    pub oil_amount: OilAmountFactors,
    pub dairy_content: DairyContentFactors,
    pub cooking_method: CookingMethodFactors,
    pub derivation: DerivationRatios,
    pub fallbacks: MacroFallbacks,
    pub dairy_free: DairyFreeOverrides,
    pub calorie_weights: CalorieWeights,
    pub retention: MicronutrientRetention,
    #[serde(default = "default_micronutrients")]
    pub default_micronutrients: Vec<Micronutrient>,
}

impl Default for MultiplierTables {
    fn default() -> Self {
        Self {
            oil_type: OilTypeFactors::default(),
            oil_amount: OilAmountFactors::default(),
            dairy_content: DairyContentFactors::default(),
            cooking_method: CookingMethodFactors::default(),
            derivation: DerivationRatios::default(),
            fallbacks: MacroFallbacks::default(),
            dairy_free: DairyFreeOverrides::default(),
            calorie_weights: CalorieWeights::default(),
            retention: MicronutrientRetention::default(),
            default_micronutrients: default_micronutrients(),
        }
    }
}

impl MultiplierTables {
    pub fn oil_type_factor(&self, oil: OilType) -> FatSplit {
        match oil {
            OilType::Ghee => self.oil_type.ghee,
            OilType::CoconutOil => self.oil_type.coconut_oil,
            OilType::OliveOil => self.oil_type.olive_oil,
        }
    }

    pub fn oil_amount_factor(&self, amount: OilAmount) -> f64 {
        match amount {
            OilAmount::Little => self.oil_amount.little,
            OilAmount::Normal => self.oil_amount.normal,
            OilAmount::Extra => self.oil_amount.extra,
        }
    }

    pub fn dairy_content_factor(&self, dairy: DairyContent) -> f64 {
        match dairy {
            DairyContent::None => self.dairy_content.none,
            DairyContent::Little => self.dairy_content.little,
            DairyContent::Normal => self.dairy_content.normal,
            DairyContent::Extra => self.dairy_content.extra,
        }
    }

    pub fn cooking_method_factor(&self, method: CookingMethod) -> MethodFactor {
        match method {
            CookingMethod::NoFry => self.cooking_method.no_fry,
            CookingMethod::PanFry => self.cooking_method.pan_fry,
            CookingMethod::DeepFry => self.cooking_method.deep_fry,
            CookingMethod::Baked => self.cooking_method.baked,
            CookingMethod::AirFry => self.cooking_method.air_fry,
        }
    }

    /// Every scalar in the tables with a dotted name, for validation and display
    pub fn named_factors(&self) -> Vec<(String, f64)> {
        let mut factors = Vec::new();

        for oil in OilType::ALL {
            let split = self.oil_type_factor(oil);
            factors.push((format!("oilType.{}.saturatedFat", oil), split.saturated_fat));
            factors.push((format!("oilType.{}.unsaturatedFat", oil), split.unsaturated_fat));
        }
        for amount in OilAmount::ALL {
            factors.push((
                format!("oilAmount.{}", amount.ordinal()),
                self.oil_amount_factor(amount),
            ));
        }
        for dairy in DairyContent::ALL {
            factors.push((
                format!("dairyContent.{}", dairy.ordinal()),
                self.dairy_content_factor(dairy),
            ));
        }
        for method in CookingMethod::ALL {
            let factor = self.cooking_method_factor(method);
            factors.push((format!("cookingMethod.{}.calories", method), factor.calories));
            factors.push((format!("cookingMethod.{}.fat", method), factor.fat));
        }

        let d = &self.derivation;
        let f = &self.fallbacks;
        factors.extend([
            ("derivation.saturatedFat".to_string(), d.saturated_fat),
            ("derivation.unsaturatedFat".to_string(), d.unsaturated_fat),
            ("derivation.fiber".to_string(), d.fiber),
            ("derivation.sugar".to_string(), d.sugar),
            ("derivation.naturalSugar".to_string(), d.natural_sugar),
            ("derivation.addedSugar".to_string(), d.added_sugar),
            ("derivation.sodium".to_string(), d.sodium),
            ("fallbacks.calories".to_string(), f.calories),
            ("fallbacks.protein".to_string(), f.protein),
            ("fallbacks.carbs".to_string(), f.carbs),
            ("fallbacks.fat".to_string(), f.fat),
            ("dairyFree.protein".to_string(), self.dairy_free.protein),
            ("dairyFree.fat".to_string(), self.dairy_free.fat),
            ("dairyFree.saturatedFat".to_string(), self.dairy_free.saturated_fat),
            ("calorieWeights.oilAmount".to_string(), self.calorie_weights.oil_amount),
            ("calorieWeights.dairyContent".to_string(), self.calorie_weights.dairy_content),
            ("retention.gentle".to_string(), self.retention.gentle),
            ("retention.harsh".to_string(), self.retention.harsh),
        ]);
        for micro in &self.default_micronutrients {
            factors.push((format!("defaultMicronutrients.{}", micro.name), micro.amount));
        }

        factors
    }
}
