//! Calorie share by macronutrient

use serde::Serialize;

use crate::models::AdjustedNutrition;

/// Calories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Calories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Calories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Rounded percentage of calories from each macro
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroBreakdown {
    pub protein_percent: i64,
    pub carbs_percent: i64,
    pub fat_percent: i64,
}

impl MacroBreakdown {
    /// Shares are relative to the stated calories, so they need not sum to 100
    pub fn from_nutrition(nutrition: &AdjustedNutrition) -> Self {
        if nutrition.calories <= 0 {
            return Self::default();
        }
        let calories = nutrition.calories as f64;
        let share = |grams: i64, kcal_per_g: f64| -> i64 {
            ((grams as f64 * kcal_per_g) / calories * 100.0).round() as i64
        };
        Self {
            protein_percent: share(nutrition.protein, KCAL_PER_G_PROTEIN),
            carbs_percent: share(nutrition.carbs, KCAL_PER_G_CARBS),
            fat_percent: share(nutrition.fat, KCAL_PER_G_FAT),
        }
    }
}
