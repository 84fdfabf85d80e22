//! Nutrition records
//!
//! The base profile a dish is stored with, and the rounded profile produced
//! once preparation choices are applied.

use serde::{Deserialize, Serialize};

/// A named micronutrient amount (e.g. Iron, 1.8 mg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Micronutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Micronutrient {
    pub fn new(name: &str, amount: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
        }
    }
}

/// Unmodified nutrient content of one serving of a dish
///
/// Macro fields are optional so an absent value can be told apart from a
/// stored zero. Detail fields left as `None` are derived from the macros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseNutrition {
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,   // grams
    #[serde(default)]
    pub carbs: Option<f64>,     // grams
    #[serde(default)]
    pub fat: Option<f64>,       // grams
    #[serde(default)]
    pub saturated_fat: Option<f64>,
    #[serde(default)]
    pub unsaturated_fat: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub natural_sugar: Option<f64>,
    #[serde(default)]
    pub added_sugar: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,    // milligrams
    #[serde(default)]
    pub micronutrients: Vec<Micronutrient>,
}

impl BaseNutrition {
    /// Base nutrition with only the four macro fields set
    pub fn from_macros(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories: Some(calories),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
            ..Self::default()
        }
    }
}

/// A micronutrient after preparation, rounded to a whole amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedMicronutrient {
    pub name: String,
    pub amount: i64,
    pub unit: String,
}

/// Nutrient content after preparation, every value rounded to an integer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedNutrition {
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
    pub micronutrients: Vec<AdjustedMicronutrient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_nutrition_missing_fields_deserialize_as_none() {
        let base: BaseNutrition =
            serde_json::from_str(r#"{"calories": 420, "protein": 18}"#).unwrap();
        assert_eq!(base.calories, Some(420.0));
        assert_eq!(base.protein, Some(18.0));
        assert_eq!(base.carbs, None);
        assert_eq!(base.saturated_fat, None);
        assert!(base.micronutrients.is_empty());
    }

    #[test]
    fn test_base_nutrition_camel_case_detail_fields() {
        let base: BaseNutrition = serde_json::from_str(
            r#"{"fat": 12, "saturatedFat": 5, "micronutrients": [{"name": "Iron", "amount": 2.5, "unit": "mg"}]}"#,
        )
        .unwrap();
        assert_eq!(base.saturated_fat, Some(5.0));
        assert_eq!(base.micronutrients, vec![Micronutrient::new("Iron", 2.5, "mg")]);
    }

    #[test]
    fn test_adjusted_nutrition_serializes_camel_case() {
        let adjusted = AdjustedNutrition {
            natural_sugar: 3,
            ..AdjustedNutrition::default()
        };
        let json = serde_json::to_value(&adjusted).unwrap();
        assert_eq!(json["naturalSugar"], 3);
        assert_eq!(json["micronutrients"], serde_json::json!([]));
    }
}
