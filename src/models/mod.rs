//! Data models
//!
//! Nutrition records and preparation settings exchanged with callers.

mod nutrition;
mod preparation;

pub use nutrition::{AdjustedMicronutrient, AdjustedNutrition, BaseNutrition, Micronutrient};
pub use preparation::{
    CookingMethod, DairyContent, LevelInput, OilAmount, OilType, PreparationError,
    PreparationSettings, RawPreparationSettings, ServingSize, Vocabulary,
};
