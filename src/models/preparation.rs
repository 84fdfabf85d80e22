//! Preparation settings
//!
//! Closed enums for each preparation dimension, and the boundary that parses
//! raw user input into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preparation input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreparationError {
    #[error("Invalid preparation setting for {field}: {value}")]
    InvalidPreparationSetting { field: &'static str, value: String },
}

impl PreparationError {
    fn invalid(field: &'static str, value: impl ToString) -> Self {
        PreparationError::InvalidPreparationSetting {
            field,
            value: value.to_string(),
        }
    }
}

/// Which set of labels the input boundary accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    /// Slugs and ordinals only ("pan-fry", 2)
    #[default]
    Canonical,
    /// Slugs and ordinals plus the older display labels ("Pan Fry or Sauteed", "Normal")
    Legacy,
}

impl Vocabulary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vocabulary::Canonical => "canonical",
            Vocabulary::Legacy => "legacy",
        }
    }
}

impl FromStr for Vocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canonical" => Ok(Vocabulary::Canonical),
            "legacy" => Ok(Vocabulary::Legacy),
            other => Err(other.to_string()),
        }
    }
}

// ============================================================================
// Serving Size
// ============================================================================

/// Portion multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ServingSize {
    Half,
    #[default]
    One,
    OneAndHalf,
    Double,
}

impl ServingSize {
    pub const ALL: [ServingSize; 4] = [
        ServingSize::Half,
        ServingSize::One,
        ServingSize::OneAndHalf,
        ServingSize::Double,
    ];

    /// The multiplier applied to every nutrient
    pub fn factor(&self) -> f64 {
        match self {
            ServingSize::Half => 0.5,
            ServingSize::One => 1.0,
            ServingSize::OneAndHalf => 1.5,
            ServingSize::Double => 2.0,
        }
    }
}

impl TryFrom<f64> for ServingSize {
    type Error = PreparationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(PreparationError::invalid("servingSize", value));
        }
        ServingSize::ALL
            .into_iter()
            .find(|s| s.factor() == value)
            .ok_or_else(|| PreparationError::invalid("servingSize", value))
    }
}

impl From<ServingSize> for f64 {
    fn from(size: ServingSize) -> f64 {
        size.factor()
    }
}

// ============================================================================
// Oil Type
// ============================================================================

/// Cooking fat used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OilType {
    #[default]
    Ghee,
    CoconutOil,
    OliveOil,
}

impl OilType {
    pub const ALL: [OilType; 3] = [OilType::Ghee, OilType::CoconutOil, OilType::OliveOil];

    pub fn as_str(&self) -> &'static str {
        match self {
            OilType::Ghee => "ghee",
            OilType::CoconutOil => "coconut-oil",
            OilType::OliveOil => "olive-oil",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OilType::Ghee => "Ghee",
            OilType::CoconutOil => "Coconut Oil",
            OilType::OliveOil => "Olive Oil",
        }
    }

    /// Parse under the given vocabulary
    pub fn parse(s: &str, vocabulary: Vocabulary) -> Result<Self, PreparationError> {
        if let Ok(oil) = s.parse::<Self>() {
            return Ok(oil);
        }
        if vocabulary == Vocabulary::Legacy {
            let lower = s.trim().to_lowercase();
            if let Some(oil) = Self::ALL
                .into_iter()
                .find(|o| o.display_name().to_lowercase() == lower)
            {
                return Ok(oil);
            }
        }
        Err(PreparationError::invalid("oilType", s))
    }
}

impl FromStr for OilType {
    type Err = PreparationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| PreparationError::invalid("oilType", s))
    }
}

impl fmt::Display for OilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Oil Amount
// ============================================================================

/// How much oil goes in (ordinal 1..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OilAmount {
    Little,
    #[default]
    Normal,
    Extra,
}

impl OilAmount {
    pub const ALL: [OilAmount; 3] = [OilAmount::Little, OilAmount::Normal, OilAmount::Extra];

    pub fn ordinal(&self) -> i64 {
        match self {
            OilAmount::Little => 1,
            OilAmount::Normal => 2,
            OilAmount::Extra => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OilAmount::Little => "Little",
            OilAmount::Normal => "Normal",
            OilAmount::Extra => "Extra",
        }
    }

    pub fn parse(input: &LevelInput, vocabulary: Vocabulary) -> Result<Self, PreparationError> {
        match input {
            LevelInput::Ordinal(n) => Self::try_from(*n),
            LevelInput::Label(s) => {
                if let Ok(n) = s.trim().parse::<i64>() {
                    return Self::try_from(n);
                }
                if vocabulary == Vocabulary::Legacy {
                    let lower = s.trim().to_lowercase();
                    if let Some(amount) = Self::ALL
                        .into_iter()
                        .find(|a| a.display_name().to_lowercase() == lower)
                    {
                        return Ok(amount);
                    }
                }
                Err(PreparationError::invalid("oilAmount", s))
            }
        }
    }
}

impl TryFrom<i64> for OilAmount {
    type Error = PreparationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OilAmount::Little),
            2 => Ok(OilAmount::Normal),
            3 => Ok(OilAmount::Extra),
            other => Err(PreparationError::invalid("oilAmount", other)),
        }
    }
}

impl From<OilAmount> for i64 {
    fn from(amount: OilAmount) -> i64 {
        amount.ordinal()
    }
}

// ============================================================================
// Dairy Content
// ============================================================================

/// Cream/butter/yogurt content (ordinal 0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DairyContent {
    None,
    Little,
    #[default]
    Normal,
    Extra,
}

impl DairyContent {
    pub const ALL: [DairyContent; 4] = [
        DairyContent::None,
        DairyContent::Little,
        DairyContent::Normal,
        DairyContent::Extra,
    ];

    pub fn ordinal(&self) -> i64 {
        match self {
            DairyContent::None => 0,
            DairyContent::Little => 1,
            DairyContent::Normal => 2,
            DairyContent::Extra => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DairyContent::None => "None",
            DairyContent::Little => "Little",
            DairyContent::Normal => "Normal",
            DairyContent::Extra => "Extra",
        }
    }

    pub fn parse(input: &LevelInput, vocabulary: Vocabulary) -> Result<Self, PreparationError> {
        match input {
            LevelInput::Ordinal(n) => Self::try_from(*n),
            LevelInput::Label(s) => {
                if let Ok(n) = s.trim().parse::<i64>() {
                    return Self::try_from(n);
                }
                if vocabulary == Vocabulary::Legacy {
                    let lower = s.trim().to_lowercase();
                    if let Some(dairy) = Self::ALL
                        .into_iter()
                        .find(|d| d.display_name().to_lowercase() == lower)
                    {
                        return Ok(dairy);
                    }
                }
                Err(PreparationError::invalid("dairyContent", s))
            }
        }
    }
}

impl TryFrom<i64> for DairyContent {
    type Error = PreparationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DairyContent::None),
            1 => Ok(DairyContent::Little),
            2 => Ok(DairyContent::Normal),
            3 => Ok(DairyContent::Extra),
            other => Err(PreparationError::invalid("dairyContent", other)),
        }
    }
}

impl From<DairyContent> for i64 {
    fn from(dairy: DairyContent) -> i64 {
        dairy.ordinal()
    }
}

// ============================================================================
// Cooking Method
// ============================================================================

/// How the dish is cooked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CookingMethod {
    NoFry,
    #[default]
    PanFry,
    DeepFry,
    Baked,
    AirFry,
}

impl CookingMethod {
    pub const ALL: [CookingMethod; 5] = [
        CookingMethod::NoFry,
        CookingMethod::PanFry,
        CookingMethod::DeepFry,
        CookingMethod::Baked,
        CookingMethod::AirFry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CookingMethod::NoFry => "no-fry",
            CookingMethod::PanFry => "pan-fry",
            CookingMethod::DeepFry => "deep-fry",
            CookingMethod::Baked => "baked",
            CookingMethod::AirFry => "air-fry",
        }
    }

    /// Label used by the older calculator
    pub fn legacy_label(&self) -> &'static str {
        match self {
            CookingMethod::NoFry => "No Fry",
            CookingMethod::PanFry => "Pan Fry or Sauteed",
            CookingMethod::DeepFry => "Deep Fried",
            CookingMethod::Baked => "Baked",
            CookingMethod::AirFry => "Air Fried",
        }
    }

    pub fn parse(s: &str, vocabulary: Vocabulary) -> Result<Self, PreparationError> {
        if let Ok(method) = s.parse::<Self>() {
            return Ok(method);
        }
        if vocabulary == Vocabulary::Legacy {
            let lower = s.trim().to_lowercase();
            if let Some(method) = Self::ALL
                .into_iter()
                .find(|m| m.legacy_label().to_lowercase() == lower)
            {
                return Ok(method);
            }
        }
        Err(PreparationError::invalid("cookingMethod", s))
    }
}

impl FromStr for CookingMethod {
    type Err = PreparationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PreparationError::invalid("cookingMethod", s))
    }
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Settings
// ============================================================================

/// A complete, validated set of preparation choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationSettings {
    pub serving_size: ServingSize,
    pub oil_type: OilType,
    pub oil_amount: OilAmount,
    pub dairy_content: DairyContent,
    pub cooking_method: CookingMethod,
}

impl PreparationSettings {
    /// The lighter preparation offered as the default comparison side
    pub fn suggested_alternative() -> Self {
        Self {
            serving_size: ServingSize::One,
            oil_type: OilType::OliveOil,
            oil_amount: OilAmount::Little,
            dairy_content: DairyContent::Little,
            cooking_method: CookingMethod::Baked,
        }
    }

    /// Parse raw input, rejecting any value outside its domain
    pub fn from_raw(
        raw: &RawPreparationSettings,
        vocabulary: Vocabulary,
    ) -> Result<Self, PreparationError> {
        Ok(Self {
            serving_size: ServingSize::try_from(raw.serving_size)?,
            oil_type: OilType::parse(&raw.oil_type, vocabulary)?,
            oil_amount: OilAmount::parse(&raw.oil_amount, vocabulary)?,
            dairy_content: DairyContent::parse(&raw.dairy_content, vocabulary)?,
            cooking_method: CookingMethod::parse(&raw.cooking_method, vocabulary)?,
        })
    }
}

/// An ordinal level given either as a number or as a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelInput {
    Ordinal(i64),
    Label(String),
}

impl From<i64> for LevelInput {
    fn from(n: i64) -> Self {
        LevelInput::Ordinal(n)
    }
}

/// Unvalidated settings as they arrive from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPreparationSettings {
    #[serde(default = "default_serving_size")]
    pub serving_size: f64,
    pub oil_type: String,
    pub oil_amount: LevelInput,
    pub dairy_content: LevelInput,
    pub cooking_method: String,
}

fn default_serving_size() -> f64 {
    1.0
}

impl From<&PreparationSettings> for RawPreparationSettings {
    fn from(settings: &PreparationSettings) -> Self {
        Self {
            serving_size: settings.serving_size.factor(),
            oil_type: settings.oil_type.as_str().to_string(),
            oil_amount: LevelInput::Ordinal(settings.oil_amount.ordinal()),
            dairy_content: LevelInput::Ordinal(settings.dairy_content.ordinal()),
            cooking_method: settings.cooking_method.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cooking_method: &str) -> RawPreparationSettings {
        RawPreparationSettings {
            serving_size: 1.0,
            oil_type: "ghee".to_string(),
            oil_amount: LevelInput::Ordinal(2),
            dairy_content: LevelInput::Ordinal(2),
            cooking_method: cooking_method.to_string(),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = PreparationSettings::default();
        assert_eq!(settings.serving_size, ServingSize::One);
        assert_eq!(settings.oil_type, OilType::Ghee);
        assert_eq!(settings.oil_amount, OilAmount::Normal);
        assert_eq!(settings.dairy_content, DairyContent::Normal);
        assert_eq!(settings.cooking_method, CookingMethod::PanFry);
    }

    #[test]
    fn test_parse_canonical_slugs() {
        let settings =
            PreparationSettings::from_raw(&raw("air-fry"), Vocabulary::Canonical).unwrap();
        assert_eq!(settings.cooking_method, CookingMethod::AirFry);
        assert_eq!("coconut-oil".parse::<OilType>().unwrap(), OilType::CoconutOil);
    }

    #[test]
    fn test_rejects_unknown_cooking_method() {
        let err =
            PreparationSettings::from_raw(&raw("grilled"), Vocabulary::Canonical).unwrap_err();
        assert_eq!(
            err,
            PreparationError::InvalidPreparationSetting {
                field: "cookingMethod",
                value: "grilled".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_out_of_range_ordinals() {
        assert!(OilAmount::try_from(0).is_err());
        assert!(OilAmount::try_from(4).is_err());
        assert!(DairyContent::try_from(-1).is_err());
        assert_eq!(DairyContent::try_from(0).unwrap(), DairyContent::None);
    }

    #[test]
    fn test_rejects_bad_serving_sizes() {
        for bad in [f64::NAN, f64::INFINITY, -1.0, 0.0, 0.75, 3.0] {
            let err = ServingSize::try_from(bad).unwrap_err();
            let PreparationError::InvalidPreparationSetting { field, .. } = err;
            assert_eq!(field, "servingSize");
        }
        assert_eq!(ServingSize::try_from(1.5).unwrap(), ServingSize::OneAndHalf);
    }

    #[test]
    fn test_legacy_labels_only_under_legacy_vocabulary() {
        let legacy = raw("Pan Fry or Sauteed");
        assert!(PreparationSettings::from_raw(&legacy, Vocabulary::Canonical).is_err());

        let mut legacy = legacy;
        legacy.oil_type = "Olive Oil".to_string();
        legacy.oil_amount = LevelInput::Label("little".to_string());
        legacy.dairy_content = LevelInput::Label("None".to_string());
        let settings = PreparationSettings::from_raw(&legacy, Vocabulary::Legacy).unwrap();
        assert_eq!(settings.cooking_method, CookingMethod::PanFry);
        assert_eq!(settings.oil_type, OilType::OliveOil);
        assert_eq!(settings.oil_amount, OilAmount::Little);
        assert_eq!(settings.dairy_content, DairyContent::None);
    }

    #[test]
    fn test_numeric_string_levels() {
        let mut input = raw("baked");
        input.oil_amount = LevelInput::Label("3".to_string());
        let settings = PreparationSettings::from_raw(&input, Vocabulary::Canonical).unwrap();
        assert_eq!(settings.oil_amount, OilAmount::Extra);
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::json!({
            "servingSize": 0.5,
            "oilType": "olive-oil",
            "oilAmount": 1,
            "dairyContent": 0,
            "cookingMethod": "no-fry"
        });
        let settings: PreparationSettings = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(settings.serving_size, ServingSize::Half);
        assert_eq!(settings.dairy_content, DairyContent::None);
        assert_eq!(serde_json::to_value(settings).unwrap(), json);

        let bad = serde_json::json!({
            "servingSize": 1,
            "oilType": "ghee",
            "oilAmount": 7,
            "dairyContent": 0,
            "cookingMethod": "no-fry"
        });
        assert!(serde_json::from_value::<PreparationSettings>(bad).is_err());
    }
}
