//! Configuration
//!
//! Built-in defaults, optionally overridden by a JSON file and environment
//! variables. Loaded once at start-up and shared read-only afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Vocabulary;
use crate::nutrition::{
    ComparisonEngine, HealthinessScorer, HealthinessWeights, MacroFallback, MultiplierTables,
    NutritionEngine,
};

/// Path to a JSON config file
pub const CONFIG_PATH_ENV: &str = "TIFFIN_CONFIG_PATH";
/// `canonical` or `legacy`; overrides the file
pub const VOCABULARY_ENV: &str = "TIFFIN_VOCABULARY";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown vocabulary: {0} (expected canonical or legacy)")]
    InvalidVocabulary(String),

    #[error("Invalid factor {name}: {value}")]
    InvalidFactor { name: String, value: f64 },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything the calculator can be tuned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiffinConfig {
    pub tables: MultiplierTables,
    pub healthiness: HealthinessWeights,
    pub vocabulary: Vocabulary,
    pub macro_fallback: MacroFallback,
}

impl TiffinConfig {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: TiffinConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Defaults, then the file if given, then the vocabulary override
    pub fn load(path: Option<&Path>, vocabulary: Option<&str>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(v) = vocabulary {
            config.vocabulary = v.parse().map_err(ConfigError::InvalidVocabulary)?;
        }

        Ok(config)
    }

    /// Read `TIFFIN_CONFIG_PATH` and `TIFFIN_VOCABULARY`
    pub fn from_env() -> ConfigResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let vocabulary = std::env::var(VOCABULARY_ENV).ok();
        Self::load(path.as_deref(), vocabulary.as_deref())
    }

    /// Multipliers must be finite and non-negative; healthiness weights finite
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in self.tables.named_factors() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }

        let w = &self.healthiness;
        let weights = [
            ("healthiness.baseline", w.baseline),
            ("healthiness.oilType.ghee", w.oil_type.ghee),
            ("healthiness.oilType.coconut-oil", w.oil_type.coconut_oil),
            ("healthiness.oilType.olive-oil", w.oil_type.olive_oil),
            ("healthiness.oilAmount.little", w.oil_amount.little),
            ("healthiness.oilAmount.normal", w.oil_amount.normal),
            ("healthiness.oilAmount.extra", w.oil_amount.extra),
            ("healthiness.dairyContent.none", w.dairy_content.none),
            ("healthiness.dairyContent.little", w.dairy_content.little),
            ("healthiness.dairyContent.normal", w.dairy_content.normal),
            ("healthiness.dairyContent.extra", w.dairy_content.extra),
            ("healthiness.cookingMethod.no-fry", w.cooking_method.no_fry),
            ("healthiness.cookingMethod.pan-fry", w.cooking_method.pan_fry),
            ("healthiness.cookingMethod.deep-fry", w.cooking_method.deep_fry),
            ("healthiness.cookingMethod.baked", w.cooking_method.baked),
            ("healthiness.cookingMethod.air-fry", w.cooking_method.air_fry),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::InvalidFactor {
                    name: name.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }

    pub fn nutrition_engine(&self) -> NutritionEngine {
        NutritionEngine::new(self.tables.clone()).with_macro_fallback(self.macro_fallback)
    }

    pub fn healthiness_scorer(&self) -> HealthinessScorer {
        HealthinessScorer::new(self.healthiness.clone())
    }

    pub fn comparison_engine(&self) -> ComparisonEngine {
        ComparisonEngine::new(self.nutrition_engine(), self.healthiness_scorer())
    }
}
