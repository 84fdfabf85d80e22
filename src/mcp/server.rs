//! Tiffin MCP Server Implementation
//!
//! Implements the MCP server with all Tiffin tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::config::TiffinConfig;
use crate::models::{BaseNutrition, LevelInput, Micronutrient, RawPreparationSettings};
use crate::tools::preparation;
use crate::tools::status::StatusTracker;

/// Tiffin MCP Service
#[derive(Clone)]
pub struct TiffinService {
    config: Arc<TiffinConfig>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<TiffinService>,
}

impl TiffinService {
    pub fn new(config: TiffinConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config: Arc::new(config),
            status_tracker: Arc::new(StatusTracker::new(config_path)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// An ordinal level: a number, or a label under the legacy vocabulary
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum LevelParam {
    Ordinal(i64),
    Label(String),
}

impl From<LevelParam> for LevelInput {
    fn from(p: LevelParam) -> Self {
        match p {
            LevelParam::Ordinal(n) => LevelInput::Ordinal(n),
            LevelParam::Label(s) => LevelInput::Label(s),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreparationParams {
    /// Portion multiplier: 0.5, 1, 1.5 or 2 (default 1)
    #[serde(default = "default_serving_size")]
    pub serving_size: f64,
    /// ghee, coconut-oil or olive-oil
    pub oil_type: String,
    /// 1 (little), 2 (normal) or 3 (extra)
    pub oil_amount: LevelParam,
    /// 0 (none), 1 (little), 2 (normal) or 3 (extra)
    pub dairy_content: LevelParam,
    /// no-fry, pan-fry, deep-fry, baked or air-fry
    pub cooking_method: String,
}

fn default_serving_size() -> f64 {
    1.0
}

impl From<PreparationParams> for RawPreparationSettings {
    fn from(p: PreparationParams) -> Self {
        Self {
            serving_size: p.serving_size,
            oil_type: p.oil_type,
            oil_amount: p.oil_amount.into(),
            dairy_content: p.dairy_content.into(),
            cooking_method: p.cooking_method,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MicronutrientParams {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Base nutrition for one serving; omitted fields are derived or fall back
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseNutritionParams {
    pub calories: Option<f64>,
    /// grams
    pub protein: Option<f64>,
    /// grams
    pub carbs: Option<f64>,
    /// grams
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub unsaturated_fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub natural_sugar: Option<f64>,
    pub added_sugar: Option<f64>,
    /// milligrams
    pub sodium: Option<f64>,
    #[serde(default)]
    pub micronutrients: Vec<MicronutrientParams>,
}

impl From<BaseNutritionParams> for BaseNutrition {
    fn from(p: BaseNutritionParams) -> Self {
        Self {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            saturated_fat: p.saturated_fat,
            unsaturated_fat: p.unsaturated_fat,
            fiber: p.fiber,
            sugar: p.sugar,
            natural_sugar: p.natural_sugar,
            added_sugar: p.added_sugar,
            sodium: p.sodium,
            micronutrients: p
                .micronutrients
                .into_iter()
                .map(|m| Micronutrient {
                    name: m.name,
                    amount: m.amount,
                    unit: m.unit,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNutritionParams {
    /// Dish nutrition before preparation
    pub base: BaseNutritionParams,
    /// Preparation choices
    pub settings: PreparationParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RateHealthinessParams {
    /// Preparation choices
    pub settings: PreparationParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComparePreparationsParams {
    /// Dish nutrition before preparation
    pub base: BaseNutritionParams,
    /// The preparation currently selected
    pub current: PreparationParams,
    /// The preparation to compare against (default: olive oil, little oil, little dairy, baked)
    pub alternative: Option<PreparationParams>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl TiffinService {
    // --- Status ---

    #[tool(description = "Get the current status of the Tiffin service including build info, active configuration, and process information")]
    async fn tiffin_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.config);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for using the preparation calculator. Call this when unsure how to format base nutrition or preparation settings.")]
    fn preparation_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PREPARATION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PREPARATION_INSTRUCTIONS)]))
    }

    // --- Preparation ---

    #[tool(description = "List every preparation option (serving sizes, oil types, oil amounts, dairy levels, cooking methods) with the multipliers and healthiness weights it applies")]
    fn list_preparation_options(&self) -> Result<CallToolResult, McpError> {
        let result = preparation::list_preparation_options(&self.config);
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Calculate a dish's nutrition for a given preparation (serving size, oil type and amount, dairy content, cooking method). Returns rounded nutrients, calorie share by macro, and a 1-5 healthiness rating.")]
    fn calculate_nutrition(
        &self,
        Parameters(p): Parameters<CalculateNutritionParams>,
    ) -> Result<CallToolResult, McpError> {
        let base = BaseNutrition::from(p.base);
        let settings = RawPreparationSettings::from(p.settings);
        let result = preparation::calculate_nutrition(&self.config, &base, &settings)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Rate how healthy a set of preparation choices is, from 1 (indulgent) to 5 (very healthy). Depends only on the settings, not on the dish.")]
    fn rate_healthiness(
        &self,
        Parameters(p): Parameters<RateHealthinessParams>,
    ) -> Result<CallToolResult, McpError> {
        let settings = RawPreparationSettings::from(p.settings);
        let result = preparation::rate_healthiness(&self.config, &settings)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Compare two preparations of the same dish. Returns both sides with their healthiness ratings and the per-nutrient delta (alternative minus current).")]
    fn compare_preparations(
        &self,
        Parameters(p): Parameters<ComparePreparationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let base = BaseNutrition::from(p.base);
        let current = RawPreparationSettings::from(p.current);
        let alternative = p.alternative.map(RawPreparationSettings::from);
        let result =
            preparation::compare_preparations(&self.config, &base, &current, alternative.as_ref())
                .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TiffinService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tiffin".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Tiffin Preparation Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tiffin - preparation-aware nutrition calculator. \
                 Call preparation_instructions first if unsure about input formats. \
                 Options: list_preparation_options. \
                 Nutrition: calculate_nutrition (base nutrition + settings). \
                 Healthiness: rate_healthiness (settings only). \
                 Comparison: compare_preparations (base + current + optional alternative). \
                 Status: tiffin_status."
                    .into(),
            ),
        }
    }
}
