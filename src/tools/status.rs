//! Tiffin Status Tool
//!
//! Provides runtime status information about the Tiffin service.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::TiffinConfig;
use crate::models::Vocabulary;
use crate::nutrition::MacroFallback;

/// Usage guide for AI assistants
pub const PREPARATION_INSTRUCTIONS: &str = r#"
# Tiffin Preparation Calculator Instructions

Tiffin estimates how preparation choices change a dish's nutrition, and rates
how healthy those choices are on a 1-5 scale.

## Base Nutrition

Every call carries the dish's base nutrition for one serving:

```json
{"calories": 420, "protein": 18, "carbs": 52, "fat": 16}
```

Optional detail fields: `saturatedFat`, `unsaturatedFat`, `fiber`, `sugar`,
`naturalSugar`, `addedSugar`, `sodium`, and `micronutrients`
(`[{"name": "Iron", "amount": 1.8, "unit": "mg"}]`).

Missing detail fields are derived from the macros. Missing (or zero) macros
fall back to 350 kcal / 20 g protein / 30 g carbs / 15 g fat unless the server
runs with the `absent-only` fallback policy.

## Preparation Settings

| field | values |
|---|---|
| servingSize | 0.5, 1, 1.5, 2 |
| oilType | ghee, coconut-oil, olive-oil |
| oilAmount | 1 (little), 2 (normal), 3 (extra) |
| dairyContent | 0 (none), 1 (little), 2 (normal), 3 (extra) |
| cookingMethod | no-fry, pan-fry, deep-fry, baked, air-fry |

Any other value is rejected; nothing is silently defaulted. Call
`list_preparation_options` to see every value with the factors it applies.

## Tools

- `calculate_nutrition` - adjusted nutrition, calorie share by macro, healthiness
- `rate_healthiness` - rating only; depends on settings, not on the dish
- `compare_preparations` - current vs alternative; delta is alternative minus current

## Reading a Comparison

A negative delta means the alternative has less of that nutrient. The tool does
not decide which side is better; compare the two ratings directly.
"#;

/// Runtime status of the Tiffin service
#[derive(Debug, Clone, Serialize)]
pub struct TiffinStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub version: &'static str,

    /// Configuration in effect
    pub config_path: Option<String>,
    pub vocabulary: Vocabulary,
    pub macro_fallback: MacroFallback,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    config_path: Option<PathBuf>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            config_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, config: &TiffinConfig) -> TiffinStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TiffinStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            build_profile: build_info.profile,
            version: build_info.version,
            config_path: self.config_path.as_ref().map(|p| p.display().to_string()),
            vocabulary: config.vocabulary,
            macro_fallback: config.macro_fallback,
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
