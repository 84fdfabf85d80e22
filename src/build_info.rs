//! Build metadata embedded by `build.rs`

use serde::Serialize;

use crate::config::TiffinConfig;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build time in ISO 8601
pub const BUILD_TIMESTAMP: &str = match option_env!("TIFFIN_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with (debug/release)
pub const BUILD_PROFILE: &str = match option_env!("TIFFIN_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

const RAW_BUILD_NUMBER: &str = match option_env!("TIFFIN_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: parse_build_number(RAW_BUILD_NUMBER),
            build_timestamp: BUILD_TIMESTAMP,
            profile: BUILD_PROFILE,
        }
    }

    /// "tiffin 1.0.0 (build 12)"
    pub fn short_version(&self) -> String {
        format!("{} {} (build {})", self.name, self.version, self.build_number)
    }

    fn banner_lines(&self, config: &TiffinConfig) -> Vec<String> {
        vec![
            "Tiffin Preparation Calculator".to_string(),
            format!(
                "{} | {} build, compiled {}",
                self.short_version(),
                self.profile,
                self.build_timestamp
            ),
            format!(
                "vocabulary={} macro-fallback={}",
                config.vocabulary.as_str(),
                config.macro_fallback.as_str()
            ),
        ]
    }
}

fn parse_build_number(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// Print the startup banner to stderr; stdout carries the MCP stream
pub fn print_startup_banner(config: &TiffinConfig) {
    let rule = "-".repeat(47);
    eprintln!("{}", rule);
    for line in BuildInfo::current().banner_lines(config) {
        eprintln!("  {}", line);
    }
    eprintln!("{}", rule);
}
