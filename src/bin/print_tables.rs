//! Utility to print the active configuration as JSON
//!
//! Honors TIFFIN_CONFIG_PATH and TIFFIN_VOCABULARY, so the output is exactly
//! what the server would use. Handy as a starting point for a config file.

use tiffin::build_info::BuildInfo;
use tiffin::config::TiffinConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TiffinConfig::from_env()?;

    eprintln!("{}", BuildInfo::current().short_version());
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
