//! Tiffin Preparation Calculator
//!
//! An MCP server exposing preparation-aware nutrition and healthiness tools.

use std::path::PathBuf;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use tiffin::build_info;
use tiffin::config::{TiffinConfig, CONFIG_PATH_ENV};
use tiffin::mcp::TiffinService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tiffin=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    let config = TiffinConfig::from_env()?;

    build_info::print_startup_banner(&config);
    eprintln!("Starting MCP server on stdio...");
    tracing::info!(
        "Configuration loaded from {}",
        config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string())
    );

    // Create the Tiffin service
    let service = TiffinService::new(config, config_path);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
