//! Tiffin Tools module
//!
//! MCP tool implementations for the preparation calculator.

pub mod preparation;
pub mod status;
