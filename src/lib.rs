//! Tiffin Preparation Calculator Library
//!
//! Estimates a dish's nutrition under different preparation choices, rates
//! how healthy those choices are, and compares two preparations.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
