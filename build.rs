//! Build script for Tiffin
//!
//! Embeds a per-target-dir build counter, the build time and the cargo
//! profile. The counter lives in OUT_DIR so the source tree stays untouched.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string()));
    let counter = out_dir.join("tiffin_build_number");

    let previous: u64 = fs::read_to_string(&counter)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    // A read-only OUT_DIR only costs us the counter
    if let Err(e) = fs::write(&counter, build_number.to_string()) {
        println!("cargo:warning=Could not persist build counter: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=TIFFIN_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=TIFFIN_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=TIFFIN_BUILD_PROFILE={}", profile);
}
