//! Build script for sensor-demos-soc
//!
//! Puts `memory.x` on the linker search path for the ARM target.

use std::path::PathBuf;
use std::{env, fs};

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests) do not link with cortex-m-rt
    if env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() != "arm" {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    if let Err(e) = fs::copy(manifest_dir.join("memory.x"), out_dir.join("memory.x")) {
        println!("cargo:warning=Failed to copy memory.x: {}", e);
    }
    println!("cargo:rustc-link-search={}", out_dir.display());
}
