//! Version command implementation

use crate::classify::default_rules;
use crate::config::RebuildConfig;
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("innorebuild {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!();
    println!("Defaults:");
    println!("  Script: {}", RebuildConfig::default().script_name);
    println!("  Architectures: {}", architectures());

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn architectures() -> String {
    default_rules()
        .iter()
        .map(|rule| rule.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
