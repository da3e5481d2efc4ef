//! Build script embedding git and build metadata at compile time.
//!
//! Sets `cargo:rustc-env` variables read by the `health` module through
//! `env!()`. Falls back to `"unknown"` when git is unavailable.

use std::process::Command;

/// Prefer a non-empty override env var, then ask git.
fn git_or_env(env_key: &str, args: &[&str]) -> String {
    std::env::var(env_key)
        .ok()
        .filter(|s| !s.is_empty() && s != "unknown")
        .unwrap_or_else(|| {
            Command::new("git")
                .args(args)
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "unknown".into())
        })
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    println!(
        "cargo:rustc-env=LBF_GIT_SHORT={}",
        git_or_env("LBF_GIT_SHORT_OVERRIDE", &["rev-parse", "--short", "HEAD"])
    );

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    println!("cargo:rustc-env=LBF_BUILD_PROFILE={profile}");
}
