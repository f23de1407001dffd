//! Stamps the binary with where and when it was built.
//!
//! Sets `SFA_GIT_HASH`, `SFA_BUILD_DATE` (YYYYMMDD, UTC) and
//! `SFA_BUILD_PROFILE` for the startup banner.

use std::path::Path;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    let hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    let date = chrono::Utc::now().format("%Y%m%d");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=SFA_GIT_HASH={hash}");
    println!("cargo:rustc-env=SFA_BUILD_DATE={date}");
    println!("cargo:rustc-env=SFA_BUILD_PROFILE={profile}");

    println!("cargo:rerun-if-changed=build.rs");
    for head in ["../.git/HEAD", ".git/HEAD"] {
        if Path::new(head).exists() {
            println!("cargo:rerun-if-changed={head}");
        }
    }
}
