//! Stamps the `tick` binary with where and when it was built.
//!
//! `tick --version` prints the crate version followed by the short commit
//! hash (`TICK_GIT_COMMIT`, "unknown" outside a git checkout) and the UTC
//! build time (`TICK_BUILD_TIMESTAMP`). Both are read by `cli::LONG_VERSION`.

use std::process::Command;

fn main() {
    // A new commit or staged change means a new hash to stamp.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    println!("cargo:rustc-env=TICK_BUILD_TIMESTAMP={}", timestamp);

    let commit = get_git_commit().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TICK_GIT_COMMIT={}", commit);
}

fn get_git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        let hash = String::from_utf8(output.stdout).ok()?;
        Some(hash.trim().to_string())
    } else {
        None
    }
}
