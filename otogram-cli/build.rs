// Build script to stamp the binary version from git tags
//
// Uses `git describe` at build time and falls back to CARGO_PKG_VERSION when
// git (or a tag) is unavailable, so builds from a source tarball still work.

use std::process::Command;

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=OTOGRAM_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn git_version() -> Option<String> {
    // Yields "v0.1.0", "v0.1.0-5-gabc123", or a bare "abc123[-dirty]"
    // depending on tag state
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    if let Some(tagged) = described.strip_prefix('v') {
        // Keep just the tag's version part, dropping any -<n>-g<sha> suffix
        let version = tagged.split('-').next().unwrap_or(tagged);
        return Some(version.to_string());
    }

    // No tag reachable: append the commit info to the crate version
    Some(format!("{}-{}", env!("CARGO_PKG_VERSION"), described))
}
