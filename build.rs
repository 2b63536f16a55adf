use std::path::{Path, PathBuf};
use std::process::Command;

/// Crates whose resolved versions `/versions` reports.
const REPORTED_CRATES: [(&str, &str); 3] = [
    ("reqwest", "CPL_CHAT_REQWEST_VERSION"),
    ("axum", "CPL_CHAT_AXUM_VERSION"),
    ("tokio", "CPL_CHAT_TOKIO_VERSION"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    add_rustc_version();
    add_dependency_versions();
}

/// Version of the compiler building this crate, e.g. `rustc 1.83.0 (90b35a623 2024-11-26)`.
fn add_rustc_version() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CPL_CHAT_RUSTC_VERSION={version}");
}

/// Nearest Cargo.lock at or above the manifest directory (workspace builds keep it at the root).
fn find_lockfile() -> Option<PathBuf> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").ok()?);
    manifest_dir
        .ancestors()
        .map(|dir| dir.join("Cargo.lock"))
        .find(|p| p.is_file())
}

fn locked_version(lock: &toml::Table, name: &str) -> Option<String> {
    lock.get("package")?
        .as_array()?
        .iter()
        .filter_map(|pkg| pkg.as_table())
        .find(|pkg| pkg.get("name").and_then(|n| n.as_str()) == Some(name))
        .and_then(|pkg| pkg.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn add_dependency_versions() {
    let lockfile = find_lockfile();
    if let Some(path) = &lockfile {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let lock = lockfile
        .as_deref()
        .and_then(|p: &Path| std::fs::read_to_string(p).ok())
        .and_then(|text| toml::from_str::<toml::Table>(&text).ok());

    for (krate, var) in REPORTED_CRATES {
        let version = lock
            .as_ref()
            .and_then(|l| locked_version(l, krate))
            .unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env={var}={version}");
    }
}
