//! Stamps `AIRFLOW_BUILD_ID` as `YYYY.MM.DD+g<short-sha>`.

use chrono::Utc;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn git(manifest_dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(manifest_dir)
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let text = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!text.is_empty()).then_some(text)
}

/// Files whose change moves HEAD: HEAD itself, the branch it points at, packed refs
fn head_watch_list(git_dir: &Path) -> Vec<PathBuf> {
    let head = git_dir.join("HEAD");
    let mut watch = vec![git_dir.join("packed-refs")];

    if let Some(branch) = fs::read_to_string(&head)
        .ok()
        .as_deref()
        .and_then(|text| text.trim().strip_prefix("ref: "))
    {
        watch.push(git_dir.join(branch));
    }
    watch.push(head);
    watch
}

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());

    println!("cargo:rerun-if-changed=build.rs");
    let sha = match git(&manifest_dir, &["rev-parse", "--absolute-git-dir"]) {
        Some(git_dir) => {
            for path in head_watch_list(Path::new(&git_dir)) {
                if path.exists() {
                    println!("cargo:rerun-if-changed={}", path.display());
                }
            }
            git(&manifest_dir, &["rev-parse", "--short", "HEAD"])
        }
        None => None,
    };

    let date = Utc::now().format("%Y.%m.%d");
    let sha = sha.as_deref().unwrap_or("unknown");
    println!("cargo:rustc-env=AIRFLOW_BUILD_ID={date}+g{sha}");
}
