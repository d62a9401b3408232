use std::path::Path;
use std::process::Command;

/// `git describe` of the workspace, shown by `auszug --version`.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let root = Path::new(&manifest_dir).join("..");

    let revision = git(&root, &["describe", "--tags", "--always", "--dirty"])
        .unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=AUSZUG_REVISION={revision}");

    // HEAD moves on checkout, the index on commit and stage
    for tracked in [".git/HEAD", ".git/index"] {
        let path = root.join(tracked);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}

fn git(root: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(root).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
