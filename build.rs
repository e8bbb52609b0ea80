fn main() {
    if let Some(rev) = git_revision() {
        println!("cargo:rustc-env=CLEANIP_BUILD_GIT_HASH={}", rev);
    }
}

/// Short hash of the checked out commit, or `None` outside a git checkout.
fn git_revision() -> Option<String> {
    use std::process::Command;

    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!rev.is_empty()).then_some(rev)
}
