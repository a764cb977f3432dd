/// Build script for sprintsim
/// Embeds the git commit shown by `sprintsim version`

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Empty when building outside a git checkout
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
    {
        if let Ok(hash) = String::from_utf8(output.stdout) {
            println!("cargo:rustc-env=GIT_HASH={}", hash.trim());
        }
    }
}
