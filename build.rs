//! Build script for aciextract - embeds git commit hash for dev builds
//!
//! When the `release` feature is NOT set (default dev builds):
//! - Emits `VERGEN_GIT_SHA` environment variable with the commit hash
//!
//! When the `release` feature IS set (CI/official builds):
//! - Does not emit git info (clean version string)

fn main() {
    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let git = GitclBuilder::default()
            .sha(true)
            .build()
            .expect("Failed to configure git info");

        if let Err(e) = Emitter::default()
            .add_instructions(&git)
            .expect("Failed to add git instructions")
            .emit()
        {
            // Not a git checkout (e.g. unpacked source tarball)
            eprintln!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}
