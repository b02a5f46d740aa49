//! Build script for the site crate.
//!
//! Fingerprints the stylesheet and the contact form script. Each asset is
//! copied to `static/<kind>/derived/<stem>.<hash>.<ext>` and its short hash is
//! exported as a compile-time env var read by the template filters.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// `(path under static/, env var receiving the hash)`
const ASSETS: &[(&str, &str)] = &[("css/main.css", "CSS_HASH"), ("js/contact.js", "JS_HASH")];

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping asset fingerprints");
        for (_, var) in ASSETS {
            println!("cargo:rustc-env={var}=");
        }
        return;
    };
    let static_dir = Path::new(&manifest_dir).join("static");

    for (asset, var) in ASSETS {
        let hash = fingerprint(&static_dir, asset).unwrap_or_else(|e| {
            println!("cargo:warning=Could not fingerprint {asset}: {e}");
            String::new()
        });
        println!("cargo:rustc-env={var}={hash}");
    }
}

/// Hash one asset and write its fingerprinted copy. Returns the short hash.
fn fingerprint(static_dir: &Path, asset: &str) -> std::io::Result<String> {
    let source = static_dir.join(asset);
    println!("cargo:rerun-if-changed={}", source.display());

    let content = fs::read(&source)?;
    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest).to_owned();

    let parent = source.parent().unwrap_or(static_dir);
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("asset");
    let ext = source.extension().and_then(|s| s.to_str()).unwrap_or("bin");

    let derived_dir = parent.join("derived");
    fs::create_dir_all(&derived_dir)?;
    fs::write(derived_dir.join(format!("{stem}.{short_hash}.{ext}")), &content)?;

    Ok(short_hash)
}
