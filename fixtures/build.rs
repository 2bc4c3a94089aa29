//! Builds the fixture patch clients used by the integration tests, and hands
//! their paths to the tests through `PATCH_FIXTURE_*` variables.

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

const FIXTURES: &[(&str, &str)] = &[
    ("patch_fixture", "PATCH_FIXTURE_CLIENT"),
    ("no_patch_fixture", "PATCH_FIXTURE_NO_PATCH"),
];

fn dylib_name(name: &str) -> Result<String, Box<dyn Error>> {
    let name = match env::var("CARGO_CFG_TARGET_OS")?.as_str() {
        "windows" => format!("{}.dll", name),
        "macos" | "ios" => format!("lib{}.dylib", name),
        _ => format!("lib{}.so", name),
    };
    Ok(name)
}

fn build_fixture(rustc: &Path, out_dir: &Path, name: &str) -> Result<PathBuf, Box<dyn Error>> {
    let source = Path::new("cdylib").join(format!("{}.rs", name));
    let output = out_dir.join(dylib_name(name)?);

    let mut cmd = Command::new(rustc);
    cmd.arg("--crate-type=cdylib")
        .arg("--edition=2021")
        .arg("--crate-name")
        .arg(name)
        .arg("-o")
        .arg(&output)
        .arg(&source);

    let target = env::var("TARGET")?;
    if target != env::var("HOST")? {
        cmd.arg("--target").arg(&target);
    }

    let status = cmd.status()?;
    if !status.success() {
        return Err(format!("failed to build {}: {}", source.display(), status).into());
    }
    Ok(output)
}

fn main() -> Result<(), Box<dyn Error>> {
    let rustc = PathBuf::from(env::var_os("RUSTC").ok_or("RUSTC not set")?);
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR not set")?);

    for (name, var) in FIXTURES {
        let path = build_fixture(&rustc, &out_dir, name)?;
        println!("cargo:rustc-env={}={}", var, path.display());
    }
    println!("cargo:rerun-if-changed=cdylib");
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
