use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};

fn configure_memory_x(file: &str) -> Result<()> {
    let filename = format!("memory/{}", file);
    let out = PathBuf::from(env::var("OUT_DIR")?);

    println!("cargo:rerun-if-changed={}", &filename);

    fs::copy(&filename, out.join("memory.x"))
        .with_context(|| format!("Failed to copy linker memory layout {}", filename))?;
    println!("cargo:rustc-link-search={}", out.display());
    Ok(())
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_STM32F303");

    // Host builds (unit tests) need no linker configuration.
    if env::var_os("CARGO_FEATURE_STM32F303").is_some() {
        configure_memory_x("stm32f303_discovery.x")?;
    }
    Ok(())
}
