use std::{env, fs, path::PathBuf};

fn main() {
    // memory.x is only needed when linking the RP2040 firmware
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
        fs::copy("memory.x", out_dir.join("memory.x")).expect("Failed to copy memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
    }
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
