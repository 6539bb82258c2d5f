//! Link directives for the native segmentation engine
//!
//! Only active with the `native` feature. `TACHTU_ENGINE_LIB` names the
//! library exposing `initialize`, `segmentPointer` and `freeMemory`;
//! `TACHTU_ENGINE_LIB_DIR` adds a search path.

use std::env;

const DEFAULT_LIB: &str = "tokenizer_shim";

fn main() {
    println!("cargo:rerun-if-env-changed=TACHTU_ENGINE_LIB");
    println!("cargo:rerun-if-env-changed=TACHTU_ENGINE_LIB_DIR");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Ok(dir) = env::var("TACHTU_ENGINE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }
    let lib = env::var("TACHTU_ENGINE_LIB").unwrap_or_else(|_| DEFAULT_LIB.to_string());
    println!("cargo:rustc-link-lib={lib}");
    // The engine is C++
    println!("cargo:rustc-link-lib=stdc++");
}
