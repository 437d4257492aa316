fn main() {
    // The credential is baked in with `option_env!`, so a changed key must
    // trigger a rebuild.
    println!("cargo:rerun-if-env-changed=LETSDOG_API_KEY");
    println!("cargo:rerun-if-changed=build.rs");
}
