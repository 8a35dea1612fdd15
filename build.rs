fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (`--no-default-features`) have no ESP-IDF toolchain to
    // export; only the firmware build needs the sysenv link args.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
