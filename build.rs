use std::env;

fn main() {
    println!("cargo:rerun-if-changed=linker.ld");
    println!("cargo:rerun-if-changed=i686-nyx.json");

    // Host builds (library, tests, nyx-shell) link normally.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    println!("cargo:rustc-link-arg-bin=kernel=-T{}/linker.ld", manifest_dir);
    println!("cargo:rustc-link-arg-bin=kernel=--no-pie");
}
