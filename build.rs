/// platfile build script.
///
/// Only role: refuse targets for which no native backend exists, rather than
/// failing later with a wall of unresolved `platform::Native` errors.
fn main() {
    let family = std::env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    let supported = family.split(',').any(|f| f == "unix" || f == "windows");
    if !supported {
        let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        panic!(
            "platfile only builds for Unix or Windows targets \
             (CARGO_CFG_TARGET_FAMILY = {family:?}, CARGO_CFG_TARGET_OS = {target_os:?})"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
