const CI_TAG: &str = env!("GOVEE_CI_TAG");
const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The version reported by `--version`; the CI tag when the build
/// was stamped with one, otherwise the crate version.
pub fn caps_version() -> &'static str {
    if CI_TAG.is_empty() {
        PKG_VERSION
    } else {
        CI_TAG
    }
}
