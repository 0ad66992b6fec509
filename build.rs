fn git_describe() -> Option<String> {
    let output = std::process::Command::new("git")
        .args([
            "-c",
            "core.abbrev=8",
            "show",
            "-s",
            "--format=%cd-%h",
            "--date=format:%Y.%m.%d",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    let ci_tag = match std::env::var("GOVEE_CI_TAG") {
        Ok(env) => env.trim().to_string(),
        Err(_) => match std::fs::read_to_string(".tag") {
            Ok(tag) => tag.trim().to_string(),
            Err(_) => git_describe().unwrap_or_default(),
        },
    };

    println!("cargo:rerun-if-changed=.tag");
    println!("cargo:rerun-if-env-changed=GOVEE_CI_TAG");
    println!("cargo:rustc-env=GOVEE_CI_TAG={ci_tag}");
}
