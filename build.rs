fn main() {
    // Stamped into the footer as "Built <date>"
    println!(
        "cargo:rustc-env=BUILD_TIME={}",
        chrono::Utc::now().to_rfc3339()
    );

    println!("cargo:rerun-if-changed=build.rs");
    // content/ is embedded
    println!("cargo:rerun-if-changed=content");
}
