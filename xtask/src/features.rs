use std::process::Command;

use anyhow::{Context, Result};

/// `None` means `--no-default-features`.
const FEATURE_COMBINATIONS: &[Option<&str>] = &[
    None,
    Some("observability"),
    Some("platform"),
    Some("observability,platform"),
];

/// Check that every supported `recipebox-common` feature set compiles.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} recipebox-common feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let label = features.unwrap_or("none");
        println!("\n[{}/{}] features: {label}", index + 1, FEATURE_COMBINATIONS.len());

        let mut command = Command::new("cargo");
        command.args(["check", "-p", "recipebox-common", "--no-default-features"]);
        if let Some(list) = features {
            command.arg("--features").arg(list);
        }

        let status =
            command.status().with_context(|| format!("Failed to run cargo check for '{label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{label}' failed to compile");
        }

        println!("✅ Features '{label}' compiled successfully");
    }

    Ok(())
}
