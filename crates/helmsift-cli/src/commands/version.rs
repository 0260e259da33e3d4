//! Show version information.

use anyhow::Result;
use colored::Colorize;
use helmsift_manifest::Helm;
use helmsift_types::Settings;

pub async fn execute(settings: &Settings, full: bool) -> Result<()> {
    println!("{} {}", helmsift_core::APP_NAME.cyan().bold(), env!("CARGO_PKG_VERSION"));

    if full {
        let helm = Helm::from_config(&settings.render);
        let helm_version = helm
            .version()
            .unwrap_or_else(|_| "not found".yellow().to_string());

        println!("\nBuild Information:");
        println!("  Version: {}", env!("CARGO_PKG_VERSION"));
        println!("  Target: {}", std::env::consts::ARCH);
        println!("  OS: {}", std::env::consts::OS);
        println!("  Rust Version: {}", env!("CARGO_PKG_RUST_VERSION"));
        println!("  Helm: {} ({})", helm_version, helm.binary_path().display());
    }

    Ok(())
}
