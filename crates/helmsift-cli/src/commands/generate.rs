//! Render, filter and write the manifest.

use anyhow::Result;
use colored::Colorize;
use helmsift_manifest::{Helm, ManifestPipeline, WriteOutcome};
use helmsift_types::Settings;

use crate::ui::progress;

pub async fn execute(settings: &Settings) -> Result<()> {
    let render = &settings.render;

    println!(
        "{} {} {} ({})",
        "Generating".green().bold(),
        render.chart.to_string().cyan(),
        render.version,
        render.namespace
    );

    let helm = Helm::from_config(render);
    println!("Helm path: {}", helm.binary_path().display());

    let pipeline = ManifestPipeline::from_settings(&helm, settings)?;

    let spinner = progress::spinner("Running helm template...");
    let result = pipeline.execute(render, &settings.output).await;
    spinner.finish_and_clear();
    let result = result?;

    match result.write {
        WriteOutcome::Written => {
            println!(
                "{} Successfully generated {}",
                "✓".green().bold(),
                result.output.display().to_string().cyan()
            );
        }
        WriteOutcome::Unchanged => {
            println!("YAML content unchanged, skipping write.");
            println!(
                "{} Skipped writing {} (Up to date)",
                "→".yellow(),
                result.output.display()
            );
        }
    }

    println!("Removed {} webhook configurations.", result.removed());

    Ok(())
}
