//! Filter a rendered stream read from a file or stdin.

use anyhow::{Context, Result};
use helmsift_core::util::slurp;
use helmsift_manifest::{write_if_changed, ManifestFilter, WriteOutcome};
use helmsift_types::Settings;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub async fn execute(settings: &Settings, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let blob = match input {
        Some(path) if path != Path::new("-") => {
            slurp(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let filter = ManifestFilter::from_config(&settings.rules)?;
    let outcome = filter.filter(&blob);
    info!("{} kept, {} removed", outcome.kept, outcome.removed);

    // stdout carries the stream itself, so status goes to stderr
    match output {
        Some(path) => match write_if_changed(path, &outcome.output)? {
            WriteOutcome::Written => eprintln!("Successfully generated {}", path.display()),
            WriteOutcome::Unchanged => {
                eprintln!("YAML content unchanged, skipping write.");
                eprintln!("Skipped writing {} (Up to date)", path.display());
            }
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outcome.output.as_bytes())?;
            stdout.flush()?;
        }
    }

    eprintln!("Removed {} documents.", outcome.removed);

    Ok(())
}
