//! Show the active exclusion rules.

use anyhow::Result;
use colored::Colorize;
use helmsift_manifest::ManifestFilter;
use helmsift_types::Settings;

pub async fn execute(settings: &Settings) -> Result<()> {
    let filter = ManifestFilter::from_config(&settings.rules)?;

    println!("{}", "Exclusion rules".cyan().bold());
    print!("{}", filter.rules());
    println!("Separator: {:?}", filter.separator());

    Ok(())
}
