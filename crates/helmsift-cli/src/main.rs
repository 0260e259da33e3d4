//! Helmsift CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use helmsift_types::HelmsiftError;

mod cli;
mod commands;
mod ui;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(_) => Ok(()),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;
    let _guard = helmsift_core::log::init(&settings.logging, cli.level_override())?;

    cli.execute(&settings).await
}

fn report(error: &anyhow::Error) {
    let render_failure = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<HelmsiftError>())
        .and_then(|e| match e {
            HelmsiftError::Render { stderr, .. } => Some(stderr),
            _ => None,
        });

    match render_failure {
        Some(stderr) => {
            eprintln!("{}", "Error running Helm:".red().bold());
            eprint!("{}", stderr);
        }
        None => eprintln!("{} {:#}", "An error occurred:".red().bold(), error),
    }
}
