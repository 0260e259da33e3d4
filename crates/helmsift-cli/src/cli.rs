//! CLI structure and command definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use helmsift_core::config::{Config, DEFAULT_CONFIG_FILE};
use helmsift_types::{LogLevel, SetValue, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "helmsift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a Helm chart and drop unwanted manifest documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./helmsift.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log at trace level
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the chart, filter it and write the result
    Generate(GenerateArgs),

    /// Filter an already rendered stream without invoking helm
    Filter {
        /// Rendered stream to read ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Write to this file (only when changed) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the active exclusion rules
    Rules,

    /// Show version information
    Version {
        /// Include build and helm details
        #[arg(long)]
        full: bool,
    },
}

/// Overrides for the render step; anything omitted comes from config.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Helm binary to invoke
    #[arg(long, value_name = "PATH")]
    pub helm: Option<PathBuf>,

    /// Chart reference (e.g. jetstack/cert-manager)
    #[arg(long)]
    pub chart: Option<String>,

    /// Release name passed to helm template
    #[arg(long)]
    pub release: Option<String>,

    /// Chart version
    #[arg(long = "chart-version", value_name = "VERSION")]
    pub chart_version: Option<String>,

    /// Target namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Extra chart value (repeatable), appended to the configured ones
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<SetValue>,

    /// Output file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(helm) = &self.helm {
            config.set("render.helm", helm)?;
        }
        if let Some(chart) = &self.chart {
            config.set("render.chart", chart)?;
        }
        if let Some(release) = &self.release {
            config.set("render.release", release)?;
        }
        if let Some(version) = &self.chart_version {
            config.set("render.version", version)?;
        }
        if let Some(namespace) = &self.namespace {
            config.set("render.namespace", namespace)?;
        }
        if !self.set.is_empty() {
            let mut values: Vec<String> = config.get("render.set").unwrap_or_default();
            values.extend(self.set.iter().map(ToString::to_string));
            config.set("render.set", values)?;
        }
        if let Some(output) = &self.output {
            config.set("output", output)?;
        }
        Ok(())
    }
}

impl Cli {
    /// Log level requested on the command line, if any.
    pub fn level_override(&self) -> Option<LogLevel> {
        if self.quiet {
            Some(LogLevel::Warn)
        } else if self.debug {
            Some(LogLevel::Trace)
        } else if self.verbose {
            Some(LogLevel::Debug)
        } else {
            None
        }
    }

    /// Resolve settings from the config file, the environment and flags.
    pub fn settings(&self) -> Result<Settings> {
        let path = match &self.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let mut config = Config::load(&path)
            .and_then(Config::with_process_env)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if let Commands::Generate(args) = &self.command {
            args.apply(&mut config)?;
        }

        config.settings().context("Invalid configuration")
    }

    pub async fn execute(&self, settings: &Settings) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Generate(_) => generate::execute(settings).await,
            Commands::Filter { input, output } => {
                filter::execute(settings, input.as_deref(), output.as_deref()).await
            }
            Commands::Rules => rules::execute(settings).await,
            Commands::Version { full } => version::execute(settings, *full).await,
        }
    }
}
