//! Helm integration for chart rendering.

use async_trait::async_trait;
use helmsift_core::util::{expand_path, process};
use helmsift_types::{HelmsiftError, RenderConfig, Renderer, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `helm template` executor.
#[derive(Debug, Clone)]
pub struct Helm {
    binary_path: PathBuf,
    extra_args: Vec<String>,
}

impl Helm {
    /// Create new Helm executor with default binary path.
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from("helm"),
            extra_args: Vec::new(),
        }
    }

    /// Set custom helm binary path. A leading `~` is expanded.
    pub fn with_binary(mut self, path: impl AsRef<Path>) -> Self {
        self.binary_path = expand_path(path);
        self
    }

    /// Append raw arguments after the generated ones (e.g. `--include-crds`).
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Executor using the binary named in `config`.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new().with_binary(&config.helm)
    }

    /// Binary that will be invoked.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Arguments for `helm template`, in invocation order.
    pub fn template_args(&self, config: &RenderConfig) -> Vec<String> {
        let mut args = vec![
            "template".to_string(),
            config.release.clone(),
            config.chart.to_string(),
            "--version".to_string(),
            config.version.to_string(),
            "--namespace".to_string(),
            config.namespace.to_string(),
        ];

        for set in &config.set {
            args.push("--set".to_string());
            args.push(set.to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Problems with `config` that won't stop helm but are worth reporting.
    ///
    /// A version range can resolve to a different release on every run, and
    /// a local chart path that doesn't exist will make helm fail.
    pub fn preflight(config: &RenderConfig) -> Vec<String> {
        let mut warnings = Vec::new();

        if !config.version.is_exact() {
            warnings.push(format!(
                "Chart version '{}' is a range; output may change between runs",
                config.version
            ));
        }
        if config.chart.is_local() && !Path::new(config.chart.as_str()).exists() {
            warnings.push(format!("Local chart '{}' does not exist", config.chart));
        }

        warnings
    }

    /// Check if helm binary is available.
    pub fn check_available(&self) -> bool {
        match process::run(&self.binary_path, &["version", "--short"]) {
            Ok(output) => output.success(),
            Err(_) => false,
        }
    }

    /// Get helm version.
    pub fn version(&self) -> Result<String> {
        let output = process::run(&self.binary_path, &["version", "--short"])?;

        if !output.success() {
            return Err(HelmsiftError::Render {
                status: output.status,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout.trim().to_string())
    }
}

impl Default for Helm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for Helm {
    async fn render(&self, config: &RenderConfig) -> Result<String> {
        let args = self.template_args(config);

        info!(
            "Rendering {} {} into namespace {}",
            config.chart, config.version, config.namespace
        );
        match config.chart.repo() {
            Some(repo) => debug!("Chart {} from repository {}", config.chart.name(), repo),
            None => debug!("Chart {} from {}", config.chart.name(), config.chart),
        }
        for warning in Self::preflight(config) {
            warn!("{}", warning);
        }
        debug!("Helm path: {}", self.binary_path.display());
        debug!("helm {}", args.join(" "));

        let rendered = process::run_async(&self.binary_path, &args)
            .await?
            .into_render_result()?;

        debug!("Helm produced {} bytes", rendered.len());
        Ok(rendered)
    }

    fn name(&self) -> &'static str {
        "helm"
    }
}
