//! Render, filter and write in one pass.

use crate::filter::{FilterOutcome, ManifestFilter};
use crate::writer::{write_if_changed, WriteOutcome};
use helmsift_types::{RenderConfig, Renderer, Result, Settings};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pipeline wiring a renderer to the filter and the output writer.
pub struct ManifestPipeline<'a> {
    renderer: &'a dyn Renderer,
    filter: ManifestFilter,
}

impl<'a> ManifestPipeline<'a> {
    /// Create pipeline from a renderer and a filter.
    pub fn new(renderer: &'a dyn Renderer, filter: ManifestFilter) -> Self {
        Self { renderer, filter }
    }

    /// Create pipeline with rules taken from settings.
    pub fn from_settings(renderer: &'a dyn Renderer, settings: &Settings) -> Result<Self> {
        Ok(Self::new(renderer, ManifestFilter::from_config(&settings.rules)?))
    }

    /// Filter in use.
    pub fn filter(&self) -> &ManifestFilter {
        &self.filter
    }

    /// Render and filter without touching the filesystem.
    pub async fn render_filtered(&self, config: &RenderConfig) -> Result<FilterOutcome> {
        let rendered = self.renderer.render(config).await?;
        let outcome = self.filter.filter(&rendered);
        info!(
            "{} output filtered: {} kept, {} removed",
            self.renderer.name(),
            outcome.kept,
            outcome.removed
        );
        Ok(outcome)
    }

    /// Render, filter and write the result to `output` if it changed.
    ///
    /// Nothing is written when rendering fails.
    pub async fn execute(&self, config: &RenderConfig, output: impl AsRef<Path>) -> Result<PipelineResult> {
        let output = output.as_ref();
        let filtered = self.render_filtered(config).await?;
        let write = write_if_changed(output, &filtered.output)?;

        Ok(PipelineResult {
            output: output.to_path_buf(),
            write,
            filtered,
        })
    }
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Destination path
    pub output: PathBuf,
    /// Whether the destination was written
    pub write: WriteOutcome,
    /// Filter details
    pub filtered: FilterOutcome,
}

impl PipelineResult {
    /// Number of documents removed by the rules.
    pub fn removed(&self) -> usize {
        self.filtered.removed
    }

    /// Number of documents written out.
    pub fn kept(&self) -> usize {
        self.filtered.kept
    }

    /// Whether the output file was left untouched.
    pub fn is_unchanged(&self) -> bool {
        self.write == WriteOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use helmsift_types::HelmsiftError;
    use mockall::mock;
    use std::fs;
    use tempfile::TempDir;

    mock! {
        pub Render {}

        #[async_trait]
        impl Renderer for Render {
            async fn render(&self, config: &RenderConfig) -> Result<String>;
            fn name(&self) -> &'static str;
        }
    }

    const STREAM: &str = "A\n---\nkind: Deployment\nname: cert-manager-webhook\n---\nB";

    fn renderer_returning(stream: &'static str, times: usize) -> MockRender {
        let mut mock = MockRender::new();
        mock.expect_render()
            .times(times)
            .returning(move |_| Ok(stream.to_string()));
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_execute_writes_filtered_output() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("k8s").join("cert-manager-filtered.yaml");
        let renderer = renderer_returning(STREAM, 1);

        let pipeline = ManifestPipeline::from_settings(&renderer, &Settings::default()).unwrap();
        let result = pipeline.execute(&RenderConfig::default(), &out).await.unwrap();

        assert_eq!(result.removed(), 1);
        assert_eq!(result.kept(), 2);
        assert_eq!(result.write, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&out).unwrap(), "A\n---\nB");
    }

    #[tokio::test]
    async fn test_second_run_skips_write() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.yaml");
        let renderer = renderer_returning(STREAM, 2);
        let pipeline = ManifestPipeline::new(&renderer, ManifestFilter::default());

        let first = pipeline.execute(&RenderConfig::default(), &out).await.unwrap();
        let second = pipeline.execute(&RenderConfig::default(), &out).await.unwrap();

        assert!(!first.is_unchanged());
        assert!(second.is_unchanged());
        assert_eq!(first.filtered.output, second.filtered.output);
    }

    #[tokio::test]
    async fn test_render_failure_leaves_output_alone() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.yaml");
        fs::write(&out, "previous").unwrap();

        let mut renderer = MockRender::new();
        renderer.expect_render().times(1).returning(|_| {
            Err(HelmsiftError::Render {
                status: 1,
                stderr: "Error: chart \"cert-manager\" version \"v9\" not found\n".to_string(),
            })
        });
        renderer.expect_name().return_const("mock");

        let pipeline = ManifestPipeline::new(&renderer, ManifestFilter::default());
        let err = pipeline.execute(&RenderConfig::default(), &out).await.unwrap_err();

        assert!(err.is_render_failure());
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
    }

    #[tokio::test]
    async fn test_render_receives_config() {
        let mut renderer = MockRender::new();
        renderer
            .expect_render()
            .withf(|config: &RenderConfig| config.namespace.as_str() == "security")
            .times(1)
            .returning(|_| Ok(String::new()));
        renderer.expect_name().return_const("mock");

        let mut config = RenderConfig::default();
        config.namespace = helmsift_types::Namespace::new("security").unwrap();

        let pipeline = ManifestPipeline::new(&renderer, ManifestFilter::default());
        let outcome = pipeline.render_filtered(&config).await.unwrap();
        assert_eq!(outcome.output, "");
    }
}
