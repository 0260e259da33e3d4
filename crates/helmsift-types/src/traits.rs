//! Core trait definitions for helmsift abstractions.

use async_trait::async_trait;
use crate::config::RenderConfig;
use crate::errors::Result;

/// Trait for template-rendering backends.
///
/// Implementers expand a packaged chart into a multi-document YAML stream.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render the chart described by `config`.
    ///
    /// Returns the tool's standard output. A tool that exits unsuccessfully
    /// must surface as [`crate::HelmsiftError::Render`] with its stderr intact.
    async fn render(&self, config: &RenderConfig) -> Result<String>;

    /// Short name used in log lines (e.g. "helm").
    fn name(&self) -> &'static str;
}
