//! # Helmsift Manifest
//!
//! Rendering and post-processing of multi-document manifest streams:
//! - Document and stream types (split and rejoin on a literal separator)
//! - Textual exclusion rules
//! - The document filter
//! - Helm integration for `helm template`
//! - Idempotent output writing
//! - The render → filter → write pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod rules;
pub mod filter;
pub mod helm;
pub mod writer;
pub mod pipeline;

// Re-export main types
pub use types::{Document, DocumentStream, ResourceRef};
pub use rules::{MatchReason, RuleSet};
pub use filter::{FilterOutcome, ManifestFilter, Removal};
pub use helm::Helm;
pub use writer::{write_if_changed, WriteOutcome};
pub use pipeline::{ManifestPipeline, PipelineResult};

use helmsift_types::{Result, RuleConfig};

/// Filtering facade for simple use cases.
pub struct Manifest;

impl Manifest {
    /// Filter a rendered stream with the built-in cert-manager webhook rules.
    pub fn filter(blob: &str) -> FilterOutcome {
        ManifestFilter::default().filter(blob)
    }

    /// Filter a rendered stream with configured rules.
    pub fn filter_with(blob: &str, rules: &RuleConfig) -> Result<FilterOutcome> {
        Ok(ManifestFilter::from_config(rules)?.filter(blob))
    }
}
