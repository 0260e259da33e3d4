//! Document filtering.

use crate::rules::{MatchReason, RuleSet};
use crate::types::{Document, DocumentStream, ResourceRef};
use helmsift_types::{bail, Result, RuleConfig};
use tracing::{debug, trace};

/// A document dropped by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Position in the original stream (blank documents included)
    pub index: usize,
    /// Rule that fired
    pub reason: MatchReason,
    /// Parsed kind/name, when the document parses
    pub resource: Option<ResourceRef>,
}

/// Result of filtering one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Retained documents rejoined with the original separator
    pub output: String,
    /// Documents that matched an exclusion rule
    pub removed: usize,
    /// Documents that made it into `output`
    pub kept: usize,
    /// Blank documents dropped without being counted as removed
    pub skipped_blank: usize,
    /// Details for every removed document, in stream order
    pub removals: Vec<Removal>,
}

/// Splits a rendered stream, drops excluded documents and rejoins the rest.
///
/// Filtering is a pure text transform and cannot fail.
#[derive(Debug, Clone)]
pub struct ManifestFilter {
    rules: RuleSet,
    separator: String,
}

impl ManifestFilter {
    /// Create a filter from compiled rules and a separator.
    pub fn new(rules: RuleSet, separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            bail!(Validation, "Document separator must not be empty");
        }
        Ok(Self { rules, separator })
    }

    /// Create a filter from configuration.
    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        Self::new(RuleSet::from_config(config)?, config.separator.clone())
    }

    /// Active rules.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Separator used to split and rejoin.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Filter a raw multi-document blob.
    pub fn filter(&self, blob: &str) -> FilterOutcome {
        let stream = DocumentStream::split(blob, &self.separator);
        trace!("Split stream into {} documents", stream.len());

        let mut kept: Vec<Document<'_>> = Vec::with_capacity(stream.len());
        let mut removals = Vec::new();
        let mut skipped_blank = 0;

        for (index, doc) in stream.documents().iter().enumerate() {
            if doc.is_blank() {
                skipped_blank += 1;
                continue;
            }

            match self.rules.evaluate(doc) {
                Some(reason) => {
                    let resource = doc.resource();
                    match &resource {
                        Some(r) => debug!("Removing document #{} ({}): {}", index, r, reason),
                        None => debug!("Removing document #{}: {}", index, reason),
                    }
                    removals.push(Removal { index, reason, resource });
                }
                None => kept.push(*doc),
            }
        }

        let kept_count = kept.len();
        let output = DocumentStream::from_documents(kept, &self.separator).join();

        FilterOutcome {
            output,
            removed: removals.len(),
            kept: kept_count,
            skipped_blank,
            removals,
        }
    }
}

impl Default for ManifestFilter {
    fn default() -> Self {
        let config = RuleConfig::default();
        match Self::from_config(&config) {
            Ok(filter) => filter,
            Err(e) => unreachable!("built-in rules are valid: {}", e),
        }
    }
}
