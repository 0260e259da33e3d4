//! Document types for multi-document YAML streams.

use serde::Deserialize;
use std::fmt;

/// One resource definition within a rendered stream.
///
/// The text is kept exactly as it appeared between separators; nothing in
/// this crate rewrites a kept document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    raw: &'a str,
}

impl<'a> Document<'a> {
    /// Wrap raw document text.
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The raw text, untouched.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Empty or whitespace-only documents carry no resource.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Literal substring check used by every exclusion rule.
    pub fn contains(&self, marker: &str) -> bool {
        self.raw.contains(marker)
    }

    /// Best-effort structured peek at `kind` and `metadata.name`.
    ///
    /// Only used for reporting. Returns `None` when the text doesn't
    /// parse or has no `kind`.
    pub fn resource(&self) -> Option<ResourceRef> {
        #[derive(Deserialize)]
        struct Metadata {
            name: Option<String>,
        }

        #[derive(Deserialize)]
        struct Peek {
            kind: Option<String>,
            metadata: Option<Metadata>,
        }

        let peek: Peek = serde_yaml::from_str(self.raw).ok()?;
        Some(ResourceRef {
            kind: peek.kind?,
            name: peek.metadata.and_then(|m| m.name),
        })
    }
}

/// Kind and name of a parsed document, for log lines and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Value of the top-level `kind` field
    pub kind: String,
    /// Value of `metadata.name`, if present
    pub name: Option<String>,
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}/{}", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered documents plus the separator they were split on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStream<'a> {
    documents: Vec<Document<'a>>,
    separator: &'a str,
}

impl<'a> DocumentStream<'a> {
    /// Split a blob on a literal separator.
    ///
    /// Blank documents are kept here; callers decide what to do with them.
    /// A blob without any separator is a single-document stream.
    pub fn split(blob: &'a str, separator: &'a str) -> Self {
        let documents = if separator.is_empty() {
            vec![Document::new(blob)]
        } else {
            blob.split(separator).map(Document::new).collect()
        };

        Self { documents, separator }
    }

    /// Build a stream from already separated documents.
    pub fn from_documents(documents: Vec<Document<'a>>, separator: &'a str) -> Self {
        Self { documents, separator }
    }

    /// Documents in stream order.
    pub fn documents(&self) -> &[Document<'a>] {
        &self.documents
    }

    /// Separator used by [`DocumentStream::join`].
    pub fn separator(&self) -> &'a str {
        self.separator
    }

    /// Number of documents, blank ones included.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the stream holds no documents at all.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Rejoin with the original separator, preserving order.
    pub fn join(&self) -> String {
        let mut out = String::with_capacity(
            self.documents.iter().map(|d| d.raw.len() + self.separator.len()).sum(),
        );
        for (i, doc) in self.documents.iter().enumerate() {
            if i > 0 {
                out.push_str(self.separator);
            }
            out.push_str(doc.raw);
        }
        out
    }
}

impl<'a> IntoIterator for &'a DocumentStream<'a> {
    type Item = &'a Document<'a>;
    type IntoIter = std::slice::Iter<'a, Document<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
