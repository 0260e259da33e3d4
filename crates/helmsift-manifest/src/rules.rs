//! Exclusion rules.
//!
//! Matching is purely textual: a rule fires when its marker substrings are
//! present in the raw document. Overlapping markers behave exactly as plain
//! substring search does, so `kind: ClusterRole` also fires on a
//! ClusterRoleBinding and `kind: Role` on a RoleBinding. The one exception is
//! `kind: Service`, which is ignored when `kind: ServiceAccount` is present.

use crate::types::Document;
use helmsift_types::{bail, ResourceKind, Result, RuleConfig};
use std::fmt;

/// Why a document was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// The component marker and a guarded kind marker were both present
    Component {
        /// Component name marker
        component: String,
        /// Guarded kind whose marker matched
        kind: ResourceKind,
    },
    /// An unconditionally excluded kind marker was present
    Kind(ResourceKind),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::Component { component, kind } => {
                write!(f, "{} matched together with '{}'", kind, component)
            }
            MatchReason::Kind(kind) => write!(f, "{} is always excluded", kind),
        }
    }
}

#[derive(Debug, Clone)]
struct KindMarker {
    kind: ResourceKind,
    marker: String,
}

impl KindMarker {
    fn new(kind: &ResourceKind) -> Self {
        Self {
            kind: kind.clone(),
            marker: kind.marker(),
        }
    }
}

/// Compiled exclusion rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    component: String,
    guarded: Vec<KindMarker>,
    unconditional: Vec<KindMarker>,
    service_account_marker: String,
}

impl RuleSet {
    /// Compile rules from their parts.
    ///
    /// # Errors
    ///
    /// An empty component marker would match every document, so it is rejected.
    pub fn new(
        component: impl Into<String>,
        guarded_kinds: &[ResourceKind],
        unconditional_kinds: &[ResourceKind],
    ) -> Result<Self> {
        let component = component.into();
        if component.trim().is_empty() {
            bail!(Validation, "Component marker must not be empty");
        }

        Ok(Self {
            component,
            guarded: guarded_kinds.iter().map(KindMarker::new).collect(),
            unconditional: unconditional_kinds.iter().map(KindMarker::new).collect(),
            service_account_marker: ResourceKind::ServiceAccount.marker(),
        })
    }

    /// Compile rules from configuration.
    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        Self::new(
            config.component.clone(),
            &config.guarded_kinds,
            &config.unconditional_kinds,
        )
    }

    /// Component name marker.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Kinds removed only alongside the component marker, in evaluation order.
    pub fn guarded_kinds(&self) -> impl Iterator<Item = &ResourceKind> {
        self.guarded.iter().map(|k| &k.kind)
    }

    /// Kinds removed whenever present, in evaluation order.
    pub fn unconditional_kinds(&self) -> impl Iterator<Item = &ResourceKind> {
        self.unconditional.iter().map(|k| &k.kind)
    }

    fn guarded_hit(&self, doc: &Document<'_>, kind: &KindMarker) -> bool {
        if !doc.contains(&kind.marker) {
            return false;
        }
        if kind.kind == ResourceKind::Service {
            return !doc.contains(&self.service_account_marker);
        }
        true
    }

    /// First rule that removes `doc`, or `None` when it is kept.
    ///
    /// Rules are evaluated in order and evaluation stops at the first hit,
    /// so a document is never counted twice.
    pub fn evaluate(&self, doc: &Document<'_>) -> Option<MatchReason> {
        if doc.contains(&self.component) {
            if let Some(kind) = self.guarded.iter().find(|k| self.guarded_hit(doc, k)) {
                return Some(MatchReason::Component {
                    component: self.component.clone(),
                    kind: kind.kind.clone(),
                });
            }
        }

        self.unconditional
            .iter()
            .find(|k| doc.contains(&k.marker))
            .map(|k| MatchReason::Kind(k.kind.clone()))
    }

    /// Whether any rule removes `doc`.
    pub fn excludes(&self, doc: &Document<'_>) -> bool {
        self.evaluate(doc).is_some()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Documents containing '{}' and any of:", self.component)?;
        for kind in &self.guarded {
            if kind.kind == ResourceKind::Service {
                writeln!(f, "  - {} (unless '{}' is present)", kind.marker, self.service_account_marker)?;
            } else {
                writeln!(f, "  - {}", kind.marker)?;
            }
        }
        writeln!(f, "Documents containing any of:")?;
        for kind in &self.unconditional {
            writeln!(f, "  - {}", kind.marker)?;
        }
        Ok(())
    }
}
