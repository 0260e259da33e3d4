//! Type-safe identifiers for chart rendering inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{HelmsiftError, Result};

/// A validated Kubernetes namespace name (RFC 1123 label).
///
/// Namespace names must:
/// - Be at most 63 characters long
/// - Contain only lowercase letters, digits, and hyphens
/// - Start and end with a letter or digit
///
/// # Example
///
/// ```
/// use helmsift_types::Namespace;
///
/// let ns = Namespace::new("cert-manager").unwrap();
/// assert_eq!(ns.as_str(), "cert-manager");
///
/// // Invalid names are rejected
/// assert!(Namespace::new("Cert-Manager").is_err());
/// assert!(Namespace::new("-invalid").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Longest label Kubernetes accepts.
    pub const MAX_LEN: usize = 63;

    /// Create a new validated namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid RFC 1123 label.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if !Self::is_valid(name) {
            return Err(HelmsiftError::Validation(format!(
                "Invalid namespace '{}': must be at most {} lowercase letters, digits, and hyphens, \
                starting and ending with a letter or digit",
                name,
                Self::MAX_LEN
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Check if a name is valid without allocating.
    pub fn is_valid(name: &str) -> bool {
        if name.is_empty() || name.len() > Self::MAX_LEN {
            return false;
        }

        let bytes = name.as_bytes();
        let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();

        if !edge_ok(bytes[0]) || !edge_ok(bytes[bytes.len() - 1]) {
            return false;
        }

        bytes.iter().all(|&b| edge_ok(b) || b == b'-')
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Namespace {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

/// A chart reference as understood by `helm template`.
///
/// Either `repo/chart`, a local path, or a URL. Only emptiness and
/// embedded whitespace are rejected; helm resolves the rest.
///
/// # Example
///
/// ```
/// use helmsift_types::ChartRef;
///
/// let chart = ChartRef::new("jetstack/cert-manager").unwrap();
/// assert_eq!(chart.repo(), Some("jetstack"));
/// assert_eq!(chart.name(), "cert-manager");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChartRef(String);

impl ChartRef {
    /// Create a new chart reference.
    pub fn new(reference: impl AsRef<str>) -> Result<Self> {
        let reference = reference.as_ref();
        if reference.is_empty() || reference.chars().any(char::is_whitespace) {
            return Err(HelmsiftError::Validation(format!(
                "Invalid chart reference '{}': must be non-empty and contain no whitespace",
                reference
            )));
        }
        Ok(Self(reference.to_string()))
    }

    /// Repository alias for `repo/chart` references.
    ///
    /// Returns `None` for local paths and URLs.
    pub fn repo(&self) -> Option<&str> {
        if self.is_local() || self.0.contains("://") {
            return None;
        }
        self.0.split_once('/').map(|(repo, _)| repo)
    }

    /// Chart name: the last path segment.
    pub fn name(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.0)
    }

    /// Whether this points at a chart directory or archive on disk.
    pub fn is_local(&self) -> bool {
        self.0.starts_with('.') || self.0.starts_with('/') || self.0.ends_with(".tgz")
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChartRef {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChartRef {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ChartRef> for String {
    fn from(value: ChartRef) -> Self {
        value.0
    }
}

static EXACT_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v?\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$")
        .expect("exact version pattern is valid")
});

/// A chart version or version constraint passed to `--version`.
///
/// # Example
///
/// ```
/// use helmsift_types::ChartVersion;
///
/// let v = ChartVersion::new("v1.14.4").unwrap();
/// assert!(v.is_exact());
/// assert!(!ChartVersion::new("^1.14").unwrap().is_exact());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChartVersion(String);

impl ChartVersion {
    /// Create a new chart version.
    pub fn new(version: impl AsRef<str>) -> Result<Self> {
        let version = version.as_ref().trim();
        if version.is_empty() || version.chars().any(char::is_whitespace) {
            return Err(HelmsiftError::Validation(format!(
                "Invalid chart version '{}': must be non-empty and contain no whitespace",
                version
            )));
        }
        Ok(Self(version.to_string()))
    }

    /// Whether this pins a single release rather than a range.
    pub fn is_exact(&self) -> bool {
        EXACT_VERSION.is_match(&self.0)
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChartVersion {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChartVersion {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ChartVersion> for String {
    fn from(value: ChartVersion) -> Self {
        value.0
    }
}

static SET_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(\[\d+\])?(\.[A-Za-z0-9_\-]+(\[\d+\])?)*$")
        .expect("set key pattern is valid")
});

/// A single `--set key=value` override.
///
/// # Example
///
/// ```
/// use helmsift_types::SetValue;
///
/// let toggle: SetValue = "webhook.enabled=false".parse().unwrap();
/// assert_eq!(toggle.key(), "webhook.enabled");
/// assert_eq!(toggle.value(), "false");
/// assert_eq!(toggle.to_string(), "webhook.enabled=false");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SetValue {
    key: String,
    value: String,
}

impl SetValue {
    /// Create a new override from its parts.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if !SET_KEY.is_match(&key) {
            return Err(HelmsiftError::Validation(format!(
                "Invalid --set key '{}': expected dotted path like 'webhook.enabled'",
                key
            )));
        }
        Ok(Self { key, value: value.into() })
    }

    /// Boolean feature toggle, e.g. `webhook.enabled=false`.
    pub fn toggle(key: impl Into<String>, enabled: bool) -> Result<Self> {
        Self::new(key, enabled.to_string())
    }

    /// Dotted key path.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw value, passed to helm unchanged.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl FromStr for SetValue {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s.split_once('=').ok_or_else(|| {
            HelmsiftError::Validation(format!("Invalid --set '{}': expected key=value", s))
        })?;
        Self::new(key.trim(), value)
    }
}

impl TryFrom<String> for SetValue {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SetValue> for String {
    fn from(value: SetValue) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_namespace_validation() {
        assert!(Namespace::new("cert-manager").is_ok());
        assert!(Namespace::new("ns1").is_ok());
        assert!(Namespace::new("1ns").is_ok());

        assert!(Namespace::new("").is_err());
        assert!(Namespace::new("Cert").is_err());
        assert!(Namespace::new("-ns").is_err());
        assert!(Namespace::new("ns-").is_err());
        assert!(Namespace::new("my_ns").is_err());
        assert!(Namespace::new("a".repeat(64)).is_err());
        assert!(Namespace::new("a".repeat(63)).is_ok());
    }

    #[test]
    fn test_chart_ref_parts() {
        let chart = ChartRef::new("jetstack/cert-manager").unwrap();
        assert_eq!(chart.repo(), Some("jetstack"));
        assert_eq!(chart.name(), "cert-manager");
        assert!(!chart.is_local());

        let local = ChartRef::new("./charts/cert-manager/").unwrap();
        assert!(local.is_local());
        assert_eq!(local.repo(), None);
        assert_eq!(local.name(), "cert-manager");

        let oci = ChartRef::new("oci://quay.io/jetstack/cert-manager").unwrap();
        assert_eq!(oci.repo(), None);
        assert_eq!(oci.name(), "cert-manager");

        assert!(ChartRef::new("").is_err());
        assert!(ChartRef::new("jetstack/ cert-manager").is_err());
    }

    #[test]
    fn test_chart_version() {
        assert!(ChartVersion::new("v1.14.4").unwrap().is_exact());
        assert!(ChartVersion::new("1.14.4-rc.1").unwrap().is_exact());
        assert!(!ChartVersion::new(">=1.14.0").unwrap().is_exact());
        assert!(ChartVersion::new("").is_err());
        assert!(ChartVersion::new("1 2").is_err());
    }

    #[test]
    fn test_set_value_parsing() {
        let set: SetValue = "startupapicheck.enabled=false".parse().unwrap();
        assert_eq!(set.key(), "startupapicheck.enabled");
        assert_eq!(set.value(), "false");

        let with_eq: SetValue = "extraArgs[0]=--flag=value".parse().unwrap();
        assert_eq!(with_eq.key(), "extraArgs[0]");
        assert_eq!(with_eq.value(), "--flag=value");

        assert!("no-equals".parse::<SetValue>().is_err());
        assert!("=value".parse::<SetValue>().is_err());
        assert!("bad key=1".parse::<SetValue>().is_err());

        let toggle = SetValue::toggle("webhook.enabled", false).unwrap();
        assert_eq!(toggle.to_string(), "webhook.enabled=false");
    }

    #[test]
    fn test_identifiers_serde_roundtrip_through_strings() {
        let ns: Namespace = serde_json::from_str("\"cert-manager\"").unwrap();
        assert_eq!(ns.as_str(), "cert-manager");
        assert!(serde_json::from_str::<Namespace>("\"Bad\"").is_err());

        let set: SetValue = serde_json::from_str("\"webhook.enabled=false\"").unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "\"webhook.enabled=false\"");
    }

    proptest! {
        #[test]
        fn prop_valid_labels_accepted(name in "[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?") {
            prop_assert!(Namespace::is_valid(&name));
        }

        #[test]
        fn prop_uppercase_rejected(name in "[a-z0-9]{0,10}[A-Z][a-z0-9]{0,10}") {
            prop_assert!(!Namespace::is_valid(&name));
        }
    }
}
