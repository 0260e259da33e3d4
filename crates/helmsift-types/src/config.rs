//! Configuration types and structures.
//!
//! Every value the tool used to hard-code (chart, version, namespace,
//! toggles, markers, output path) lives here with its historical default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::{ChartRef, ChartVersion, LogFormat, LogLevel, Namespace, ResourceKind, SetValue};

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "k8s/cert-manager-filtered.yaml";

/// Separator `helm template` places between documents.
pub const DEFAULT_SEPARATOR: &str = "\n---";

/// Inputs to one `helm template` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Path or name of the helm binary
    #[serde(default = "default_helm")]
    pub helm: PathBuf,
    /// Release name
    #[serde(default = "default_release")]
    pub release: String,
    /// Chart reference
    #[serde(default = "default_chart")]
    pub chart: ChartRef,
    /// Chart version
    #[serde(default = "default_version")]
    pub version: ChartVersion,
    /// Target namespace
    #[serde(default = "default_namespace")]
    pub namespace: Namespace,
    /// `--set` overrides, passed in order
    #[serde(default = "default_set")]
    pub set: Vec<SetValue>,
}

fn default_helm() -> PathBuf {
    PathBuf::from("helm")
}

fn default_release() -> String {
    "cert-manager".to_string()
}

fn default_chart() -> ChartRef {
    match ChartRef::new("jetstack/cert-manager") {
        Ok(value) => value,
        Err(e) => unreachable!("default chart reference is valid: {}", e),
    }
}

fn default_version() -> ChartVersion {
    match ChartVersion::new("v1.14.4") {
        Ok(value) => value,
        Err(e) => unreachable!("default chart version is valid: {}", e),
    }
}

fn default_namespace() -> Namespace {
    match Namespace::new("cert-manager") {
        Ok(value) => value,
        Err(e) => unreachable!("default namespace is valid: {}", e),
    }
}

fn default_set() -> Vec<SetValue> {
    ["webhook.enabled", "startupapicheck.enabled"]
        .into_iter()
        .filter_map(|key| SetValue::toggle(key, false).ok())
        .collect()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            helm: default_helm(),
            release: default_release(),
            chart: default_chart(),
            version: default_version(),
            namespace: default_namespace(),
            set: default_set(),
        }
    }
}

/// Exclusion rules applied to each rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Literal name marker identifying the unwanted component
    #[serde(default = "default_component")]
    pub component: String,
    /// Kinds removed only when the component marker is also present
    #[serde(default = "default_guarded_kinds")]
    pub guarded_kinds: Vec<ResourceKind>,
    /// Kinds removed whenever they appear
    #[serde(default = "default_unconditional_kinds")]
    pub unconditional_kinds: Vec<ResourceKind>,
    /// Document separator used to split and rejoin the stream
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_component() -> String {
    "cert-manager-webhook".to_string()
}

fn default_guarded_kinds() -> Vec<ResourceKind> {
    vec![
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::ServiceAccount,
        ResourceKind::ClusterRole,
        ResourceKind::ClusterRoleBinding,
        ResourceKind::Role,
        ResourceKind::RoleBinding,
    ]
}

fn default_unconditional_kinds() -> Vec<ResourceKind> {
    vec![
        ResourceKind::ValidatingWebhookConfiguration,
        ResourceKind::MutatingWebhookConfiguration,
    ]
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            component: default_component(),
            guarded_kinds: default_guarded_kinds(),
            unconditional_kinds: default_unconditional_kinds(),
            separator: default_separator(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    #[serde(default)]
    pub level: LogLevel,
    /// Log format (pretty, json, compact)
    #[serde(default)]
    pub format: LogFormat,
    /// Optional file that receives a copy of every log line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Rendering tool inputs
    #[serde(default)]
    pub render: RenderConfig,
    /// Exclusion rules
    #[serde(default)]
    pub rules: RuleConfig,
    /// Where the filtered stream is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            rules: RuleConfig::default(),
            output: default_output(),
            logging: LoggingConfig::default(),
        }
    }
}
