//! Common enumerations used throughout helmsift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{HelmsiftError, Result};

/// Log level enumeration for the logging system.
///
/// Parsed case-insensitively, so `info` and `INFO` both work in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl FromStr for LogLevel {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" | "OFF" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(HelmsiftError::Validation(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.to_string()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Kubernetes resource kinds the exclusion rules know about.
///
/// Anything else can still be named through [`ResourceKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceKind {
    /// apps/v1 Deployment
    Deployment,
    /// v1 Service
    Service,
    /// v1 ServiceAccount
    ServiceAccount,
    /// rbac ClusterRole
    ClusterRole,
    /// rbac ClusterRoleBinding
    ClusterRoleBinding,
    /// rbac Role
    Role,
    /// rbac RoleBinding
    RoleBinding,
    /// admissionregistration ValidatingWebhookConfiguration
    ValidatingWebhookConfiguration,
    /// admissionregistration MutatingWebhookConfiguration
    MutatingWebhookConfiguration,
    /// Any other kind, by name
    Custom(String),
}

impl ResourceKind {
    /// Kind name as it appears after `kind:` in a manifest.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::Role => "Role",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::ValidatingWebhookConfiguration => "ValidatingWebhookConfiguration",
            ResourceKind::MutatingWebhookConfiguration => "MutatingWebhookConfiguration",
            ResourceKind::Custom(name) => name.as_str(),
        }
    }

    /// Literal text searched for in a document: `kind: <Name>`.
    pub fn marker(&self) -> String {
        format!("kind: {}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = HelmsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "Deployment" => ResourceKind::Deployment,
            "Service" => ResourceKind::Service,
            "ServiceAccount" => ResourceKind::ServiceAccount,
            "ClusterRole" => ResourceKind::ClusterRole,
            "ClusterRoleBinding" => ResourceKind::ClusterRoleBinding,
            "Role" => ResourceKind::Role,
            "RoleBinding" => ResourceKind::RoleBinding,
            "ValidatingWebhookConfiguration" => ResourceKind::ValidatingWebhookConfiguration,
            "MutatingWebhookConfiguration" => ResourceKind::MutatingWebhookConfiguration,
            other => {
                let mut chars = other.chars();
                let starts_upper = chars.next().map_or(false, |c| c.is_ascii_uppercase());
                if !starts_upper || !chars.all(|c| c.is_ascii_alphanumeric()) {
                    return Err(HelmsiftError::Validation(format!(
                        "Invalid resource kind '{}': expected an UpperCamelCase kind name",
                        other
                    )));
                }
                ResourceKind::Custom(other.to_string())
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = HelmsiftError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ResourceKind> for String {
    fn from(value: ResourceKind) -> Self {
        value.as_str().to_string()
    }
}
