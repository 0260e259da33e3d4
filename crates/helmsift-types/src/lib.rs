//! # Helmsift Types
//!
//! Core types, traits, and enums shared across all helmsift crates.
//!
//! This crate provides:
//!
//! - Validated wrappers for namespaces, chart references, versions and `--set` overrides
//! - Enums for log levels and Kubernetes resource kinds
//! - The [`Renderer`] trait implemented by template-rendering backends
//! - Configuration structs with their defaults
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use helmsift_types::{Namespace, ResourceKind, SetValue};
//!
//! let ns = Namespace::new("cert-manager").unwrap();
//! assert_eq!(ns.as_str(), "cert-manager");
//!
//! let toggle: SetValue = "webhook.enabled=false".parse().unwrap();
//! assert_eq!(toggle.key(), "webhook.enabled");
//!
//! assert_eq!(ResourceKind::Deployment.marker(), "kind: Deployment");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{HelmsiftError, Result};
pub use identifiers::{ChartRef, ChartVersion, Namespace, SetValue};
pub use enums::{LogFormat, LogLevel, ResourceKind};
pub use traits::Renderer;
pub use config::{LoggingConfig, RenderConfig, RuleConfig, Settings};
