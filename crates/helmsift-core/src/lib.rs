//! # Helmsift Core
//!
//! Core utilities, configuration management and logging for helmsift.
//!
//! This crate provides:
//!
//! - **Configuration**: Layered configuration (defaults, file, environment, flags)
//! - **Logging**: `tracing` initialisation with optional file output
//! - **Process Execution**: Command execution with captured output
//! - **File Operations**: YAML loading, atomic writes, path utilities
//!
//! ## Example
//!
//! ```no_run
//! use helmsift_core::{config::Config, log};
//!
//! let settings = Config::load("helmsift.yml")?.with_process_env()?.settings()?;
//! let _guard = log::init(&settings.logging, None)?;
//! # Ok::<(), helmsift_types::HelmsiftError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{Config, ConfigLayer};
pub use helmsift_types::{HelmsiftError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "helmsift";
