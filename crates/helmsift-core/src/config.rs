//! Configuration management for helmsift.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (`helmsift.yml`)
//! - Environment variable overrides (`HELMSIFT_*`)
//! - Programmatic updates (command-line flags)
//! - Schema validation
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Programmatically set values
//! 2. Environment variables
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use helmsift_core::config::Config;
//!
//! let mut config = Config::load("helmsift.yml")?.with_process_env()?;
//! config.set("render.namespace", "security")?;
//!
//! let settings = config.settings()?;
//! assert_eq!(settings.render.namespace.as_str(), "security");
//! # Ok::<(), helmsift_types::HelmsiftError>(())
//! ```

use crate::util::data::{deep_merge, get_path, load_yaml, set_path};
use helmsift_types::{HelmsiftError, Result, Settings};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::fs;
use tracing::debug;

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "helmsift.yml";

/// Environment variables and the config keys they override.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HELMSIFT_HELM", "render.helm"),
    ("HELMSIFT_CHART", "render.chart"),
    ("HELMSIFT_CHART_VERSION", "render.version"),
    ("HELMSIFT_NAMESPACE", "render.namespace"),
    ("HELMSIFT_OUTPUT", "output"),
    ("HELMSIFT_LOG", "logging.level"),
];

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values from environment variables
    Environment = 2,
    /// Values set programmatically
    Set = 3,
}

impl ConfigLayer {
    /// All layers, lowest priority first.
    pub const ALL: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Environment,
        ConfigLayer::Set,
    ];
}

static SETTINGS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let kinds = json!({"type": "array", "items": {"type": "string", "pattern": "^[A-Z][A-Za-z0-9]*$"}});
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "render": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "helm": {"type": "string", "minLength": 1},
                    "release": {"type": "string", "minLength": 1},
                    "chart": {"type": "string", "minLength": 1},
                    "version": {"type": "string", "minLength": 1},
                    "namespace": {
                        "type": "string",
                        "maxLength": 63,
                        "pattern": "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$"
                    },
                    "set": {"type": "array", "items": {"type": "string", "pattern": "="}}
                }
            },
            "rules": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "component": {"type": "string", "minLength": 1},
                    "guarded_kinds": kinds.clone(),
                    "unconditional_kinds": kinds,
                    "separator": {"type": "string", "minLength": 1}
                }
            },
            "output": {"type": "string", "minLength": 1},
            "logging": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "level": {"type": "string"},
                    "format": {"enum": ["pretty", "json", "compact"]},
                    "file": {"type": "string", "minLength": 1}
                }
            }
        }
    })
});

/// Main configuration structure with multi-layer support.
///
/// Layers are kept as raw JSON trees and only turned into [`Settings`]
/// once every layer is in place.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Configuration holding only the built-in defaults.
    pub fn new() -> Result<Self> {
        let defaults = serde_json::to_value(Settings::default())
            .map_err(|e| HelmsiftError::Config(format!("Failed to serialize defaults: {}", e)))?;

        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, defaults);

        Ok(Self {
            layers,
            file_path: None,
        })
    }

    /// Create a configuration from a file path.
    ///
    /// If the file doesn't exist, only the defaults are used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::new()?;

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| HelmsiftError::Config(format!("Failed to read config file: {}", e)))?;
            config.load_str(&content)?;
            debug!("Loaded configuration from {}", path.display());
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML into the loaded layer, replacing any previous one.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let value = if content.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            load_yaml(content)
                .map_err(|e| HelmsiftError::Config(format!("Failed to parse config: {}", e)))?
        };

        self.layers.insert(ConfigLayer::Loaded, value);
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn with_process_env(self) -> Result<Self> {
        self.with_env_vars(std::env::vars())
    }

    /// Apply overrides from the given variables.
    ///
    /// Only the names listed in [`ENV_OVERRIDES`] are considered; empty
    /// values are ignored.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Value::Object(Default::default());

        for (name, value) in vars {
            let Some((_, key)) = ENV_OVERRIDES.iter().find(|(var, _)| *var == name.as_ref()) else {
                continue;
            };
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            debug!("Config override {} from environment", key);
            set_path(&mut layer, key, Value::String(value))?;
        }

        self.layers.insert(ConfigLayer::Environment, layer);
        Ok(self)
    }

    /// Get a configuration value by key, respecting layer priority.
    ///
    /// Returns None if the key doesn't exist in any layer.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        for layer in ConfigLayer::ALL.iter().rev() {
            if let Some(value) = self.layers.get(layer).and_then(|data| get_path(data, key)) {
                if let Ok(typed_value) = serde_json::from_value(value.clone()) {
                    return Some(typed_value);
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| HelmsiftError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        set_path(set_layer, key, value)
    }

    /// Path of the file this configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get merged data from all layers.
    pub fn merged_data(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in &ConfigLayer::ALL {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }

    /// Validate the merged configuration against the settings schema.
    pub fn validate(&self) -> Result<()> {
        let instance = self.merged_data();

        let compiled = jsonschema::JSONSchema::compile(&SETTINGS_SCHEMA)
            .map_err(|e| HelmsiftError::Config(format!("Invalid schema: {}", e)))?;

        let result = compiled.validate(&instance);
        if let Err(errors) = result {
            let error_msgs: Vec<String> = errors
                .map(|e| format!("{} (at '{}')", e, e.instance_path))
                .collect();
            return Err(HelmsiftError::Config(format!(
                "Validation failed: {}",
                error_msgs.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate and resolve into typed settings.
    pub fn settings(&self) -> Result<Settings> {
        self.validate()?;
        serde_json::from_value(self.merged_data())
            .map_err(|e| HelmsiftError::Config(format!("Failed to parse settings: {}", e)))
    }
}
