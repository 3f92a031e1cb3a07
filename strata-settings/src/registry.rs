//! Registry of legal setting keys
//!
//! The registry is advisory: writes to keys it does not know still succeed,
//! they only produce a warning.

use crate::error::SettingsResult;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Source of truth for which setting keys exist
pub trait SettingRegistry {
    fn setting_exists(&self, key: &str) -> bool;
}

/// Set of legal keys, usually loaded from a definitions document
///
/// A definitions document is YAML or JSON with a top-level `settings` mapping.
/// Each entry's key is a legal setting name; entries may nest further
/// settings under `children`, which are flattened into the same set:
///
/// ```yaml
/// settings:
///   resolution:
///     label: Quality
///     children:
///       layer_height: { type: float, default_value: 0.1 }
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: BTreeSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a definitions document from a file
    pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_definitions_str(&content)
    }

    /// Load a definitions document from YAML or JSON text
    pub fn from_definitions_str(content: &str) -> SettingsResult<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        let mut registry = Self::new();
        if let Some(settings) = document.get("settings") {
            registry.collect(settings);
        }
        log::debug!("Loaded {} setting definitions", registry.len());
        Ok(registry)
    }

    fn collect(&mut self, node: &Value) {
        let Some(mapping) = node.as_mapping() else {
            return;
        };
        for (name, definition) in mapping {
            if let Some(name) = name.as_str() {
                self.keys.insert(name.to_string());
            }
            if let Some(children) = definition.get("children") {
                self.collect(children);
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl SettingRegistry for KeyRegistry {
    fn setting_exists(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl<I: Into<String>> FromIterator<I> for KeyRegistry {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        KeyRegistry {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
