//! Settings document loading and environment variable handling

use crate::base::SettingsScope;
use crate::container::SettingContainer;
use crate::error::{SettingsError, SettingsResult};
use crate::registry::SettingRegistry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Settings for one global scope and any number of extruder scopes
///
/// ```yaml
/// global:
///   layer_height: 0.1
///   support_line_width: 0.4
/// limit_to_extruder:
///   support_line_width: 1
/// extruders:
///   - machine_nozzle_size: 0.4
///   - machine_nozzle_size: 0.8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    /// Global scope settings
    #[serde(with = "crate::utils::serde_setting_map")]
    pub global: BTreeMap<String, String>,

    /// Global keys whose value belongs to an extruder's scope
    pub limit_to_extruder: BTreeMap<String, usize>,

    /// Per-extruder settings, indexed by extruder number
    #[serde(with = "crate::utils::serde_setting_map_list")]
    pub extruders: Vec<BTreeMap<String, String>>,
}

impl SettingsDocument {
    /// Set a global setting
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.global.insert(key.into(), value.into());
    }

    /// Set a setting on extruder `index`, creating empty extruder scopes as needed
    pub fn set_extruder(&mut self, index: usize, key: impl Into<String>, value: impl Into<String>) {
        if self.extruders.len() <= index {
            self.extruders.resize_with(index + 1, BTreeMap::new);
        }
        self.extruders[index].insert(key.into(), value.into());
    }

    pub fn extruder_count(&self) -> usize {
        self.extruders.len()
    }

    /// Add the global settings, with their extruder limits, to `container`
    pub fn apply_global(&self, container: &mut SettingContainer<'_>) {
        for (key, value) in &self.global {
            container.add_limited(
                key.as_str(),
                value.as_str(),
                self.limit_to_extruder.get(key).copied(),
            );
        }
    }

    /// Add the settings of extruder `index` to `container`
    pub fn apply_extruder(
        &self,
        index: usize,
        container: &mut SettingContainer<'_>,
    ) -> SettingsResult<()> {
        let settings = self
            .extruders
            .get(index)
            .ok_or(SettingsError::ExtruderOutOfRange {
                index: index as i64,
                count: self.extruders.len(),
            })?;
        for (key, value) in settings {
            container.add(key.as_str(), value.as_str());
        }
        Ok(())
    }

    /// Write the global settings into a legacy store, checking each key against `registry`
    pub fn apply_to_scope<'a, S>(&self, scope: &mut S, registry: &dyn SettingRegistry)
    where
        S: SettingsScope<'a> + ?Sized,
    {
        for (key, value) in &self.global {
            scope.set_setting(key, value, registry);
        }
    }
}

/// Parse a `key=value` command-line pair.
///
/// A value wrapped in double quotes is unquoted and unescaped, so the pairs
/// produced by [`crate::SettingsBase::get_all_local_settings_string`] read back
/// to the original text.
pub fn parse_setting_arg(arg: &str) -> SettingsResult<(String, String)> {
    let (key, value) = arg.split_once('=').ok_or_else(|| {
        SettingsError::InvalidArgument(format!("Expected key=value, got '{}'", arg))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SettingsError::InvalidArgument(format!(
            "Missing setting key in '{}'",
            arg
        )));
    }

    let value = match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(quoted) => unescape(quoted),
        None => value.to_string(),
    };
    Ok((key.to_string(), value))
}

/// Reverse of [`crate::base::escape`]. Unknown escapes keep the escaped character.
fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => result.push('\u{07}'),
            Some('b') => result.push('\u{08}'),
            Some('f') => result.push('\u{0c}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('v') => result.push('\u{0b}'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

/// Settings loader with environment variable support
pub struct SettingsLoader {
    /// Environment variable prefix
    prefix: String,
}

impl SettingsLoader {
    /// Create a new loader with the default prefix
    pub fn new() -> Self {
        Self {
            prefix: "STRATA".to_string(),
        }
    }

    /// Create a new loader with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load a settings document from a YAML or JSON file, then apply environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> SettingsResult<SettingsDocument> {
        let content = std::fs::read_to_string(path)?;
        self.from_str(&content)
    }

    /// Load a settings document from YAML or JSON text, then apply environment overrides
    pub fn from_str(&self, content: &str) -> SettingsResult<SettingsDocument> {
        let mut document: SettingsDocument = if content.trim().is_empty() {
            SettingsDocument::default()
        } else {
            serde_yaml::from_str(content)?
        };
        self.apply_env_overrides(&mut document)?;
        Ok(document)
    }

    /// Build a document from environment overrides only
    pub fn from_env(&self) -> SettingsResult<SettingsDocument> {
        let mut document = SettingsDocument::default();
        self.apply_env_overrides(&mut document)?;
        Ok(document)
    }

    /// Load from a file when one is given, otherwise from the environment
    pub fn load(&self, path: Option<impl AsRef<Path>>) -> SettingsResult<SettingsDocument> {
        match path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Copy every `<PREFIX>_SET_<KEY>` variable into the global scope as `key`.
    ///
    /// Variables whose names are not UTF-8 cannot carry the prefix and are
    /// skipped. A matching variable with a non-UTF-8 value is an error.
    fn apply_env_overrides(&self, document: &mut SettingsDocument) -> SettingsResult<()> {
        let marker = format!("{}_SET_", self.prefix);
        for (name, value) in std::env::vars_os() {
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(key) = name.strip_prefix(&marker) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let value = value.into_string().map_err(|_| {
                SettingsError::InvalidArgument(format!(
                    "Environment variable {} is not valid UTF-8",
                    name
                ))
            })?;
            let key = key.to_lowercase();
            log::debug!("Environment override {} -> {}", name, key);
            document.set(key, value);
        }
        Ok(())
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
