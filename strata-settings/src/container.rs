//! Hierarchical typed settings scopes
//!
//! A [`SettingContainer`] holds the settings of one scope (global, one
//! extruder, one mesh) and borrows its parent scope. Lookups walk up the parent
//! chain until a scope holds the key. Because the parent is a shared borrow the
//! compiler guarantees it outlives the child and that the chain is acyclic.

use crate::convert::SettingValue;
use crate::error::{SettingsError, SettingsResult};
use crate::source::SettingsSource;
use std::collections::HashMap;

/// One stored setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Raw setting text
    pub value: String,
    /// Extruder whose scope should supply this setting's effective value
    ///
    /// Only [`SettingContainer::get_limited`] honours this marker; plain
    /// [`SettingContainer::get`] resolves the stored text as-is.
    pub limit_to_extruder: Option<usize>,
}

impl Setting {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            limit_to_extruder: None,
        }
    }
}

/// Extruder scopes addressable by extruder number
pub trait ExtruderRegistry {
    fn extruder_count(&self) -> usize;

    fn extruder(&self, index: usize) -> Option<&SettingContainer<'_>>;
}

impl<'p> ExtruderRegistry for [SettingContainer<'p>] {
    fn extruder_count(&self) -> usize {
        self.len()
    }

    fn extruder(&self, index: usize) -> Option<&SettingContainer<'_>> {
        self.get(index)
    }
}

impl<'p> ExtruderRegistry for Vec<SettingContainer<'p>> {
    fn extruder_count(&self) -> usize {
        self.len()
    }

    fn extruder(&self, index: usize) -> Option<&SettingContainer<'_>> {
        self.get(index)
    }
}

/// A scope of settings with an optional parent scope
#[derive(Debug, Clone, Default)]
pub struct SettingContainer<'p> {
    settings: HashMap<String, Setting>,
    parent: Option<&'p SettingContainer<'p>>,
}

impl<'p> SettingContainer<'p> {
    /// Create a root scope
    pub fn new() -> Self {
        Self {
            settings: HashMap::new(),
            parent: None,
        }
    }

    /// Create a scope that falls back to `parent`
    pub fn with_parent(parent: &'p SettingContainer<'p>) -> Self {
        Self {
            settings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&'p SettingContainer<'p>> {
        self.parent
    }

    /// Insert or overwrite a setting
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), Setting::new(value));
    }

    /// Insert or overwrite a setting whose value belongs to an extruder's scope
    pub fn add_limited(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        limit_to_extruder: Option<usize>,
    ) {
        self.settings.insert(
            key.into(),
            Setting {
                value: value.into(),
                limit_to_extruder,
            },
        );
    }

    /// Whether this scope itself (ignoring parents) holds `key`
    pub fn has_local(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn local_keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    /// The nearest setting for `key` along the parent chain
    pub fn find_setting(&self, key: &str) -> Option<&Setting> {
        let mut scope = self;
        loop {
            if let Some(setting) = scope.settings.get(key) {
                return Some(setting);
            }
            scope = scope.parent?;
        }
    }

    /// Resolve `key` to its text along the parent chain
    pub fn resolve(&self, key: &str) -> SettingsResult<&str> {
        self.find_setting(key)
            .map(|setting| setting.value.as_str())
            .ok_or_else(|| missing(key))
    }

    /// Resolve `key` and convert it to `T`
    pub fn get<T: SettingValue>(&self, key: &str) -> SettingsResult<T> {
        let text = self.resolve(key)?;
        Ok(T::from_setting(key, text))
    }

    /// Resolve `key` honouring the setting's extruder limit.
    ///
    /// When the nearest setting for `key` is limited to an extruder, the value
    /// is resolved in that extruder's scope instead (which may in turn fall
    /// back to its own parents). Limits found in the extruder's scope are not
    /// followed again.
    pub fn get_limited<T, E>(&self, key: &str, extruders: &E) -> SettingsResult<T>
    where
        T: SettingValue,
        E: ExtruderRegistry + ?Sized,
    {
        let setting = self.find_setting(key).ok_or_else(|| missing(key))?;

        match setting.limit_to_extruder {
            None => Ok(T::from_setting(key, &setting.value)),
            Some(index) => {
                let extruder = extruders.extruder(index).ok_or_else(|| {
                    SettingsError::ExtruderOutOfRange {
                        index: index as i64,
                        count: extruders.extruder_count(),
                    }
                })?;
                log::debug!("Setting '{}' resolved through extruder {}", key, index);
                extruder.get(key)
            }
        }
    }

    /// Resolve `key` as an extruder number and return that extruder's scope
    pub fn get_extruder<'e, E>(
        &self,
        key: &str,
        extruders: &'e E,
    ) -> SettingsResult<&'e SettingContainer<'e>>
    where
        E: ExtruderRegistry + ?Sized,
    {
        let index: i64 = self.get(key)?;
        let count = extruders.extruder_count();
        usize::try_from(index)
            .ok()
            .and_then(|i| extruders.extruder(i))
            .ok_or(SettingsError::ExtruderOutOfRange { index, count })
    }
}

/// Log and build the error for a key no scope could resolve.
pub(crate) fn missing(key: &str) -> SettingsError {
    log::error!(
        "Trying to retrieve unregistered setting with no value given: '{}'",
        key
    );
    SettingsError::missing_key(key)
}

impl<'p> SettingsSource for SettingContainer<'p> {
    fn get_setting_string(&self, key: &str) -> SettingsResult<&str> {
        self.resolve(key)
    }
}
