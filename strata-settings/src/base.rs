//! Legacy string-only settings store
//!
//! [`SettingsBase`] keeps plain `key → text` entries and resolves keys through
//! per-key overrides and a parent scope. [`SettingsMessenger`] is a stand-in
//! that forwards everything to the store that owns the state.

use crate::container::missing;
use crate::error::SettingsResult;
use crate::registry::SettingRegistry;
use crate::source::SettingsSource;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Write interface of a legacy settings scope
pub trait SettingsScope<'a>: SettingsSource {
    /// Store `value` for `key`.
    ///
    /// Keys unknown to `registry` are written anyway, with a warning.
    fn set_setting(&mut self, key: &str, value: &str, registry: &dyn SettingRegistry);

    /// Make `key` resolve entirely through `target` from now on.
    fn set_setting_inherit_base(&mut self, key: &str, target: &'a dyn SettingsSource);
}

/// Flat settings store with per-key overrides and an optional parent
#[derive(Default)]
pub struct SettingsBase<'a> {
    setting_values: BTreeMap<String, String>,
    setting_inherit_base: HashMap<String, &'a dyn SettingsSource>,
    parent: Option<&'a dyn SettingsSource>,
}

impl<'a> SettingsBase<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: &'a dyn SettingsSource) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Whether this store itself holds a value for `key`
    pub fn has_local(&self, key: &str) -> bool {
        self.setting_values.contains_key(key)
    }

    /// Whether `key` is redirected to another scope
    pub fn has_inherit_base(&self, key: &str) -> bool {
        self.setting_inherit_base.contains_key(key)
    }

    /// Locally stored entries, in key order
    pub fn local_settings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.setting_values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Render local, non-empty entries as command-line arguments.
    ///
    /// Each entry becomes ` -s key="value"` with the value escaped, so the
    /// result can be appended to a command line for a child process.
    pub fn get_all_local_settings_string(&self) -> String {
        let mut args = String::new();
        for (key, value) in &self.setting_values {
            if value.is_empty() {
                continue;
            }
            args.push_str(" -s ");
            args.push_str(key);
            args.push_str("=\"");
            args.push_str(&escape(value));
            args.push('"');
        }
        args
    }
}

impl<'a> SettingsSource for SettingsBase<'a> {
    /// Resolution order: override target, local value, parent.
    ///
    /// The override is checked before the local value on purpose, so a key
    /// registered with `set_setting_inherit_base` always reads from its target.
    /// Stores that consult the local value first let a stale local copy shadow
    /// the override.
    fn get_setting_string(&self, key: &str) -> SettingsResult<&str> {
        if let Some(target) = self.setting_inherit_base.get(key) {
            return target.get_setting_string(key);
        }
        if let Some(value) = self.setting_values.get(key) {
            return Ok(value.as_str());
        }
        if let Some(parent) = self.parent {
            return parent.get_setting_string(key);
        }
        Err(missing(key))
    }
}

impl<'a> SettingsScope<'a> for SettingsBase<'a> {
    fn set_setting(&mut self, key: &str, value: &str, registry: &dyn SettingRegistry) {
        if !registry.setting_exists(key) {
            log::warn!("Setting an unregistered setting {} to {}", key, value);
        }
        self.setting_values.insert(key.to_string(), value.to_string());
    }

    fn set_setting_inherit_base(&mut self, key: &str, target: &'a dyn SettingsSource) {
        self.setting_inherit_base.insert(key.to_string(), target);
    }
}

impl fmt::Debug for SettingsBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overridden: Vec<&String> = self.setting_inherit_base.keys().collect();
        overridden.sort();
        f.debug_struct("SettingsBase")
            .field("setting_values", &self.setting_values)
            .field("setting_inherit_base", &overridden)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Forwards every operation to the store that owns the settings
pub struct SettingsMessenger<'o, S: ?Sized> {
    owner: &'o mut S,
}

impl<'o, S: ?Sized> SettingsMessenger<'o, S> {
    pub fn new(owner: &'o mut S) -> Self {
        Self { owner }
    }
}

impl<'o, S: SettingsSource + ?Sized> SettingsSource for SettingsMessenger<'o, S> {
    fn get_setting_string(&self, key: &str) -> SettingsResult<&str> {
        self.owner.get_setting_string(key)
    }
}

impl<'a, 'o, S: SettingsScope<'a> + ?Sized> SettingsScope<'a> for SettingsMessenger<'o, S> {
    fn set_setting(&mut self, key: &str, value: &str, registry: &dyn SettingRegistry) {
        self.owner.set_setting(key, value, registry);
    }

    fn set_setting_inherit_base(&mut self, key: &str, target: &'a dyn SettingsSource) {
        self.owner.set_setting_inherit_base(key, target);
    }
}

/// Backslash-escape characters that would break a quoted shell argument.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\u{07}' => escaped.push_str("\\a"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0b}' => escaped.push_str("\\v"),
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            ' ' => escaped.push_str("\\ "),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SettingContainer;
    use crate::registry::KeyRegistry;
    use crate::source::TypedSettings;
    use crate::types::Velocity;

    fn registry() -> KeyRegistry {
        ["layer_height", "speed_print", "machine_name"].into_iter().collect()
    }

    #[test]
    fn test_local_then_parent() {
        let registry = registry();
        let mut root = SettingsBase::new();
        root.set_setting("speed_print", "60", &registry);
        root.set_setting("layer_height", "0.2", &registry);

        let mut child = SettingsBase::with_parent(&root);
        child.set_setting("layer_height", "0.1", &registry);

        assert_eq!(child.get_setting_string("layer_height").unwrap(), "0.1");
        assert_eq!(child.get_setting_string("speed_print").unwrap(), "60");
        assert!(child.get_setting_string("unknown").unwrap_err().is_missing_key());
    }

    #[test]
    fn test_unregistered_key_still_written() {
        let registry = registry();
        let mut store = SettingsBase::new();
        store.set_setting("brand_new_setting", "42", &registry);
        assert_eq!(store.get_setting_string("brand_new_setting").unwrap(), "42");
    }

    #[test]
    fn test_unregistered_key_logs_warning() {
        testing_logger::setup();
        let registry = registry();
        let mut store = SettingsBase::new();
        store.set_setting("layer_height", "0.2", &registry);
        store.set_setting("brand_new_setting", "42", &registry);

        testing_logger::validate(|logs| {
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].level, log::Level::Warn);
            assert!(logs[0].body.contains("brand_new_setting"));
            assert!(logs[0].body.contains("42"));
        });
    }

    #[test]
    fn test_missing_key_logs_error() {
        testing_logger::setup();
        let registry = registry();
        let mut root = SettingsBase::new();
        root.set_setting("speed_print", "60", &registry);
        let child = SettingsBase::with_parent(&root);
        assert!(child.get_setting_string("retraction_amount").is_err());

        testing_logger::validate(|logs| {
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].level, log::Level::Error);
            assert!(logs[0].body.contains("'retraction_amount'"));
        });
    }

    #[test]
    fn test_inherit_base_wins_over_local_and_parent() {
        let registry = registry();
        let mut root = SettingsBase::new();
        root.set_setting("speed_print", "60", &registry);

        let mut target_parent = SettingsBase::new();
        target_parent.set_setting("speed_print", "25", &registry);
        let target = SettingsBase::with_parent(&target_parent);

        let mut child = SettingsBase::with_parent(&root);
        child.set_setting("speed_print", "90", &registry);
        child.set_setting_inherit_base("speed_print", &target);

        // the target's own parent chain supplies the value
        assert_eq!(child.get_setting_string("speed_print").unwrap(), "25");
        assert!(child.has_local("speed_print"));
        assert!(child.has_inherit_base("speed_print"));
    }

    #[test]
    fn test_inherit_base_missing_in_target_is_error() {
        let registry = registry();
        let target = SettingsBase::new();
        let mut child = SettingsBase::new();
        child.set_setting("speed_print", "90", &registry);
        child.set_setting_inherit_base("speed_print", &target);
        assert!(child.get_setting_string("speed_print").unwrap_err().is_missing_key());
    }

    #[test]
    fn test_typed_container_as_parent() {
        let mut global = SettingContainer::new();
        global.add("speed_print", "-5");
        let store = SettingsBase::with_parent(&global);
        let speed: Velocity = store.get("speed_print").unwrap();
        assert_eq!(speed.value(), 0.0);
    }

    #[test]
    fn test_messenger_forwards_to_owner() {
        let registry = registry();
        let mut fallback = SettingsBase::new();
        fallback.set_setting("machine_name", "Printer", &registry);

        let mut owner = SettingsBase::new();
        {
            let mut messenger = SettingsMessenger::new(&mut owner);
            messenger.set_setting("layer_height", "0.15", &registry);
            messenger.set_setting_inherit_base("machine_name", &fallback);
            assert_eq!(messenger.get_setting_string("layer_height").unwrap(), "0.15");
            assert_eq!(messenger.get::<f64>("layer_height").unwrap(), 0.15);
        }

        assert_eq!(owner.get_setting_string("layer_height").unwrap(), "0.15");
        assert_eq!(owner.get_setting_string("machine_name").unwrap(), "Printer");
        assert_eq!(owner.local_settings().count(), 1);
    }

    #[test]
    fn test_all_local_settings_string() {
        let registry = registry();
        let mut root = SettingsBase::new();
        root.set_setting("speed_print", "60", &registry);

        let mut store = SettingsBase::with_parent(&root);
        store.set_setting("layer_height", "0.1", &registry);
        store.set_setting("machine_name", "My \"Big\" Printer", &registry);
        store.set_setting("empty", "", &registry);

        assert_eq!(
            store.get_all_local_settings_string(),
            " -s layer_height=\"0.1\" -s machine_name=\"My\\ \\\"Big\\\"\\ Printer\""
        );
        assert_eq!(SettingsBase::new().get_all_local_settings_string(), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a b"), "a\\ b");
        assert_eq!(escape("it's"), "it\\'s");
        assert_eq!(escape("c:\\dir"), "c:\\\\dir");
        assert_eq!(escape("line\nbreak\t"), "line\\nbreak\\t");
    }
}
