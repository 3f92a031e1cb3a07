//! The read interface shared by every kind of settings scope

use crate::convert::SettingValue;
use crate::error::SettingsResult;

/// Anything that can resolve a setting key to its text
///
/// Implemented by [`crate::SettingContainer`], [`crate::SettingsBase`] and
/// [`crate::SettingsMessenger`], so any of them can serve as the parent or
/// override target of a [`crate::SettingsBase`].
pub trait SettingsSource {
    /// Resolve `key` to its text, walking whatever fallbacks this scope has.
    ///
    /// Fails with [`crate::SettingsError::MissingKey`] when no scope holds a value.
    fn get_setting_string(&self, key: &str) -> SettingsResult<&str>;
}

/// Typed lookups on top of any [`SettingsSource`]
pub trait TypedSettings: SettingsSource {
    /// Resolve `key` and convert its text to `T`
    fn get<T: SettingValue>(&self, key: &str) -> SettingsResult<T> {
        let text = self.get_setting_string(key)?;
        Ok(T::from_setting(key, text))
    }
}

impl<S: SettingsSource + ?Sized> TypedSettings for S {}
