//! Conversion of resolved setting text into typed values
//!
//! Every typed lookup first resolves the key to text and then converts it with
//! [`SettingValue::from_setting`]. Conversions never fail: numbers are read
//! permissively and text without a numeric prefix reads as zero.

use crate::parse::number::{float_or_zero, int_or_zero};
use crate::parse::{FMatrix3x3, FlowTempGraph};
use crate::types::{
    AngleDegrees, AngleRadians, Coord, DraftShieldHeightLimitation, Duration, GCodeFlavor,
    LayerIndex, Ratio, Temperature, Velocity,
};

/// A type a setting's text can be converted into
pub trait SettingValue: Sized {
    /// Convert the resolved `text` of setting `key`.
    ///
    /// `key` is only used for diagnostics.
    fn from_setting(key: &str, text: &str) -> Self;
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl SettingValue for String {
    fn from_setting(_key: &str, text: &str) -> Self {
        text.to_string()
    }
}

impl SettingValue for i32 {
    fn from_setting(_key: &str, text: &str) -> Self {
        clamp_to_i32(int_or_zero(text))
    }
}

impl SettingValue for i64 {
    fn from_setting(_key: &str, text: &str) -> Self {
        int_or_zero(text)
    }
}

/// Negative text reads as zero.
impl SettingValue for usize {
    fn from_setting(_key: &str, text: &str) -> Self {
        usize::try_from(int_or_zero(text)).unwrap_or(0)
    }
}

impl SettingValue for u32 {
    fn from_setting(_key: &str, text: &str) -> Self {
        u32::try_from(int_or_zero(text).max(0)).unwrap_or(u32::MAX)
    }
}

impl SettingValue for f64 {
    fn from_setting(_key: &str, text: &str) -> Self {
        float_or_zero(text)
    }
}

/// `on`, `yes`, `true` and `True` are true; anything else is true when it
/// reads as a nonzero integer.
impl SettingValue for bool {
    fn from_setting(key: &str, text: &str) -> Self {
        match text {
            "on" | "yes" | "true" | "True" => true,
            _ => i32::from_setting(key, text) != 0,
        }
    }
}

impl SettingValue for LayerIndex {
    fn from_setting(key: &str, text: &str) -> Self {
        LayerIndex(i32::from_setting(key, text))
    }
}

impl SettingValue for Coord {
    fn from_setting(key: &str, text: &str) -> Self {
        Coord::from_millimetres(f64::from_setting(key, text))
    }
}

impl SettingValue for AngleDegrees {
    fn from_setting(key: &str, text: &str) -> Self {
        AngleDegrees(f64::from_setting(key, text))
    }
}

impl SettingValue for AngleRadians {
    fn from_setting(key: &str, text: &str) -> Self {
        AngleRadians::from_degrees(f64::from_setting(key, text))
    }
}

impl SettingValue for Temperature {
    fn from_setting(key: &str, text: &str) -> Self {
        Temperature(f64::from_setting(key, text))
    }
}

impl SettingValue for Velocity {
    fn from_setting(key: &str, text: &str) -> Self {
        Velocity::new(f64::from_setting(key, text))
    }
}

impl SettingValue for Ratio {
    fn from_setting(key: &str, text: &str) -> Self {
        Ratio::from_percent(f64::from_setting(key, text))
    }
}

impl SettingValue for Duration {
    fn from_setting(key: &str, text: &str) -> Self {
        Duration(f64::from_setting(key, text))
    }
}

impl SettingValue for DraftShieldHeightLimitation {
    fn from_setting(_key: &str, text: &str) -> Self {
        DraftShieldHeightLimitation::from_setting_text(text)
    }
}

impl SettingValue for GCodeFlavor {
    fn from_setting(_key: &str, text: &str) -> Self {
        GCodeFlavor::from_setting_text(text)
    }
}

impl SettingValue for FlowTempGraph {
    fn from_setting(key: &str, text: &str) -> Self {
        FlowTempGraph::parse(text, key)
    }
}

impl SettingValue for FMatrix3x3 {
    fn from_setting(_key: &str, text: &str) -> Self {
        FMatrix3x3::parse(text)
    }
}
