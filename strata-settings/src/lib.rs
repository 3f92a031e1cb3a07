//! Hierarchical typed settings resolution for Strata
//!
//! Settings live in scopes that fall back to a parent scope. Values are stored
//! as text and converted on lookup into typed values (lengths, ratios, angles,
//! flow/temperature curves, transformation matrices and so on).

pub mod base;
pub mod container;
pub mod convert;
pub mod error;
pub mod loader;
pub mod parse;
pub mod registry;
pub mod source;
pub mod types;
pub mod utils;

// Re-export main types
pub use base::{SettingsBase, SettingsMessenger, SettingsScope};
pub use container::{ExtruderRegistry, Setting, SettingContainer};
pub use convert::SettingValue;
pub use error::{SettingsError, SettingsResult};
pub use loader::{parse_setting_arg, SettingsDocument, SettingsLoader};
pub use registry::{KeyRegistry, SettingRegistry};
pub use source::{SettingsSource, TypedSettings};

// Re-export value types
pub use parse::{FMatrix3x3, FlowTempGraph, FlowTempPoint};
pub use types::{
    AngleDegrees, AngleRadians, Coord, DraftShieldHeightLimitation, Duration, GCodeFlavor,
    LayerIndex, Ratio, Temperature, Velocity,
};
