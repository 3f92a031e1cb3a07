//! Strongly-typed setting values

pub mod angle;
pub mod enums;
pub mod scalar;

pub use angle::{AngleDegrees, AngleRadians};
pub use enums::{DraftShieldHeightLimitation, GCodeFlavor};
pub use scalar::{Coord, Duration, LayerIndex, Ratio, Temperature, Velocity};
