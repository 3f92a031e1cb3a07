//! Scalar setting value types
//!
//! Thin wrappers that give setting values a unit. Apart from [`Velocity`]
//! (clamped to non-negative) and [`Ratio`] (percent text divided by 100) the
//! conversions happen in [`crate::convert`]; these types only carry the value.

use std::fmt;

/// A fraction, stored as `percent / 100`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Ratio(pub f64);

impl Ratio {
    pub fn from_percent(percent: f64) -> Self {
        Ratio(percent / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// A speed in mm/s, never negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Velocity(f64);

impl Velocity {
    /// Create a velocity, clamping negative input to zero
    pub fn new(value: f64) -> Self {
        Velocity(value.max(0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// A duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Duration(pub f64);

impl Duration {
    pub fn seconds(self) -> f64 {
        self.0
    }
}

/// A temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Temperature(pub f64);

impl Temperature {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A layer number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LayerIndex(pub i32);

impl LayerIndex {
    pub fn value(self) -> i32 {
        self.0
    }
}

/// A fixed-point length in micrometres
///
/// Setting text carries millimetres; the conversion multiplies by 1000 and
/// truncates toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord(pub i64);

impl Coord {
    pub fn from_millimetres(mm: f64) -> Self {
        Coord((mm * 1000.0) as i64)
    }

    pub fn microns(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_clamps_negative() {
        assert_eq!(Velocity::new(-10.0).value(), 0.0);
        assert_eq!(Velocity::new(42.5).value(), 42.5);
    }

    #[test]
    fn test_ratio_from_percent() {
        assert!((Ratio::from_percent(45.0).value() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_coord_truncates_toward_zero() {
        assert_eq!(Coord::from_millimetres(0.2).microns(), 200);
        assert_eq!(Coord::from_millimetres(1.0005).microns(), 1000);
        assert_eq!(Coord::from_millimetres(-0.0015).microns(), -1);
    }
}
