//! Angle value types
//!
//! Settings store angles in degrees. [`AngleRadians`] uses clock arithmetic so
//! its value always lies in `[0, 2π)`, no matter the sign or magnitude of the
//! input or of the operands it is combined with.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// An angle in degrees, passed through unchanged from the setting text
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct AngleDegrees(pub f64);

impl AngleDegrees {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for AngleDegrees {
    fn from(value: f64) -> Self {
        AngleDegrees(value)
    }
}

impl From<AngleDegrees> for f64 {
    fn from(angle: AngleDegrees) -> Self {
        angle.0
    }
}

/// An angle in radians, normalised into `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct AngleRadians(f64);

/// Wrap a radian value into `[0, 2π)`. Infinite and NaN input becomes 0.
fn wrap(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }
    ((radians % TAU) + TAU) % TAU
}

impl AngleRadians {
    /// Create from a value already expressed in radians
    pub fn new(radians: f64) -> Self {
        AngleRadians(wrap(radians))
    }

    /// Create from a value expressed in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        AngleRadians(wrap(degrees * PI / 180.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0 * 180.0 / PI
    }
}

impl From<AngleRadians> for f64 {
    fn from(angle: AngleRadians) -> Self {
        angle.0
    }
}

impl Add for AngleRadians {
    type Output = AngleRadians;

    fn add(self, other: AngleRadians) -> AngleRadians {
        AngleRadians(wrap(self.0 + other.0))
    }
}

impl AddAssign for AngleRadians {
    fn add_assign(&mut self, other: AngleRadians) {
        self.0 = wrap(self.0 + other.0);
    }
}

impl Sub for AngleRadians {
    type Output = AngleRadians;

    fn sub(self, other: AngleRadians) -> AngleRadians {
        AngleRadians(wrap(self.0 - other.0))
    }
}

impl SubAssign for AngleRadians {
    fn sub_assign(&mut self, other: AngleRadians) {
        self.0 = wrap(self.0 - other.0);
    }
}

impl fmt::Display for AngleRadians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_from_degrees_wraps_full_turns() {
        let angle = AngleRadians::from_degrees(450.0);
        assert!((angle.value() - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_negative_degrees_wrap_into_range() {
        let angle = AngleRadians::from_degrees(-90.0);
        assert!((angle.value() - 3.0 * PI / 2.0).abs() < EPSILON);

        let full = AngleRadians::from_degrees(-360.0);
        assert!(full.value().abs() < EPSILON);
    }

    #[test]
    fn test_add_and_sub_wrap() {
        let mut angle = AngleRadians::from_degrees(270.0);
        angle += AngleRadians::from_degrees(180.0);
        assert!((angle.value() - PI / 2.0).abs() < EPSILON);

        angle -= AngleRadians::from_degrees(180.0);
        assert!((angle.value() - 3.0 * PI / 2.0).abs() < EPSILON);

        let sum = AngleRadians::new(PI) + AngleRadians::new(PI);
        assert!(sum.value() < EPSILON || (TAU - sum.value()) < EPSILON);
        assert!(sum.value() < TAU);
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        assert_eq!(AngleRadians::from_degrees(f64::INFINITY).value(), 0.0);
        assert_eq!(AngleRadians::from_degrees(f64::NEG_INFINITY).value(), 0.0);
        assert_eq!(AngleRadians::new(f64::NAN).value(), 0.0);

        let mut angle = AngleRadians::new(1.0);
        angle += AngleRadians::new(f64::MAX);
        assert!((0.0..TAU).contains(&angle.value()));
    }

    #[test]
    fn test_degrees_pass_through() {
        assert_eq!(AngleDegrees::from(725.5).value(), 725.5);
        assert_eq!(f64::from(AngleDegrees(-3.0)), -3.0);
    }

    proptest! {
        #[test]
        fn prop_from_degrees_in_range(degrees in -1.0e9f64..1.0e9f64) {
            let angle = AngleRadians::from_degrees(degrees);
            prop_assert!(angle.value() >= 0.0);
            prop_assert!(angle.value() < TAU);
        }

        #[test]
        fn prop_repeated_add_assign_stays_in_range(
            start in -720.0f64..720.0,
            steps in proptest::collection::vec(-1.0e6f64..1.0e6, 1..32),
        ) {
            let mut angle = AngleRadians::from_degrees(start);
            for step in steps {
                angle += AngleRadians::from_degrees(step);
                prop_assert!(angle.value() >= 0.0 && angle.value() < TAU);
                angle -= AngleRadians::new(step);
                prop_assert!(angle.value() >= 0.0 && angle.value() < TAU);
            }
        }
    }
}
