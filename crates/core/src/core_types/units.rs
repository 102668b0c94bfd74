//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers for the quantities that cross the host boundary on particle and
//! cell records. Kernel functions in [`crate::physics`] work on raw `f64` values; the
//! wrappers exist so that a particle temperature cannot be handed to a slot expecting a
//! mass or a diameter.
//!
//! # Design Philosophy
//! - Every type uses f64: Arrhenius exponentials and `T⁴` radiation terms on
//!   microgram particles lose too much precision in f32
//! - Private inner fields with validated constructors
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use reacting_flow_core::core_types::units::{Kelvin, Kilograms};
//!
//! let t = Kelvin::new(650.0);
//! assert!((*t - 650.0).abs() < 1e-12);
//!
//! let m = Kilograms::new(1e-6);
//! assert_eq!(m.min(Kilograms::new(2e-6)), m);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Sub};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Implements the shared ordering/deref/display boilerplate for an f64 newtype.
macro_rules! f64_unit {
    ($name:ident, $unit:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.6e} {}", self.0, $unit)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

f64_unit!(Kelvin, "K");

impl Kelvin {
    /// Create a new Kelvin temperature. Asserts value >= absolute zero (0 K).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "Kelvin::new: value is below absolute zero (0 K)"
        );
        Kelvin(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Fourth power, used by the Stefan-Boltzmann exchange
    #[inline]
    #[must_use]
    pub fn pow4(self) -> f64 {
        self.0.powi(4)
    }
}

impl Sub for Kelvin {
    type Output = f64;
    /// Temperature difference in K (may be negative)
    fn sub(self, rhs: Kelvin) -> f64 {
        self.0 - rhs.0
    }
}

// ============================================================================
// MASS
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilograms(f64);

f64_unit!(Kilograms, "kg");

impl Kilograms {
    /// Zero mass
    pub const ZERO: Kilograms = Kilograms(0.0);

    /// Create a new mass in kilograms. Asserts value >= 0 (non-negative mass).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kilograms::new: negative mass is invalid");
        Kilograms(value)
    }

    /// Create a mass, flooring negative values at zero.
    ///
    /// Used after explicit mass updates where round-off can leave a value a few ulps
    /// below zero.
    #[inline]
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        Kilograms(value.max(0.0))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

f64_unit!(Meters, "m");

impl Meters {
    /// Create a new length. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Meters::new: negative length is invalid");
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Area of the sphere with this diameter, `π·d²`
    #[inline]
    #[must_use]
    pub fn sphere_surface(self) -> f64 {
        std::f64::consts::PI * self.0 * self.0
    }
}

// ============================================================================
// TIME
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f64);

f64_unit!(Seconds, "s");

impl Seconds {
    /// Create a new duration. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Seconds::new: negative duration is invalid");
        Seconds(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_ordering() {
        let cold = Kelvin::new(300.0);
        let hot = Kelvin::new(1200.0);
        assert!(cold < hot);
        assert_eq!(cold.max(hot), hot);
        assert!((hot - cold - 900.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "below absolute zero")]
    fn test_negative_kelvin_rejected() {
        let _ = Kelvin::new(-1.0);
    }

    #[test]
    fn test_saturating_mass_floors_round_off() {
        assert_eq!(Kilograms::saturating(-1e-22), Kilograms::ZERO);
        assert_eq!(*Kilograms::saturating(2e-6), 2e-6);
    }

    #[test]
    fn test_sphere_surface() {
        let d = Meters::new(2.0);
        assert!((d.sphere_surface() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_display_includes_unit() {
        assert!(format!("{}", Seconds::new(0.01)).ends_with(" s"));
    }
}
