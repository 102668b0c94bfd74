//! Error type for the Rust-facing API boundary.
//!
//! The physics kernels never fail: degenerate inputs are replaced by sentinels and
//! non-physical intermediates are clamped. Errors are only raised where a caller hands
//! the kernel something it cannot interpret at all (a bad parameter set, a zero-volume
//! cell, a non-positive step).

use thiserror::Error;

/// Errors raised when configuration or host inputs are malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticsError {
    /// A configuration value is outside its physical range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Dotted path of the parameter, e.g. `salt.mw_hydrate`
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A control volume reported a zero, negative or non-finite volume
    #[error("cell {cell} has invalid volume {volume} m³")]
    InvalidCellVolume {
        /// Cell index
        cell: usize,
        /// Reported volume
        volume: f64,
    },

    /// A cell index does not exist in the host domain
    #[error("cell index {cell} out of range (domain has {count} cells)")]
    CellOutOfRange {
        /// Requested cell
        cell: usize,
        /// Number of cells in the domain
        count: usize,
    },

    /// The integration step is zero, negative or non-finite
    #[error("time step must be finite and positive, got {0} s")]
    InvalidTimeStep(f64),

    /// A particle record cannot be initialised or advanced
    #[error("particle {id}: {reason}")]
    InvalidParticle {
        /// Host particle identifier
        id: u64,
        /// What is wrong with it
        reason: String,
    },
}

impl KineticsError {
    /// Shorthand for [`KineticsError::InvalidParameter`]
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Validate an integration step
///
/// # Errors
///
/// Returns [`KineticsError::InvalidTimeStep`] when `dt` is not finite and positive.
pub fn check_time_step(dt: f64) -> Result<(), KineticsError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidTimeStep(dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_step_validation() {
        assert!(check_time_step(0.01).is_ok());
        assert_eq!(check_time_step(0.0), Err(KineticsError::InvalidTimeStep(0.0)));
        assert!(check_time_step(f64::NAN).is_err());
        assert!(check_time_step(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = KineticsError::parameter("edc.c_xi", "must be positive");
        assert_eq!(err.to_string(), "invalid parameter `edc.c_xi`: must be positive");

        let err = KineticsError::CellOutOfRange { cell: 9, count: 4 };
        assert_eq!(err.to_string(), "cell index 9 out of range (domain has 4 cells)");
    }
}
