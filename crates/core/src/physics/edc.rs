//! Eddy dissipation concept (EDC) turbulence-chemistry closure
//!
//! Reactions are confined to fine structures whose size and residence time follow from
//! the Kolmogorov scales of the cell:
//!
//! ```text
//! γ = C_ξ · (ν·ε/k²)^¼          fine-structure length fraction
//! τ = C_τ · (ν/ε)^½             fine-structure residence time
//! ```
//!
//! The closure reports `(γ², τ)`. The host multiplies raw kinetic rates by the exchange
//! frequency `γ²/τ`; this module never touches the rates itself.
//!
//! Above `regime_temperature` the constants are ramped linearly over
//! `regime_ramp_width` to `regime_max_multiplier`: `C_ξ` is multiplied and `C_τ` divided,
//! giving larger, faster-mixing fine structures in hot regions.
//!
//! # References
//! - Magnussen, B.F. (1981). "On the structure of turbulence and a generalized eddy
//!   dissipation concept for chemical reaction in turbulent flow." 19th AIAA Aerospace
//!   Science Meeting.

use crate::config::EdcParams;
use crate::core_types::gas::GasCellState;
use serde::{Deserialize, Serialize};

/// Time scale reported when no fine structures exist (s)
pub const EDC_INFINITE_TIME_SCALE: f64 = 1.0e30;

/// Fine-structure state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdcClosureResult {
    /// `γ²`, clamped to [0, 1]
    pub reacting_volume_fraction: f64,
    /// `τ` (s), [`EDC_INFINITE_TIME_SCALE`] when degenerate
    pub mixing_time_scale: f64,
}

impl EdcClosureResult {
    /// No fine-structure reaction
    pub const QUIESCENT: Self = Self {
        reacting_volume_fraction: 0.0,
        mixing_time_scale: EDC_INFINITE_TIME_SCALE,
    };

    /// Whether the closure allows any reaction
    #[inline]
    pub fn is_reacting(&self) -> bool {
        self.reacting_volume_fraction > 0.0 && self.mixing_time_scale < EDC_INFINITE_TIME_SCALE
    }

    /// Fine-structure exchange frequency `γ²/τ` (1/s); zero when not reacting
    #[inline]
    pub fn exchange_rate(&self) -> f64 {
        if self.is_reacting() {
            self.reacting_volume_fraction / self.mixing_time_scale
        } else {
            0.0
        }
    }
}

impl Default for EdcClosureResult {
    fn default() -> Self {
        Self::QUIESCENT
    }
}

/// Constant multiplier of the high-temperature regime, in `[1, regime_max_multiplier]`
#[inline]
pub fn regime_multiplier(params: &EdcParams, temperature: f64) -> f64 {
    if temperature <= params.regime_temperature {
        return 1.0;
    }
    let ramp = ((temperature - params.regime_temperature) / params.regime_ramp_width).min(1.0);
    1.0 + (params.regime_max_multiplier - 1.0) * ramp
}

/// Evaluate the closure from raw turbulence quantities.
///
/// Returns [`EdcClosureResult::QUIESCENT`] when `k` or `ε` is below the threshold, and
/// also when `ν` is not a positive finite number (no meaningful Kolmogorov scale).
pub fn edc_closure(
    params: &EdcParams,
    turbulent_kinetic_energy: f64,
    dissipation_rate: f64,
    kinematic_viscosity: f64,
    temperature: f64,
) -> EdcClosureResult {
    let k = turbulent_kinetic_energy;
    let eps = dissipation_rate;
    let nu = kinematic_viscosity;

    // NaN fails both comparisons and counts as below threshold
    let turbulent = k >= params.turbulence_threshold
        && eps >= params.turbulence_threshold
        && k.is_finite()
        && eps.is_finite();
    let viscous = nu.is_finite() && nu > 0.0;
    if !turbulent || !viscous {
        return EdcClosureResult::QUIESCENT;
    }

    let m = regime_multiplier(params, temperature);
    let c_xi = params.c_xi * m;
    let c_tau = params.c_tau / m;

    let gamma = c_xi * (nu * eps / (k * k)).powf(0.25);
    let tau = c_tau * (nu / eps).sqrt();

    EdcClosureResult {
        reacting_volume_fraction: (gamma * gamma).min(1.0),
        mixing_time_scale: tau,
    }
}

/// Evaluate the closure for a cell snapshot
#[inline]
pub fn edc_closure_for_cell(params: &EdcParams, cell: &GasCellState) -> EdcClosureResult {
    edc_closure(
        params,
        cell.turbulent_kinetic_energy,
        cell.dissipation_rate,
        cell.kinematic_viscosity,
        *cell.temperature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_turbulence_is_quiescent_for_any_viscosity() {
        let params = EdcParams::default();
        for nu in [0.0, 1e-5, 1.0, f64::NAN] {
            assert_eq!(edc_closure(&params, 1e-11, 10.0, nu, 1000.0), EdcClosureResult::QUIESCENT);
            assert_eq!(edc_closure(&params, 1.0, 1e-11, nu, 1000.0), EdcClosureResult::QUIESCENT);
            assert_eq!(edc_closure(&params, 0.0, 0.0, nu, 2500.0), EdcClosureResult::QUIESCENT);
        }
        assert_eq!(EdcClosureResult::QUIESCENT.exchange_rate(), 0.0);
    }

    #[test]
    fn test_closure_below_regime_temperature() {
        let params = EdcParams::default();
        let (k, eps, nu) = (1.0, 10.0, 1.5e-5);
        let result = edc_closure(&params, k, eps, nu, 1200.0);

        let gamma = 2.1377 * (nu * eps / (k * k)).powf(0.25);
        assert_relative_eq!(result.reacting_volume_fraction, gamma * gamma, max_relative = 1e-12);
        assert_relative_eq!(
            result.mixing_time_scale,
            0.4083 * (nu / eps).sqrt(),
            max_relative = 1e-12
        );
        assert!(result.is_reacting());
        assert!(result.exchange_rate() > 0.0);
    }

    #[test]
    fn test_regime_ramp() {
        let params = EdcParams::default();
        assert_eq!(regime_multiplier(&params, 1000.0), 1.0);
        assert_eq!(regime_multiplier(&params, 1500.0), 1.0);
        assert_relative_eq!(regime_multiplier(&params, 1750.0), 1.25);
        assert_relative_eq!(regime_multiplier(&params, 2000.0), 1.5);
        assert_relative_eq!(regime_multiplier(&params, 3000.0), 1.5);
    }

    #[test]
    fn test_hot_cell_mixes_faster() {
        let params = EdcParams::default();
        let cool = edc_closure(&params, 1.0, 10.0, 1.5e-5, 1400.0);
        let hot = edc_closure(&params, 1.0, 10.0, 1.5e-5, 2200.0);
        assert_relative_eq!(
            hot.reacting_volume_fraction,
            cool.reacting_volume_fraction * 1.5 * 1.5,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            hot.mixing_time_scale,
            cool.mixing_time_scale / 1.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fraction_clamped_to_unity() {
        let params = EdcParams::default();
        // Very weak k relative to ε·ν pushes γ above 1
        let result = edc_closure(&params, 1e-3, 1e3, 1e-3, 1000.0);
        assert_eq!(result.reacting_volume_fraction, 1.0);
        assert!(result.mixing_time_scale > 0.0);
    }
}
